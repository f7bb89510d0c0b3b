//! Sequential scenario execution
//!
//! Every scenario runs regardless of earlier failures; the pass count is
//! folded through return values.

use crate::catalog::{self, Scenario};
use crate::harness::Harness;

/// Outcome of a full run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub passed: usize,
    pub total: usize,
}

impl RunSummary {
    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }
}

/// Run one suite in order, returning how many scenarios passed
pub fn run_suite(name: &str, scenarios: &[Scenario], harness: &Harness) -> usize {
    println!("Running {} tests", name);

    scenarios
        .iter()
        .filter(|scenario| run_scenario(scenario, harness))
        .count()
}

fn run_scenario(scenario: &Scenario, harness: &Harness) -> bool {
    println!("Running test: {}", scenario.label);

    match (scenario.run)(harness) {
        Ok(()) => true,
        Err(e) if e.is_assertion() => {
            println!("❌ Test failed: {}", e);
            false
        }
        Err(e) => {
            tracing::debug!(scenario = scenario.label, error = ?e, "scenario errored");
            println!("❌ Test error: {}", e);
            false
        }
    }
}

/// Run the positive then the negative suite and print the tally
pub fn run_suites(positive: &[Scenario], negative: &[Scenario], harness: &Harness) -> RunSummary {
    let mut passed = run_suite("positive", positive, harness);
    println!("\n--------------------------------\n");
    passed += run_suite("negative", negative, harness);

    let summary = RunSummary {
        passed,
        total: positive.len() + negative.len(),
    };
    println!("\nTests passed: {}/{}", summary.passed, summary.total);
    summary
}

/// Run the full catalog
pub fn run_all(harness: &Harness) -> RunSummary {
    run_suites(&catalog::positive(), &catalog::negative(), harness)
}
