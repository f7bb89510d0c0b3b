//! The fixed scenario catalog
//!
//! Hand-maintained and ordered; there is no discovery. Add a scenario by
//! writing its check in `assertions` and listing it here.

use crate::assertions::{self, ScenarioResult};
use crate::harness::Harness;

pub struct Scenario {
    pub label: &'static str,
    pub run: fn(&Harness) -> ScenarioResult,
}

pub fn positive() -> Vec<Scenario> {
    vec![
        Scenario {
            label: "basic print test",
            run: assertions::print,
        },
        Scenario {
            label: "math",
            run: assertions::math,
        },
        Scenario {
            label: "offset semicolon",
            run: assertions::offset_semicolon,
        },
        Scenario {
            label: "variable number",
            run: assertions::var_num,
        },
        Scenario {
            label: "constant number",
            run: assertions::const_num,
        },
        Scenario {
            label: "variable change",
            run: assertions::var_change,
        },
        Scenario {
            label: "bracket scope",
            run: assertions::bracket_scope,
        },
        Scenario {
            label: "variable string",
            run: assertions::var_str,
        },
        Scenario {
            label: "constant float",
            run: assertions::const_float,
        },
        Scenario {
            label: "division no remain",
            run: assertions::div_noremain,
        },
    ]
}

pub fn negative() -> Vec<Scenario> {
    vec![
        Scenario {
            label: "missing semicolon",
            run: assertions::missing_semicolon,
        },
        Scenario {
            label: "wrong extension",
            run: assertions::wrong_extension,
        },
        Scenario {
            label: "change constant",
            run: assertions::change_const,
        },
        Scenario {
            label: "open bracket",
            run: assertions::open_bracket,
        },
    ]
}
