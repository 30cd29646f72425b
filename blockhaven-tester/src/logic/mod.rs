pub mod reports;
pub mod scenarios;
pub mod tester;

pub use scenarios::{all_keys, get_scenario, list_scenarios};
pub use tester::*;
