//! Host-side tooling for formgate: scripted replay of form sessions.

pub mod replay;

pub use replay::{ReplayReport, Scenario, ScenarioError, Step, parse_scenario, replay};
