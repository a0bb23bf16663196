//! Scenario files: scripted setup, emitters, and checks on the outcome

mod actions;
mod definition;
mod executor;
mod results;
mod verification;

pub use actions::ScenarioAction;
pub use definition::ScenarioDefinition;
pub use executor::{RunSettings, ScenarioExecutor};
pub use results::ScenarioResults;
pub use verification::{Region, VerificationCondition, VerificationResult};
