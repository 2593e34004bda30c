use anyhow::Result;

pub mod catalog;

use crate::common::scenario_key;

/// Check run once per iteration with that iteration's seed.
pub type ScenarioCheck = fn(u64) -> Result<()>;

#[derive(Debug, Clone)]
pub struct TestScenario {
    pub name: &'static str,
    pub description: &'static str,
    pub check: ScenarioCheck,
}

impl TestScenario {
    #[must_use]
    pub const fn new(name: &'static str, description: &'static str, check: ScenarioCheck) -> Self {
        Self {
            name,
            description,
            check,
        }
    }

    #[must_use]
    pub fn key(&self) -> String {
        scenario_key(self.name)
    }

    /// Run the check for one seed.
    ///
    /// # Errors
    ///
    /// Returns the first failed expectation.
    pub fn run(&self, seed: u64) -> Result<()> {
        (self.check)(seed)
    }
}

/// Look a scenario up by key (`role-distribution`) or display name.
pub fn get_scenario(name: &str) -> Option<TestScenario> {
    let wanted = scenario_key(name);
    catalog::catalog_scenarios()
        .into_iter()
        .find(|scenario| scenario.key() == wanted)
}

pub fn list_scenarios() -> Vec<(String, &'static str)> {
    catalog::catalog_scenarios()
        .into_iter()
        .map(|scenario| (scenario.key(), scenario.description))
        .collect()
}
