use anyhow::Result;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rater_core::{HeadlessSurface, Rater, RaterHooks, RaterOptions};

mod catalog;

/// Width of the headless surface every scenario binds to, in pixels.
pub const SURFACE_WIDTH: f64 = 100.0;

/// Per-iteration state handed to a scenario.
#[derive(Debug)]
pub struct ScenarioCtx {
    pub seed: u64,
    pub rng: ChaCha8Rng,
    pub verbose: bool,
}

impl ScenarioCtx {
    #[must_use]
    pub fn new(seed: u64, verbose: bool) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            verbose,
        }
    }

    /// Bind a fresh widget on a headless surface of [`SURFACE_WIDTH`].
    pub fn bind(
        &self,
        options: &RaterOptions,
        hooks: RaterHooks<HeadlessSurface>,
    ) -> Result<Rater<HeadlessSurface>> {
        let rater = Rater::bind(HeadlessSurface::new(SURFACE_WIDTH), options, hooks)?;
        if self.verbose {
            log::info!("seed {} bound {rater:?}", self.seed);
        }
        Ok(rater)
    }
}

pub struct TestScenario {
    pub name: &'static str,
    pub description: &'static str,
    pub run: fn(&mut ScenarioCtx) -> Result<()>,
}

#[must_use]
pub fn get_scenario(name: &str) -> Option<&'static TestScenario> {
    let wanted = name.to_lowercase();
    catalog::SCENARIOS.iter().find(|scenario| scenario.name == wanted)
}

#[must_use]
pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    catalog::SCENARIOS
        .iter()
        .map(|scenario| (scenario.name, scenario.description))
        .collect()
}

#[must_use]
pub fn scenario_names() -> Vec<String> {
    catalog::SCENARIOS
        .iter()
        .map(|scenario| scenario.name.to_string())
        .collect()
}
