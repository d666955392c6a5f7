//! Comparative policy experiments
//!
//! Pure orchestration over [`run_episode`]: build a fresh environment and
//! policy per episode, aggregate episode totals, and hand the results to the
//! chart renderer.
use crate::agents::{
    Actor, FullReflexAgent, GreedyDiagnosisAgent, LocalReflexAgent, RandomActor,
    RandomDiagnosisAgent, TestThenDiagnoseAgent,
};
use crate::chart::Series;
use crate::envs::{
    DiagnosisAction, DiagnosisConfig, EnvBuilder, TestLog, VacuumAction, VacuumConfig, VacuumObs,
};
use crate::error::SimError;
use crate::simulation::run_episode;
use crate::spaces::IndexedTypeSpace;
use crate::utils::OnlineMeanVariance;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The vacuum-world policies under comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VacuumPolicy {
    Random,
    LocalReflex,
    FullReflex,
}

impl VacuumPolicy {
    pub const ALL: [Self; 3] = [Self::Random, Self::LocalReflex, Self::FullReflex];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Random => "Random",
            Self::LocalReflex => "Local Reflex",
            Self::FullReflex => "Full Reflex",
        }
    }

    /// Build a fresh policy instance.
    pub fn build(self, seed: u64) -> Box<dyn Actor<VacuumObs, VacuumAction>> {
        match self {
            Self::Random => Box::new(RandomActor::new(
                IndexedTypeSpace::<VacuumAction>::new(),
                seed,
            )),
            Self::LocalReflex => Box::new(LocalReflexAgent::new(seed)),
            Self::FullReflex => Box::new(FullReflexAgent::new()),
        }
    }
}

impl fmt::Display for VacuumPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The diagnosis policies under comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosisPolicy {
    Random,
    Greedy,
    TestThenDiagnose,
}

impl DiagnosisPolicy {
    pub const ALL: [Self; 3] = [Self::Random, Self::Greedy, Self::TestThenDiagnose];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Random => "Random",
            Self::Greedy => "Greedy",
            Self::TestThenDiagnose => "TestThenDiagnose",
        }
    }

    /// Build a fresh policy instance sharing the game's public tables.
    pub fn build(
        self,
        config: &DiagnosisConfig,
        max_tests: usize,
        seed: u64,
    ) -> Box<dyn Actor<TestLog, DiagnosisAction>> {
        match self {
            Self::Random => Box::new(RandomDiagnosisAgent::new(seed)),
            Self::Greedy => Box::new(GreedyDiagnosisAgent::new(config.clone())),
            Self::TestThenDiagnose => {
                Box::new(TestThenDiagnoseAgent::new(config.clone(), max_tests))
            }
        }
    }
}

impl fmt::Display for DiagnosisPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Configuration of the vacuum-world dirt-probability sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VacuumSweepConfig {
    /// Dirt spawn probabilities to sweep over.
    pub dirt_probs: Vec<f64>,
    /// Episodes per policy per probability.
    pub episodes: u32,
    /// Environment template; `dirt_spawn_prob` is overridden by the sweep.
    pub env: VacuumConfig,
}

impl Default for VacuumSweepConfig {
    fn default() -> Self {
        Self {
            dirt_probs: vec![0.0, 0.05, 0.1, 0.2, 0.3],
            episodes: 20,
            env: VacuumConfig {
                max_steps: 30,
                ..VacuumConfig::default()
            },
        }
    }
}

/// Result of a vacuum-world sweep: one mean-reward series per policy.
#[derive(Debug, Clone, PartialEq)]
pub struct VacuumSweepResult {
    pub dirt_probs: Vec<f64>,
    pub series: Vec<Series>,
}

/// Run the dirt-probability sweep.
///
/// For each probability and each episode a fresh environment and policy are
/// built with seeds derived from `seed`, so results are reproducible and
/// episodes share no state beyond the derivation stream.
pub fn run_vacuum_sweep(
    sweep: &VacuumSweepConfig,
    seed: u64,
) -> Result<VacuumSweepResult, SimError> {
    let mut seed_rng = StdRng::seed_from_u64(seed);
    let mut series = Vec::with_capacity(VacuumPolicy::ALL.len());
    for policy in VacuumPolicy::ALL {
        let mut means = Vec::with_capacity(sweep.dirt_probs.len());
        for &dirt_spawn_prob in &sweep.dirt_probs {
            let env_config = VacuumConfig {
                dirt_spawn_prob,
                ..sweep.env
            };
            let mut stats = OnlineMeanVariance::new();
            for _ in 0..sweep.episodes {
                let mut env = env_config.build_env(seed_rng.gen())?;
                let mut agent = policy.build(seed_rng.gen());
                stats.push(run_episode(&mut env, &mut agent, &mut ())?);
            }
            means.push(stats.mean());
        }
        series.push(Series::new(policy.name(), means));
    }
    Ok(VacuumSweepResult {
        dirt_probs: sweep.dirt_probs.clone(),
        series,
    })
}

/// Configuration of the diagnosis policy comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisCompareConfig {
    /// Episodes per policy.
    pub episodes: u32,
    /// Test budget for the test-then-diagnose policy.
    pub max_tests: usize,
    pub env: DiagnosisConfig,
}

impl Default for DiagnosisCompareConfig {
    fn default() -> Self {
        Self {
            episodes: 50,
            max_tests: 2,
            env: DiagnosisConfig::default(),
        }
    }
}

/// Run the diagnosis comparison, returning raw score lists per policy.
pub fn run_diagnosis_comparison(
    config: &DiagnosisCompareConfig,
    seed: u64,
) -> Result<Vec<Series>, SimError> {
    let mut seed_rng = StdRng::seed_from_u64(seed);
    let mut distributions = Vec::with_capacity(DiagnosisPolicy::ALL.len());
    for policy in DiagnosisPolicy::ALL {
        let mut scores = Vec::with_capacity(config.episodes as usize);
        for _ in 0..config.episodes {
            let mut env = config.env.build_env(seed_rng.gen())?;
            let mut agent = policy.build(&config.env, config.max_tests, seed_rng.gen());
            scores.push(run_episode(&mut env, &mut agent, &mut ())?);
        }
        distributions.push(Series::new(policy.name(), scores));
    }
    Ok(distributions)
}
