//! Sequential medical-diagnosis game
use super::{
    check_probability, BuildEnvError, EnvBuilder, Environment, StepError, StructuredEnvironment,
};
use crate::spaces::{Indexed, IndexedTypeSpace};
use enum_map::{enum_map, Enum, EnumMap};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A disease hypothesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Disease {
    Flu,
    Cold,
    Allergy,
}

impl fmt::Display for Disease {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Flu => write!(f, "flu"),
            Self::Cold => write!(f, "cold"),
            Self::Allergy => write!(f, "allergy"),
        }
    }
}

/// A binary medical test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MedTest {
    Fever,
    Cough,
    Sneeze,
}

impl fmt::Display for MedTest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Fever => write!(f, "fever"),
            Self::Cough => write!(f, "cough"),
            Self::Sneeze => write!(f, "sneeze"),
        }
    }
}

/// An action in the diagnosis game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosisAction {
    OrderTest(MedTest),
    Diagnose(Disease),
}

impl Indexed for DiagnosisAction {
    const SIZE: usize = MedTest::LENGTH + Disease::LENGTH;

    fn as_index(&self) -> usize {
        match *self {
            Self::OrderTest(test) => test.into_usize(),
            Self::Diagnose(disease) => MedTest::LENGTH + disease.into_usize(),
        }
    }

    fn from_index(index: usize) -> Option<Self> {
        if index < MedTest::LENGTH {
            Some(Self::OrderTest(MedTest::from_usize(index)))
        } else if index < Self::SIZE {
            Some(Self::Diagnose(Disease::from_usize(index - MedTest::LENGTH)))
        } else {
            None
        }
    }
}

impl fmt::Display for DiagnosisAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::OrderTest(test) => write!(f, "order_test({})", test),
            Self::Diagnose(disease) => write!(f, "diagnose({})", disease),
        }
    }
}

/// Recorded test outcomes for one episode.
///
/// Each test is recorded at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestLog {
    outcomes: EnumMap<MedTest, Option<bool>>,
}

impl TestLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a test outcome, replacing any previous record.
    pub fn record(&mut self, test: MedTest, positive: bool) {
        self.outcomes[test] = Some(positive);
    }

    /// The recorded outcome of a test, if it has been ordered.
    pub fn outcome(&self, test: MedTest) -> Option<bool> {
        self.outcomes[test]
    }

    pub fn contains(&self, test: MedTest) -> bool {
        self.outcomes[test].is_some()
    }

    /// The number of recorded tests.
    pub fn len(&self) -> usize {
        self.outcomes.values().filter(|outcome| outcome.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the recorded `(test, outcome)` pairs in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (MedTest, bool)> + '_ {
        self.outcomes
            .iter()
            .filter_map(|(test, &outcome)| outcome.map(|positive| (test, positive)))
    }
}

impl fmt::Display for TestLog {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "no tests");
        }
        let mut first = true;
        for (test, positive) in self.iter() {
            if !first {
                write!(f, " ")?;
            }
            first = false;
            let outcome = if positive { "positive" } else { "negative" };
            write!(f, "{}={}", test, outcome)?;
        }
        Ok(())
    }
}

/// Diagnosis game configuration.
///
/// The prior and likelihood tables are public knowledge shared with the
/// policies; only the drawn disease is hidden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisConfig {
    /// Prior probability of each disease.
    pub prior: EnumMap<Disease, f64>,
    /// `likelihood[test][disease]` = P(test positive | disease).
    pub likelihood: EnumMap<MedTest, EnumMap<Disease, f64>>,
    /// Reward for ordering each test. Negative.
    pub test_cost: EnumMap<MedTest, f64>,
}

impl Default for DiagnosisConfig {
    fn default() -> Self {
        Self {
            prior: enum_map! {
                Disease::Flu => 0.3,
                Disease::Cold => 0.4,
                Disease::Allergy => 0.3,
            },
            likelihood: enum_map! {
                MedTest::Fever => enum_map! {
                    Disease::Flu => 0.9,
                    Disease::Cold => 0.6,
                    Disease::Allergy => 0.1,
                },
                MedTest::Cough => enum_map! {
                    Disease::Flu => 0.7,
                    Disease::Cold => 0.8,
                    Disease::Allergy => 0.3,
                },
                MedTest::Sneeze => enum_map! {
                    Disease::Flu => 0.2,
                    Disease::Cold => 0.3,
                    Disease::Allergy => 0.9,
                },
            },
            test_cost: enum_map! { _ => -5.0 },
        }
    }
}

impl DiagnosisConfig {
    /// Validate the tables and build the categorical prior sampler.
    fn prior_dist(&self) -> Result<WeightedIndex<f64>, BuildEnvError> {
        for (_, &p) in self.prior.iter() {
            check_probability("prior", p)?;
        }
        for (_, row) in self.likelihood.iter() {
            for (_, &p) in row.iter() {
                check_probability("likelihood", p)?;
            }
        }
        Ok(WeightedIndex::new(self.prior.values())?)
    }
}

impl EnvBuilder<DiagnosisWorld> for DiagnosisConfig {
    fn build_env(&self, seed: u64) -> Result<DiagnosisWorld, BuildEnvError> {
        let prior_dist = self.prior_dist()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let true_disease = Disease::from_usize(prior_dist.sample(&mut rng));
        Ok(DiagnosisWorld {
            config: self.clone(),
            prior_dist,
            true_disease,
            tests_done: TestLog::new(),
            done: false,
            rng,
        })
    }
}

/// Diagnosis Game Environment
///
/// A disease is drawn from the categorical prior at the start of each
/// episode and hidden from the agent. Each step either orders a noisy binary
/// test (positive with probability `likelihood[test][true_disease]`,
/// recorded once; re-ordering is a free no-op) or commits to a diagnosis,
/// which ends the episode with +100 for the true disease and -100 otherwise.
///
/// Observations are a copy of the current [`TestLog`]. The episode only ends
/// when a diagnose action is issued, so policies bear responsibility for
/// eventually diagnosing.
#[derive(Debug, Clone)]
pub struct DiagnosisWorld {
    config: DiagnosisConfig,
    prior_dist: WeightedIndex<f64>,
    true_disease: Disease,
    tests_done: TestLog,
    done: bool,
    rng: StdRng,
}

impl DiagnosisWorld {
    /// Build with a forced true disease, for controlled experiments.
    ///
    /// A later [`Environment::reset`] redraws the disease from the prior.
    pub fn with_true_disease(
        config: &DiagnosisConfig,
        disease: Disease,
        seed: u64,
    ) -> Result<Self, BuildEnvError> {
        let mut env = config.build_env(seed)?;
        env.true_disease = disease;
        Ok(env)
    }

    pub const fn config(&self) -> &DiagnosisConfig {
        &self.config
    }

    /// The hidden disease of the current episode.
    ///
    /// Not part of any observation; exposed for controlled experiments and
    /// trace output.
    pub const fn true_disease(&self) -> Disease {
        self.true_disease
    }

    pub const fn tests_done(&self) -> &TestLog {
        &self.tests_done
    }

    pub const fn is_done(&self) -> bool {
        self.done
    }
}

impl fmt::Display for DiagnosisWorld {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "DiagnosisWorld({})", self.tests_done)
    }
}

impl Environment for DiagnosisWorld {
    type Observation = TestLog;
    type Action = DiagnosisAction;

    fn reset(&mut self) -> Self::Observation {
        self.true_disease = Disease::from_usize(self.prior_dist.sample(&mut self.rng));
        self.tests_done = TestLog::new();
        self.done = false;
        self.tests_done.clone()
    }

    fn step(
        &mut self,
        action: &Self::Action,
    ) -> Result<(Option<Self::Observation>, f64, bool), StepError> {
        if self.done {
            return Err(StepError::PostTerminal);
        }
        match *action {
            DiagnosisAction::OrderTest(test) => {
                if self.tests_done.contains(test) {
                    // Re-ordering never resamples the recorded outcome.
                    return Ok((Some(self.tests_done.clone()), 0.0, false));
                }
                let positive =
                    self.rng.gen::<f64>() < self.config.likelihood[test][self.true_disease];
                self.tests_done.record(test, positive);
                Ok((
                    Some(self.tests_done.clone()),
                    self.config.test_cost[test],
                    false,
                ))
            }
            DiagnosisAction::Diagnose(disease) => {
                self.done = true;
                let reward = if disease == self.true_disease {
                    100.0
                } else {
                    -100.0
                };
                Ok((None, reward, true))
            }
        }
    }
}

impl StructuredEnvironment for DiagnosisWorld {
    type ActionSpace = IndexedTypeSpace<DiagnosisAction>;

    fn action_space(&self) -> Self::ActionSpace {
        IndexedTypeSpace::new()
    }

    fn reward_range(&self) -> (f64, f64) {
        (-100.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing;
    use super::*;

    #[test]
    fn correct_diagnosis_earns_full_reward() {
        let config = DiagnosisConfig::default();
        let mut env = DiagnosisWorld::with_true_disease(&config, Disease::Flu, 0).unwrap();
        let (obs, reward, done) = env.step(&DiagnosisAction::Diagnose(Disease::Flu)).unwrap();
        assert!(obs.is_none());
        assert_eq!(reward, 100.0);
        assert!(done);
        assert!(env.is_done());
    }

    #[test]
    fn incorrect_diagnosis_is_penalized() {
        let config = DiagnosisConfig::default();
        let mut env = DiagnosisWorld::with_true_disease(&config, Disease::Flu, 0).unwrap();
        let (_, reward, done) = env.step(&DiagnosisAction::Diagnose(Disease::Cold)).unwrap();
        assert_eq!(reward, -100.0);
        assert!(done);
    }

    #[test]
    fn post_terminal_calls_fail_fast() {
        let config = DiagnosisConfig::default();
        let mut env = config.build_env(0).unwrap();
        env.step(&DiagnosisAction::Diagnose(Disease::Cold)).unwrap();
        assert_eq!(
            env.step(&DiagnosisAction::OrderTest(MedTest::Fever)),
            Err(StepError::PostTerminal)
        );
        assert_eq!(
            env.step(&DiagnosisAction::Diagnose(Disease::Flu)),
            Err(StepError::PostTerminal)
        );
    }

    #[test]
    fn reordering_a_test_is_an_idempotent_no_op() {
        let config = DiagnosisConfig::default();
        let mut env = config.build_env(7).unwrap();
        let action = DiagnosisAction::OrderTest(MedTest::Cough);

        let (_, first_reward, done) = env.step(&action).unwrap();
        assert_eq!(first_reward, config.test_cost[MedTest::Cough]);
        assert!(!done);
        let first_outcome = env.tests_done().outcome(MedTest::Cough).unwrap();

        let (obs, second_reward, done) = env.step(&action).unwrap();
        assert_eq!(second_reward, 0.0);
        assert!(!done);
        assert_eq!(env.tests_done().len(), 1);
        assert_eq!(
            obs.unwrap().outcome(MedTest::Cough),
            Some(first_outcome)
        );
    }

    #[test]
    fn reset_clears_the_episode() {
        let config = DiagnosisConfig::default();
        let mut env = config.build_env(3).unwrap();
        env.step(&DiagnosisAction::OrderTest(MedTest::Fever)).unwrap();
        env.step(&DiagnosisAction::Diagnose(Disease::Allergy)).unwrap();

        let obs = env.reset();
        assert!(obs.is_empty());
        assert!(!env.is_done());
    }

    #[test]
    fn degenerate_prior_is_rejected() {
        let config = DiagnosisConfig {
            prior: enum_map! { _ => 0.0 },
            ..DiagnosisConfig::default()
        };
        assert!(matches!(
            config.build_env(0),
            Err(BuildEnvError::InvalidPrior(_))
        ));
    }

    #[test]
    fn out_of_range_likelihood_is_rejected() {
        let mut config = DiagnosisConfig::default();
        config.likelihood[MedTest::Fever][Disease::Flu] = 1.5;
        assert!(matches!(
            config.build_env(0),
            Err(BuildEnvError::InvalidProbability { name: "likelihood", .. })
        ));
    }

    #[test]
    fn run_default() {
        let mut env = DiagnosisConfig::default().build_env(0).unwrap();
        testing::run_random(&mut env, 1000, 1);
    }
}
