//! Diagnosis policies
use super::Actor;
use crate::belief::{most_likely, posterior};
use crate::envs::{DiagnosisAction, DiagnosisConfig, Disease, MedTest, TestLog};
use enum_map::Enum;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

fn tests_in_order() -> impl Iterator<Item = MedTest> {
    (0..MedTest::LENGTH).map(MedTest::from_usize)
}

/// Orders one random test, then guesses a random diagnosis.
#[derive(Debug, Clone)]
pub struct RandomDiagnosisAgent {
    rng: StdRng,
}

impl RandomDiagnosisAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Actor<TestLog, DiagnosisAction> for RandomDiagnosisAgent {
    fn act(&mut self, observation: &TestLog) -> DiagnosisAction {
        if observation.is_empty() {
            let test = MedTest::from_usize(self.rng.gen_range(0..MedTest::LENGTH));
            DiagnosisAction::OrderTest(test)
        } else {
            let disease = Disease::from_usize(self.rng.gen_range(0..Disease::LENGTH));
            DiagnosisAction::Diagnose(disease)
        }
    }
}

impl fmt::Display for RandomDiagnosisAgent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "RandomDiagnosisAgent")
    }
}

/// Orders the fever test once, then commits to the posterior arg-max.
#[derive(Debug, Clone)]
pub struct GreedyDiagnosisAgent {
    config: DiagnosisConfig,
}

impl GreedyDiagnosisAgent {
    pub const fn new(config: DiagnosisConfig) -> Self {
        Self { config }
    }
}

impl Actor<TestLog, DiagnosisAction> for GreedyDiagnosisAgent {
    fn act(&mut self, observation: &TestLog) -> DiagnosisAction {
        if observation.is_empty() {
            DiagnosisAction::OrderTest(MedTest::Fever)
        } else {
            DiagnosisAction::Diagnose(most_likely(&posterior(&self.config, observation)))
        }
    }
}

impl fmt::Display for GreedyDiagnosisAgent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "GreedyDiagnosisAgent")
    }
}

/// Orders tests in enumeration order up to a budget, then diagnoses.
///
/// Diagnoses the posterior arg-max once `max_tests` tests are recorded or no
/// unordered test remains.
#[derive(Debug, Clone)]
pub struct TestThenDiagnoseAgent {
    config: DiagnosisConfig,
    max_tests: usize,
}

impl TestThenDiagnoseAgent {
    pub const fn new(config: DiagnosisConfig, max_tests: usize) -> Self {
        Self { config, max_tests }
    }
}

impl Actor<TestLog, DiagnosisAction> for TestThenDiagnoseAgent {
    fn act(&mut self, observation: &TestLog) -> DiagnosisAction {
        if observation.len() < self.max_tests {
            if let Some(test) = tests_in_order().find(|&test| !observation.contains(test)) {
                return DiagnosisAction::OrderTest(test);
            }
        }
        DiagnosisAction::Diagnose(most_likely(&posterior(&self.config, observation)))
    }
}

impl fmt::Display for TestThenDiagnoseAgent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "TestThenDiagnoseAgent({})", self.max_tests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_agent_orders_then_diagnoses() {
        let mut agent = RandomDiagnosisAgent::new(0);
        assert!(matches!(
            agent.act(&TestLog::new()),
            DiagnosisAction::OrderTest(_)
        ));

        let mut log = TestLog::new();
        log.record(MedTest::Sneeze, true);
        assert!(matches!(agent.act(&log), DiagnosisAction::Diagnose(_)));
    }

    #[test]
    fn greedy_agent_orders_fever_first() {
        let mut agent = GreedyDiagnosisAgent::new(DiagnosisConfig::default());
        assert_eq!(
            agent.act(&TestLog::new()),
            DiagnosisAction::OrderTest(MedTest::Fever)
        );
    }

    #[test]
    fn greedy_agent_diagnoses_the_posterior_arg_max() {
        let mut agent = GreedyDiagnosisAgent::new(DiagnosisConfig::default());
        let mut log = TestLog::new();
        // A positive fever result makes flu the arg-max hypothesis.
        log.record(MedTest::Fever, true);
        assert_eq!(
            agent.act(&log),
            DiagnosisAction::Diagnose(Disease::Flu)
        );
        // A positive sneeze result instead favors allergy.
        let mut log = TestLog::new();
        log.record(MedTest::Sneeze, true);
        assert_eq!(
            agent.act(&log),
            DiagnosisAction::Diagnose(Disease::Allergy)
        );
    }

    #[test]
    fn test_then_diagnose_walks_the_test_set_in_order() {
        let mut agent = TestThenDiagnoseAgent::new(DiagnosisConfig::default(), 2);
        let mut log = TestLog::new();

        assert_eq!(
            agent.act(&log),
            DiagnosisAction::OrderTest(MedTest::Fever)
        );
        log.record(MedTest::Fever, false);
        assert_eq!(
            agent.act(&log),
            DiagnosisAction::OrderTest(MedTest::Cough)
        );
        log.record(MedTest::Cough, false);
        assert!(matches!(agent.act(&log), DiagnosisAction::Diagnose(_)));
    }

    #[test]
    fn test_then_diagnose_stops_when_no_tests_remain() {
        // Budget above the test-set size: diagnose once every test is done.
        let mut agent = TestThenDiagnoseAgent::new(DiagnosisConfig::default(), 5);
        let mut log = TestLog::new();
        log.record(MedTest::Fever, true);
        log.record(MedTest::Cough, true);
        log.record(MedTest::Sneeze, false);
        assert!(matches!(agent.act(&log), DiagnosisAction::Diagnose(_)));
    }
}
