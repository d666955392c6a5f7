//! Bayesian belief updating over disease hypotheses
use crate::envs::{DiagnosisConfig, Disease, TestLog};
use enum_map::EnumMap;

/// A probability assigned to each disease hypothesis.
pub type Belief = EnumMap<Disease, f64>;

/// The posterior over diseases given the recorded test outcomes.
///
/// For each disease `d` this computes
/// `prior(d) * product over recorded (test, outcome) of
/// [outcome ? likelihood[test][d] : 1 - likelihood[test][d]]`,
/// normalized across diseases. The empty log yields the prior exactly.
///
/// If every hypothesis ends up with zero mass (possible with extreme
/// likelihood entries), normalization is skipped and the unnormalized
/// all-zero distribution is returned instead of failing.
pub fn posterior(config: &DiagnosisConfig, tests: &TestLog) -> Belief {
    let mut probs = config.prior.clone();
    for (test, positive) in tests.iter() {
        for (disease, p) in probs.iter_mut() {
            let likelihood = config.likelihood[test][disease];
            *p *= if positive { likelihood } else { 1.0 - likelihood };
        }
    }
    let sum: f64 = probs.values().sum();
    if sum > 0.0 {
        for p in probs.values_mut() {
            *p /= sum;
        }
    }
    probs
}

/// The highest-probability disease, ties broken by enumeration order.
pub fn most_likely(belief: &Belief) -> Disease {
    let mut best = Disease::Flu;
    let mut best_p = f64::NEG_INFINITY;
    for (disease, &p) in belief.iter() {
        if p > best_p {
            best = disease;
            best_p = p;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envs::MedTest;
    use enum_map::enum_map;

    const TOL: f64 = 1e-12;

    #[test]
    fn empty_log_returns_the_prior() {
        let config = DiagnosisConfig::default();
        let belief = posterior(&config, &TestLog::new());
        for (disease, &p) in belief.iter() {
            assert!((p - config.prior[disease]).abs() < TOL);
        }
    }

    #[test]
    fn posterior_is_a_distribution() {
        let config = DiagnosisConfig::default();
        let mut tests = TestLog::new();
        tests.record(MedTest::Fever, true);
        tests.record(MedTest::Sneeze, false);

        let belief = posterior(&config, &tests);
        for (_, &p) in belief.iter() {
            assert!((0.0..=1.0).contains(&p));
        }
        let total: f64 = belief.values().sum();
        assert!((total - 1.0).abs() < TOL);
    }

    #[test]
    fn positive_fever_raises_flu() {
        let config = DiagnosisConfig::default();
        let mut tests = TestLog::new();
        tests.record(MedTest::Fever, true);

        let belief = posterior(&config, &tests);
        assert!(belief[Disease::Flu] > config.prior[Disease::Flu]);
        // prior 0.3 -> 0.27 / (0.27 + 0.24 + 0.03)
        assert!((belief[Disease::Flu] - 0.5).abs() < TOL);
    }

    #[test]
    fn zero_mass_posterior_does_not_normalize() {
        // A certain-positive test observed negative zeroes every hypothesis.
        let config = DiagnosisConfig {
            likelihood: enum_map! {
                _ => enum_map! { _ => 1.0 },
            },
            ..DiagnosisConfig::default()
        };
        let mut tests = TestLog::new();
        tests.record(MedTest::Fever, false);

        let belief = posterior(&config, &tests);
        for (_, &p) in belief.iter() {
            assert_eq!(p, 0.0);
        }
        // Callers tolerate the degenerate distribution; arg-max falls back
        // to the first disease in enumeration order.
        assert_eq!(most_likely(&belief), Disease::Flu);
    }

    #[test]
    fn most_likely_breaks_ties_by_enumeration_order() {
        let belief: Belief = enum_map! {
            Disease::Flu => 0.4,
            Disease::Cold => 0.4,
            Disease::Allergy => 0.2,
        };
        assert_eq!(most_likely(&belief), Disease::Flu);
    }
}
