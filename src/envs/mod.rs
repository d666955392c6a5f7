//! Episodic decision-making environments
mod diagnosis;
mod vacuum;
#[cfg(test)]
pub mod testing;

pub use diagnosis::{
    DiagnosisAction, DiagnosisConfig, DiagnosisWorld, Disease, MedTest, TestLog,
};
pub use vacuum::{Observability, VacuumAction, VacuumConfig, VacuumObs, VacuumWorld};

use crate::spaces::Space;
use rand::distributions::{BernoulliError, WeightedError};
use thiserror::Error;

/// A stateful episodic environment.
///
/// A freshly built environment is ready for its first episode;
/// [`Environment::reset`] starts another.
pub trait Environment {
    type Observation;
    type Action;

    /// Start a new episode.
    ///
    /// # Returns
    /// An observation of the initial state.
    fn reset(&mut self) -> Self::Observation;

    /// Take a step in the environment.
    ///
    /// # Returns
    /// * `observation`: An observation of the resulting state.
    ///     Is `None` if the resulting state is terminal.
    /// * `reward`: The reward value for this transition.
    /// * `episode_done`: Whether this step ends the episode.
    ///     - If `observation` is `None` then `episode_done` must be true.
    ///     - An episode may be done for other reasons, like a step limit.
    ///
    /// # Errors
    /// [`StepError::PostTerminal`] if the current episode has already ended.
    fn step(
        &mut self,
        action: &Self::Action,
    ) -> Result<(Option<Self::Observation>, f64, bool), StepError>;
}

/// The static external structure of an environment.
pub trait StructuredEnvironment: Environment {
    type ActionSpace: Space<Element = Self::Action>;

    /// The space of all possible actions.
    ///
    /// Every element in this space must be a valid action.
    fn action_space(&self) -> Self::ActionSpace;

    /// Inclusive lower and upper bounds on single-step reward values.
    fn reward_range(&self) -> (f64, f64);
}

/// Error stepping an environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StepError {
    /// The episode already reached a terminal state or its step limit.
    #[error("step called on a terminated episode")]
    PostTerminal,
}

/// Builds environments from a configuration.
pub trait EnvBuilder<E> {
    /// Build an environment instance.
    ///
    /// # Args
    /// * `seed` - Seed for the pseudo-randomness owned by the environment:
    ///     initial state draws and step outcome sampling.
    fn build_env(&self, seed: u64) -> Result<E, BuildEnvError>;
}

/// Error building an environment from an invalid configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildEnvError {
    #[error("{name} must be positive")]
    NonPositive { name: &'static str },
    #[error("{name} = {value} is not a probability in [0, 1]")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("invalid dirt spawn probability")]
    InvalidSpawnRate(#[from] BernoulliError),
    #[error("invalid prior weights")]
    InvalidPrior(#[from] WeightedError),
}

/// Check that a configured value is a probability.
pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<(), BuildEnvError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(BuildEnvError::InvalidProbability { name, value })
    }
}
