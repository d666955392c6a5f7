//! Error type
use crate::envs::{BuildEnvError, StepError};
use thiserror::Error;

/// Error from a simulation run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("error building environment")]
    BuildEnv(#[from] BuildEnvError),
    #[error("error stepping environment")]
    Step(#[from] StepError),
}
