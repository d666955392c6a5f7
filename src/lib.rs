//! Episodic decision-making simulators for comparing agent policies under
//! uncertainty.
//!
//! Two worlds are provided: a stochastic vacuum-cleaning grid world
//! ([`envs::VacuumWorld`]) and a sequential medical-diagnosis game
//! ([`envs::DiagnosisWorld`]) with Bayesian belief updating ([`belief`]).
//! Policies implement [`Actor`]; [`run_episode`] drives one policy against
//! one environment, and [`experiments`] compares policies across parameter
//! sweeps.
#![warn(clippy::cast_lossless)]
#![warn(clippy::cast_possible_truncation)]
#![warn(clippy::doc_markdown)]
#![warn(clippy::explicit_iter_loop)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::needless_borrow)]
#![warn(clippy::needless_pass_by_value)]
#![warn(clippy::redundant_closure_for_method_calls)]
#![warn(clippy::use_self)]
pub mod agents;
pub mod belief;
pub mod chart;
pub mod envs;
mod error;
pub mod experiments;
pub mod logging;
pub mod simulation;
pub mod spaces;
pub mod utils;

pub use agents::Actor;
pub use envs::{EnvBuilder, Environment, StructuredEnvironment};
pub use error::SimError;
pub use simulation::{run_episode, Step};
