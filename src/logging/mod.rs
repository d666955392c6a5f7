//! Logging statistics from simulation runs
pub mod cli;

pub use cli::CLILogger;

use enum_map::Enum;
use thiserror::Error;

/// Simulation run events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum Event {
    Step,
    Episode,
}

/// A value that can be logged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Loggable {
    /// A scalar value. Aggregated by taking means.
    Scalar(f64),
    /// A sample from a distribution over `0 .. size - 1`.
    IndexSample { value: usize, size: usize },
}

/// Log statistics from a simulation run.
pub trait Logger {
    /// Log a value under a name.
    ///
    /// # Errors
    /// If the value is structurally incompatible with previous values logged
    /// under the same name.
    fn log(&mut self, event: Event, name: &'static str, value: Loggable) -> Result<(), LogError>;

    /// Mark the end of an event.
    fn done(&mut self, event: Event);
}

impl<L: Logger + ?Sized> Logger for &mut L {
    fn log(&mut self, event: Event, name: &'static str, value: Loggable) -> Result<(), LogError> {
        L::log(&mut **self, event, name, value)
    }

    fn done(&mut self, event: Event) {
        L::done(&mut **self, event)
    }
}

/// Logger that does nothing.
impl Logger for () {
    fn log(&mut self, _: Event, _: &'static str, _: Loggable) -> Result<(), LogError> {
        Ok(())
    }

    fn done(&mut self, _: Event) {}
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("\"{name}\": incompatible value {value:?}, expected {expected}")]
pub struct LogError {
    pub name: &'static str,
    pub value: Loggable,
    pub expected: &'static str,
}
