//! Decision policies
mod diagnosis;
mod random;
mod vacuum;

pub use diagnosis::{GreedyDiagnosisAgent, RandomDiagnosisAgent, TestThenDiagnoseAgent};
pub use random::RandomActor;
pub use vacuum::{FullReflexAgent, LocalReflexAgent};

/// An actor that produces actions given observations.
pub trait Actor<O, A> {
    /// Choose an action given the current observation.
    fn act(&mut self, observation: &O) -> A;
}

impl<O, A, T: Actor<O, A> + ?Sized> Actor<O, A> for Box<T> {
    fn act(&mut self, observation: &O) -> A {
        T::act(self, observation)
    }
}
