use super::Actor;
use crate::spaces::SampleSpace;
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;

/// An actor that always acts uniformly at random.
#[derive(Debug, Clone)]
pub struct RandomActor<AS> {
    action_space: AS,
    rng: StdRng,
}

impl<AS> RandomActor<AS> {
    pub fn new(action_space: AS, seed: u64) -> Self {
        Self {
            action_space,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<O, AS: SampleSpace> Actor<O, AS::Element> for RandomActor<AS> {
    fn act(&mut self, _observation: &O) -> AS::Element {
        self.action_space.sample(&mut self.rng)
    }
}

impl<AS: fmt::Display> fmt::Display for RandomActor<AS> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "RandomActor({})", self.action_space)
    }
}
