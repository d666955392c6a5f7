//! Environment testing utilities
use super::StructuredEnvironment;
use crate::agents::{Actor, RandomActor};
use crate::spaces::SampleSpace;

/// Drive an environment with uniformly random actions and check invariants.
///
/// Checks that every step reward lies within the declared reward range and
/// that a missing successor observation only occurs on episode end.
pub fn run_random<E>(env: &mut E, num_steps: u64, seed: u64)
where
    E: StructuredEnvironment + ?Sized,
    E::ActionSpace: SampleSpace,
{
    let (min_reward, max_reward) = env.reward_range();
    let mut actor = RandomActor::new(env.action_space(), seed);

    let mut observation = env.reset();
    for _ in 0..num_steps {
        let action = actor.act(&observation);
        let (next, reward, episode_done) = env.step(&action).unwrap();
        assert!(reward >= min_reward, "reward {} below {}", reward, min_reward);
        assert!(reward <= max_reward, "reward {} above {}", reward, max_reward);
        if next.is_none() {
            assert!(episode_done);
        }
        observation = match next {
            Some(obs) if !episode_done => obs,
            _ => env.reset(),
        };
    }
}
