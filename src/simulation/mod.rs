//! Simulating agent-environment episodes
pub mod hooks;

pub use hooks::{IndexedActionCounter, SimulationHook, StepLogger, StepTrace};

use crate::agents::Actor;
use crate::envs::{Environment, StepError};

/// Description of one environment step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step<'a, O, A> {
    /// The observation the action was chosen from.
    pub observation: &'a O,
    /// The action taken.
    pub action: A,
    /// The resulting reward.
    pub reward: f64,
    /// An observation of the resulting state; `None` if terminal.
    pub next_observation: Option<&'a O>,
    /// Whether this step ends the episode.
    pub episode_done: bool,
}

/// Run one episode to termination.
///
/// Resets the environment, then repeatedly asks the actor for an action and
/// applies it, accumulating reward, until the environment signals the end of
/// the episode. The hook observes every step; pass `()` for a silent run or
/// a [`StepTrace`] for one line per step.
///
/// Environments that terminate only on an agent action (the diagnosis game)
/// rely on the policy to eventually take it; a policy that never does yields
/// a non-terminating episode.
///
/// # Returns
/// The total accumulated reward for the episode.
pub fn run_episode<E, T, H>(env: &mut E, actor: &mut T, hook: &mut H) -> Result<f64, StepError>
where
    E: Environment + ?Sized,
    T: Actor<E::Observation, E::Action> + ?Sized,
    H: SimulationHook<E::Observation, E::Action> + ?Sized,
{
    let mut observation = env.reset();
    let mut total = 0.0;
    loop {
        let action = actor.act(&observation);
        let (next, reward, episode_done) = env.step(&action)?;
        total += reward;
        hook.call(&Step {
            observation: &observation,
            action,
            reward,
            next_observation: next.as_ref(),
            episode_done,
        });
        match next {
            Some(next_observation) if !episode_done => observation = next_observation,
            _ => break,
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{FullReflexAgent, RandomActor};
    use crate::envs::{
        DiagnosisAction, DiagnosisConfig, EnvBuilder, StructuredEnvironment, VacuumAction,
        VacuumConfig,
    };
    use crate::spaces::IndexedTypeSpace;

    #[test]
    fn vacuum_episode_takes_exactly_max_steps() {
        let config = VacuumConfig {
            max_steps: 12,
            ..VacuumConfig::default()
        };
        let mut env = config.build_env(0).unwrap();
        let mut actor = RandomActor::new(env.action_space(), 1);
        let mut counter = IndexedActionCounter::new(IndexedTypeSpace::<VacuumAction>::new());

        run_episode(&mut env, &mut actor, &mut counter).unwrap();
        let total_actions: u64 = counter.counts.iter().sum();
        assert_eq!(total_actions, 12);
    }

    #[test]
    fn episode_total_matches_step_rewards() {
        let config = VacuumConfig {
            dirt_spawn_prob: 0.0,
            max_steps: 20,
            ..VacuumConfig::default()
        };
        let mut env = config.build_env(4).unwrap();
        let mut actor = FullReflexAgent::new();
        let mut logged = 0.0;
        struct Sum<'a>(&'a mut f64);
        impl<O, A> SimulationHook<O, A> for Sum<'_> {
            fn call(&mut self, step: &Step<O, A>) {
                *self.0 += step.reward;
            }
        }

        let total = run_episode(&mut env, &mut actor, &mut Sum(&mut logged)).unwrap();
        assert_eq!(total, logged);
    }

    #[test]
    fn diagnosis_episode_ends_on_diagnose() {
        struct DiagnoseImmediately;
        impl Actor<crate::envs::TestLog, DiagnosisAction> for DiagnoseImmediately {
            fn act(&mut self, _: &crate::envs::TestLog) -> DiagnosisAction {
                DiagnosisAction::Diagnose(crate::envs::Disease::Cold)
            }
        }

        let mut env = DiagnosisConfig::default().build_env(0).unwrap();
        let total = run_episode(&mut env, &mut DiagnoseImmediately, &mut ()).unwrap();
        assert!(total == 100.0 || total == -100.0);
    }
}
