//! Simulation hooks.
//!
//! Hooks observe each step of [`run_episode`](super::run_episode); they
//! cannot influence the episode.
use super::Step;
use crate::logging::{Event, Loggable, Logger};
use crate::spaces::FiniteSpace;
use std::fmt::Display;
use std::io::{self, Write};
use yansi::Paint;

/// A callback observing each simulation step.
pub trait SimulationHook<O, A> {
    fn call(&mut self, step: &Step<O, A>);
}

/// No-op hook for silent runs.
impl<O, A> SimulationHook<O, A> for () {
    fn call(&mut self, _: &Step<O, A>) {}
}

impl<O, A, H1, H2> SimulationHook<O, A> for (H1, H2)
where
    H1: SimulationHook<O, A>,
    H2: SimulationHook<O, A>,
{
    fn call(&mut self, step: &Step<O, A>) {
        self.0.call(step);
        self.1.call(step);
    }
}

/// Writes one human-readable line per step.
///
/// Diagnostic output, not a wire format. Write failures are ignored so a
/// broken pipe cannot disturb the episode.
#[derive(Debug)]
pub struct StepTrace<W> {
    writer: W,
    step: u64,
    total: f64,
}

impl<W: Write> StepTrace<W> {
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            step: 0,
            total: 0.0,
        }
    }
}

impl StepTrace<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<O, A, W> SimulationHook<O, A> for StepTrace<W>
where
    O: Display,
    A: Display,
    W: Write,
{
    fn call(&mut self, step: &Step<O, A>) {
        self.step += 1;
        self.total += step.reward;
        let _ = write!(
            self.writer,
            "Step {}: action={} reward={:.2} ",
            self.step,
            Paint::cyan(&step.action),
            step.reward,
        );
        let _ = match step.next_observation {
            Some(observation) => write!(self.writer, "{}", observation),
            None => write!(self.writer, "terminal"),
        };
        let _ = writeln!(self.writer, " total={:.2}", self.total);
        if step.episode_done {
            let _ = writeln!(
                self.writer,
                "Episode done after {} steps: total reward {}",
                self.step,
                Paint::green(self.total),
            );
        }
    }
}

/// Forwards step and episode statistics to a [`Logger`].
#[derive(Debug, Clone)]
pub struct StepLogger<AS, L> {
    pub action_space: AS,
    logger: L,

    episode_length: u64,
    episode_reward: f64,
}

impl<AS, L> StepLogger<AS, L> {
    pub const fn new(action_space: AS, logger: L) -> Self {
        Self {
            action_space,
            logger,
            episode_length: 0,
            episode_reward: 0.0,
        }
    }

    pub fn into_inner(self) -> L {
        self.logger
    }
}

impl<O, AS, L> SimulationHook<O, AS::Element> for StepLogger<AS, L>
where
    AS: FiniteSpace,
    L: Logger,
{
    fn call(&mut self, step: &Step<O, AS::Element>) {
        self.logger
            .log(Event::Step, "reward", Loggable::Scalar(step.reward))
            .unwrap();
        self.logger
            .log(
                Event::Step,
                "action",
                Loggable::IndexSample {
                    value: self.action_space.to_index(&step.action),
                    size: self.action_space.len(),
                },
            )
            .unwrap();
        self.logger.done(Event::Step);

        self.episode_length += 1;
        self.episode_reward += step.reward;
        if step.episode_done {
            self.logger
                .log(
                    Event::Episode,
                    "length",
                    Loggable::Scalar(self.episode_length as f64),
                )
                .unwrap();
            self.logger
                .log(
                    Event::Episode,
                    "reward",
                    Loggable::Scalar(self.episode_reward),
                )
                .unwrap();
            self.logger.done(Event::Episode);
            self.episode_length = 0;
            self.episode_reward = 0.0;
        }
    }
}

/// Counts occurrences of each action by index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedActionCounter<AS> {
    pub action_space: AS,
    pub counts: Vec<u64>,
}

impl<AS: FiniteSpace> IndexedActionCounter<AS> {
    pub fn new(action_space: AS) -> Self {
        let num_actions = action_space.len();
        Self {
            action_space,
            counts: vec![0; num_actions],
        }
    }
}

impl<O, AS: FiniteSpace> SimulationHook<O, AS::Element> for IndexedActionCounter<AS> {
    fn call(&mut self, step: &Step<O, AS::Element>) {
        self.counts[self.action_space.to_index(&step.action)] += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envs::{VacuumAction, VacuumObs};
    use crate::spaces::IndexedTypeSpace;

    fn step(action: VacuumAction, reward: f64, episode_done: bool) -> Step<'static, VacuumObs, VacuumAction> {
        static OBS: VacuumObs = VacuumObs::Local {
            pos: (0, 0),
            dirty_here: false,
        };
        Step {
            observation: &OBS,
            action,
            reward,
            next_observation: Some(&OBS),
            episode_done,
        }
    }

    #[test]
    fn step_trace_writes_one_line_per_step() {
        let mut trace = StepTrace::new(Vec::new());
        trace.call(&step(VacuumAction::Nop, -0.25, false));
        trace.call(&step(VacuumAction::Suck, 9.75, true));

        let output = String::from_utf8(trace.writer).unwrap();
        assert_eq!(output.matches("Step 1:").count(), 1);
        assert_eq!(output.matches("Step 2:").count(), 1);
        assert!(output.contains("Episode done after 2 steps"));
    }

    #[test]
    fn tuple_hooks_both_observe() {
        let space = IndexedTypeSpace::<VacuumAction>::new();
        let mut hooks = (
            IndexedActionCounter::new(space),
            IndexedActionCounter::new(space),
        );
        hooks.call(&step(VacuumAction::Left, -1.25, false));
        assert_eq!(hooks.0.counts, hooks.1.counts);
        assert_eq!(hooks.0.counts.iter().sum::<u64>(), 1);
    }

    #[test]
    fn action_counter_tallies_by_index() {
        let mut counter = IndexedActionCounter::new(IndexedTypeSpace::<VacuumAction>::new());
        counter.call(&step(VacuumAction::Suck, -0.25, false));
        counter.call(&step(VacuumAction::Suck, -0.25, false));
        counter.call(&step(VacuumAction::Nop, -0.25, false));
        assert_eq!(counter.counts[0], 2);
        assert_eq!(counter.counts[5], 1);
    }
}
