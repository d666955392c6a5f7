//! Vacuum-cleaning grid world
use super::{BuildEnvError, EnvBuilder, Environment, StepError, StructuredEnvironment};
use crate::spaces::{Indexed, IndexedTypeSpace};
use ndarray::Array2;
use rand::distributions::{Bernoulli, Distribution};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An action in the vacuum world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VacuumAction {
    Suck,
    Left,
    Right,
    Up,
    Down,
    Nop,
}

impl VacuumAction {
    /// One-step `(dx, dy)` offset for movement actions.
    const fn offset(self) -> Option<(isize, isize)> {
        match self {
            Self::Left => Some((-1, 0)),
            Self::Right => Some((1, 0)),
            Self::Up => Some((0, -1)),
            Self::Down => Some((0, 1)),
            Self::Suck | Self::Nop => None,
        }
    }
}

impl Indexed for VacuumAction {
    const SIZE: usize = 6;

    fn as_index(&self) -> usize {
        match self {
            Self::Suck => 0,
            Self::Left => 1,
            Self::Right => 2,
            Self::Up => 3,
            Self::Down => 4,
            Self::Nop => 5,
        }
    }

    fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Suck),
            1 => Some(Self::Left),
            2 => Some(Self::Right),
            3 => Some(Self::Up),
            4 => Some(Self::Down),
            5 => Some(Self::Nop),
            _ => None,
        }
    }
}

impl fmt::Display for VacuumAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let tag = match self {
            Self::Suck => "SUCK",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Nop => "NOP",
        };
        write!(f, "{}", tag)
    }
}

/// How much of the grid an observation reveals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Observability {
    /// The entire grid.
    Full,
    /// Only the dirt flag of the agent's cell.
    Local,
}

impl fmt::Display for Observability {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::Local => write!(f, "local"),
        }
    }
}

/// An observation of the vacuum world.
///
/// The variant matches the environment's configured observability mode,
/// fixed for the environment's lifetime. The full-mode grid is an
/// independent copy; mutating it has no effect on the environment.
#[derive(Debug, Clone, PartialEq)]
pub enum VacuumObs {
    Full {
        pos: (usize, usize),
        grid: Array2<bool>,
    },
    Local {
        pos: (usize, usize),
        dirty_here: bool,
    },
}

impl VacuumObs {
    /// The agent's `(x, y)` position.
    pub const fn pos(&self) -> (usize, usize) {
        match self {
            Self::Full { pos, .. } | Self::Local { pos, .. } => *pos,
        }
    }

    /// Whether the agent's current cell is dirty.
    pub fn dirty_here(&self) -> bool {
        match self {
            Self::Full { pos: (x, y), grid } => grid[[*y, *x]],
            Self::Local { dirty_here, .. } => *dirty_here,
        }
    }
}

impl fmt::Display for VacuumObs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Full { pos, grid } => {
                let num_dirty = grid.iter().filter(|dirty| **dirty).count();
                write!(f, "pos=({}, {}) dirty_cells={}", pos.0, pos.1, num_dirty)
            }
            Self::Local { pos, dirty_here } => {
                let state = if *dirty_here { "dirty" } else { "clean" };
                write!(f, "pos=({}, {}) {}", pos.0, pos.1, state)
            }
        }
    }
}

/// Vacuum world configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VacuumConfig {
    pub width: usize,
    pub height: usize,
    /// Per-step, per-cell probability that a clean cell becomes dirty.
    pub dirt_spawn_prob: f64,
    pub observability: Observability,
    pub max_steps: u64,
}

impl Default for VacuumConfig {
    fn default() -> Self {
        Self {
            width: 3,
            height: 3,
            dirt_spawn_prob: 0.05,
            observability: Observability::Full,
            max_steps: 10,
        }
    }
}

impl EnvBuilder<VacuumWorld> for VacuumConfig {
    fn build_env(&self, seed: u64) -> Result<VacuumWorld, BuildEnvError> {
        if self.width == 0 {
            return Err(BuildEnvError::NonPositive { name: "width" });
        }
        if self.height == 0 {
            return Err(BuildEnvError::NonPositive { name: "height" });
        }
        if self.max_steps == 0 {
            return Err(BuildEnvError::NonPositive { name: "max_steps" });
        }
        let dirt_dist = Bernoulli::new(self.dirt_spawn_prob)?;
        let mut env = VacuumWorld {
            config: *self,
            grid: Array2::from_elem((self.height, self.width), false),
            agent_pos: (0, 0),
            t: 0,
            dirt_dist,
            rng: StdRng::seed_from_u64(seed),
        };
        let _ = env.reset();
        Ok(env)
    }
}

/// Vacuum World Environment
///
/// A `width` x `height` grid of cells, each either dirty or clean, with a
/// single agent that moves between adjacent cells and can vacuum the cell it
/// occupies.
/// * Every step costs -0.25.
/// * `SUCK` on a dirty cell earns +10 and cleans it.
/// * Movement costs an extra -1 whether or not it succeeds; attempting to
///   leave the grid keeps the agent in place for a further -0.5.
/// * After the action resolves, each clean cell independently becomes dirty
///   with probability `dirt_spawn_prob`.
/// * The episode ends after exactly `max_steps` steps.
#[derive(Debug, Clone)]
pub struct VacuumWorld {
    config: VacuumConfig,
    /// Dirt flags, indexed `[y, x]`.
    grid: Array2<bool>,
    agent_pos: (usize, usize),
    t: u64,
    dirt_dist: Bernoulli,
    rng: StdRng,
}

impl VacuumWorld {
    pub const fn config(&self) -> &VacuumConfig {
        &self.config
    }

    /// The agent's `(x, y)` position. Always within the grid.
    pub const fn agent_pos(&self) -> (usize, usize) {
        self.agent_pos
    }

    /// Force the dirt flag of one cell.
    ///
    /// For setting up controlled experiments. Panics if out of bounds.
    pub fn set_cell(&mut self, x: usize, y: usize, dirty: bool) {
        self.grid[[y, x]] = dirty;
    }

    /// Build the observation for the configured observability mode.
    pub fn observe(&self) -> VacuumObs {
        let (x, y) = self.agent_pos;
        match self.config.observability {
            Observability::Full => VacuumObs::Full {
                pos: self.agent_pos,
                grid: self.grid.clone(),
            },
            Observability::Local => VacuumObs::Local {
                pos: self.agent_pos,
                dirty_here: self.grid[[y, x]],
            },
        }
    }

    const fn in_bounds(&self, x: isize, y: isize) -> bool {
        x >= 0 && (x as usize) < self.config.width && y >= 0 && (y as usize) < self.config.height
    }
}

impl fmt::Display for VacuumWorld {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "VacuumWorld({}x{}, p = {}, {})",
            self.config.width, self.config.height, self.config.dirt_spawn_prob, self.config.observability
        )
    }
}

impl Environment for VacuumWorld {
    type Observation = VacuumObs;
    type Action = VacuumAction;

    fn reset(&mut self) -> Self::Observation {
        for dirty in &mut self.grid {
            *dirty = self.rng.gen();
        }
        self.agent_pos = (0, 0);
        self.t = 0;
        self.observe()
    }

    fn step(
        &mut self,
        action: &Self::Action,
    ) -> Result<(Option<Self::Observation>, f64, bool), StepError> {
        if self.t >= self.config.max_steps {
            return Err(StepError::PostTerminal);
        }

        let mut reward = -0.25;
        if let Some((dx, dy)) = action.offset() {
            reward -= 1.0;
            let (x, y) = self.agent_pos;
            let target = (x as isize + dx, y as isize + dy);
            if self.in_bounds(target.0, target.1) {
                self.agent_pos = (target.0 as usize, target.1 as usize);
            } else {
                // Bounds violation is a soft penalty, not a rejected action.
                reward -= 0.5;
            }
        } else if *action == VacuumAction::Suck {
            let (x, y) = self.agent_pos;
            if self.grid[[y, x]] {
                reward += 10.0;
                self.grid[[y, x]] = false;
            }
        }

        // Dirt regeneration applies to every cell left clean by the action,
        // including one vacuumed this step.
        for dirty in &mut self.grid {
            if !*dirty && self.dirt_dist.sample(&mut self.rng) {
                *dirty = true;
            }
        }

        self.t += 1;
        let episode_done = self.t >= self.config.max_steps;
        Ok((Some(self.observe()), reward, episode_done))
    }
}

impl StructuredEnvironment for VacuumWorld {
    type ActionSpace = IndexedTypeSpace<VacuumAction>;

    fn action_space(&self) -> Self::ActionSpace {
        IndexedTypeSpace::new()
    }

    fn reward_range(&self) -> (f64, f64) {
        (-1.75, 9.75)
    }
}
