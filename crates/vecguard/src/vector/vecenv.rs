//! Vectorized environment abstraction.

use crate::check::FiniteScan;
use crate::env::EnvInfo;
use crate::Result;
use std::fmt::{Debug, Display};

/// Configuration for vectorized environments
#[derive(Clone, Debug)]
pub struct VecEnvConfig {
    /// Number of environments
    pub num_envs: usize,
    /// Random seed base
    pub seed: u64,
}

impl Default for VecEnvConfig {
    fn default() -> Self {
        Self {
            num_envs: 1,
            seed: 42,
        }
    }
}

impl VecEnvConfig {
    /// Create a new config with specified number of environments
    pub fn new(num_envs: usize) -> Self {
        Self {
            num_envs,
            ..Default::default()
        }
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Result from stepping all environments
#[derive(Clone, Debug, PartialEq)]
pub struct VecStep<O> {
    /// Observations for all environments
    pub observations: O,
    /// Rewards for all environments
    pub rewards: Vec<f32>,
    /// Episode-end flags for all environments
    pub dones: Vec<bool>,
    /// Info for all environments
    pub infos: Vec<EnvInfo>,
}

/// Trait for vectorized environments.
///
/// Stepping is split in two: `step_async` hands a batch of actions over and
/// `step_wait` collects the results. Wrappers implement this trait too, so
/// they can be stacked over any backend.
pub trait VecEnv {
    /// Batch of actions, one per sub-environment
    type Action: Clone + Debug + Display + FiniteScan;
    /// Batch of observations, one per sub-environment
    type Observation: Clone + Debug + Display + FiniteScan;

    /// Get the number of environments
    fn num_envs(&self) -> usize;

    /// Reset all environments
    fn reset(&mut self, seed: Option<u64>) -> Result<Self::Observation>;

    /// Submit actions for all environments
    fn step_async(&mut self, actions: &Self::Action) -> Result<()>;

    /// Wait for the results of the last `step_async`
    fn step_wait(&mut self) -> Result<VecStep<Self::Observation>>;

    /// Step all environments synchronously
    fn step(&mut self, actions: &Self::Action) -> Result<VecStep<Self::Observation>> {
        self.step_async(actions)?;
        self.step_wait()
    }

    /// Close all environments
    fn close(&mut self) {}
}
