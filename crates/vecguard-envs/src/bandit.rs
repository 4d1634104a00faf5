//! Multi-armed bandit environment.

use ndarray::{ArrayD, IxDyn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vecguard::env::{Env, EnvInfo, StepResult};

/// Multi-armed bandit environment
///
/// The agent must learn which arm gives the highest reward.
/// Rewards are determined by a fixed random seed, so all
/// instances have the same optimal arm.
pub struct Bandit {
    /// Number of arms
    num_actions: usize,
    /// Reward scale
    reward_scale: f32,
    /// Reward noise amplitude
    reward_noise: f32,
    /// Optimal arm index
    solution_idx: usize,
    /// RNG for noise
    rng: StdRng,
}

impl Bandit {
    /// Create a new bandit environment
    pub fn new(num_actions: usize) -> Self {
        Self::with_config(num_actions, 1.0, 0.0, 42)
    }

    /// Create with full configuration
    pub fn with_config(
        num_actions: usize,
        reward_scale: f32,
        reward_noise: f32,
        hard_fixed_seed: u64,
    ) -> Self {
        assert!(num_actions > 0, "Bandit needs at least one arm");

        // Use fixed seed to determine solution
        let mut seed_rng = StdRng::seed_from_u64(hard_fixed_seed);
        let solution_idx = seed_rng.gen_range(0..num_actions);

        Self {
            num_actions,
            reward_scale,
            reward_noise,
            solution_idx,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn num_actions(&self) -> usize {
        self.num_actions
    }

    pub fn solution(&self) -> usize {
        self.solution_idx
    }
}

impl Env for Bandit {
    fn observation_shape(&self) -> Vec<usize> {
        vec![1]
    }

    fn action_shape(&self) -> Vec<usize> {
        vec![1]
    }

    fn reset(&mut self, seed: Option<u64>) -> (ArrayD<f32>, EnvInfo) {
        if let Some(s) = seed {
            self.rng = StdRng::seed_from_u64(s);
        }

        let obs = ArrayD::from_elem(IxDyn(&[1]), 1.0);
        (obs, EnvInfo::new())
    }

    fn step(&mut self, action: &ArrayD<f32>) -> StepResult {
        // Non-finite or out-of-range arms pay nothing
        let arm = action.iter().next().copied().unwrap_or(f32::NAN);
        let correct = arm.is_finite() && arm >= 0.0 && arm.round() as usize == self.solution_idx;
        let mut reward = if correct { 1.0 } else { 0.0 };

        if self.reward_noise > 0.0 {
            let noise: f32 = self.rng.gen::<f32>() * 2.0 - 1.0;
            reward += noise * self.reward_noise;
        }

        reward *= self.reward_scale;

        StepResult {
            observation: ArrayD::from_elem(IxDyn(&[1]), 1.0),
            reward,
            terminated: true, // Episode ends after one step
            truncated: false,
            info: EnvInfo::new().with_extra("score", if correct { 1.0 } else { 0.0 }),
        }
    }

    fn render(&self) -> Option<String> {
        Some(format!("Bandit: solution arm = {}", self.solution_idx))
    }
}
