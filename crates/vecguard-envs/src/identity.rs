//! Identity environment with a continuous action space.

use ndarray::{Array1, ArrayD};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vecguard::env::{Env, EnvInfo, StepResult};

/// Observation is a random target vector; reward is the negative squared
/// distance between action and target.
///
/// Arithmetic is left unguarded, so a NaN or infinite action turns into a
/// non-finite reward on the same step.
pub struct Identity {
    target: Vec<f32>,
    size: usize,
    rng: StdRng,
}

impl Identity {
    pub fn new(size: usize) -> Self {
        Self {
            target: vec![0.0; size],
            size,
            rng: StdRng::from_entropy(),
        }
    }

    fn resample(&mut self) -> ArrayD<f32> {
        let rng = &mut self.rng;
        self.target = (0..self.size).map(|_| rng.gen::<f32>() * 2.0 - 1.0).collect();
        Array1::from(self.target.clone()).into_dyn()
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::new(4)
    }
}

impl Env for Identity {
    fn observation_shape(&self) -> Vec<usize> {
        vec![self.size]
    }

    fn action_shape(&self) -> Vec<usize> {
        vec![self.size]
    }

    fn reset(&mut self, seed: Option<u64>) -> (ArrayD<f32>, EnvInfo) {
        if let Some(s) = seed {
            self.rng = StdRng::seed_from_u64(s);
        }
        (self.resample(), EnvInfo::new())
    }

    fn step(&mut self, action: &ArrayD<f32>) -> StepResult {
        let dist_sq: f32 = self
            .target
            .iter()
            .zip(action.iter())
            .map(|(t, a)| (t - a).powi(2))
            .sum();

        StepResult {
            observation: self.resample(),
            reward: -dist_sq,
            terminated: false,
            truncated: false,
            info: EnvInfo::new(),
        }
    }
}
