//! Serial (sequential) vectorization backend.
//!
//! Runs environments one at a time in a single thread.
//! Useful for debugging and small-scale experiments.

use super::vecenv::{VecEnv, VecEnvConfig, VecStep};
use crate::env::Env;
use crate::{GuardError, Result};
use ndarray::{Array2, ArrayD, IxDyn};

/// Serial vectorization backend
pub struct Serial<E: Env> {
    /// Created environments
    envs: Vec<E>,
    /// Cached observation shape
    obs_shape: Vec<usize>,
    /// Actions submitted by `step_async` and not yet consumed
    pending: Option<Array2<f32>>,
}

impl<E: Env> Serial<E> {
    /// Create a new serial backend
    pub fn new<F>(env_creator: F, num_envs: usize) -> Self
    where
        F: Fn() -> E,
    {
        assert!(num_envs > 0, "Number of environments must be > 0");

        let envs: Vec<E> = (0..num_envs).map(|_| env_creator()).collect();
        let obs_shape = envs[0].observation_shape();

        Self {
            envs,
            obs_shape,
            pending: None,
        }
    }

    /// Create from a vector env config
    pub fn from_config<F>(env_creator: F, config: &VecEnvConfig) -> Self
    where
        F: Fn() -> E,
    {
        Self::new(env_creator, config.num_envs)
    }

    /// Access the sub-environments
    pub fn envs(&self) -> &[E] {
        &self.envs
    }

    fn obs_size(&self) -> usize {
        self.obs_shape.iter().product()
    }

    fn stack(&self, flat: Vec<f32>) -> Result<Array2<f32>> {
        let expected = [self.envs.len(), self.obs_size()];
        let actual = flat.len();
        Array2::from_shape_vec((expected[0], expected[1]), flat).map_err(|_| {
            GuardError::ShapeMismatch {
                expected: expected.to_vec(),
                actual: vec![actual],
            }
        })
    }

    fn check_obs(&self, obs: &ArrayD<f32>) -> Result<()> {
        if obs.shape() != self.obs_shape.as_slice() {
            return Err(GuardError::ShapeMismatch {
                expected: self.obs_shape.clone(),
                actual: obs.shape().to_vec(),
            });
        }
        Ok(())
    }
}

impl<E: Env> VecEnv for Serial<E> {
    type Action = Array2<f32>;
    type Observation = Array2<f32>;

    fn num_envs(&self) -> usize {
        self.envs.len()
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<Array2<f32>> {
        self.pending = None;

        let mut observations = Vec::with_capacity(self.envs.len() * self.obs_size());
        for i in 0..self.envs.len() {
            let env_seed = seed.map(|s| s.wrapping_add(i as u64));
            let (obs, _info) = self.envs[i].reset(env_seed);
            self.check_obs(&obs)?;
            observations.extend(obs.iter().copied());
        }

        self.stack(observations)
    }

    fn step_async(&mut self, actions: &Array2<f32>) -> Result<()> {
        if self.pending.is_some() {
            return Err(GuardError::StepPending);
        }
        if actions.nrows() != self.envs.len() {
            return Err(GuardError::ShapeMismatch {
                expected: vec![self.envs.len()],
                actual: vec![actions.nrows()],
            });
        }

        self.pending = Some(actions.clone());
        Ok(())
    }

    fn step_wait(&mut self) -> Result<VecStep<Array2<f32>>> {
        let actions = self.pending.take().ok_or(GuardError::NoPendingStep)?;

        let num_envs = self.envs.len();
        let mut observations = Vec::with_capacity(num_envs * self.obs_size());
        let mut rewards = Vec::with_capacity(num_envs);
        let mut dones = Vec::with_capacity(num_envs);
        let mut infos = Vec::with_capacity(num_envs);

        for i in 0..num_envs {
            let action_row = actions.row(i);
            let action = ArrayD::from_shape_vec(IxDyn(&[action_row.len()]), action_row.to_vec())
                .map_err(|e| GuardError::InvalidAction(e.to_string()))?;

            let result = self.envs[i].step(&action);
            let done = result.done();

            // Finished episodes restart immediately; the terminal observation is dropped
            let obs = if done {
                tracing::trace!(env = i, "auto-reset");
                self.envs[i].reset(None).0
            } else {
                result.observation
            };
            self.check_obs(&obs)?;

            observations.extend(obs.iter().copied());
            rewards.push(result.reward);
            dones.push(done);
            infos.push(result.info);
        }

        Ok(VecStep {
            observations: self.stack(observations)?,
            rewards,
            dones,
            infos,
        })
    }

    fn close(&mut self) {
        for env in &mut self.envs {
            env.close();
        }
    }
}
