//! Environment wrappers.

use super::{Env, EnvInfo, StepResult};
use ndarray::ArrayD;
use std::fmt;

/// Non-finite value written by [`InjectFault`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fault {
    Nan,
    PosInf,
    NegInf,
}

impl Fault {
    /// The floating point value this fault writes.
    pub fn value(self) -> f32 {
        match self {
            Fault::Nan => f32::NAN,
            Fault::PosInf => f32::INFINITY,
            Fault::NegInf => f32::NEG_INFINITY,
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::Nan => write!(f, "nan"),
            Fault::PosInf => write!(f, "inf"),
            Fault::NegInf => write!(f, "-inf"),
        }
    }
}

/// Which part of a step result receives the fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaultTarget {
    /// First element of the observation
    Observation,
    /// The scalar reward
    Reward,
}

/// Wrapper that corrupts one step of the wrapped environment.
///
/// Counts steps since construction (resets do not rewind the counter) and on
/// step number `at_step` (1-based) overwrites the chosen target with the
/// fault value. Used to provoke [`crate::check::VecCheckNan`] in tests and demos.
pub struct InjectFault<E: Env> {
    env: E,
    fault: Fault,
    target: FaultTarget,
    at_step: u64,
    steps: u64,
}

impl<E: Env> InjectFault<E> {
    /// Wrap an environment, injecting `fault` into `target` on step `at_step`
    pub fn new(env: E, fault: Fault, target: FaultTarget, at_step: u64) -> Self {
        Self {
            env,
            fault,
            target,
            at_step,
            steps: 0,
        }
    }

    /// Number of steps taken so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Get a reference to the inner environment
    pub fn inner(&self) -> &E {
        &self.env
    }

    /// Get a mutable reference to the inner environment
    pub fn inner_mut(&mut self) -> &mut E {
        &mut self.env
    }
}

impl<E: Env> Env for InjectFault<E> {
    fn observation_shape(&self) -> Vec<usize> {
        self.env.observation_shape()
    }

    fn action_shape(&self) -> Vec<usize> {
        self.env.action_shape()
    }

    fn reset(&mut self, seed: Option<u64>) -> (ArrayD<f32>, EnvInfo) {
        self.env.reset(seed)
    }

    fn step(&mut self, action: &ArrayD<f32>) -> StepResult {
        let mut result = self.env.step(action);
        self.steps += 1;

        if self.steps == self.at_step {
            match self.target {
                FaultTarget::Observation => {
                    if let Some(first) = result.observation.iter_mut().next() {
                        *first = self.fault.value();
                    }
                }
                FaultTarget::Reward => result.reward = self.fault.value(),
            }
        }

        result
    }

    fn render(&self) -> Option<String> {
        self.env.render()
    }

    fn close(&mut self) {
        self.env.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;

    // Simple test environment
    struct SimpleEnv {
        step_count: u32,
    }

    impl Env for SimpleEnv {
        fn observation_shape(&self) -> Vec<usize> {
            vec![2]
        }

        fn action_shape(&self) -> Vec<usize> {
            vec![1]
        }

        fn reset(&mut self, _seed: Option<u64>) -> (ArrayD<f32>, EnvInfo) {
            self.step_count = 0;
            (ArrayD::zeros(IxDyn(&[2])), EnvInfo::new())
        }

        fn step(&mut self, _action: &ArrayD<f32>) -> StepResult {
            self.step_count += 1;
            StepResult {
                observation: ArrayD::zeros(IxDyn(&[2])),
                reward: 1.0,
                terminated: self.step_count >= 5,
                truncated: false,
                info: EnvInfo::new(),
            }
        }
    }

    #[test]
    fn test_fault_hits_only_configured_step() {
        let env = SimpleEnv { step_count: 0 };
        let mut wrapped = InjectFault::new(env, Fault::Nan, FaultTarget::Reward, 3);
        wrapped.reset(None);

        let action = ArrayD::zeros(IxDyn(&[1]));
        for step in 1..=4 {
            let result = wrapped.step(&action);
            if step == 3 {
                assert!(result.reward.is_nan());
            } else {
                assert_eq!(result.reward, 1.0);
            }
        }
        assert_eq!(wrapped.steps(), 4);
    }

    #[test]
    fn test_fault_into_observation() {
        let env = SimpleEnv { step_count: 0 };
        let mut wrapped = InjectFault::new(env, Fault::NegInf, FaultTarget::Observation, 1);
        wrapped.reset(None);

        let result = wrapped.step(&ArrayD::zeros(IxDyn(&[1])));
        assert_eq!(result.observation[[0]], f32::NEG_INFINITY);
        assert_eq!(result.observation[[1]], 0.0);
        assert_eq!(result.reward, 1.0);
    }

    #[test]
    fn test_fault_display() {
        assert_eq!(Fault::Nan.to_string(), "nan");
        assert_eq!(Fault::PosInf.to_string(), "inf");
        assert_eq!(Fault::NegInf.to_string(), "-inf");
    }
}
