//! Core environment trait definitions.

use ndarray::ArrayD;
use std::collections::HashMap;
use std::fmt;

/// Information returned from environment steps
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnvInfo {
    /// Episode return (if done)
    pub episode_return: Option<f32>,
    /// Episode length (if done)
    pub episode_length: Option<f32>,
    /// Custom metrics (kept minimal for performance)
    pub extra: smallvec::SmallVec<[(&'static str, f32); 4]>,
}

impl EnvInfo {
    /// Create empty info
    pub fn new() -> Self {
        Self::default()
    }

    /// Add episode stats
    pub fn with_episode_stats(mut self, ret: f32, len: u32) -> Self {
        self.episode_return = Some(ret);
        self.episode_length = Some(len as f32);
        self
    }

    /// Add a custom metric
    pub fn with_extra(mut self, key: &'static str, value: f32) -> Self {
        self.extra.push((key, value));
        self
    }

    /// Get a value by key (including episode stats)
    pub fn get(&self, key: &str) -> Option<f32> {
        match key {
            "episode_return" => self.episode_return,
            "episode_length" => self.episode_length,
            _ => self.extra.iter().find(|(k, _)| k == &key).map(|(_, v)| *v),
        }
    }

    /// Iterate over every numeric value carried by this info.
    pub fn values(&self) -> impl Iterator<Item = f32> + '_ {
        self.episode_return
            .into_iter()
            .chain(self.episode_length)
            .chain(self.extra.iter().map(|(_, v)| *v))
    }
}

/// Result from a single environment step
#[derive(Clone, Debug)]
pub struct StepResult {
    /// Observation after the step
    pub observation: ArrayD<f32>,
    /// Reward received
    pub reward: f32,
    /// Whether episode terminated (goal reached, failure, etc.)
    pub terminated: bool,
    /// Whether episode truncated (time limit, etc.)
    pub truncated: bool,
    /// Additional info
    pub info: EnvInfo,
}

impl StepResult {
    /// Check if episode is done (terminated or truncated)
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Structured observation for vectorized envs with composite observation spaces
#[derive(Clone, Debug, PartialEq)]
pub enum Observation {
    /// Primitive array
    Array(ArrayD<f32>),
    /// Dictionary of observations
    Dict(HashMap<String, Observation>),
    /// Tuple of observations
    Tuple(Vec<Observation>),
}

/// Structured action for vectorized envs with composite action spaces
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Primitive array
    Array(ArrayD<f32>),
    /// Dictionary of actions
    Dict(HashMap<String, Action>),
    /// Tuple of actions
    Tuple(Vec<Action>),
}

fn write_dict<V: fmt::Display>(f: &mut fmt::Formatter<'_>, d: &HashMap<String, V>) -> fmt::Result {
    let mut keys: Vec<&String> = d.keys().collect();
    keys.sort();
    f.write_str("{")?;
    for (i, key) in keys.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "'{}': {}", key, d[key])?;
    }
    f.write_str("}")
}

fn write_tuple<V: fmt::Display>(f: &mut fmt::Formatter<'_>, t: &[V]) -> fmt::Result {
    f.write_str("(")?;
    for (i, item) in t.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str(")")
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Observation::Array(a) => write!(f, "{}", a),
            Observation::Dict(d) => write_dict(f, d),
            Observation::Tuple(t) => write_tuple(f, t),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Array(a) => write!(f, "{}", a),
            Action::Dict(d) => write_dict(f, d),
            Action::Tuple(t) => write_tuple(f, t),
        }
    }
}

/// Core trait for single environments.
///
/// Vectorized backends such as [`crate::vector::Serial`] drive a batch of these.
///
/// # Example
///
/// ```rust,ignore
/// use vecguard::env::{Env, EnvInfo, StepResult};
///
/// struct MyEnv {
///     state: f32,
/// }
///
/// impl Env for MyEnv {
///     fn observation_shape(&self) -> Vec<usize> {
///         vec![1]
///     }
///
///     fn action_shape(&self) -> Vec<usize> {
///         vec![1]
///     }
///
///     fn reset(&mut self, seed: Option<u64>) -> (ArrayD<f32>, EnvInfo) {
///         self.state = 0.0;
///         (ArrayD::from_elem(IxDyn(&[1]), self.state), EnvInfo::new())
///     }
///
///     fn step(&mut self, action: &ArrayD<f32>) -> StepResult {
///         // ... implement step logic
///     }
/// }
/// ```
pub trait Env: Send {
    /// Shape of a single observation
    fn observation_shape(&self) -> Vec<usize>;

    /// Shape of a single action
    fn action_shape(&self) -> Vec<usize>;

    /// Reset the environment to initial state
    ///
    /// # Arguments
    /// * `seed` - Optional random seed for reproducibility
    ///
    /// # Returns
    /// Tuple of (initial observation, info)
    fn reset(&mut self, seed: Option<u64>) -> (ArrayD<f32>, EnvInfo);

    /// Take a single step in the environment
    ///
    /// # Arguments
    /// * `action` - Action to execute
    ///
    /// # Returns
    /// StepResult containing observation, reward, done flags, and info
    fn step(&mut self, action: &ArrayD<f32>) -> StepResult;

    /// Optional: Render the environment
    fn render(&self) -> Option<String> {
        None
    }

    /// Optional: Close the environment and free resources
    fn close(&mut self) {}
}

impl<E: Env + ?Sized> Env for Box<E> {
    fn observation_shape(&self) -> Vec<usize> {
        (**self).observation_shape()
    }

    fn action_shape(&self) -> Vec<usize> {
        (**self).action_shape()
    }

    fn reset(&mut self, seed: Option<u64>) -> (ArrayD<f32>, EnvInfo) {
        (**self).reset(seed)
    }

    fn step(&mut self, action: &ArrayD<f32>) -> StepResult {
        (**self).step(action)
    }

    fn render(&self) -> Option<String> {
        (**self).render()
    }

    fn close(&mut self) {
        (**self).close()
    }
}
