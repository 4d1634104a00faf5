#![allow(dead_code)]

use ndarray::Array2;
use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;
use vecguard::env::EnvInfo;
use vecguard::vector::{VecEnv, VecStep};
use vecguard::{GuardError, Result};

/// Vector env that replays queued results and records the actions it receives.
pub struct Scripted {
    pub num_envs: usize,
    pub resets: VecDeque<Array2<f32>>,
    pub steps: VecDeque<VecStep<Array2<f32>>>,
    pub received: Vec<Array2<f32>>,
    pub closed: bool,
}

impl Scripted {
    pub fn new(num_envs: usize) -> Self {
        Self {
            num_envs,
            resets: VecDeque::new(),
            steps: VecDeque::new(),
            received: Vec::new(),
            closed: false,
        }
    }

    pub fn on_reset(mut self, obs: Array2<f32>) -> Self {
        self.resets.push_back(obs);
        self
    }

    pub fn on_step(mut self, step: VecStep<Array2<f32>>) -> Self {
        self.steps.push_back(step);
        self
    }
}

impl VecEnv for Scripted {
    type Action = Array2<f32>;
    type Observation = Array2<f32>;

    fn num_envs(&self) -> usize {
        self.num_envs
    }

    fn reset(&mut self, _seed: Option<u64>) -> Result<Array2<f32>> {
        self.resets
            .pop_front()
            .ok_or_else(|| GuardError::EnvError("no scripted reset left".to_string()))
    }

    fn step_async(&mut self, actions: &Array2<f32>) -> Result<()> {
        self.received.push(actions.clone());
        Ok(())
    }

    fn step_wait(&mut self) -> Result<VecStep<Array2<f32>>> {
        self.steps
            .pop_front()
            .ok_or_else(|| GuardError::EnvError("no scripted step left".to_string()))
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

/// Observations for two envs with one feature each.
pub fn obs(a: f32, b: f32) -> Array2<f32> {
    Array2::from_shape_vec((2, 1), vec![a, b]).unwrap()
}

pub fn actions(a: f32, b: f32) -> Array2<f32> {
    obs(a, b)
}

pub fn step(observations: Array2<f32>, rewards: Vec<f32>) -> VecStep<Array2<f32>> {
    VecStep {
        observations,
        rewards,
        dones: vec![false, false],
        infos: vec![EnvInfo::new(), EnvInfo::new()],
    }
}

pub fn clean_step() -> VecStep<Array2<f32>> {
    step(obs(0.1, 0.2), vec![1.0, 0.0])
}

/// Log output collected from a scoped `tracing` subscriber.
#[derive(Clone, Default)]
pub struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Number of guard reports written
    pub fn reports(&self) -> usize {
        self.contents().matches("Last given value was").count()
    }
}

pub struct CapturedWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = CapturedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CapturedWriter(self.0.clone())
    }
}

/// Run `f` with warnings routed into a buffer.
pub fn capture<T>(f: impl FnOnce() -> T) -> (T, Captured) {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(captured.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, captured)
}
