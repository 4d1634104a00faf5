//! # vecguard
//!
//! NaN and infinity checking for vectorized reinforcement-learning environments.
//!
//! ## Overview
//!
//! vecguard provides:
//! - A single-environment trait (`Env`) and a vectorized-environment trait
//!   (`VecEnv`) with an asynchronous `step_async` / `step_wait` contract
//! - A `Serial` backend that runs several environments in lockstep
//! - `VecCheckNan`, a transparent wrapper that reports NaN or infinite values
//!   flowing through any `VecEnv`, either as a `tracing` warning or as an error
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vecguard::prelude::*;
//! use vecguard_envs::Identity;
//!
//! let venv = Serial::new(|| Identity::new(2), 4);
//! let mut venv = VecCheckNan::with_config(venv, CheckNanConfig::default().with_raise(true));
//!
//! let obs = venv.reset(Some(42))?;
//! let actions = Array2::<f32>::zeros((4, 2));
//! let step = venv.step(&actions)?;
//! ```

pub mod check;
pub mod env;
pub mod vector;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::check::{
        AnomalyKind, CheckNanConfig, Finding, FiniteScan, GuardState, LastAction, NanReport,
        VecCheckNan,
    };
    pub use crate::env::{
        Action, Env, EnvInfo, Fault, FaultTarget, InjectFault, Observation, StepResult,
    };
    pub use crate::vector::{Serial, VecEnv, VecEnvConfig, VecStep};
    pub use crate::GuardError;
    pub use ndarray::{Array2, ArrayD, IxDyn};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error types for the library
#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    /// Raised by [`check::VecCheckNan`] in raise mode. Displays as the
    /// diagnostic message.
    #[error("{0}")]
    NonFinite(check::NanReport),

    #[error("Environment error: {0}")]
    EnvError(String),

    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("step_wait called without a pending step_async")]
    NoPendingStep,

    #[error("step_async called while a previous step is still pending")]
    StepPending,
}

pub type Result<T> = core::result::Result<T, GuardError>;
