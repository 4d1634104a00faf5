//! Environment traits and wrappers.
//!
//! Provides the single-environment `Env` trait that vectorized backends drive,
//! plus the `InjectFault` wrapper for provoking non-finite values.

mod traits;
mod wrappers;

pub use traits::{Action, Env, EnvInfo, Observation, StepResult};
pub use wrappers::{Fault, FaultTarget, InjectFault};
