//! Vectorized environments.
//!
//! - `VecEnv` - the batched `reset` / `step_async` / `step_wait` contract
//! - `Serial` - sequential backend for debugging and tests

mod serial;
mod vecenv;

pub use serial::Serial;
pub use vecenv::{VecEnv, VecEnvConfig, VecStep};
