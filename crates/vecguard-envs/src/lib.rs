//! Built-in environments for vecguard.
//!
//! Provides simple environments for testing and demos:
//! - `Bandit` - Multi-armed bandit
//! - `Identity` - Continuous target matching; NaN actions surface as NaN rewards

mod bandit;
mod identity;

pub use bandit::Bandit;
pub use identity::Identity;
