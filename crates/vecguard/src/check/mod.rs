//! NaN and infinity checking for vectorized environments.
//!
//! [`VecCheckNan`] wraps any [`VecEnv`] and inspects every payload crossing it:
//! actions on `step_async`, observations / rewards / done flags / infos on
//! `step_wait`, and observations on `reset`. Values are never modified. When
//! something non-finite shows up the guard either emits a `tracing` warning
//! or returns [`GuardError::NonFinite`], depending on [`CheckNanConfig`].

mod config;
mod report;
mod scan;

pub use config::CheckNanConfig;
pub use report::{AnomalyKind, Finding, NanReport};
pub use scan::FiniteScan;

use crate::vector::{VecEnv, VecStep};
use crate::{GuardError, Result};
use std::fmt;

/// Whether the guard still inspects payloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardState {
    /// Checking every call
    Armed,
    /// Already reported once with `warn_once` set; no further checks
    Dormant,
}

/// The most recent action that went through the guard.
#[derive(Clone, Debug, PartialEq)]
pub enum LastAction<A> {
    /// Nothing submitted or reset yet
    Unset,
    /// The environment was reset; no action precedes the current observation
    Reset,
    /// Actions passed to the last `step_async`
    Submitted(A),
}

impl<A: fmt::Display> fmt::Display for LastAction<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LastAction::Unset => f.write_str("None"),
            LastAction::Reset => f.write_str("reset, no first action"),
            LastAction::Submitted(actions) => write!(f, "{}", actions),
        }
    }
}

/// Which call triggered a detection pass; selects the value quoted in the message.
#[derive(Clone, Copy, Debug)]
enum Origin {
    Action,
    Observation,
}

struct Payload<'a> {
    name: &'static str,
    value: &'a dyn FiniteScan,
}

fn payload<'a, T: FiniteScan>(name: &'static str, value: &'a T) -> Payload<'a> {
    Payload { name, value }
}

/// NaN and inf checking wrapper for vectorized environments.
///
/// Warns by default, so you can tell where a NaN or inf originated from.
/// See [`CheckNanConfig`] for raising instead, re-arming after every report,
/// and ignoring infinities.
pub struct VecCheckNan<V: VecEnv> {
    venv: V,
    config: CheckNanConfig,
    actions: LastAction<V::Action>,
    observations: Option<V::Observation>,
    user_warned: bool,
}

impl<V: VecEnv> VecCheckNan<V> {
    /// Wrap `venv` with the default configuration (warn, once, including inf)
    pub fn new(venv: V) -> Self {
        Self::with_config(venv, CheckNanConfig::default())
    }

    /// Wrap `venv` with an explicit configuration
    pub fn with_config(venv: V, config: CheckNanConfig) -> Self {
        tracing::debug!(
            raise_exception = config.raise_exception,
            warn_once = config.warn_once,
            check_inf = config.check_inf,
            num_envs = venv.num_envs(),
            "NaN check enabled"
        );
        Self {
            venv,
            config,
            actions: LastAction::Unset,
            observations: None,
            user_warned: false,
        }
    }

    pub fn config(&self) -> &CheckNanConfig {
        &self.config
    }

    pub fn state(&self) -> GuardState {
        if self.user_warned && self.config.warn_once {
            GuardState::Dormant
        } else {
            GuardState::Armed
        }
    }

    /// The last action recorded by `step_async` or `reset`
    pub fn last_action(&self) -> &LastAction<V::Action> {
        &self.actions
    }

    /// The last observations returned by `step_wait` or `reset`
    pub fn last_observation(&self) -> Option<&V::Observation> {
        self.observations.as_ref()
    }

    /// Get a reference to the wrapped environment
    pub fn inner(&self) -> &V {
        &self.venv
    }

    /// Get a mutable reference to the wrapped environment
    pub fn inner_mut(&mut self) -> &mut V {
        &mut self.venv
    }

    /// Unwrap, returning the wrapped environment
    pub fn into_inner(self) -> V {
        self.venv
    }

    fn check_val(&mut self, origin: Origin, payloads: &[Payload<'_>]) -> Option<NanReport> {
        if self.state() == GuardState::Dormant {
            return None;
        }

        let mut found = Vec::new();
        for p in payloads {
            if self.config.check_inf && p.value.has_inf() {
                found.push(Finding::new(p.name, AnomalyKind::Inf));
            }
            if p.value.has_nan() {
                found.push(Finding::new(p.name, AnomalyKind::Nan));
            }
        }

        if found.is_empty() {
            return None;
        }

        self.user_warned = true;
        let last_value = match origin {
            Origin::Action => format!("action={}", self.actions),
            Origin::Observation => match &self.observations {
                Some(obs) => format!("observations={}", obs),
                None => "observations=None".to_string(),
            },
        };
        Some(NanReport::new(found, last_value))
    }

    fn emit(&self, report: Option<NanReport>) -> Result<()> {
        match report {
            None => Ok(()),
            Some(report) if self.config.raise_exception => Err(GuardError::NonFinite(report)),
            Some(report) => {
                tracing::warn!("{}", report);
                Ok(())
            }
        }
    }
}

impl<V: VecEnv> VecEnv for VecCheckNan<V> {
    type Action = V::Action;
    type Observation = V::Observation;

    fn num_envs(&self) -> usize {
        self.venv.num_envs()
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<V::Observation> {
        let observations = self.venv.reset(seed)?;
        self.actions = LastAction::Reset;

        let report = self.check_val(
            Origin::Observation,
            &[payload("observations", &observations)],
        );
        self.observations = Some(observations.clone());
        self.emit(report)?;

        Ok(observations)
    }

    fn step_async(&mut self, actions: &V::Action) -> Result<()> {
        self.actions = LastAction::Submitted(actions.clone());
        let report = self.check_val(Origin::Action, &[payload("actions", actions)]);

        // Forwarded even when the actions are bad. A detection is delivered
        // before any error from the wrapped env.
        let forwarded = self.venv.step_async(actions);
        self.emit(report)?;
        forwarded
    }

    fn step_wait(&mut self) -> Result<VecStep<V::Observation>> {
        let step = self.venv.step_wait()?;

        let report = self.check_val(
            Origin::Observation,
            &[
                payload("observations", &step.observations),
                payload("rewards", &step.rewards),
                payload("news", &step.dones),
                payload("infos", &step.infos),
            ],
        );
        self.observations = Some(step.observations.clone());
        self.emit(report)?;

        Ok(step)
    }

    fn close(&mut self) {
        self.venv.close()
    }
}
