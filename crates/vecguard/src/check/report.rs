//! Findings and the diagnostic message built from them.

use std::fmt;

/// Kind of non-finite value found in a payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnomalyKind {
    Nan,
    Inf,
}

impl fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnomalyKind::Nan => write!(f, "nan"),
            AnomalyKind::Inf => write!(f, "inf"),
        }
    }
}

/// One detection: which payload, and what was wrong with it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Finding {
    pub name: &'static str,
    pub kind: AnomalyKind,
}

impl Finding {
    pub fn new(name: &'static str, kind: AnomalyKind) -> Self {
        Self { name, kind }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "found {} in {}", self.name, self.kind)
    }
}

/// Outcome of a detection pass that found something.
///
/// Displays as
/// `found rewards in inf, found infos in nan. Last given value was: observations=...`.
#[derive(Clone, Debug, PartialEq)]
pub struct NanReport {
    findings: Vec<Finding>,
    last_value: String,
}

impl NanReport {
    /// `last_value` is the already rendered `action=...` or `observations=...` tail.
    pub fn new(findings: Vec<Finding>, last_value: String) -> Self {
        Self {
            findings,
            last_value,
        }
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn last_value(&self) -> &str {
        &self.last_value
    }

    /// True if a finding of `kind` was reported for payload `name`
    pub fn contains(&self, name: &str, kind: AnomalyKind) -> bool {
        self.findings
            .iter()
            .any(|f| f.name == name && f.kind == kind)
    }
}

impl fmt::Display for NanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, finding) in self.findings.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", finding)?;
        }
        write!(f, ". Last given value was: {}", self.last_value)
    }
}
