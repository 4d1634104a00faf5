//! Guard configuration.

/// Configuration for [`super::VecCheckNan`].
///
/// Fixed at construction time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckNanConfig {
    /// Return an error instead of emitting a warning
    pub raise_exception: bool,
    /// Stop checking after the first detection
    pub warn_once: bool,
    /// Flag `+inf` / `-inf` as well as NaN
    pub check_inf: bool,
}

impl Default for CheckNanConfig {
    fn default() -> Self {
        Self {
            raise_exception: false,
            warn_once: true,
            check_inf: true,
        }
    }
}

impl CheckNanConfig {
    /// Set raise mode
    pub fn with_raise(mut self, raise_exception: bool) -> Self {
        self.raise_exception = raise_exception;
        self
    }

    /// Set warn-once mode
    pub fn with_warn_once(mut self, warn_once: bool) -> Self {
        self.warn_once = warn_once;
        self
    }

    /// Set infinity checking
    pub fn with_check_inf(mut self, check_inf: bool) -> Self {
        self.check_inf = check_inf;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CheckNanConfig::default();
        assert!(!config.raise_exception);
        assert!(config.warn_once);
        assert!(config.check_inf);
    }

    #[test]
    fn test_builder() {
        let config = CheckNanConfig::default()
            .with_raise(true)
            .with_warn_once(false)
            .with_check_inf(false);
        assert_eq!(
            config,
            CheckNanConfig {
                raise_exception: true,
                warn_once: false,
                check_inf: false,
            }
        );
    }
}
