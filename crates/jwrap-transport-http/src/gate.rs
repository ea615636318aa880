//! Access gate run before the dispatch core.

/// Whether remote calls may reach the target at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessPolicy {
    /// The remote API is switched on.
    pub remote_api_allowed: bool,
    /// Demo installations refuse every call.
    pub demo_mode: bool,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            remote_api_allowed: true,
            demo_mode: false,
        }
    }
}

impl AccessPolicy {
    /// Checks the policy.
    ///
    /// # Errors
    ///
    /// Returns the plain-text refusal to send back when access is denied.
    pub fn check(&self) -> Result<(), &'static str> {
        if self.demo_mode {
            return Err("This function is disabled in demo mode.");
        }
        if !self.remote_api_allowed {
            return Err("Remote API is disabled in security settings.");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_allows() {
        assert!(AccessPolicy::default().check().is_ok());
    }

    #[test]
    fn disabled_api_refused() {
        let p = AccessPolicy {
            remote_api_allowed: false,
            demo_mode: false,
        };
        assert_eq!(
            p.check(),
            Err("Remote API is disabled in security settings.")
        );
    }

    #[test]
    fn demo_mode_checked_first() {
        let p = AccessPolicy {
            remote_api_allowed: false,
            demo_mode: true,
        };
        assert_eq!(p.check(), Err("This function is disabled in demo mode."));
    }
}
