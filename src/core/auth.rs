//! Admin gate for exports
//!
//! A plain equality check against the configured admin password.

use crate::types::SurveyError;

/// Password used when none is configured
pub const DEFAULT_ADMIN_PASSWORD: &str = "3939889";

/// Guards the export path
#[derive(Debug, Clone)]
pub struct AdminGate {
    password: String,
}

impl AdminGate {
    pub fn new(password: impl Into<String>) -> Self {
        AdminGate {
            password: password.into(),
        }
    }

    /// Check `input` against the admin password
    pub fn authenticate(&self, input: &str) -> bool {
        input == self.password
    }

    /// Like [`authenticate`](Self::authenticate), but reports why access was refused
    ///
    /// An empty input is a missing password, anything else that does not
    /// match is a failed attempt.
    pub fn authorize(&self, input: &str) -> Result<(), SurveyError> {
        if input.is_empty() {
            Err(SurveyError::MissingPassword)
        } else if self.authenticate(input) {
            Ok(())
        } else {
            Err(SurveyError::AuthenticationFailed)
        }
    }
}

impl Default for AdminGate {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_PASSWORD)
    }
}
