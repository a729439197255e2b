//! Error types for Synheart Cohort

use thiserror::Error;

/// Errors that can occur during generation or verification
#[derive(Debug, Error)]
pub enum GenError {
    #[error("Invalid profile `{profile}`: {reason}")]
    InvalidProfile { profile: String, reason: String },

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Date parse error: {0}")]
    DateParseError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl GenError {
    /// Shorthand for profile-validation failures
    pub fn invalid_profile(profile: &str, reason: impl Into<String>) -> Self {
        Self::InvalidProfile {
            profile: profile.to_string(),
            reason: reason.into(),
        }
    }
}
