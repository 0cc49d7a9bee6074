//! Error types
//!
//! Everything here is a local, returned-value failure. Nothing retries.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    /// Caller passed a parameter outside its contract
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Settings JSON could not be parsed or written
    #[error("settings serialization failed: {0}")]
    Config(#[from] serde_json::Error),
}

impl SceneError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SceneError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message() {
        let err = SceneError::invalid("radius_range", "min 8 is greater than max 3");
        assert_eq!(
            err.to_string(),
            "invalid parameter `radius_range`: min 8 is greater than max 3"
        );
    }

    #[test]
    fn test_config_error_from_json() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: SceneError = json_err.into();
        assert!(matches!(err, SceneError::Config(_)));
    }
}
