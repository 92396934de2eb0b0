//! Configuration error types.

use thiserror::Error;

/// Result alias for configuration loading and validation.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Why a configuration could not be loaded or accepted.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more fields hold unusable values.
    #[error("invalid configuration: {}", join(.0))]
    Invalid(Vec<ValidationError>),

    /// A config file could not be read.
    #[error("cannot read '{path}': {message}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error message.
        message: String,
    },

    /// TOML or JSON text did not match the config shape.
    #[error("cannot parse configuration: {0}")]
    Deserialization(String),

    /// A config could not be rendered.
    #[error("cannot render configuration: {0}")]
    Serialization(String),
}

impl ConfigError {
    /// Names of the fields that failed validation, empty for other errors.
    #[must_use]
    pub fn invalid_fields(&self) -> Vec<&str> {
        match self {
            Self::Invalid(errors) => errors.iter().map(|e| e.field.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// One rejected field.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Field name as it appears in TOML.
    pub field: String,
    /// What is wrong with the value.
    pub message: String,
}

impl ValidationError {
    /// Rejects `field` with `message`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::Deserialization(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Field-level checks run before a config is used.
pub trait Validate {
    /// Every problem found, empty when the config is usable.
    fn validate(&self) -> Vec<ValidationError>;

    /// True when [`validate`](Self::validate) finds nothing.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Collects all problems into one [`ConfigError::Invalid`].
    fn validate_or_error(&self) -> ConfigResult<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<ValidationError>);

    impl Validate for Fixed {
        fn validate(&self) -> Vec<ValidationError> {
            self.0.clone()
        }
    }

    #[test]
    fn test_validate_or_error() {
        assert!(Fixed(vec![]).validate_or_error().is_ok());

        let many = Fixed(vec![
            ValidationError::new("x", "is bad"),
            ValidationError::new("y", "is worse"),
        ]);
        let err = many.validate_or_error().unwrap_err();
        assert_eq!(err.invalid_fields(), vec!["x", "y"]);
        assert!(err.to_string().contains("x: is bad; y: is worse"));
    }
}
