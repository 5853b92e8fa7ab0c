// File: src/error.rs
// Purpose: Error type shared by the engine and its host bindings

use thiserror::Error;

/// Errors raised outside of validation.
///
/// A failed field check is not an error: it is reported as a
/// [`Violation`](crate::Violation) inside a [`FieldOutcome`](crate::FieldOutcome).
#[derive(Debug, Error)]
pub enum FormError {
    #[error("unknown form field: {0}")]
    UnknownField(String),

    #[error("failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("storage unavailable: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldName;

    #[test]
    fn test_unknown_field_names_the_id() {
        let err = "alamat".parse::<FieldName>().unwrap_err();
        assert!(matches!(err, FormError::UnknownField(ref id) if id == "alamat"));
        assert_eq!(err.to_string(), "unknown form field: alamat");
    }
}
