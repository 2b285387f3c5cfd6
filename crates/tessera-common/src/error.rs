//! Error types for Tessera
//!
//! `TesseraError` is the application error taxonomy. Services propagate it
//! inside `anyhow::Error`; the transport layer downcasts to pick a status
//! code (its actix wrapper lives in the server crate).

/// Application-specific error types
///
/// Validation failures (`InvalidParam`, `UniqueViolation`) are
/// client-correctable and carry enough detail to identify the offending
/// field. `NotFound` is terminal. Everything else is reported generically
/// as `Internal`.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum TesseraError {
    #[error("invalid parameter '{field}': {message}")]
    InvalidParam { field: String, message: String },

    #[error(
        "an enabled entry already exists for module '{module}', configName '{config_name}' (conflicting id: {conflicting_id})"
    )]
    UniqueViolation {
        module: String,
        config_name: String,
        conflicting_id: String,
    },

    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error("internal error: {0}")]
    Internal(String),
}

impl TesseraError {
    pub fn invalid_param(field: impl Into<String>, message: impl Into<String>) -> Self {
        TesseraError::InvalidParam {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        TesseraError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tessera_error_display() {
        let err = TesseraError::invalid_param("facets", "trailing comma");
        assert_eq!(
            format!("{}", err),
            "invalid parameter 'facets': trailing comma"
        );

        let err = TesseraError::not_found("entry", "abc-123");
        assert_eq!(format!("{}", err), "entry 'abc-123' not found");

        let err = TesseraError::Internal("unexpected".to_string());
        assert_eq!(format!("{}", err), "internal error: unexpected");
    }

    #[test]
    fn test_unique_violation_display() {
        let err = TesseraError::UniqueViolation {
            module: "CHECKOUT".to_string(),
            config_name: "other_settings".to_string(),
            conflicting_id: "id-1".to_string(),
        };
        let message = format!("{}", err);
        assert!(message.contains("CHECKOUT"));
        assert!(message.contains("other_settings"));
        assert!(message.contains("id-1"));
    }

    #[test]
    fn test_anyhow_downcast_round_trip() {
        let err: anyhow::Error = TesseraError::not_found("entry", "x").into();
        assert!(matches!(
            err.downcast_ref::<TesseraError>(),
            Some(TesseraError::NotFound { .. })
        ));
    }
}
