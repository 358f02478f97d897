//! Domain error types.

/// Top-level error type for hedgefund.
#[derive(Debug, thiserror::Error)]
pub enum HedgefundError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("Invalid timeframe. Use one of: {valid}")]
    InvalidTimeframe { valid: String },

    #[error("invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("{kind} with ID {id} not found")]
    NotFound { kind: String, id: String },

    #[error("storage error in {path}: {reason}")]
    Storage { path: String, reason: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl HedgefundError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: kind.into(),
            id: id.into(),
        }
    }
}

impl From<&HedgefundError> for std::process::ExitCode {
    fn from(err: &HedgefundError) -> Self {
        let code: u8 = match err {
            HedgefundError::Io(_) | HedgefundError::Json(_) | HedgefundError::Storage { .. } => 1,
            HedgefundError::ConfigParse { .. } | HedgefundError::ConfigInvalid { .. } => 2,
            HedgefundError::InvalidTimeframe { .. } | HedgefundError::InvalidInput { .. } => 3,
            HedgefundError::NotFound { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
