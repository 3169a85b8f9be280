use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortAnalyticsError {
    #[error("Empty portfolio: {0}")]
    EmptyPortfolio(String),

    #[error("Missing reference data: {source_name}")]
    MissingReferenceData { source_name: String },

    #[error("Invalid frequency: '{token}' (expected 'daily', 'monthly', or 'annual')")]
    InvalidFrequency { token: String },

    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for PortAnalyticsError {
    fn from(e: serde_json::Error) -> Self {
        PortAnalyticsError::Serialization(e.to_string())
    }
}
