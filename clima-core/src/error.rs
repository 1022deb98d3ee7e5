use reqwest::StatusCode;
use thiserror::Error;

/// Rejected at the submission boundary; never reaches the weather client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("⚠️ Por favor selecciona una ciudad antes de buscar el clima")]
    EmptyCity,
}

/// Any failure of the single outbound weather request.
///
/// The detail is kept for logs and for callers that want to tell a missing
/// city apart from a dead network. The search controller does not.
#[derive(Debug, Error)]
pub enum QueryFailure {
    #[error("failed to send request to OpenWeather: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("OpenWeather request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to read OpenWeather response body: {0}")]
    Body(#[source] reqwest::Error),

    #[error("failed to parse OpenWeather JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl QueryFailure {
    /// OpenWeather answers 404 when the `q` parameter matches no city.
    pub fn is_not_found(&self) -> bool {
        matches!(self, QueryFailure::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}
