use actix_web::{
    http::{header::ContentType, StatusCode},
    HttpResponse, ResponseError,
};
use thiserror::Error;

/// Service-specific error types
///
/// Every variant is terminal for the request that produced it. The display
/// text is sent verbatim as a plain-text response body.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The processing gate is held by another block simulation
    #[error("Processing another request")]
    Busy,

    /// The request body is not a valid block request
    #[error("Invalid request payload")]
    InvalidPayload,

    /// Aggregate gas of the batch is above the block gas limit
    #[error("Gas limit exceeded")]
    GasLimitExceeded,

    /// Failure while encoding a response body
    #[error("{0}")]
    Serialization(String),

    /// The block simulator could not be reached or answered with an error
    #[error("Blocks service error: {0}")]
    Upstream(String),
}

impl ResponseError for ServiceError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::plaintext())
            .body(self.to_string())
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            ServiceError::Busy => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::InvalidPayload => StatusCode::BAD_REQUEST,
            ServiceError::GasLimitExceeded => StatusCode::FORBIDDEN,
            ServiceError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::Upstream(err.to_string())
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Serialization(err.to_string())
    }
}
