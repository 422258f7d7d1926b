use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::{error, info, warn};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Initialisation error: {0}")]
    InitError(#[source] anyhow::Error),

    #[error("Client error: {0:?}")]
    ClientError(#[source] anyhow::Error),

    #[error("Not found: {0}")]
    NotFound(#[source] anyhow::Error),

    #[error("Fetch failure: {0}")]
    FetchFailure(String),

    #[error(
        "Insufficient content: fetched {length} characters but at least {minimum} are required"
    )]
    InsufficientContent { length: usize, minimum: usize },

    #[error("Storage unavailable: {0:?}")]
    StorageUnavailable(#[source] anyhow::Error),
}

impl TrackerError {
    pub fn serialize(&self) -> SerializedError { self.into() }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InitError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ClientError(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::FetchFailure(_) => StatusCode::BAD_GATEWAY,
            Self::InsufficientContent { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for TrackerError {
    fn into_response(self) -> Response { (self.status_code(), Json(self.serialize())).into_response() }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SerializedError {
    pub message: String,
    pub causes: Vec<String>,
}

impl From<&TrackerError> for SerializedError {
    fn from(error: &TrackerError) -> SerializedError {
        let mut causes = vec![];
        let mut current_error = std::error::Error::source(error);
        while let Some(error) = current_error {
            causes.push(error.to_string());
            current_error = error.source();
        }

        SerializedError {
            message: error.to_string(),
            causes,
        }
    }
}

pub const fn init_error(error: anyhow::Error) -> TrackerError { TrackerError::InitError(error) }

pub fn storage_error(error: anyhow::Error) -> TrackerError {
    error!("Storage error: {error:?}");
    TrackerError::StorageUnavailable(error)
}

pub fn client_error(error: anyhow::Error) -> TrackerError {
    info!("Client error: {error:?}");
    TrackerError::ClientError(error)
}

pub fn not_found_error(error: anyhow::Error) -> TrackerError {
    info!("Not found error: {error:?}");
    TrackerError::NotFound(error)
}

pub fn fetch_error(reason: String) -> TrackerError {
    warn!("Fetch failure: {reason}");
    TrackerError::FetchFailure(reason)
}
