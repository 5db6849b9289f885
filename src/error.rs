// src/error.rs
use crate::application::ports::output::store_port::StoreError;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Failures terminal to a single render call. No partial card document is
/// ever returned alongside one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("extra-buttons field is not a valid list of title/url pairs")]
    MalformedButtonList,
}

/// Failures raised by the click/acknowledgment tracking paths. These are
/// isolated per layer: an aggregate failure never rolls back or blocks the
/// per-recipient update, and vice versa.
#[derive(Error, Debug)]
pub enum TrackingError {
    #[error("notification {0} not found")]
    NotificationNotFound(String),

    #[error("no delivery record for notification {0} and recipient {1}")]
    RecipientNotFound(String, String),

    #[error("counter update abandoned after {0} conflicting attempts")]
    ConcurrencyExhausted(u32),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Top-level error surfaced by the HTTP delivery layer.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("render failed: {0}")]
    Render(#[from] RenderError),

    #[error("tracking failed: {0}")]
    Tracking(#[from] TrackingError),

    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

impl ResponseError for ServiceError {
    fn error_response(&self) -> HttpResponse {
        match *self {
            ServiceError::Render(ref e) => {
                HttpResponse::InternalServerError().body(format!("Render error: {}", e))
            }
            ServiceError::Tracking(ref e) => {
                HttpResponse::InternalServerError().body(format!("Tracking error: {}", e))
            }
            ServiceError::Store(ref e) => {
                HttpResponse::InternalServerError().body(format!("Store error: {}", e))
            }
        }
    }
}
