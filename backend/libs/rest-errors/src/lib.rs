//! Shared wire-format errors for bookstore services
//!
//! Every service answers failures with the same JSON body, and clients of
//! sibling services decode that body back into [`RestErr`]. Keeping the
//! type in one crate keeps the contract consistent across the fleet.
//!
//! Wire shape:
//!
//! ```json
//! {"message": "token not found", "status": 404, "error": "not_found"}
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error exchanged between services over HTTP.
///
/// `status` is the HTTP status the producing service answered with;
/// `error` is a stable machine-readable slug. Only `message` and `status`
/// are guaranteed by every producer, so `error` tolerates absence.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct RestErr {
    pub message: String,
    pub status: u16,
    #[serde(default)]
    pub error: String,
}

impl RestErr {
    pub fn new(message: impl Into<String>, status: u16, error: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status,
            error: error.into(),
        }
    }

    /// 400 with the `bad_request` slug.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(message, 400, "bad_request")
    }

    /// 401 with the `unauthorized` slug.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(message, 401, "unauthorized")
    }

    /// 404 with the `not_found` slug.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(message, 404, "not_found")
    }

    /// 500 with the `internal_server_error` slug.
    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(message, 500, "internal_server_error")
    }
}

impl ResponseError for RestErr {
    fn status_code(&self) -> StatusCode {
        // A malformed status from a remote peer must not panic the
        // responder; it degrades to 500.
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}
