//! Typed errors and HTTP mapping.
//!
//! The HTTP surface has two tiers: a missing appointment is a 404 with a JSON
//! `{msg}` body, everything else is an opaque 500 logged on the server. Input
//! that cannot be decoded (bad path date, bad JSON body) lands in the 500 tier
//! like any storage failure.

use crate::response::MessageBody;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Body returned for every 404 on the appointment routes.
pub const NOT_FOUND_MSG: &str = "Appointment not found";

/// Body returned for every 500.
pub const SERVER_ERROR_BODY: &str = "Server Error";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("malformed input: {0}")]
    Malformed(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("internal: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) | AppError::Db(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            AppError::Malformed(_) | AppError::Db(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            err if err.status() == StatusCode::NOT_FOUND => {
                tracing::debug!(error = %err, "appointment not found");
                (StatusCode::NOT_FOUND, Json(MessageBody::new(NOT_FOUND_MSG))).into_response()
            }
            err => {
                tracing::error!(error = %err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_BODY).into_response()
            }
        }
    }
}
