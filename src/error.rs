// src/error.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Serialize, Serializer};
use serde_json::json;
use thiserror::Error;

/// Failure talking to the upstream stats API.
///
/// Never crosses a component boundary: the fetchers turn it into an
/// unavailable rate or an empty roster.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response shape: {0}")]
    Shape(String),
}

/// Per-neuron lookup failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NeuronError {
    #[error("Neuron not found")]
    NotFound,

    #[error("Invalid neuron data: {field}")]
    InvalidField { field: &'static str },
}

impl Serialize for NeuronError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Malformed invocation parameters or size selector.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamsError {
    #[error("expected `<netuid> | <uid>, <uid>, ...`, got {0:?}")]
    MissingSeparator(String),

    #[error("netuid must be a positive integer, got {0:?}")]
    InvalidNetuid(String),

    #[error("uid must be an integer, got {0:?}")]
    InvalidUid(String),

    #[error("at least one uid is required")]
    NoUids,

    #[error("unknown widget size {0:?} (expected small, medium or large)")]
    UnknownSize(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name}: {source}")]
    Params {
        name: &'static str,
        #[source]
        source: ParamsError,
    },

    #[error("{name} must be a positive integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to draw widget: {0}")]
    Draw(String),
}

/// Errors returned by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(#[from] ParamsError),

    #[error("no snapshot available yet, first sync still running")]
    NotReady,

    #[error("{0}")]
    Render(#[from] RenderError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotReady => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }))
    }
}
