//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The caller asked for something that does not exist.
  #[error("{0}")]
  NotFound(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<mycontacts_core::Error> for ApiError {
  fn from(e: mycontacts_core::Error) -> Self {
    use mycontacts_core::Error as E;
    match e {
      E::UserNotFound(_) | E::PhoneNumberNotFound(_) | E::AddressNotFound(_) => {
        ApiError::NotFound(e.to_string())
      }
      E::Storage(inner) => ApiError::Store(inner),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    // Every NotFound kind maps to 400.
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
