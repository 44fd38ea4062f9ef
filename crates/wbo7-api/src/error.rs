//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use wbo7_core::store::StoreError;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("national id already registered: {0}")]
  DuplicateNationalId(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("draw failed: {0}")]
  Draw(#[from] wbo7_core::Error),
}

impl ApiError {
  /// Classify a store error, splitting out duplicate national IDs.
  pub fn from_store<E: StoreError>(err: E, national_id: &str) -> Self {
    if err.is_duplicate_national_id() {
      ApiError::DuplicateNationalId(national_id.to_owned())
    } else {
      ApiError::Store(Box::new(err))
    }
  }

  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::BadRequest(_) | ApiError::DuplicateNationalId(_) => StatusCode::BAD_REQUEST,
      ApiError::Store(_) | ApiError::Draw(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  /// The user-facing text. Internal failures include the raw error text.
  pub fn message(&self) -> String {
    match self {
      ApiError::BadRequest(reason) => format!("Dados inválidos: {reason}"),
      ApiError::DuplicateNationalId(_) => "CPF já cadastrado!".to_owned(),
      ApiError::Store(e) => format!("Erro: {e}"),
      ApiError::Draw(e) => format!("Erro: {e}"),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    if self.status().is_server_error() {
      tracing::error!(error = %self, "request failed");
    } else {
      tracing::warn!(error = %self, "request rejected");
    }
    (self.status(), Json(json!({ "message": self.message() }))).into_response()
  }
}
