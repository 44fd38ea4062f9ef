//! Error types and axum `IntoResponse` implementation for the HTML pages.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
  #[error("winner log error: {0}")]
  WinnerLog(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    tracing::error!(error = %self, "page failed to render");
    (StatusCode::INTERNAL_SERVER_ERROR, format!("Erro: {self}")).into_response()
  }
}
