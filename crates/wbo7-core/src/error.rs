//! Error types for `wbo7-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("bet number out of range (0-99): {0}")]
  InvalidBetNumber(i64),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("winner log error: {0}")]
  WinnerLog(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
