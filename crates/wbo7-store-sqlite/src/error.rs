//! Error type for `wbo7-store-sqlite`.

use thiserror::Error;
use wbo7_core::store::StoreError;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] wbo7_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// The UNIQUE constraint on `cpf` rejected an insert.
  #[error("national id already registered: {0}")]
  DuplicateNationalId(String),

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

impl StoreError for Error {
  fn is_duplicate_national_id(&self) -> bool {
    matches!(self, Error::DuplicateNationalId(_))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
