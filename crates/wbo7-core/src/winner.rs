//! Winner log rows.
//!
//! The winner log is an append-only record of every registration that matched
//! a draw. Rows copy the registration's fields at draw time; there is no link
//! back to the registration table.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bet::{BetNumber, BetRegistration};

/// One row of the winner log. Serde names match the log's header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerRow {
  #[serde(rename = "Date")]
  pub drawn_at:    DateTime<Utc>,
  #[serde(rename = "Name")]
  pub full_name:   String,
  #[serde(rename = "NationalId")]
  pub national_id: String,
  #[serde(rename = "Email")]
  pub email:       String,
  #[serde(rename = "BetNumber")]
  pub bet_number:  BetNumber,
}

impl WinnerRow {
  pub fn from_registration(drawn_at: DateTime<Utc>, bet: &BetRegistration) -> Self {
    Self {
      drawn_at,
      full_name: bet.full_name.clone(),
      national_id: bet.national_id.clone(),
      email: bet.email.clone(),
      bet_number: bet.bet_number,
    }
  }
}

/// Abstraction over a persisted winner log.
pub trait WinnerLog: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Append `rows` in the order given. The log (and its header) is created
  /// if it does not exist yet.
  fn append_winners(
    &self,
    rows: Vec<WinnerRow>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Every row in append order, header excluded. Empty if the log does not
  /// exist.
  fn read_all(&self) -> impl Future<Output = Result<Vec<WinnerRow>, Self::Error>> + Send + '_;
}
