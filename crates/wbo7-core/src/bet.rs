//! Bet registrations — one participant's identity plus their guess.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Bet number ──────────────────────────────────────────────────────────────

/// A two-digit guess in the inclusive range `0..=99`.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "u8")]
pub struct BetNumber(pub(crate) u8);

impl BetNumber {
  pub const MIN: u8 = 0;
  pub const MAX: u8 = 99;

  pub fn new(value: i64) -> Result<Self> {
    if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
      Ok(Self(value as u8))
    } else {
      Err(Error::InvalidBetNumber(value))
    }
  }

  pub fn get(self) -> u8 { self.0 }
}

impl TryFrom<i64> for BetNumber {
  type Error = Error;

  fn try_from(value: i64) -> Result<Self> { Self::new(value) }
}

impl From<BetNumber> for u8 {
  fn from(n: BetNumber) -> Self { n.0 }
}

impl From<BetNumber> for i64 {
  fn from(n: BetNumber) -> Self { i64::from(n.0) }
}

impl fmt::Display for BetNumber {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

// ─── Registrations ───────────────────────────────────────────────────────────

/// Input for [`BetStore::insert_bet`](crate::store::BetStore::insert_bet).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBet {
  pub full_name:   String,
  pub national_id: String,
  pub email:       String,
  pub bet_number:  BetNumber,
}

/// A stored registration. Never updated or deleted once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetRegistration {
  /// Surrogate key assigned by the store.
  pub id:            i64,
  /// Assigned by the store at insert time.
  pub registered_at: DateTime<Utc>,
  pub full_name:     String,
  /// Unique across all registrations.
  pub national_id:   String,
  pub email:         String,
  pub bet_number:    BetNumber,
}
