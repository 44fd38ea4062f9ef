//! Conversions between domain types and the plain values stored in SQLite.
//!
//! Timestamps are stored as RFC 3339 strings.

use chrono::{DateTime, Utc};
use wbo7_core::bet::{BetNumber, BetRegistration};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Rows ────────────────────────────────────────────────────────────────────

/// Column list matching [`RawRegistration::from_row`].
pub const REGISTRATION_COLUMNS: &str =
  "id, registrado_em, nome, cpf, email, numero_aposta";

/// A `usuarios` row as read from SQLite, before domain decoding.
pub struct RawRegistration {
  pub id:            i64,
  pub registered_at: String,
  pub full_name:     String,
  pub national_id:   String,
  pub email:         String,
  pub bet_number:    i64,
}

impl RawRegistration {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      registered_at: row.get(1)?,
      full_name:     row.get(2)?,
      national_id:   row.get(3)?,
      email:         row.get(4)?,
      bet_number:    row.get(5)?,
    })
  }

  pub fn into_registration(self) -> Result<BetRegistration> {
    Ok(BetRegistration {
      id:            self.id,
      registered_at: decode_dt(&self.registered_at)?,
      full_name:     self.full_name,
      national_id:   self.national_id,
      email:         self.email,
      bet_number:    BetNumber::new(self.bet_number)?,
    })
  }
}

/// `true` if `err` is SQLite rejecting a row on a UNIQUE index.
pub fn is_unique_violation(err: &tokio_rusqlite::Error) -> bool {
  match err {
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _)) => {
      e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    }
    _ => false,
  }
}
