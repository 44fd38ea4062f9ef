//! [`SqliteStore`] — the SQLite implementation of [`BetStore`].

use std::path::Path;

use chrono::Utc;
use wbo7_core::{
  bet::{BetNumber, BetRegistration, NewBet},
  store::BetStore,
};

use crate::{
  Error, Result,
  encode::{REGISTRATION_COLUMNS, RawRegistration, encode_dt, is_unique_violation},
  schema::{BACKFILL_REGISTERED_AT, MIGRATE_V0_TO_V1, PRAGMAS, SCHEMA, SCHEMA_VERSION},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// The bet registry backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.initialize().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.initialize().await?;
    Ok(store)
  }

  /// Ensure the registration table exists and is at [`SCHEMA_VERSION`],
  /// upgrading tables left by older releases. Safe to call repeatedly.
  pub async fn initialize(&self) -> Result<()> {
    let now = encode_dt(Utc::now());

    let migrated = self
      .conn
      .call(move |conn| {
        conn.execute_batch(PRAGMAS)?;

        let tx = conn.transaction()?;
        let version: i64 = tx.query_row("PRAGMA user_version", [], |r| r.get(0))?;

        let mut migrated = false;
        if version < 1 {
          let has_table: bool = tx.query_row(
            "SELECT EXISTS (
               SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'usuarios'
             )",
            [],
            |r| r.get(0),
          )?;
          let has_column: bool = tx.query_row(
            "SELECT EXISTS (
               SELECT 1 FROM pragma_table_info('usuarios') WHERE name = 'registrado_em'
             )",
            [],
            |r| r.get(0),
          )?;
          if has_table && !has_column {
            tx.execute_batch(MIGRATE_V0_TO_V1)?;
            tx.execute(BACKFILL_REGISTERED_AT, rusqlite::params![now])?;
            migrated = true;
          }
        }

        tx.execute_batch(SCHEMA)?;
        tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        tx.commit()?;
        Ok(migrated)
      })
      .await?;

    if migrated {
      tracing::info!(
        version = SCHEMA_VERSION,
        "upgraded usuarios table, backfilled registrado_em"
      );
    }
    Ok(())
  }

  async fn query_registrations(
    &self,
    bet_number: Option<BetNumber>,
  ) -> Result<Vec<BetRegistration>> {
    let number = bet_number.map(i64::from);

    let raws: Vec<RawRegistration> = self
      .conn
      .call(move |conn| {
        let rows = if let Some(n) = number {
          let mut stmt = conn.prepare(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM usuarios
             WHERE numero_aposta = ?1 ORDER BY id"
          ))?;
          stmt
            .query_map(rusqlite::params![n], RawRegistration::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM usuarios ORDER BY id"
          ))?;
          stmt
            .query_map([], RawRegistration::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRegistration::into_registration).collect()
  }
}

// ─── BetStore impl ───────────────────────────────────────────────────────────

impl BetStore for SqliteStore {
  type Error = Error;

  async fn insert_bet(&self, bet: NewBet) -> Result<BetRegistration> {
    let registered_at = Utc::now();

    let at_str      = encode_dt(registered_at);
    let name        = bet.full_name.clone();
    let national_id = bet.national_id.clone();
    let email       = bet.email.clone();
    let number      = i64::from(bet.bet_number);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO usuarios (registrado_em, nome, cpf, email, numero_aposta)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![at_str, name, national_id, email, number],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(|e| {
        if is_unique_violation(&e) {
          Error::DuplicateNationalId(bet.national_id.clone())
        } else {
          Error::Database(e)
        }
      })?;

    tracing::debug!(id, bet_number = %bet.bet_number, "stored registration");

    Ok(BetRegistration {
      id,
      registered_at,
      full_name: bet.full_name,
      national_id: bet.national_id,
      email: bet.email,
      bet_number: bet.bet_number,
    })
  }

  async fn list_bets(&self) -> Result<Vec<BetRegistration>> {
    self.query_registrations(None).await
  }

  async fn find_by_bet_number(&self, number: BetNumber) -> Result<Vec<BetRegistration>> {
    self.query_registrations(Some(number)).await
  }
}
