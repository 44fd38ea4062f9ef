//! SQL schema for the WBO7 SQLite store.
//!
//! The schema version lives in `PRAGMA user_version`. Version 0 databases
//! were written by the first release, whose `usuarios` table has no
//! registration timestamp; [`MIGRATE_V0_TO_V1`] upgrades them in place.

/// Current value written to `PRAGMA user_version`.
pub const SCHEMA_VERSION: i64 = 1;

/// Connection settings. Must run outside a transaction.
pub const PRAGMAS: &str = "PRAGMA journal_mode = WAL;";

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// `numero_aposta` has no CHECK constraint: the 0-99 range is enforced by
/// `BetNumber` before rows reach the store.
pub const SCHEMA: &str = "
-- Registrations are append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS usuarios (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    registrado_em  TEXT NOT NULL,          -- ISO 8601 UTC; server-assigned
    nome           TEXT NOT NULL,
    cpf            TEXT UNIQUE NOT NULL,
    email          TEXT NOT NULL,
    numero_aposta  INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS usuarios_numero_idx ON usuarios(numero_aposta);
";

/// Adds the registration timestamp to a version-0 `usuarios` table.
/// Existing rows are backfilled separately with the migration time.
pub const MIGRATE_V0_TO_V1: &str = "ALTER TABLE usuarios ADD COLUMN registrado_em TEXT;";

/// Backfill for rows that predate [`MIGRATE_V0_TO_V1`]. `?1` is the
/// migration timestamp.
pub const BACKFILL_REGISTERED_AT: &str =
  "UPDATE usuarios SET registrado_em = ?1 WHERE registrado_em IS NULL";
