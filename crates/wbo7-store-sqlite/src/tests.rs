//! Integration tests for `SqliteStore`.

use wbo7_core::{
  bet::{BetNumber, NewBet},
  store::{BetStore, StoreError},
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn bet(name: &str, cpf: &str, number: i64) -> NewBet {
  NewBet {
    full_name:   name.into(),
    national_id: cpf.into(),
    email:       format!("{}@example.com", name.to_lowercase()),
    bet_number:  BetNumber::new(number).unwrap(),
  }
}

// ─── Inserts ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_assigns_increasing_ids() {
  let s = store().await;

  let first = s.insert_bet(bet("Ana", "111", 42)).await.unwrap();
  let second = s.insert_bet(bet("Bia", "222", 7)).await.unwrap();

  assert!(second.id > first.id);
  assert_eq!(first.full_name, "Ana");
  assert_eq!(first.bet_number.get(), 42);
}

#[tokio::test]
async fn duplicate_national_id_is_rejected() {
  let s = store().await;
  s.insert_bet(bet("Ana", "111", 42)).await.unwrap();

  let err = s.insert_bet(bet("Other", "111", 10)).await.unwrap_err();
  assert!(matches!(&err, Error::DuplicateNationalId(cpf) if cpf == "111"));
  assert!(err.is_duplicate_national_id());

  let all = s.list_bets().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].full_name, "Ana");
}

#[tokio::test]
async fn email_is_not_unique() {
  let s = store().await;
  let mut a = bet("Ana", "111", 1);
  let mut b = bet("Bia", "222", 2);
  a.email = "shared@example.com".into();
  b.email = "shared@example.com".into();

  s.insert_bet(a).await.unwrap();
  s.insert_bet(b).await.unwrap();
  assert_eq!(s.list_bets().await.unwrap().len(), 2);
}

// ─── Reads ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_returns_every_distinct_registration_in_order() {
  let s = store().await;
  for i in 0..10 {
    s.insert_bet(bet(&format!("P{i}"), &format!("cpf-{i}"), i)).await.unwrap();
  }

  let all = s.list_bets().await.unwrap();
  assert_eq!(all.len(), 10);
  let ids: Vec<_> = all.iter().map(|b| b.id).collect();
  let mut sorted = ids.clone();
  sorted.sort();
  assert_eq!(ids, sorted);
  assert_eq!(all[3].national_id, "cpf-3");
}

#[tokio::test]
async fn list_on_empty_store_is_empty() {
  let s = store().await;
  assert!(s.list_bets().await.unwrap().is_empty());
}

#[tokio::test]
async fn find_by_bet_number_filters() {
  let s = store().await;
  s.insert_bet(bet("Ana", "111", 42)).await.unwrap();
  s.insert_bet(bet("Bia", "222", 13)).await.unwrap();
  s.insert_bet(bet("Caio", "333", 42)).await.unwrap();

  let hits = s.find_by_bet_number(BetNumber::new(42).unwrap()).await.unwrap();
  let cpfs: Vec<_> = hits.iter().map(|b| b.national_id.as_str()).collect();
  assert_eq!(cpfs, ["111", "333"]);

  let none = s.find_by_bet_number(BetNumber::new(99).unwrap()).await.unwrap();
  assert!(none.is_empty());
}

#[tokio::test]
async fn registered_at_survives_round_trip() {
  let s = store().await;
  let stored = s.insert_bet(bet("Ana", "111", 42)).await.unwrap();
  let listed = s.list_bets().await.unwrap();
  assert_eq!(listed[0].registered_at, stored.registered_at);
}

// ─── Files ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn reopening_a_file_keeps_rows_and_initialize_is_idempotent() {
  let path = std::env::temp_dir().join(format!("wbo7-{}.db", uuid::Uuid::new_v4()));

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.insert_bet(bet("Ana", "111", 42)).await.unwrap();
    s.initialize().await.unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  let all = s.list_bets().await.unwrap();
  assert_eq!(all.len(), 1);
  assert!(s.insert_bet(bet("Ana", "111", 42)).await.is_err());

  drop(s);
  let _ = std::fs::remove_file(&path);
}

// ─── Upgrades ────────────────────────────────────────────────────────────────

/// Table layout written by the first release: no `registrado_em`, version 0.
const V0_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS usuarios (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nome TEXT NOT NULL,
    cpf TEXT UNIQUE NOT NULL,
    email TEXT NOT NULL,
    numero_aposta INTEGER NOT NULL
);
";

#[tokio::test]
async fn version_zero_database_is_upgraded_in_place() {
  let path = std::env::temp_dir().join(format!("wbo7-v0-{}.db", uuid::Uuid::new_v4()));
  {
    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute_batch(V0_SCHEMA).unwrap();
    conn
      .execute(
        "INSERT INTO usuarios (nome, cpf, email, numero_aposta) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params!["Ana", "111", "a@x.com", 42],
      )
      .unwrap();
  }

  let before = chrono::Utc::now();
  let s = SqliteStore::open(&path).await.unwrap();

  let all = s.list_bets().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].full_name, "Ana");
  assert_eq!(all[0].bet_number.get(), 42);
  assert!(all[0].registered_at >= before - chrono::Duration::seconds(1));

  let hits = s.find_by_bet_number(BetNumber::new(42).unwrap()).await.unwrap();
  assert_eq!(hits.len(), 1);

  let bia = s.insert_bet(bet("Bia", "222", 7)).await.unwrap();
  assert!(bia.id > all[0].id);
  assert!(matches!(
    s.insert_bet(bet("Ana", "111", 1)).await,
    Err(Error::DuplicateNationalId(_))
  ));
  drop(s);

  let version: i64 = rusqlite::Connection::open(&path)
    .unwrap()
    .query_row("PRAGMA user_version", [], |r| r.get(0))
    .unwrap();
  assert_eq!(version, 1);

  let s = SqliteStore::open(&path).await.unwrap();
  assert_eq!(s.list_bets().await.unwrap().len(), 2);

  drop(s);
  let _ = std::fs::remove_file(&path);
}
