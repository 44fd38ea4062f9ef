//! HTML pages and HTTP wiring for WBO7.
//!
//! [`router`] serves the four pages and merges in the JSON endpoints from
//! `wbo7-api`, all backed by one [`BetStore`] and one [`WinnerLog`].

pub mod browser;
pub mod error;
pub mod pages;
pub mod settings;
pub mod views;

pub use error::Error;
pub use settings::ServerConfig;

use std::sync::Arc;

use axum::{Router, routing::get};
use wbo7_api::{ApiState, api_router};
use wbo7_core::{draw::NumberSource, store::BetStore, winner::WinnerLog};

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all page handlers.
pub struct AppState<S, L> {
  pub store:   Arc<S>,
  pub winners: Arc<L>,
  pub numbers: Arc<dyn NumberSource>,
}

impl<S, L> Clone for AppState<S, L> {
  fn clone(&self) -> Self {
    Self {
      store:   Arc::clone(&self.store),
      winners: Arc::clone(&self.winners),
      numbers: Arc::clone(&self.numbers),
    }
  }
}

impl<S, L> AppState<S, L> {
  fn api_state(&self) -> ApiState<S, L> {
    ApiState {
      store:   Arc::clone(&self.store),
      winners: Arc::clone(&self.winners),
      numbers: Arc::clone(&self.numbers),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router.
pub fn router<S, L>(state: AppState<S, L>) -> Router
where
  S: BetStore + 'static,
  L: WinnerLog + 'static,
{
  let api = api_router(state.api_state());

  Router::new()
    .route("/",                  get(pages::home))
    .route("/entrar",            get(pages::register_form))
    .route("/ganhadores",        get(pages::registrations::<S, L>))
    .route("/numeros_sorteados", get(pages::drawn_numbers::<S, L>))
    .with_state(state)
    .merge(api)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use tower::ServiceExt as _;
  use wbo7_core::{
    bet::{BetNumber, BetRegistration, NewBet},
    draw::FixedNumber,
    store::StoreError,
    winner::WinnerRow,
  };
  use wbo7_store_sqlite::SqliteStore;
  use wbo7_winner_log::CsvWinnerLog;

  use super::*;

  struct Harness {
    state:    AppState<SqliteStore, CsvWinnerLog>,
    log_path: PathBuf,
  }

  impl Drop for Harness {
    fn drop(&mut self) { let _ = std::fs::remove_file(&self.log_path); }
  }

  async fn harness() -> Harness {
    let log_path =
      std::env::temp_dir().join(format!("wbo7-web-{}.csv", uuid::Uuid::new_v4()));
    Harness {
      state: AppState {
        store:   Arc::new(SqliteStore::open_in_memory().await.unwrap()),
        winners: Arc::new(CsvWinnerLog::new(&log_path)),
        numbers: Arc::new(FixedNumber(BetNumber::new(42).unwrap())),
      },
      log_path,
    }
  }

  async fn oneshot(h: &Harness, method: &str, uri: &str, body: &str) -> Response {
    let req = Request::builder()
      .method(method)
      .uri(uri)
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(body.to_string()))
      .unwrap();
    router(h.state.clone()).oneshot(req).await.unwrap()
  }

  async fn text(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
  }

  #[tokio::test]
  async fn static_pages_render_html() {
    let h = harness().await;
    for (uri, marker) in [("/", "Sorteio Online"), ("/entrar", "Cadastre seu Palpite")] {
      let resp = oneshot(&h, "GET", uri, "").await;
      assert_eq!(resp.status(), StatusCode::OK);
      let ct = resp.headers().get(header::CONTENT_TYPE).unwrap().to_str().unwrap();
      assert!(ct.starts_with("text/html"), "{ct}");
      assert!(text(resp).await.contains(marker));
    }
  }

  #[tokio::test]
  async fn registrations_page_lists_stored_bets() {
    let h = harness().await;
    let resp = oneshot(
      &h,
      "POST",
      "/cadastrar",
      r#"{"nome":"Ana","cpf":"111","email":"a@x.com","numeroAposta":42}"#,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = text(oneshot(&h, "GET", "/ganhadores", "").await).await;
    assert!(html.contains("<td>Ana</td>"));
    assert!(html.contains("<td>111</td>"));
    assert!(html.contains("<td>a@x.com</td>"));
  }

  #[tokio::test]
  async fn drawn_numbers_page_is_empty_before_any_winner() {
    let h = harness().await;
    let resp = oneshot(&h, "GET", "/numeros_sorteados", "").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = text(resp).await;
    assert!(html.contains("Histórico de Números Sorteados"));
    assert!(!html.contains("<td>"));
  }

  #[tokio::test]
  async fn drawn_numbers_page_shows_logged_winners() {
    let h = harness().await;
    oneshot(
      &h,
      "POST",
      "/cadastrar",
      r#"{"nome":"Ana","cpf":"111","email":"a@x.com","numeroAposta":"42"}"#,
    )
    .await;
    let resp = oneshot(&h, "POST", "/sortear", "").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = text(oneshot(&h, "GET", "/numeros_sorteados", "").await).await;
    assert!(html.contains("<td>Ana</td>"));
    assert!(html.contains("<td>42</td>"));
  }

  #[tokio::test]
  async fn unknown_path_is_404() {
    let h = harness().await;
    let resp = oneshot(&h, "GET", "/nope", "").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── Failures ────────────────────────────────────────────────────────────────

  #[derive(Debug, thiserror::Error)]
  #[error("database is locked")]
  struct Locked;

  impl StoreError for Locked {
    fn is_duplicate_national_id(&self) -> bool { false }
  }

  struct LockedStore;

  impl BetStore for LockedStore {
    type Error = Locked;

    async fn insert_bet(&self, _bet: NewBet) -> Result<BetRegistration, Locked> { Err(Locked) }

    async fn list_bets(&self) -> Result<Vec<BetRegistration>, Locked> { Err(Locked) }

    async fn find_by_bet_number(&self, _n: BetNumber) -> Result<Vec<BetRegistration>, Locked> {
      Err(Locked)
    }
  }

  struct UnreadableLog;

  impl WinnerLog for UnreadableLog {
    type Error = std::io::Error;

    async fn append_winners(&self, _rows: Vec<WinnerRow>) -> Result<(), std::io::Error> {
      Ok(())
    }

    async fn read_all(&self) -> Result<Vec<WinnerRow>, std::io::Error> {
      Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"))
    }
  }

  async fn get_broken(uri: &str) -> Response {
    let state = AppState {
      store:   Arc::new(LockedStore),
      winners: Arc::new(UnreadableLog),
      numbers: Arc::new(FixedNumber(BetNumber::new(1).unwrap())),
    };
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    router(state).oneshot(req).await.unwrap()
  }

  #[tokio::test]
  async fn registrations_page_reports_store_failure() {
    let resp = get_broken("/ganhadores").await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = text(resp).await;
    assert!(body.starts_with("Erro: "), "{body}");
    assert!(body.contains("database is locked"), "{body}");
  }

  #[tokio::test]
  async fn drawn_numbers_page_reports_log_failure() {
    let resp = get_broken("/numeros_sorteados").await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = text(resp).await;
    assert!(body.starts_with("Erro: "), "{body}");
    assert!(body.contains("permission denied"), "{body}");
  }

  #[tokio::test]
  async fn static_pages_need_no_backend() {
    assert_eq!(get_broken("/").await.status(), StatusCode::OK);
  }
}
