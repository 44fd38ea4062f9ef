//! Handlers for the HTML pages.
//!
//! | Method | Path | Reads |
//! |--------|------|-------|
//! | `GET`  | `/` | — |
//! | `GET`  | `/entrar` | — |
//! | `GET`  | `/ganhadores` | bet store |
//! | `GET`  | `/numeros_sorteados` | winner log |

use axum::{extract::State, response::Html};
use wbo7_core::{store::BetStore, winner::WinnerLog};

use crate::{AppState, error::Error, views};

/// `GET /`
pub async fn home() -> Html<String> { Html(views::home()) }

/// `GET /entrar`
pub async fn register_form() -> Html<String> { Html(views::register_form()) }

/// `GET /ganhadores`
pub async fn registrations<S, L>(
  State(state): State<AppState<S, L>>,
) -> Result<Html<String>, Error>
where
  S: BetStore + 'static,
  L: WinnerLog + 'static,
{
  let bets = state
    .store
    .list_bets()
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  Ok(Html(views::registrations(&bets)))
}

/// `GET /numeros_sorteados`
pub async fn drawn_numbers<S, L>(
  State(state): State<AppState<S, L>>,
) -> Result<Html<String>, Error>
where
  S: BetStore + 'static,
  L: WinnerLog + 'static,
{
  let winners = state
    .winners
    .read_all()
    .await
    .map_err(|e| Error::WinnerLog(Box::new(e)))?;
  Ok(Html(views::drawn_numbers(&winners)))
}
