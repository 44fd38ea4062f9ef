//! Handler for `POST /sortear`.

use axum::{Json, extract::State};
use serde::Serialize;
use wbo7_core::{draw::run_draw, store::BetStore, winner::WinnerLog};

use crate::{ApiState, error::ApiError};

/// Response body: `{"mensagem": "...", "numero_sorteado": 42}`.
#[derive(Debug, Serialize)]
pub struct DrawResponse {
  pub mensagem:        &'static str,
  pub numero_sorteado: u8,
}

/// `POST /sortear` — draw a number and record any winners.
pub async fn handler<S, L>(
  State(state): State<ApiState<S, L>>,
) -> Result<Json<DrawResponse>, ApiError>
where
  S: BetStore + 'static,
  L: WinnerLog + 'static,
{
  let outcome = run_draw(&*state.store, &*state.winners, &*state.numbers).await?;

  tracing::info!(
    drawn = %outcome.drawn,
    winners = outcome.winners.len(),
    "draw completed"
  );

  Ok(Json(DrawResponse {
    mensagem:        outcome.message(),
    numero_sorteado: outcome.drawn.get(),
  }))
}
