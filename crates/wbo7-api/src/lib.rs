//! JSON endpoints for WBO7.
//!
//! Exposes an axum [`Router`] with the two write endpoints, backed by any
//! [`BetStore`] and [`WinnerLog`].
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/cadastrar` | Body: [`register::RegisterBody`]; 400 on duplicate `cpf` |
//! | `POST` | `/sortear` | Returns [`draw::DrawResponse`] |

pub mod draw;
pub mod error;
pub mod register;

use std::sync::Arc;

use axum::{Router, routing::post};
use wbo7_core::{draw::NumberSource, store::BetStore, winner::WinnerLog};

pub use error::ApiError;

/// Shared state for the API handlers.
pub struct ApiState<S, L> {
  pub store:   Arc<S>,
  pub winners: Arc<L>,
  pub numbers: Arc<dyn NumberSource>,
}

impl<S, L> Clone for ApiState<S, L> {
  fn clone(&self) -> Self {
    Self {
      store:   Arc::clone(&self.store),
      winners: Arc::clone(&self.winners),
      numbers: Arc::clone(&self.numbers),
    }
  }
}

/// Build the API router for `state`.
///
/// The returned `Router<()>` can be merged into any parent router regardless
/// of its own state type.
pub fn api_router<S, L>(state: ApiState<S, L>) -> Router<()>
where
  S: BetStore + 'static,
  L: WinnerLog + 'static,
{
  Router::new()
    .route("/cadastrar", post(register::handler::<S, L>))
    .route("/sortear", post(draw::handler::<S, L>))
    .with_state(state)
}
