//! The draw engine.
//!
//! A draw picks one [`BetNumber`], looks up every registration holding that
//! number and appends the matches to the winner log.

use chrono::{DateTime, Utc};
use rand::Rng as _;
use serde::Serialize;

use crate::{
  Error, Result,
  bet::{BetNumber, BetRegistration},
  store::BetStore,
  winner::{WinnerLog, WinnerRow},
};

pub const WINNERS_MESSAGE: &str = "Parabéns aos ganhadores!";
pub const NO_WINNERS_MESSAGE: &str = "Não houve ganhadores.";

// ─── Number sources ──────────────────────────────────────────────────────────

/// Where drawn numbers come from.
pub trait NumberSource: Send + Sync {
  fn draw_number(&self) -> BetNumber;
}

/// Uniformly random numbers in `0..=99` from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomNumbers;

impl NumberSource for RandomNumbers {
  fn draw_number(&self) -> BetNumber {
    BetNumber(rand::thread_rng().gen_range(BetNumber::MIN..=BetNumber::MAX))
  }
}

/// Always draws the same number.
#[derive(Debug, Clone, Copy)]
pub struct FixedNumber(pub BetNumber);

impl NumberSource for FixedNumber {
  fn draw_number(&self) -> BetNumber { self.0 }
}

// ─── Outcome ─────────────────────────────────────────────────────────────────

/// The result of one draw. Never stored as a whole; only `winners` reach the
/// winner log.
#[derive(Debug, Clone, Serialize)]
pub struct DrawOutcome {
  pub drawn:    BetNumber,
  pub drawn_at: DateTime<Utc>,
  /// Matching registrations, in store order.
  pub winners:  Vec<BetRegistration>,
}

impl DrawOutcome {
  pub fn has_winners(&self) -> bool { !self.winners.is_empty() }

  pub fn message(&self) -> &'static str {
    if self.has_winners() { WINNERS_MESSAGE } else { NO_WINNERS_MESSAGE }
  }
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// Run one draw against `store`, recording any winners in `log`.
///
/// The log is left untouched when nobody matches.
pub async fn run_draw<S, L>(
  store: &S,
  log: &L,
  source: &dyn NumberSource,
) -> Result<DrawOutcome>
where
  S: BetStore,
  L: WinnerLog,
{
  let drawn = source.draw_number();
  let drawn_at = Utc::now();

  let winners = store
    .find_by_bet_number(drawn)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  if !winners.is_empty() {
    let rows = winners
      .iter()
      .map(|bet| WinnerRow::from_registration(drawn_at, bet))
      .collect();
    log
      .append_winners(rows)
      .await
      .map_err(|e| Error::WinnerLog(Box::new(e)))?;
  }

  Ok(DrawOutcome { drawn, drawn_at, winners })
}
