//! The `BetStore` trait.
//!
//! Implemented by storage backends (e.g. `wbo7-store-sqlite`). The draw
//! engine and the web crates depend on this abstraction only.

use std::future::Future;

use crate::bet::{BetNumber, BetRegistration, NewBet};

/// Lets callers classify backend errors without knowing the backend.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// `true` when an insert was rejected because the national ID is taken.
  fn is_duplicate_national_id(&self) -> bool;
}

/// Abstraction over the registration table.
///
/// Registrations are append-only: there is no update or delete.
pub trait BetStore: Send + Sync {
  type Error: StoreError;

  /// Persist a new registration. Fails with a duplicate error (see
  /// [`StoreError::is_duplicate_national_id`]) if `national_id` is already
  /// registered.
  fn insert_bet(
    &self,
    bet: NewBet,
  ) -> impl Future<Output = Result<BetRegistration, Self::Error>> + Send + '_;

  /// All registrations, oldest first.
  fn list_bets(&self) -> impl Future<Output = Result<Vec<BetRegistration>, Self::Error>> + Send + '_;

  /// Registrations whose bet equals `number`, oldest first.
  fn find_by_bet_number(
    &self,
    number: BetNumber,
  ) -> impl Future<Output = Result<Vec<BetRegistration>, Self::Error>> + Send + '_;
}
