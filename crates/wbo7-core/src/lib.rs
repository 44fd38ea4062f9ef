//! Core types and trait definitions for the WBO7 bet registry.
//!
//! This crate is free of HTTP, SQL and file-format dependencies. The store,
//! winner log and web crates all depend on it.

pub mod bet;
pub mod draw;
pub mod error;
pub mod store;
pub mod winner;

pub use error::{Error, Result};
