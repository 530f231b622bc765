//! datamon-core — Game rules, scoring, and problem storage.
//!
//! This crate holds the state machines for the three datamon games, the
//! per-player score ledger, and the JSON-backed memory-bank store. A front
//! end drives everything through [`session::Session`].

pub mod checker;
pub mod error;
pub mod generator;
pub mod guesser;
pub mod ledger;
pub mod model;
pub mod quiz;
pub mod session;
pub mod store;
pub mod summary;

pub use error::{DatamonError, StoreError};
pub use session::Session;
