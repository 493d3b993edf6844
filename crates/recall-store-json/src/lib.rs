//! Flat-file backend for the Recall concept store.
//!
//! The whole store lives in one JSON document that is rewritten atomically
//! on every change.

mod document;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::JsonStore;
