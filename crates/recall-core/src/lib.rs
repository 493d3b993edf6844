//! Core types, scheduling rules and the storage trait for Recall.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Everything in it is either a plain value type, a pure function of its
//! arguments, or an abstraction over a storage backend.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod availability;
pub mod concept;
pub mod error;
pub mod lifecycle;
pub mod schedule;
pub mod store;

pub use error::{Error, MalformedRecord, Result, ValidationError};
