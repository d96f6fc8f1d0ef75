//! SQLite backend for the mycontacts aggregate service.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Each
//! [`Storage::transaction`](mycontacts_core::store::Storage::transaction) is a
//! single SQLite transaction on that thread.

mod encode;
mod schema;
mod store;
mod tables;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
