//! Account storage.
//!
//! Provides the in-memory registry and its on-disk snapshot format.

pub mod codec;
mod repository;

pub use repository::AccountStore;
