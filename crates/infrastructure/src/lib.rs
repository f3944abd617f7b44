//! Paperwall Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports defined in the
//! application layer: the reqwest transport, file-backed client state, and
//! the system clock and locale sources.

pub mod adapters;
pub mod persistence;

pub use adapters::{ReqwestTransport, SystemClock, SystemLocaleSource};
pub use persistence::FileStore;
