//! Durable client state

mod file_store;

pub use file_store::FileStore;
