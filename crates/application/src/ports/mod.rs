//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external
//! systems. Each port is a trait implemented by an adapter in the
//! infrastructure layer, or by a fake in tests.

mod clock;
mod locale_source;
mod navigator;
mod storage;
mod transport;

pub use clock::Clock;
pub use locale_source::LocaleSource;
pub use navigator::Navigator;
pub use storage::{KeyValueStore, StorageError};
pub use transport::{HttpTransport, UnauthorizedHandler};
