//! Port adapters

mod reqwest_transport;
mod system_clock;
mod system_locale;

pub use reqwest_transport::ReqwestTransport;
pub use system_clock::SystemClock;
pub use system_locale::SystemLocaleSource;
