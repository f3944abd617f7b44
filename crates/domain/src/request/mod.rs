//! Request descriptor types

mod descriptor;
mod method;

pub use descriptor::{RequestBody, RequestDescriptor};
pub use method::HttpMethod;
