//! Paperwall Domain - Core client types
//!
//! This crate defines the domain model for the Paperwall client.
//! All types here are pure Rust with no I/O dependencies.

pub mod admin;
pub mod config;
pub mod error;
pub mod holiday;
pub mod image;
pub mod region;
pub mod request;
pub mod response;

pub use admin::{
    ChangePasswordRequest, CreateTokenRequest, LoginRequest, ManualFetchRequest, StatusMessage,
    Token, UpdateTokenRequest,
};
pub use config::ServiceConfig;
pub use error::{ApiError, ApiResult};
pub use holiday::{HolidayDay, Holidays};
pub use image::{ImageFormat, ImageListParams, ImageMeta, ImageVariant, ImageVariantInfo};
pub use region::{DEFAULT_REGION, Region, default_regions};
pub use request::{HttpMethod, RequestBody, RequestDescriptor};
pub use response::{BinaryBody, ResponsePayload, StatusCode};
