//! Image metadata and listing types

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata for one daily image as served by the backend.
///
/// Every field is optional: older records and region variants omit fields
/// freely, and unknown keys are preserved rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageMeta {
    /// Calendar date of the image, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Region code the image was fetched for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mkt: Option<String>,
    /// Image title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Copyright line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    /// Link with details about the copyright holder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyrightlink: Option<String>,
    /// Publication start date, `YYYYMMDD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub startdate: Option<String>,
    /// Full publication timestamp, `YYYYMMDDHHMM`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fullstartdate: Option<String>,
    /// Upstream hash of the image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hsh: Option<String>,
    /// Direct URL of the default variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Variant of `url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    /// Format of `url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// All stored variants of this image.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<ImageVariantInfo>,
    /// Fields this client does not model, kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One stored resolution/format variant of an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageVariantInfo {
    /// Resolution variant, e.g. `UHD` or `1920x1080`.
    pub variant: String,
    /// File format, e.g. `jpg`.
    pub format: String,
    /// Access URL.
    pub url: String,
    /// Backend storage key.
    pub storage_key: String,
    /// File size in bytes.
    pub size: u64,
}

/// Resolution variants accepted by the image binary endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageVariant {
    /// Native ultra-high-definition rendition.
    #[default]
    #[serde(rename = "UHD")]
    Uhd,
    /// 1920x1080.
    #[serde(rename = "1920x1080")]
    R1920x1080,
    /// 1366x768.
    #[serde(rename = "1366x768")]
    R1366x768,
    /// 1280x720.
    #[serde(rename = "1280x720")]
    R1280x720,
    /// 1024x768.
    #[serde(rename = "1024x768")]
    R1024x768,
    /// 800x600.
    #[serde(rename = "800x600")]
    R800x600,
    /// 800x480.
    #[serde(rename = "800x480")]
    R800x480,
    /// 640x480.
    #[serde(rename = "640x480")]
    R640x480,
    /// 640x360.
    #[serde(rename = "640x360")]
    R640x360,
    /// 480x360.
    #[serde(rename = "480x360")]
    R480x360,
    /// 400x240.
    #[serde(rename = "400x240")]
    R400x240,
    /// 320x240.
    #[serde(rename = "320x240")]
    R320x240,
}

impl ImageVariant {
    /// Returns the variant as it appears in query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uhd => "UHD",
            Self::R1920x1080 => "1920x1080",
            Self::R1366x768 => "1366x768",
            Self::R1280x720 => "1280x720",
            Self::R1024x768 => "1024x768",
            Self::R800x600 => "800x600",
            Self::R800x480 => "800x480",
            Self::R640x480 => "640x480",
            Self::R640x360 => "640x360",
            Self::R480x360 => "480x360",
            Self::R400x240 => "400x240",
            Self::R320x240 => "320x240",
        }
    }
}

impl fmt::Display for ImageVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// File formats accepted by the image binary endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// JPEG.
    #[default]
    Jpg,
}

impl ImageFormat {
    /// Returns the format as it appears in query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Query parameters of the image listing endpoint.
///
/// The backend accepts either limit/offset or page/page_size pagination;
/// month and region filters compose with both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImageListParams {
    /// Maximum number of records (offset/limit mode).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Records to skip (offset/limit mode).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// 1-based page number (page/page_size mode).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size (page/page_size mode).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// Month filter, `YYYY-MM`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    /// Region filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mkt: Option<String>,
}

impl ImageListParams {
    /// Returns true if no parameter is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.limit.is_none()
            && self.offset.is_none()
            && self.page.is_none()
            && self.page_size.is_none()
            && self.month.is_none()
            && self.mkt.is_none()
    }
}
