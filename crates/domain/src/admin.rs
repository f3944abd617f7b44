//! Administrative resource documents
//!
//! Request and response bodies of the `/admin/*` surface: session login,
//! API token CRUD, and the manual trigger endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An API access token as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Server-assigned numeric id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// The bearer token value.
    pub token: String,
    /// Whether the token is disabled.
    #[serde(default)]
    pub disabled: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Expiry timestamp; absent for non-expiring tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Body of the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// The administrator password.
    pub password: String,
}

/// Body of the change-password endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    /// Current password.
    pub old_password: String,
    /// Replacement password.
    pub new_password: String,
}

/// Body of the token-creation endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTokenRequest {
    /// Display name for the new token.
    pub name: String,
    /// Absolute expiry timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Relative time-to-live, e.g. `720h`; the server resolves it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<String>,
}

/// Body of the token-update endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTokenRequest {
    /// New disabled state; unset fields are left unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

/// Body of the manual-fetch trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualFetchRequest {
    /// Number of past days to fetch; the server default applies when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
}

/// Fire-and-forget acknowledgement returned by trigger-style endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    /// Human-readable outcome.
    pub message: String,
}
