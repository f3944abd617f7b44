//! Backend configuration document
//!
//! The full document served by `GET /admin/config` and accepted unchanged by
//! `PUT /admin/config`. Wire field names are the backend's exported Go field
//! names, hence the PascalCase renames.

use serde::{Deserialize, Serialize};

/// The complete backend configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceConfig {
    /// HTTP server settings.
    pub server: ServerSection,
    /// Logging settings.
    pub log: LogSection,
    /// Public API behavior switches.
    #[serde(rename = "API")]
    pub api: ApiSection,
    /// Scheduled fetch settings.
    pub cron: CronSection,
    /// Image retention policy.
    pub retention: RetentionSection,
    /// Database connection settings.
    #[serde(rename = "DB")]
    pub db: DbSection,
    /// Image storage backend settings.
    pub storage: StorageSection,
    /// Administrator credentials.
    pub admin: AdminSection,
    /// API token defaults.
    pub token: TokenSection,
    /// Feature switches.
    pub feature: FeatureSection,
    /// Static web hosting settings.
    pub web: WebSection,
    /// Upstream fetcher settings.
    pub fetcher: FetcherSection,
}

/// HTTP server settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServerSection {
    /// Listen port.
    pub port: u16,
    /// Externally visible base URL.
    #[serde(rename = "BaseURL")]
    pub base_url: String,
}

/// Logging settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LogSection {
    /// Minimum level for application logs.
    pub level: String,
    /// Application log file name.
    pub filename: String,
    /// Database log file name.
    #[serde(rename = "DBFilename")]
    pub db_filename: String,
    /// Minimum level for database logs.
    #[serde(rename = "DBLogLevel")]
    pub db_log_level: String,
    /// Mirror logs to the console.
    pub log_console: bool,
    /// Include database logs in the console output.
    #[serde(rename = "ShowDBLog")]
    pub show_db_log: bool,
    /// Rotation: maximum file size in megabytes.
    pub max_size: u32,
    /// Rotation: maximum age in days.
    pub max_age: u32,
    /// Rotation: number of rotated files kept.
    pub max_backups: u32,
    /// Rotation: compress rotated files.
    pub compress: bool,
}

/// Public API behavior switches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiSection {
    /// Serving mode, `local` or `redirect`.
    pub mode: String,
    /// Fall back to other regions when the requested one has no image.
    pub enable_mkt_fallback: bool,
    /// Fetch missing dates on demand.
    pub enable_on_demand_fetch: bool,
}

/// Scheduled fetch settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CronSection {
    /// Whether the daily job runs.
    pub enabled: bool,
    /// Cron expression of the daily job.
    pub daily_spec: String,
}

/// Image retention policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RetentionSection {
    /// Days of images kept; 0 disables cleanup.
    pub days: u32,
}

/// Database connection settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DbSection {
    /// Database kind: `sqlite`, `mysql`, or `postgres`.
    #[serde(rename = "Type")]
    pub kind: String,
    /// Connection string.
    #[serde(rename = "DSN")]
    pub dsn: String,
}

/// Image storage backend settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StorageSection {
    /// Storage kind: `local`, `s3`, or `webdav`.
    #[serde(rename = "Type")]
    pub kind: String,
    /// Local filesystem settings.
    pub local: LocalStorageSection,
    /// S3-compatible settings.
    #[serde(rename = "S3")]
    pub s3: S3StorageSection,
    /// WebDAV settings.
    #[serde(rename = "WebDAV")]
    pub webdav: WebDavStorageSection,
}

/// Local filesystem storage settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LocalStorageSection {
    /// Root directory for stored images.
    pub root: String,
}

/// S3-compatible storage settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct S3StorageSection {
    /// Endpoint URL.
    pub endpoint: String,
    /// Access key id.
    pub access_key: String,
    /// Secret access key.
    pub secret_key: String,
    /// Bucket name.
    pub bucket: String,
    /// Bucket region.
    pub region: String,
    /// Use path-style addressing.
    pub force_path_style: bool,
    /// Public URL prefix for direct links.
    #[serde(rename = "PublicURLPrefix")]
    pub public_url_prefix: String,
}

/// WebDAV storage settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WebDavStorageSection {
    /// Server URL.
    #[serde(rename = "URL")]
    pub url: String,
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
    /// Public URL prefix for direct links.
    #[serde(rename = "PublicURLPrefix")]
    pub public_url_prefix: String,
}

/// Administrator credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AdminSection {
    /// Bcrypt hash of the administrator password.
    pub password_bcrypt: String,
}

/// API token defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TokenSection {
    /// Default time-to-live for new tokens, e.g. `720h`.
    #[serde(rename = "DefaultTTL")]
    pub default_ttl: String,
}

/// Feature switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FeatureSection {
    /// Write per-day metadata files alongside images.
    pub write_daily_files: bool,
}

/// Static web hosting settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WebSection {
    /// Directory the bundled web UI is served from.
    pub path: String,
}

/// Upstream fetcher settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FetcherSection {
    /// Region codes fetched daily; also the supported-region list offered
    /// to clients.
    pub regions: Vec<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wire_field_names() {
        let config = ServiceConfig {
            server: ServerSection {
                port: 8080,
                base_url: "https://paper.example.com".to_string(),
            },
            ..Default::default()
        };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["Server"]["Port"], 8080);
        assert_eq!(value["Server"]["BaseURL"], "https://paper.example.com");
        assert!(value.get("API").is_some());
        assert!(value.get("DB").is_some());
    }

    #[test]
    fn test_round_trip() {
        let config = ServiceConfig {
            fetcher: FetcherSection {
                regions: vec!["zh-CN".to_string(), "en-US".to_string()],
            },
            storage: StorageSection {
                kind: "s3".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let value = serde_json::to_value(&config).unwrap();
        let back: ServiceConfig = serde_json::from_value(value).unwrap();
        assert_eq!(back, config);
    }
}
