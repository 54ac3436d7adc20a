//! Fully resolved settings snapshot.
//!
//! [`ServerSettings`] evaluates every named accessor once.  Components that
//! would rather receive one validated value object than repeat lookups (and
//! tools that print the effective configuration) use this instead of the
//! store.

use serde::Serialize;

use crate::domain::values::{ETagSupport, Encoding, FhirVersion};
use crate::error::ConfigParseError;
use crate::store::ConfigurationStore;

/// Every recognized setting with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerSettings {
    pub server_address: Option<String>,
    pub server_base: String,
    pub server_name: String,
    pub server_id: String,
    pub fhir_version: FhirVersion,
    pub default_pretty_print: bool,
    pub default_encoding: Encoding,
    pub etag_support: ETagSupport,
    pub allow_external_references: bool,
    pub allow_multiple_delete: bool,
    pub expunge_enabled: bool,
    pub default_page_size: i32,
    pub max_page_size: i32,
    pub max_fetch_size: i32,
    pub logger: LoggerSettings,
    pub datasource: DatasourceSettings,
    pub persistence_unit_name: String,
    pub test_port: i32,
}

/// `logger.*` settings for the request access log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggerSettings {
    pub name: String,
    pub format: String,
    pub error_format: String,
    pub log_exceptions: bool,
}

/// `datasource.*` settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasourceSettings {
    pub driver: String,
    pub url: String,
    pub username: Option<String>,
    #[serde(serialize_with = "redact")]
    pub password: Option<String>,
    pub max_pool_size: i32,
}

impl ServerSettings {
    /// Resolves every setting from `store`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigParseError`] encountered.
    pub fn resolve(store: &ConfigurationStore) -> Result<Self, ConfigParseError> {
        Ok(Self {
            server_address: store.server_address().map(str::to_string),
            server_base: store.server_base().to_string(),
            server_name: store.server_name().to_string(),
            server_id: store.server_id().to_string(),
            fhir_version: store.fhir_version()?,
            default_pretty_print: store.default_pretty_print(),
            default_encoding: store.default_encoding()?,
            etag_support: store.etag_support()?,
            allow_external_references: store.allow_external_references(),
            allow_multiple_delete: store.allow_multiple_delete(),
            expunge_enabled: store.expunge_enabled(),
            default_page_size: store.default_page_size()?,
            max_page_size: store.max_page_size()?,
            max_fetch_size: store.max_fetch_size()?,
            logger: LoggerSettings {
                name: store.logger_name().to_string(),
                format: store.logger_format().to_string(),
                error_format: store.logger_error_format().to_string(),
                log_exceptions: store.logger_log_exceptions(),
            },
            datasource: DatasourceSettings {
                driver: store.datasource_driver().to_string(),
                url: store.datasource_url().to_string(),
                username: store.datasource_username().map(str::to_string),
                password: store.datasource_password().map(str::to_string),
                max_pool_size: store.datasource_max_pool_size()?,
            },
            persistence_unit_name: store.persistence_unit_name().to_string(),
            test_port: store.test_port()?,
        })
    }
}

// Serialized output is for humans; a configured password shows as "***".
fn redact<S: serde::Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) if !v.is_empty() => serializer.serialize_str("***"),
        Some(v) => serializer.serialize_str(v),
        None => serializer.serialize_none(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
