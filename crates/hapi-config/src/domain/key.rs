//! Recognized setting names.
//!
//! Every setting the server reads is a variant of [`SettingKey`].  The
//! on-disk name (e.g. `logger.name`) is only produced by [`SettingKey::as_str`]
//! and only consumed by [`SettingKey::from_str`], so adding a key means adding
//! a variant and the compiler points at every table that must learn about it.
//!
//! | Key                         | Type   |
//! |-----------------------------|--------|
//! | `server_address`            | string |
//! | `default_pretty_print`      | bool   |
//! | `max_page_size`             | int    |
//! | `max_fetch_size`            | int    |
//! | `default_page_size`         | int    |
//! | `logger.name`               | string |
//! | `logger.format`             | string |
//! | `logger.log_exceptions`     | bool   |
//! | `logger.error_format`       | string |
//! | `allow_external_references` | bool   |
//! | `allow_multiple_delete`     | bool   |
//! | `expunge_enabled`           | bool   |
//! | `datasource.driver`         | string |
//! | `datasource.url`            | string |
//! | `datasource.username`       | string |
//! | `datasource.password`       | string |
//! | `datasource.max_pool_size`  | int    |
//! | `persistence_unit_name`     | string |
//! | `fhir_version`              | enum   |
//! | `etag_support`              | enum   |
//! | `default_encoding`          | enum   |
//! | `test.port`                 | int    |
//! | `server.base`               | string |
//! | `server.name`               | string |
//! | `server.id`                 | string |

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// A setting name the server understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "&'static str")]
pub enum SettingKey {
    ServerAddress,
    DefaultPrettyPrint,
    MaxPageSize,
    MaxFetchSize,
    DefaultPageSize,
    LoggerName,
    LoggerFormat,
    LoggerLogExceptions,
    LoggerErrorFormat,
    AllowExternalReferences,
    AllowMultipleDelete,
    ExpungeEnabled,
    DatasourceDriver,
    DatasourceUrl,
    DatasourceUsername,
    DatasourcePassword,
    DatasourceMaxPoolSize,
    PersistenceUnitName,
    FhirVersion,
    EtagSupport,
    DefaultEncoding,
    TestPort,
    ServerBase,
    ServerName,
    ServerId,
}

/// The declared type of a setting's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingType {
    String,
    Bool,
    Int,
    Enum,
}

/// Returned by [`SettingKey::from_str`] for a name outside the recognized set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown setting key: {0:?}")]
pub struct UnknownSettingKey(pub String);

impl SettingKey {
    /// Every recognized key, in documentation order.
    pub const ALL: [SettingKey; 25] = [
        SettingKey::ServerAddress,
        SettingKey::DefaultPrettyPrint,
        SettingKey::MaxPageSize,
        SettingKey::MaxFetchSize,
        SettingKey::DefaultPageSize,
        SettingKey::LoggerName,
        SettingKey::LoggerFormat,
        SettingKey::LoggerLogExceptions,
        SettingKey::LoggerErrorFormat,
        SettingKey::AllowExternalReferences,
        SettingKey::AllowMultipleDelete,
        SettingKey::ExpungeEnabled,
        SettingKey::DatasourceDriver,
        SettingKey::DatasourceUrl,
        SettingKey::DatasourceUsername,
        SettingKey::DatasourcePassword,
        SettingKey::DatasourceMaxPoolSize,
        SettingKey::PersistenceUnitName,
        SettingKey::FhirVersion,
        SettingKey::EtagSupport,
        SettingKey::DefaultEncoding,
        SettingKey::TestPort,
        SettingKey::ServerBase,
        SettingKey::ServerName,
        SettingKey::ServerId,
    ];

    /// The name used in properties files.
    pub const fn as_str(self) -> &'static str {
        match self {
            SettingKey::ServerAddress => "server_address",
            SettingKey::DefaultPrettyPrint => "default_pretty_print",
            SettingKey::MaxPageSize => "max_page_size",
            SettingKey::MaxFetchSize => "max_fetch_size",
            SettingKey::DefaultPageSize => "default_page_size",
            SettingKey::LoggerName => "logger.name",
            SettingKey::LoggerFormat => "logger.format",
            SettingKey::LoggerLogExceptions => "logger.log_exceptions",
            SettingKey::LoggerErrorFormat => "logger.error_format",
            SettingKey::AllowExternalReferences => "allow_external_references",
            SettingKey::AllowMultipleDelete => "allow_multiple_delete",
            SettingKey::ExpungeEnabled => "expunge_enabled",
            SettingKey::DatasourceDriver => "datasource.driver",
            SettingKey::DatasourceUrl => "datasource.url",
            SettingKey::DatasourceUsername => "datasource.username",
            SettingKey::DatasourcePassword => "datasource.password",
            SettingKey::DatasourceMaxPoolSize => "datasource.max_pool_size",
            SettingKey::PersistenceUnitName => "persistence_unit_name",
            SettingKey::FhirVersion => "fhir_version",
            SettingKey::EtagSupport => "etag_support",
            SettingKey::DefaultEncoding => "default_encoding",
            SettingKey::TestPort => "test.port",
            SettingKey::ServerBase => "server.base",
            SettingKey::ServerName => "server.name",
            SettingKey::ServerId => "server.id",
        }
    }

    /// The type the value is parsed as by the key's named accessor.
    pub const fn value_type(self) -> SettingType {
        match self {
            SettingKey::ServerAddress
            | SettingKey::LoggerName
            | SettingKey::LoggerFormat
            | SettingKey::LoggerErrorFormat
            | SettingKey::DatasourceDriver
            | SettingKey::DatasourceUrl
            | SettingKey::DatasourceUsername
            | SettingKey::DatasourcePassword
            | SettingKey::PersistenceUnitName
            | SettingKey::ServerBase
            | SettingKey::ServerName
            | SettingKey::ServerId => SettingType::String,

            SettingKey::DefaultPrettyPrint
            | SettingKey::LoggerLogExceptions
            | SettingKey::AllowExternalReferences
            | SettingKey::AllowMultipleDelete
            | SettingKey::ExpungeEnabled => SettingType::Bool,

            SettingKey::MaxPageSize
            | SettingKey::MaxFetchSize
            | SettingKey::DefaultPageSize
            | SettingKey::DatasourceMaxPoolSize
            | SettingKey::TestPort => SettingType::Int,

            SettingKey::FhirVersion | SettingKey::EtagSupport | SettingKey::DefaultEncoding => {
                SettingType::Enum
            }
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = UnknownSettingKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownSettingKey(s.to_string()))
    }
}

impl From<SettingKey> for &'static str {
    fn from(key: SettingKey) -> Self {
        key.as_str()
    }
}

impl fmt::Display for SettingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SettingType::String => "string",
            SettingType::Bool => "bool",
            SettingType::Int => "int",
            SettingType::Enum => "enum",
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
