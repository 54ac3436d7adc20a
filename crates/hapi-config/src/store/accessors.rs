//! One named accessor per recognized setting.
//!
//! These are what the rest of the server calls.  Each pairs a
//! [`SettingKey`] with its declared type and default from
//! [`super::defaults`].

use crate::domain::key::SettingKey;
use crate::domain::values::{ETagSupport, Encoding, FhirVersion, SettingEnum};
use crate::error::ConfigParseError;

use super::defaults;
use super::ConfigurationStore;

impl ConfigurationStore {
    // ── Server identity ───────────────────────────────────────────────────────

    /// Address the server reports as its own.  No default.
    pub fn server_address(&self) -> Option<&str> {
        self.get_string(SettingKey::ServerAddress)
    }

    pub fn server_base(&self) -> &str {
        self.get_string_or(SettingKey::ServerBase, defaults::SERVER_BASE)
    }

    pub fn server_name(&self) -> &str {
        self.get_string_or(SettingKey::ServerName, defaults::SERVER_NAME)
    }

    pub fn server_id(&self) -> &str {
        self.get_string_or(SettingKey::ServerId, defaults::SERVER_ID)
    }

    /// # Errors
    ///
    /// [`ConfigParseError::UnknownToken`] if `fhir_version` is not `DSTU3` or `R4`.
    pub fn fhir_version(&self) -> Result<FhirVersion, ConfigParseError> {
        self.get_enum_or(SettingKey::FhirVersion, defaults::FHIR_VERSION)
    }

    // ── REST behaviour ────────────────────────────────────────────────────────

    pub fn default_pretty_print(&self) -> bool {
        self.get_bool_or(SettingKey::DefaultPrettyPrint, defaults::DEFAULT_PRETTY_PRINT)
    }

    /// # Errors
    ///
    /// [`ConfigParseError::UnknownToken`] if `etag_support` is not `ENABLED` or `DISABLED`.
    pub fn etag_support(&self) -> Result<ETagSupport, ConfigParseError> {
        self.get_enum_or(SettingKey::EtagSupport, defaults::ETAG_SUPPORT)
    }

    /// # Errors
    ///
    /// [`ConfigParseError::UnknownToken`] if `default_encoding` is not `JSON` or `XML`.
    pub fn default_encoding(&self) -> Result<Encoding, ConfigParseError> {
        self.get_enum_or(SettingKey::DefaultEncoding, defaults::DEFAULT_ENCODING)
    }

    pub fn allow_external_references(&self) -> bool {
        self.get_bool_or(SettingKey::AllowExternalReferences, defaults::ALLOW_EXTERNAL_REFERENCES)
    }

    pub fn allow_multiple_delete(&self) -> bool {
        self.get_bool_or(SettingKey::AllowMultipleDelete, defaults::ALLOW_MULTIPLE_DELETE)
    }

    pub fn expunge_enabled(&self) -> bool {
        self.get_bool_or(SettingKey::ExpungeEnabled, defaults::EXPUNGE_ENABLED)
    }

    // ── Paging ────────────────────────────────────────────────────────────────

    /// # Errors
    ///
    /// [`ConfigParseError::InvalidInteger`] for a non-integer value.
    pub fn default_page_size(&self) -> Result<i32, ConfigParseError> {
        self.get_int_or(SettingKey::DefaultPageSize, defaults::DEFAULT_PAGE_SIZE)
    }

    /// # Errors
    ///
    /// [`ConfigParseError::InvalidInteger`] for a non-integer value.
    pub fn max_page_size(&self) -> Result<i32, ConfigParseError> {
        self.get_int_or(SettingKey::MaxPageSize, defaults::MAX_PAGE_SIZE)
    }

    /// Upper bound on resources fetched for one search; unbounded by default.
    ///
    /// # Errors
    ///
    /// [`ConfigParseError::InvalidInteger`] for a non-integer value.
    pub fn max_fetch_size(&self) -> Result<i32, ConfigParseError> {
        self.get_int_or(SettingKey::MaxFetchSize, defaults::MAX_FETCH_SIZE)
    }

    // ── Access logging ────────────────────────────────────────────────────────

    pub fn logger_name(&self) -> &str {
        self.get_string_or(SettingKey::LoggerName, defaults::LOGGER_NAME)
    }

    pub fn logger_format(&self) -> &str {
        self.get_string_or(SettingKey::LoggerFormat, defaults::LOGGER_FORMAT)
    }

    pub fn logger_error_format(&self) -> &str {
        self.get_string_or(SettingKey::LoggerErrorFormat, defaults::LOGGER_ERROR_FORMAT)
    }

    pub fn logger_log_exceptions(&self) -> bool {
        self.get_bool_or(SettingKey::LoggerLogExceptions, defaults::LOGGER_LOG_EXCEPTIONS)
    }

    // ── Persistence ───────────────────────────────────────────────────────────

    pub fn datasource_driver(&self) -> &str {
        self.get_string_or(SettingKey::DatasourceDriver, defaults::DATASOURCE_DRIVER)
    }

    pub fn datasource_url(&self) -> &str {
        self.get_string_or(SettingKey::DatasourceUrl, defaults::DATASOURCE_URL)
    }

    /// No default; an empty stored value is returned as `Some("")`.
    pub fn datasource_username(&self) -> Option<&str> {
        self.get_string(SettingKey::DatasourceUsername)
    }

    /// No default; passed through as plain text.
    pub fn datasource_password(&self) -> Option<&str> {
        self.get_string(SettingKey::DatasourcePassword)
    }

    /// # Errors
    ///
    /// [`ConfigParseError::InvalidInteger`] for a non-integer value.
    pub fn datasource_max_pool_size(&self) -> Result<i32, ConfigParseError> {
        self.get_int_or(SettingKey::DatasourceMaxPoolSize, defaults::DATASOURCE_MAX_POOL_SIZE)
    }

    pub fn persistence_unit_name(&self) -> &str {
        self.get_string_or(SettingKey::PersistenceUnitName, defaults::PERSISTENCE_UNIT_NAME)
    }

    // ── Testing ───────────────────────────────────────────────────────────────

    /// Port for the embedded test server; `0` lets the OS choose.
    ///
    /// # Errors
    ///
    /// [`ConfigParseError::InvalidInteger`] for a non-integer value.
    pub fn test_port(&self) -> Result<i32, ConfigParseError> {
        self.get_int_or(SettingKey::TestPort, defaults::TEST_PORT)
    }

    // ── Generic ───────────────────────────────────────────────────────────────

    /// Effective value of `key` rendered as text, exactly as its named
    /// accessor resolves it.  `None` only for the keys without a default.
    ///
    /// # Errors
    ///
    /// Returns the named accessor's [`ConfigParseError`].
    pub fn effective_value(&self, key: SettingKey) -> Result<Option<String>, ConfigParseError> {
        let text = match key {
            SettingKey::ServerAddress => return Ok(self.server_address().map(str::to_string)),
            SettingKey::DatasourceUsername => return Ok(self.datasource_username().map(str::to_string)),
            SettingKey::DatasourcePassword => return Ok(self.datasource_password().map(str::to_string)),
            SettingKey::DefaultPrettyPrint => self.default_pretty_print().to_string(),
            SettingKey::MaxPageSize => self.max_page_size()?.to_string(),
            SettingKey::MaxFetchSize => self.max_fetch_size()?.to_string(),
            SettingKey::DefaultPageSize => self.default_page_size()?.to_string(),
            SettingKey::LoggerName => self.logger_name().to_string(),
            SettingKey::LoggerFormat => self.logger_format().to_string(),
            SettingKey::LoggerLogExceptions => self.logger_log_exceptions().to_string(),
            SettingKey::LoggerErrorFormat => self.logger_error_format().to_string(),
            SettingKey::AllowExternalReferences => self.allow_external_references().to_string(),
            SettingKey::AllowMultipleDelete => self.allow_multiple_delete().to_string(),
            SettingKey::ExpungeEnabled => self.expunge_enabled().to_string(),
            SettingKey::DatasourceDriver => self.datasource_driver().to_string(),
            SettingKey::DatasourceUrl => self.datasource_url().to_string(),
            SettingKey::DatasourceMaxPoolSize => self.datasource_max_pool_size()?.to_string(),
            SettingKey::PersistenceUnitName => self.persistence_unit_name().to_string(),
            SettingKey::FhirVersion => self.fhir_version()?.token().to_string(),
            SettingKey::EtagSupport => self.etag_support()?.token().to_string(),
            SettingKey::DefaultEncoding => self.default_encoding()?.token().to_string(),
            SettingKey::TestPort => self.test_port()?.to_string(),
            SettingKey::ServerBase => self.server_base().to_string(),
            SettingKey::ServerName => self.server_name().to_string(),
            SettingKey::ServerId => self.server_id().to_string(),
        };
        Ok(Some(text))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
