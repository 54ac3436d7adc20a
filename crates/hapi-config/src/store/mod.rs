//! The merged, read-only settings store.
//!
//! [`ConfigurationStore`] is built once from the base layer and an optional
//! override layer and never changes afterwards.  Build it at startup, wrap it
//! in an `Arc` and hand it to every component that needs settings:
//!
//! ```rust
//! use std::sync::Arc;
//! use hapi_config::{ConfigurationStore, LoadOptions};
//!
//! let store = Arc::new(ConfigurationStore::load(&LoadOptions::default()).unwrap());
//! let pager = Arc::clone(&store);
//! assert_eq!(pager.max_page_size().unwrap(), 200);
//! ```
//!
//! # Absent versus empty
//!
//! [`ConfigurationStore::get_string`] is the only lookup that tells an empty
//! value apart from a missing one.  Every defaulted lookup treats `key=` the
//! same as a missing key, so a blank line in an override file never shadows a
//! sensible default with an empty string.

pub mod accessors;
pub mod defaults;
pub mod lazy;

use tracing::{debug, info};

use crate::domain::key::SettingKey;
use crate::domain::values::SettingEnum;
use crate::error::{ConfigLoadError, ConfigParseError};
use crate::properties::Properties;
use crate::source::{self, FsResourceReader, LayerText, LoadOptions, ResourceReader, OVERRIDE_ENV_VAR};

/// Merged settings with typed lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationStore {
    properties: Properties,
}

impl ConfigurationStore {
    /// Loads the base layer and, if configured, the override layer from the
    /// local file system.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigLoadError`] if either layer is missing, unreadable or
    /// malformed.  No partially loaded store is ever returned.
    pub fn load(options: &LoadOptions) -> Result<Self, ConfigLoadError> {
        Self::load_with(&FsResourceReader, options)
    }

    /// Same as [`ConfigurationStore::load`] but reads through `reader`.
    ///
    /// # Errors
    ///
    /// See [`ConfigurationStore::load`].
    pub fn load_with(
        reader: &dyn ResourceReader,
        options: &LoadOptions,
    ) -> Result<Self, ConfigLoadError> {
        let base = source::read_base(reader, &options.base)?;
        let upper = match &options.override_path {
            Some(path) => Some(source::read_layer_file(reader, path)?),
            None => None,
        };
        Self::merge(&base, upper.as_ref())
    }

    /// Builds a store from in-memory layer text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigLoadError::Malformed`] if either text fails to parse.
    pub fn from_layers(base: &str, override_text: Option<&str>) -> Result<Self, ConfigLoadError> {
        let base = LayerText {
            source_name: "base layer".to_string(),
            text: base.to_string(),
        };
        let upper = override_text.map(|text| LayerText {
            source_name: "override layer".to_string(),
            text: text.to_string(),
        });
        Self::merge(&base, upper.as_ref())
    }

    fn merge(base: &LayerText, upper: Option<&LayerText>) -> Result<Self, ConfigLoadError> {
        let mut properties = parse_layer(base)?;
        info!(
            source = %base.source_name,
            entries = properties.len(),
            "loaded base settings"
        );

        match upper {
            Some(layer) => {
                let upper = parse_layer(layer)?;
                let entries = upper.len();
                let replaced = properties.overlay(upper);
                info!(
                    source = %layer.source_name,
                    entries,
                    replaced,
                    "applied override settings"
                );
            }
            None => debug!("no override settings layer ({OVERRIDE_ENV_VAR} not set)"),
        }

        let store = Self { properties };
        store.log_unrecognized_keys();
        Ok(store)
    }

    /// Wraps an already merged set of properties.
    pub fn from_properties(properties: Properties) -> Self {
        Self { properties }
    }

    /// The merged raw entries, including keys outside the recognized set.
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Raw lookup by arbitrary name.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name)
    }

    // ── Typed lookups ─────────────────────────────────────────────────────────

    /// Raw stored value, or `None` if the key is not present.  An empty value
    /// is returned as `Some("")`.
    pub fn get_string(&self, key: SettingKey) -> Option<&str> {
        self.properties.get(key.as_str())
    }

    /// Stored value if present and non-empty, otherwise `default`.
    pub fn get_string_or<'a>(&'a self, key: SettingKey, default: &'a str) -> &'a str {
        self.non_empty(key).unwrap_or(default)
    }

    /// `true` when the stored value equals `"true"` ignoring case, `false` for
    /// any other non-empty value, `default` when absent or empty.
    pub fn get_bool_or(&self, key: SettingKey, default: bool) -> bool {
        match self.non_empty(key) {
            Some(raw) => raw.eq_ignore_ascii_case("true"),
            None => default,
        }
    }

    /// Parses the stored value as a base-10 `i32`; `default` when absent or
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigParseError::InvalidInteger`] for a non-empty value that
    /// is not an integer, including values with surrounding whitespace.
    pub fn get_int_or(&self, key: SettingKey, default: i32) -> Result<i32, ConfigParseError> {
        match self.non_empty(key) {
            Some(raw) => raw
                .parse::<i32>()
                .map_err(|source| ConfigParseError::InvalidInteger {
                    key,
                    value: raw.to_string(),
                    source,
                }),
            None => Ok(default),
        }
    }

    /// Matches the stored token exactly against `valid`; `default` when absent
    /// or empty.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigParseError::UnknownToken`] when the token matches none
    /// of `valid`.
    pub fn get_enum_with_default<E: SettingEnum>(
        &self,
        key: SettingKey,
        default: E,
        valid: &[E],
    ) -> Result<E, ConfigParseError> {
        let Some(raw) = self.non_empty(key) else {
            return Ok(default);
        };
        valid
            .iter()
            .copied()
            .find(|v| v.token() == raw)
            .ok_or_else(|| ConfigParseError::UnknownToken {
                key,
                value: raw.to_string(),
                expected: valid.iter().map(|v| v.token()).collect::<Vec<_>>().join(", "),
            })
    }

    /// [`ConfigurationStore::get_enum_with_default`] over every variant of `E`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigParseError::UnknownToken`] for an unrecognized token.
    pub fn get_enum_or<E: SettingEnum>(&self, key: SettingKey, default: E) -> Result<E, ConfigParseError> {
        self.get_enum_with_default(key, default, E::VARIANTS)
    }

    fn non_empty(&self, key: SettingKey) -> Option<&str> {
        self.get_string(key).filter(|v| !v.is_empty())
    }

    fn log_unrecognized_keys(&self) {
        for (name, _) in self.properties.iter() {
            if name.parse::<SettingKey>().is_err() {
                debug!(key = name, "setting is not part of the typed key set");
            }
        }
    }
}

fn parse_layer(layer: &LayerText) -> Result<Properties, ConfigLoadError> {
    Properties::parse(&layer.text).map_err(|e| ConfigLoadError::Malformed {
        source_name: layer.source_name.clone(),
        line: e.line,
        reason: e.reason,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::domain::values::{ETagSupport, Encoding, FhirVersion};
    use crate::source::{BaseSource, MockResourceReader, BASE_RESOURCE_NAME};

    fn store(base: &str) -> ConfigurationStore {
        ConfigurationStore::from_layers(base, None).expect("layers must parse")
    }

    // ── get_string ────────────────────────────────────────────────────────────

    #[test]
    fn test_get_string_absent_is_none() {
        assert_eq!(store("").get_string(SettingKey::ServerAddress), None);
    }

    #[test]
    fn test_get_string_empty_is_some_empty() {
        assert_eq!(store("server_address=").get_string(SettingKey::ServerAddress), Some(""));
    }

    #[test]
    fn test_get_string_or_falls_back_for_absent_and_empty() {
        assert_eq!(store("").get_string_or(SettingKey::ServerId, "home"), "home");
        assert_eq!(store("server.id=").get_string_or(SettingKey::ServerId, "home"), "home");
        assert_eq!(store("server.id=node-2").get_string_or(SettingKey::ServerId, "home"), "node-2");
    }

    #[test]
    fn test_get_string_or_keeps_whitespace_only_value() {
        // Only the empty string is treated as unset.
        assert_eq!(store("server.id=\\ ").get_string_or(SettingKey::ServerId, "home"), " ");
    }

    // ── get_bool_or ───────────────────────────────────────────────────────────

    #[test]
    fn test_get_bool_true_token_is_case_insensitive() {
        for raw in ["true", "TRUE", "True", "tRuE"] {
            let s = store(&format!("expunge_enabled={raw}"));
            assert!(s.get_bool_or(SettingKey::ExpungeEnabled, false), "{raw}");
        }
    }

    #[test]
    fn test_get_bool_any_other_value_is_false() {
        for raw in ["false", "yes", "1", "on", "true "] {
            let s = store(&format!("expunge_enabled={raw}"));
            assert!(!s.get_bool_or(SettingKey::ExpungeEnabled, true), "{raw:?}");
        }
    }

    #[test]
    fn test_get_bool_absent_or_empty_uses_default() {
        assert!(store("").get_bool_or(SettingKey::ExpungeEnabled, true));
        assert!(!store("expunge_enabled=").get_bool_or(SettingKey::ExpungeEnabled, false));
    }

    // ── get_int_or ────────────────────────────────────────────────────────────

    #[test]
    fn test_get_int_parses_signed_values() {
        assert_eq!(store("test.port=8080").get_int_or(SettingKey::TestPort, 0), Ok(8080));
        assert_eq!(store("test.port=-1").get_int_or(SettingKey::TestPort, 0), Ok(-1));
        assert_eq!(store("test.port=+7").get_int_or(SettingKey::TestPort, 0), Ok(7));
    }

    #[test]
    fn test_get_int_absent_or_empty_uses_default() {
        assert_eq!(store("").get_int_or(SettingKey::MaxPageSize, 200), Ok(200));
        assert_eq!(store("max_page_size=").get_int_or(SettingKey::MaxPageSize, 200), Ok(200));
    }

    #[test]
    fn test_get_int_malformed_is_parse_error() {
        // Arrange
        let s = store("max_page_size=notanumber");

        // Act
        let err = s.get_int_or(SettingKey::MaxPageSize, 200).unwrap_err();

        // Assert
        match err {
            ConfigParseError::InvalidInteger { key, value, .. } => {
                assert_eq!(key, SettingKey::MaxPageSize);
                assert_eq!(value, "notanumber");
            }
            other => panic!("expected InvalidInteger, got {other:?}"),
        }
    }

    #[test]
    fn test_get_int_trailing_whitespace_is_parse_error() {
        assert!(store("max_page_size=100 ").get_int_or(SettingKey::MaxPageSize, 200).is_err());
    }

    #[test]
    fn test_get_int_out_of_range_is_parse_error() {
        assert!(store("max_fetch_size=2147483648").get_int_or(SettingKey::MaxFetchSize, 0).is_err());
        assert_eq!(
            store("max_fetch_size=2147483647").get_int_or(SettingKey::MaxFetchSize, 0),
            Ok(i32::MAX)
        );
    }

    // ── get_enum ──────────────────────────────────────────────────────────────

    #[test]
    fn test_get_enum_recognized_tokens() {
        assert_eq!(
            store("fhir_version=R4").get_enum_or(SettingKey::FhirVersion, FhirVersion::Dstu3),
            Ok(FhirVersion::R4)
        );
        assert_eq!(
            store("etag_support=DISABLED").get_enum_or(SettingKey::EtagSupport, ETagSupport::Enabled),
            Ok(ETagSupport::Disabled)
        );
    }

    #[test]
    fn test_get_enum_lower_case_token_is_unknown() {
        // Arrange
        let s = store("fhir_version=dstu3\netag_support=disabled\ndefault_encoding=json\n");

        // Act
        let version = s.get_enum_or(SettingKey::FhirVersion, FhirVersion::R4);
        let etag = s.get_enum_or(SettingKey::EtagSupport, ETagSupport::Enabled);
        let encoding = s.get_enum_or(SettingKey::DefaultEncoding, Encoding::Xml);

        // Assert
        assert!(matches!(version, Err(ConfigParseError::UnknownToken { ref value, .. }) if value == "dstu3"));
        assert!(matches!(etag, Err(ConfigParseError::UnknownToken { key: SettingKey::EtagSupport, .. })));
        assert!(matches!(encoding, Err(ConfigParseError::UnknownToken { key: SettingKey::DefaultEncoding, .. })));
    }

    #[test]
    fn test_get_enum_absent_or_empty_uses_default() {
        assert_eq!(
            store("").get_enum_or(SettingKey::DefaultEncoding, Encoding::Json),
            Ok(Encoding::Json)
        );
        assert_eq!(
            store("default_encoding=").get_enum_or(SettingKey::DefaultEncoding, Encoding::Xml),
            Ok(Encoding::Xml)
        );
    }

    #[test]
    fn test_get_enum_unknown_token_is_parse_error() {
        let err = store("fhir_version=DSTU9")
            .get_enum_or(SettingKey::FhirVersion, FhirVersion::Dstu3)
            .unwrap_err();
        assert_eq!(
            err,
            ConfigParseError::UnknownToken {
                key: SettingKey::FhirVersion,
                value: "DSTU9".to_string(),
                expected: "DSTU3, R4".to_string(),
            }
        );
    }

    #[test]
    fn test_get_enum_with_restricted_valid_set() {
        // R4 is a real FhirVersion but not in the accepted subset.
        let err = store("fhir_version=R4")
            .get_enum_with_default(SettingKey::FhirVersion, FhirVersion::Dstu3, &[FhirVersion::Dstu3])
            .unwrap_err();
        assert!(matches!(err, ConfigParseError::UnknownToken { ref expected, .. } if expected == "DSTU3"));
    }

    // ── load_with ─────────────────────────────────────────────────────────────

    #[test]
    fn test_load_with_bundled_base_and_no_override_reads_once() {
        // Arrange
        let mut reader = MockResourceReader::new();
        reader
            .expect_read_bundled()
            .withf(|name: &str| name == BASE_RESOURCE_NAME)
            .times(1)
            .returning(|_| Some("default_page_size=50\n".to_string()));
        reader.expect_read_file().times(0);

        // Act
        let store = ConfigurationStore::load_with(&reader, &LoadOptions::default()).unwrap();

        // Assert
        assert_eq!(store.get_int_or(SettingKey::DefaultPageSize, 20), Ok(50));
    }

    #[test]
    fn test_load_with_override_replaces_base_value() {
        // Arrange
        let mut reader = MockResourceReader::new();
        reader
            .expect_read_bundled()
            .returning(|_| Some("max_page_size=100\nserver.name=Base\n".to_string()));
        reader
            .expect_read_file()
            .withf(|p: &Path| p == Path::new("/srv/override.properties"))
            .times(1)
            .returning(|_| Ok("max_page_size=500\n".to_string()));
        let options = LoadOptions::default().with_override("/srv/override.properties");

        // Act
        let store = ConfigurationStore::load_with(&reader, &options).unwrap();

        // Assert
        assert_eq!(store.get_int_or(SettingKey::MaxPageSize, 200), Ok(500));
        assert_eq!(store.get_string(SettingKey::ServerName), Some("Base"));
    }

    #[test]
    fn test_load_with_missing_bundled_resource_fails() {
        let mut reader = MockResourceReader::new();
        reader.expect_read_bundled().returning(|_| None);

        let result = ConfigurationStore::load_with(&reader, &LoadOptions::default());

        assert!(matches!(result, Err(ConfigLoadError::MissingResource { .. })));
    }

    #[test]
    fn test_load_with_unreadable_override_fails() {
        let mut reader = MockResourceReader::new();
        reader.expect_read_bundled().returning(|_| Some(String::new()));
        reader.expect_read_file().returning(|_| {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"))
        });
        let options = LoadOptions::default().with_override("/root/secret.properties");

        let result = ConfigurationStore::load_with(&reader, &options);

        assert!(matches!(result, Err(ConfigLoadError::Io { .. })));
    }

    #[test]
    fn test_load_with_malformed_override_reports_source_and_line() {
        let mut reader = MockResourceReader::new();
        reader.expect_read_bundled().returning(|_| Some(String::new()));
        reader
            .expect_read_file()
            .returning(|_| Ok("a=1\nb=\\uXYZW\n".to_string()));
        let options = LoadOptions::default().with_override("local.properties");

        let err = ConfigurationStore::load_with(&reader, &options).unwrap_err();

        match err {
            ConfigLoadError::Malformed { source_name, line, .. } => {
                assert_eq!(source_name, "local.properties");
                assert_eq!(line, 2);
            }
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn test_load_with_base_file_skips_bundled_resource() {
        let mut reader = MockResourceReader::new();
        reader.expect_read_bundled().times(0);
        reader
            .expect_read_file()
            .withf(|p: &Path| p == Path::new("base.properties"))
            .times(1)
            .returning(|_| Ok("server.id=from-file\n".to_string()));
        let options = LoadOptions {
            base: BaseSource::File(PathBuf::from("base.properties")),
            override_path: None,
        };

        let store = ConfigurationStore::load_with(&reader, &options).unwrap();

        assert_eq!(store.get_string(SettingKey::ServerId), Some("from-file"));
    }

    #[test]
    fn test_unrecognized_keys_are_retained() {
        let s = store("reuse_cached_search_results_millis=-1\n");
        assert_eq!(s.property("reuse_cached_search_results_millis"), Some("-1"));
    }

    /// Runs `f` with a subscriber that records every event at `debug` and
    /// above, returning the formatted output.
    fn capture_logs(f: impl FnOnce()) -> String {
        use std::sync::{Arc, Mutex};

        #[derive(Clone)]
        struct Buffer(Arc<Mutex<Vec<u8>>>);

        impl std::io::Write for Buffer {
            fn write(&mut self, bytes: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(bytes);
                Ok(bytes.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let buffer = Buffer(Arc::new(Mutex::new(Vec::new())));
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);

        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_from_layers_logs_like_load() {
        // Act
        let logs = capture_logs(|| {
            ConfigurationStore::from_layers("server.id=a\ncustom.flag=on\n", Some("server.id=b\n"))
                .unwrap();
        });

        // Assert
        assert!(logs.contains("loaded base settings"), "got: {logs}");
        assert!(logs.contains("applied override settings"), "got: {logs}");
        assert!(logs.contains("setting is not part of the typed key set"), "got: {logs}");
        assert!(logs.contains("custom.flag"), "got: {logs}");
    }

    #[test]
    fn test_from_layers_without_override_logs_absence() {
        let logs = capture_logs(|| {
            ConfigurationStore::from_layers("", None).unwrap();
        });
        assert!(logs.contains("loaded base settings"), "got: {logs}");
        assert!(logs.contains("no override settings layer"), "got: {logs}");
    }

    #[test]
    fn test_from_layers_malformed_base_fails() {
        let err = ConfigurationStore::from_layers("k=\\u00", None).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Malformed { ref source_name, .. } if source_name == "base layer"));
    }
}
