//! Where the two settings layers come from.
//!
//! - **Base layer** – `hapi.properties`, compiled into this crate.  A
//!   deployment (or a test) may replace it with a file on disk via
//!   [`BaseSource::File`].
//! - **Override layer** – an optional file whose path arrives through the
//!   `HAPI_PROPERTIES` environment variable or the CLI `--properties` flag.
//!
//! Reading goes through the [`ResourceReader`] trait so the store can be
//! exercised without touching the file system.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::ConfigLoadError;

/// Name of the bundled base resource.
pub const BASE_RESOURCE_NAME: &str = "hapi.properties";

/// Environment variable naming the override file.
pub const OVERRIDE_ENV_VAR: &str = "HAPI_PROPERTIES";

const BUNDLED_BASE: &str = include_str!("../../resources/hapi.properties");

/// The text of the bundled base resource.
pub fn bundled_base() -> &'static str {
    BUNDLED_BASE
}

/// Origin of the base layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BaseSource {
    /// The `hapi.properties` resource compiled into the crate.
    #[default]
    Bundled,
    /// A properties file on disk used in place of the bundled resource.
    File(PathBuf),
}

/// Everything [`crate::ConfigurationStore::load`] needs to know.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub base: BaseSource,
    /// Override file; `None` means the override signal is absent.
    pub override_path: Option<PathBuf>,
}

impl LoadOptions {
    /// Bundled base plus the override named by `HAPI_PROPERTIES`, if set.
    ///
    /// An empty variable counts as unset.
    pub fn from_env() -> Self {
        Self::default().with_override_var(std::env::var_os(OVERRIDE_ENV_VAR))
    }

    /// Uses `path` instead of the bundled base resource.
    pub fn with_base_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.base = BaseSource::File(path.into());
        self
    }

    /// Sets the override file.
    pub fn with_override(mut self, path: impl Into<PathBuf>) -> Self {
        self.override_path = Some(path.into());
        self
    }

    /// The base file path, or `None` when the bundled resource is used.
    pub fn base_file(&self) -> Option<&Path> {
        match &self.base {
            BaseSource::Bundled => None,
            BaseSource::File(path) => Some(path),
        }
    }

    fn with_override_var(mut self, value: Option<OsString>) -> Self {
        self.override_path = value.filter(|v| !v.is_empty()).map(PathBuf::from);
        self
    }
}

/// Reads layer text.  Implemented by [`FsResourceReader`] in production and
/// mocked in tests.
#[cfg_attr(test, mockall::automock)]
pub trait ResourceReader: Send + Sync {
    /// Text of the bundled resource `name`, or `None` if there is no such resource.
    fn read_bundled(&self, name: &str) -> Option<String>;

    /// Text of the file at `path`, decoded as ISO-8859-1.
    fn read_file(&self, path: &Path) -> std::io::Result<String>;
}

/// Reads bundled resources from the binary and files from the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsResourceReader;

impl ResourceReader for FsResourceReader {
    fn read_bundled(&self, name: &str) -> Option<String> {
        (name == BASE_RESOURCE_NAME).then(|| BUNDLED_BASE.to_string())
    }

    fn read_file(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read(path).map(|bytes| decode_latin1(&bytes))
    }
}

/// Decodes ISO-8859-1 bytes.  Every byte maps to the code point of the same
/// value, so decoding never fails; characters outside Latin-1 arrive through
/// `\uXXXX` escapes instead.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Text of a layer together with a human-readable name for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LayerText {
    pub source_name: String,
    pub text: String,
}

pub(crate) fn read_base(
    reader: &dyn ResourceReader,
    base: &BaseSource,
) -> Result<LayerText, ConfigLoadError> {
    match base {
        BaseSource::Bundled => reader
            .read_bundled(BASE_RESOURCE_NAME)
            .map(|text| LayerText {
                source_name: BASE_RESOURCE_NAME.to_string(),
                text,
            })
            .ok_or_else(|| ConfigLoadError::MissingResource {
                name: BASE_RESOURCE_NAME.to_string(),
            }),
        BaseSource::File(path) => read_layer_file(reader, path),
    }
}

pub(crate) fn read_layer_file(
    reader: &dyn ResourceReader,
    path: &Path,
) -> Result<LayerText, ConfigLoadError> {
    let source_name = path.display().to_string();
    match reader.read_file(path) {
        Ok(text) => Ok(LayerText { source_name, text }),
        Err(source) => Err(ConfigLoadError::Io {
            source_name,
            source,
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
