//! # hapi-config
//!
//! Layered configuration for the HAPI FHIR JPA server.
//!
//! Settings live in a plain `key=value` properties file named
//! `hapi.properties` that ships inside this crate.  An operator can point the
//! `HAPI_PROPERTIES` environment variable (or the `--properties` flag of the
//! `hapi-config` tool) at a second file whose entries replace the bundled
//! ones.  The merged result is loaded once and is read-only afterwards.
//!
//! # Architecture overview
//!
//! - **`domain`** – the closed set of recognized setting names
//!   ([`SettingKey`]) and the small enumerations some settings parse into
//!   ([`FhirVersion`], [`ETagSupport`], [`Encoding`]).
//!
//! - **`properties`** – the `.properties` text format: comments, separators,
//!   line continuations and escapes.
//!
//! - **`source`** – where the two layers come from: the bundled resource, an
//!   optional override path, and the [`ResourceReader`] seam used to read them.
//!
//! - **`store`** – [`ConfigurationStore`], the merged mapping with typed
//!   lookups and one named accessor per recognized key, plus
//!   [`LazyConfigurationStore`] for callers that want load-on-first-use.
//!
//! - **`settings`** – [`ServerSettings`], a fully resolved snapshot of every
//!   recognized key.
//!
//! # Example
//!
//! ```rust
//! use hapi_config::{ConfigurationStore, SettingKey};
//!
//! let store = ConfigurationStore::from_layers("default_page_size=50\n", None).unwrap();
//! assert_eq!(store.default_page_size().unwrap(), 50);
//! assert_eq!(store.server_id(), "home");
//! assert_eq!(store.get_string(SettingKey::ServerAddress), None);
//! ```

pub mod domain;
pub mod error;
pub mod properties;
pub mod settings;
pub mod source;
pub mod store;

pub use domain::key::{SettingKey, SettingType, UnknownSettingKey};
pub use domain::values::{ETagSupport, Encoding, FhirVersion, SettingEnum};
pub use error::{ConfigError, ConfigLoadError, ConfigParseError};
pub use settings::ServerSettings;
pub use source::{
    BaseSource, FsResourceReader, LoadOptions, ResourceReader, BASE_RESOURCE_NAME,
    OVERRIDE_ENV_VAR,
};
pub use store::lazy::LazyConfigurationStore;
pub use store::ConfigurationStore;
