//! Domain types for the settings store.
//!
//! Nothing here performs I/O.  The module describes *which* settings exist
//! and *what* their typed values look like; reading and merging files is the
//! job of [`crate::source`] and [`crate::store`].

/// The closed set of recognized setting names.
pub mod key;

/// Enumerated values that some settings parse into.
pub mod values;

pub use key::{SettingKey, SettingType, UnknownSettingKey};
pub use values::{ETagSupport, Encoding, FhirVersion, SettingEnum};
