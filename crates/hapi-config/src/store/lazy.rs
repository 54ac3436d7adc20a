//! Load-on-first-use wrapper around [`ConfigurationStore`].
//!
//! Prefer loading the store explicitly in `main` and passing it down.  This
//! wrapper exists for hosts that cannot do that and need the store to appear
//! the first time something asks for a setting.
//!
//! # Thread safety
//!
//! The store lives in a `once_cell::sync::OnceCell`.  When several threads
//! call [`LazyConfigurationStore::get`] before anything is loaded, one of them
//! runs the load while the others block; all of them then see the same fully
//! built store.  The load runs at most once: a failure is kept in the cell
//! and every later call reports the same error without touching the files
//! again.

use std::fmt;

use once_cell::sync::OnceCell;

use crate::error::ConfigLoadError;
use crate::source::{FsResourceReader, LoadOptions, ResourceReader};

use super::ConfigurationStore;

/// A [`ConfigurationStore`] that is loaded the first time it is needed.
pub struct LazyConfigurationStore {
    reader: Box<dyn ResourceReader>,
    options: LoadOptions,
    cell: OnceCell<Result<ConfigurationStore, ConfigLoadError>>,
}

impl LazyConfigurationStore {
    /// Reads from the local file system when first accessed.
    pub fn new(options: LoadOptions) -> Self {
        Self::with_reader(Box::new(FsResourceReader), options)
    }

    pub fn with_reader(reader: Box<dyn ResourceReader>, options: LoadOptions) -> Self {
        Self {
            reader,
            options,
            cell: OnceCell::new(),
        }
    }

    /// Returns the store, loading it on the first call.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigLoadError`] of the first load if it failed.  The
    /// fault is permanent for this wrapper.
    pub fn get(&self) -> Result<&ConfigurationStore, &ConfigLoadError> {
        self.cell
            .get_or_init(|| ConfigurationStore::load_with(self.reader.as_ref(), &self.options))
            .as_ref()
    }

    /// `true` once a load has succeeded.
    pub fn is_loaded(&self) -> bool {
        matches!(self.cell.get(), Some(Ok(_)))
    }

    /// `true` once a load has been attempted and failed.
    pub fn is_failed(&self) -> bool {
        matches!(self.cell.get(), Some(Err(_)))
    }

    /// The options the store is (or will be) loaded with.
    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Consumes the wrapper, returning the store if it was loaded.
    pub fn into_inner(self) -> Option<ConfigurationStore> {
        self.cell.into_inner().and_then(Result::ok)
    }
}

impl fmt::Debug for LazyConfigurationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyConfigurationStore")
            .field("options", &self.options)
            .field("loaded", &self.is_loaded())
            .field("failed", &self.is_failed())
            .finish()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
