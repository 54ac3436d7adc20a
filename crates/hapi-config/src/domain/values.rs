//! Enumerated setting values.
//!
//! Three settings accept a token from a small fixed set instead of free text:
//! `fhir_version`, `etag_support` and `default_encoding`.  Each is modelled as
//! a Rust enum implementing [`SettingEnum`], which gives the store one generic
//! way to match a stored token against the accepted ones.
//!
//! Tokens are matched exactly and are upper case: `DSTU3` selects
//! [`FhirVersion::Dstu3`], while `dstu3` is not a recognized value.  The same
//! spelling is printed by `Display` and used by serde.

use std::fmt;

use serde::Serialize;

/// A closed set of string tokens a setting may hold.
pub trait SettingEnum: Copy + Sized + 'static {
    /// Every accepted value, in the order they are listed in error messages.
    const VARIANTS: &'static [Self];

    /// The canonical token for this value.
    fn token(self) -> &'static str;

    /// Finds the variant whose token is exactly `raw`.
    fn from_token(raw: &str) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.token() == raw)
    }

    /// Comma-separated list of accepted tokens, for diagnostics.
    fn expected_tokens() -> String {
        Self::VARIANTS
            .iter()
            .map(|v| v.token())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// FHIR release the server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FhirVersion {
    /// FHIR STU3 (3.0.x).  The oldest release this server supports.
    Dstu3,
    /// FHIR R4 (4.0.x).
    R4,
}

/// Whether the server emits and honours `ETag` headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ETagSupport {
    Enabled,
    Disabled,
}

/// Resource encoding used when a client does not ask for one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Encoding {
    Json,
    Xml,
}

impl SettingEnum for FhirVersion {
    const VARIANTS: &'static [Self] = &[FhirVersion::Dstu3, FhirVersion::R4];

    fn token(self) -> &'static str {
        match self {
            FhirVersion::Dstu3 => "DSTU3",
            FhirVersion::R4 => "R4",
        }
    }
}

impl SettingEnum for ETagSupport {
    const VARIANTS: &'static [Self] = &[ETagSupport::Enabled, ETagSupport::Disabled];

    fn token(self) -> &'static str {
        match self {
            ETagSupport::Enabled => "ENABLED",
            ETagSupport::Disabled => "DISABLED",
        }
    }
}

impl SettingEnum for Encoding {
    const VARIANTS: &'static [Self] = &[Encoding::Json, Encoding::Xml];

    fn token(self) -> &'static str {
        match self {
            Encoding::Json => "JSON",
            Encoding::Xml => "XML",
        }
    }
}

impl Encoding {
    /// The FHIR MIME type for this encoding.
    pub fn mime_type(self) -> &'static str {
        match self {
            Encoding::Json => "application/fhir+json",
            Encoding::Xml => "application/fhir+xml",
        }
    }
}

impl fmt::Display for FhirVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl fmt::Display for ETagSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
