//! `hapi-config`: inspect and validate the effective HAPI FHIR server
//! configuration.
//!
//! Loads the same two layers the server loads (the bundled `hapi.properties`
//! plus the optional override file) and reports what every recognized setting
//! resolves to.
//!
//! # Usage
//!
//! ```text
//! hapi-config [OPTIONS] <COMMAND>
//!
//! Commands:
//!   show [--json]  Print every recognized setting with its effective value
//!   get <KEY>      Print one setting's effective value
//!   check          Fail if any typed setting does not parse
//!
//! Options:
//!   --properties <PATH>  Override properties file [env: HAPI_PROPERTIES]
//!   --base <PATH>        Replace the bundled base file [env: HAPI_BASE_PROPERTIES]
//! ```
//!
//! Log output goes to stderr and honours `RUST_LOG`; command output goes to
//! stdout.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use hapi_config::{
    ConfigurationStore, LoadOptions, ServerSettings, SettingKey, BASE_RESOURCE_NAME,
};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Inspect the layered HAPI FHIR server configuration.
#[derive(Debug, Parser)]
#[command(
    name = "hapi-config",
    about = "Inspect and validate the effective HAPI FHIR server configuration",
    version
)]
struct Cli {
    /// Properties file whose entries replace the base layer.
    ///
    /// Leave unset (or empty) to use the base layer alone.
    #[arg(long, global = true, env = "HAPI_PROPERTIES")]
    properties: Option<PathBuf>,

    /// Properties file used instead of the bundled `hapi.properties`.
    #[arg(long, global = true, env = "HAPI_BASE_PROPERTIES")]
    base: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every recognized setting with its effective value.
    Show {
        /// Emit a JSON document instead of aligned text.
        #[arg(long)]
        json: bool,
    },
    /// Print the effective value of one setting.
    Get {
        /// Setting name as written in the properties file, e.g. `max_page_size`.
        key: SettingKey,
    },
    /// Resolve every typed setting and list each one that does not parse.
    Check,
}

impl Cli {
    /// Converts the parsed flags into [`LoadOptions`].  Empty paths count as
    /// unset.
    fn load_options(&self) -> LoadOptions {
        let non_empty = |p: &Option<PathBuf>| p.clone().filter(|p| !p.as_os_str().is_empty());

        let mut options = LoadOptions::default();
        if let Some(base) = non_empty(&self.base) {
            options = options.with_base_file(base);
        }
        if let Some(path) = non_empty(&self.properties) {
            options = options.with_override(path);
        }
        options
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

const UNSET: &str = "<unset>";

fn run(command: &Command, store: &ConfigurationStore, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Command::Show { json: true } => show_json(store, out),
        Command::Show { json: false } => show_text(store, out),
        Command::Get { key } => get(store, *key, out),
        Command::Check => check(store, out),
    }
}

fn show_text(store: &ConfigurationStore, out: &mut impl Write) -> anyhow::Result<()> {
    let width = SettingKey::ALL
        .iter()
        .map(|k| k.as_str().len())
        .max()
        .unwrap_or(0);

    for key in SettingKey::ALL {
        let shown = match store.effective_value(key) {
            Ok(Some(value)) if key == SettingKey::DatasourcePassword && !value.is_empty() => {
                "***".to_string()
            }
            Ok(Some(value)) => value,
            Ok(None) => UNSET.to_string(),
            Err(e) => format!("<invalid: {e}>"),
        };
        writeln!(out, "{:<width$}  {}", key.as_str(), shown)?;
    }
    Ok(())
}

fn show_json(store: &ConfigurationStore, out: &mut impl Write) -> anyhow::Result<()> {
    let settings =
        ServerSettings::resolve(store).context("settings contain a value that does not parse")?;
    serde_json::to_writer_pretty(&mut *out, &settings)?;
    writeln!(out)?;
    Ok(())
}

fn get(store: &ConfigurationStore, key: SettingKey, out: &mut impl Write) -> anyhow::Result<()> {
    let value = store
        .effective_value(key)
        .with_context(|| format!("setting {key} does not parse"))?;
    writeln!(out, "{}", value.as_deref().unwrap_or(UNSET))?;
    Ok(())
}

fn check(store: &ConfigurationStore, out: &mut impl Write) -> anyhow::Result<()> {
    let faults: Vec<_> = SettingKey::ALL
        .iter()
        .filter_map(|key| store.effective_value(*key).err())
        .collect();

    for fault in &faults {
        error!(key = %fault.key(), "invalid setting");
        writeln!(out, "invalid: {fault}")?;
    }
    if !faults.is_empty() {
        bail!("{} setting(s) failed to parse", faults.len());
    }

    writeln!(out, "ok: {} settings resolved", SettingKey::ALL.len())?;
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = cli.load_options();

    // The one and only load for this process.
    let store = ConfigurationStore::load(&options).with_context(|| {
        format!(
            "could not load HAPI properties (base: {}, override: {})",
            options
                .base_file()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| BASE_RESOURCE_NAME.to_string()),
            options
                .override_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "none".to_string()),
        )
    })?;
    info!(entries = store.properties().len(), "configuration ready");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&cli.command, &store, &mut out)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn store(text: &str) -> ConfigurationStore {
        ConfigurationStore::from_layers(text, None).unwrap()
    }

    fn output(command: Command, store: &ConfigurationStore) -> (anyhow::Result<()>, String) {
        let mut buf = Vec::new();
        let result = run(&command, store, &mut buf);
        (result, String::from_utf8(buf).unwrap())
    }

    // ── Argument parsing ──────────────────────────────────────────────────────

    #[test]
    fn test_cli_parses_show_with_json_flag() {
        let cli = Cli::parse_from(["hapi-config", "show", "--json"]);
        assert!(matches!(cli.command, Command::Show { json: true }));
    }

    #[test]
    fn test_cli_parses_get_with_known_key() {
        let cli = Cli::parse_from(["hapi-config", "get", "logger.error_format"]);
        assert!(matches!(cli.command, Command::Get { key: SettingKey::LoggerErrorFormat }));
    }

    #[test]
    fn test_cli_rejects_unknown_key() {
        let result = Cli::try_parse_from(["hapi-config", "get", "no.such.key"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_properties_flag_sets_override() {
        // Arrange
        let cli = Cli::parse_from(["hapi-config", "--properties", "/etc/hapi/local.properties", "check"]);

        // Act
        let options = cli.load_options();

        // Assert
        assert_eq!(
            options.override_path,
            Some(PathBuf::from("/etc/hapi/local.properties"))
        );
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["hapi-config", "show", "--base", "base.properties"]);
        assert_eq!(cli.load_options().base_file(), Some(PathBuf::from("base.properties").as_path()));
    }

    #[test]
    fn test_empty_paths_count_as_unset() {
        let cli = Cli {
            properties: Some(PathBuf::new()),
            base: Some(PathBuf::new()),
            command: Command::Check,
        };
        assert_eq!(cli.load_options(), LoadOptions::default());
    }

    // ── Commands ──────────────────────────────────────────────────────────────

    #[test]
    fn test_get_prints_defaulted_value() {
        let (result, text) = output(Command::Get { key: SettingKey::ServerId }, &store(""));
        assert!(result.is_ok());
        assert_eq!(text, "home\n");
    }

    #[test]
    fn test_get_prints_unset_marker_for_keys_without_default() {
        let (_, text) = output(Command::Get { key: SettingKey::ServerAddress }, &store(""));
        assert_eq!(text, "<unset>\n");
    }

    #[test]
    fn test_get_invalid_value_is_error() {
        let (result, _) = output(
            Command::Get { key: SettingKey::MaxPageSize },
            &store("max_page_size=notanumber"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_show_text_lists_every_key_and_redacts_password() {
        // Arrange
        let s = store("datasource.password=hunter2\nmax_page_size=500\n");

        // Act
        let (result, text) = output(Command::Show { json: false }, &s);

        // Assert
        assert!(result.is_ok());
        assert_eq!(text.lines().count(), SettingKey::ALL.len());
        assert!(text.lines().any(|l| l.starts_with("max_page_size") && l.ends_with(" 500")));
        assert!(text.contains("***"));
        assert!(!text.contains("hunter2"));
    }

    #[test]
    fn test_show_text_marks_invalid_values() {
        let (result, text) = output(Command::Show { json: false }, &store("fhir_version=DSTU9"));
        assert!(result.is_ok());
        assert!(text.contains("<invalid:"));
    }

    #[test]
    fn test_show_json_is_valid_json() {
        let (result, text) = output(Command::Show { json: true }, &store("fhir_version=R4"));
        assert!(result.is_ok());
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["fhir_version"], "R4");
        assert_eq!(json["server_id"], "home");
    }

    #[test]
    fn test_check_passes_for_valid_store() {
        let (result, text) = output(Command::Check, &store(""));
        assert!(result.is_ok());
        assert_eq!(text, "ok: 25 settings resolved\n");
    }

    #[test]
    fn test_check_reports_every_fault() {
        let (result, text) = output(
            Command::Check,
            &store("max_page_size=x\nfhir_version=DSTU1\netag_support=sometimes\n"),
        );
        assert!(result.is_err());
        assert_eq!(text.lines().filter(|l| l.starts_with("invalid:")).count(), 3);
    }

    #[test]
    fn test_check_against_bundled_and_override_file() {
        // Arrange
        let dir = std::env::temp_dir().join(format!("hapi_config_cli_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let over = dir.join("override.properties");
        std::fs::write(&over, "max_page_size=500\n").unwrap();
        let store = ConfigurationStore::load(&LoadOptions::default().with_override(&over)).unwrap();

        // Act
        let (result, _) = output(Command::Check, &store);
        let (_, value) = output(Command::Get { key: SettingKey::MaxPageSize }, &store);

        // Assert
        assert!(result.is_ok());
        assert_eq!(value, "500\n");

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }
}
