//! Configuration types for printwatch.
//!
//! [`Config::load`] reads `~/.config/printwatch/config.toml` when it exists,
//! layered over the built-in defaults. [`Config::defaults`] returns the same
//! defaults without touching the filesystem (useful in tests).

use anyhow::{bail, Context};
use chrono::FixedOffset;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r##"
[normalizer]
unparseable_timestamp    = "absent"
missing_printer_id       = "reject"
printer_name_prefix      = "Printer #"
missing_id_placeholder   = "?"
naive_utc_offset_minutes = 0
"##;

/// Offsets beyond ±24h are not representable.
const MAX_OFFSET_MINUTES: i32 = 24 * 60 - 1;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration, loaded from `~/.config/printwatch/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub normalizer: NormalizerConfig,
}

/// What to do with a non-empty timestamp no format matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampPolicy {
    /// Store `None` and log a warning.
    Absent,
    /// Reject the whole record.
    Reject,
}

/// What to do with a printer that has neither a name nor an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingIdPolicy {
    Reject,
    /// Name it `{printer_name_prefix}{missing_id_placeholder}`.
    Placeholder,
}

/// `[normalizer]` section of `config.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NormalizerConfig {
    #[serde(default = "default_unparseable_timestamp")]
    pub unparseable_timestamp: TimestampPolicy,
    #[serde(default = "default_missing_printer_id")]
    pub missing_printer_id: MissingIdPolicy,
    #[serde(default = "default_printer_name_prefix")]
    pub printer_name_prefix: String,
    #[serde(default = "default_missing_id_placeholder")]
    pub missing_id_placeholder: String,
    /// Offset applied to timestamps written without one.
    #[serde(default)]
    pub naive_utc_offset_minutes: i32,
}

fn default_unparseable_timestamp() -> TimestampPolicy { TimestampPolicy::Absent }
fn default_missing_printer_id() -> MissingIdPolicy { MissingIdPolicy::Reject }
fn default_printer_name_prefix() -> String { "Printer #".to_string() }
fn default_missing_id_placeholder() -> String { "?".to_string() }

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            unparseable_timestamp: default_unparseable_timestamp(),
            missing_printer_id: default_missing_printer_id(),
            printer_name_prefix: default_printer_name_prefix(),
            missing_id_placeholder: default_missing_id_placeholder(),
            naive_utc_offset_minutes: 0,
        }
    }
}

impl NormalizerConfig {
    /// The offset for naive timestamps. Out-of-range values fall back to UTC;
    /// [`Config::validate`] catches them at load time.
    pub fn naive_offset(&self) -> FixedOffset {
        offset_from_minutes(self.naive_utc_offset_minutes).unwrap_or_else(crate::timestamp::utc)
    }
}

fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    if minutes.abs() > MAX_OFFSET_MINUTES {
        return None;
    }
    FixedOffset::east_opt(minutes * 60)
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/printwatch/config.toml`, layered on top of the
    /// built-in defaults. A missing file is not an error.
    pub fn load() -> anyhow::Result<Self> {
        Self::layered(&config_path(), false)
    }

    /// Load from `path`, layered on top of the built-in defaults. The file
    /// must exist.
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        Self::layered(path.as_ref(), true)
    }

    fn layered(path: &Path, required: bool) -> anyhow::Result<Self> {
        let cfg: Self = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(required),
            )
            .build()
            .with_context(|| format!("reading {}", path.display()))?
            .try_deserialize()
            .with_context(|| format!("invalid configuration in {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Check values serde cannot: offset range and a usable name prefix.
    pub fn validate(&self) -> anyhow::Result<()> {
        let n = &self.normalizer;
        if offset_from_minutes(n.naive_utc_offset_minutes).is_none() {
            bail!(
                "normalizer.naive_utc_offset_minutes must be within ±{MAX_OFFSET_MINUTES}, got {}",
                n.naive_utc_offset_minutes
            );
        }
        if n.printer_name_prefix.is_empty() {
            bail!("normalizer.printer_name_prefix must not be empty");
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("printwatch")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
