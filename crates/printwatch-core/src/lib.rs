//! printwatch-core — record normalization for the print-monitoring front end.
//!
//! Records arrive from the API as loosely-typed JSON. This crate turns them
//! into display-ready values: timestamp strings become date-times, derived
//! fields are filled in and empty values become explicit `None`s.
//!
//! # Pipeline
//!
//! ```text
//! API JSON ──► Raw* (serde) ──► Normalizer ──► Print / Printer / Preferences
//!                                   │
//!                                   └──► TimestampParser (pluggable)
//! ```
//!
//! Everything here is pure and synchronous. A [`Normalizer`] holds no
//! mutable state and can be shared across threads by reference.

pub mod config;
pub mod error;
pub mod normalizer;
pub mod timestamp;
pub mod types;

pub use error::{FieldIssue, NormalizeError, RecordKind};
pub use normalizer::{
    normalize_preferences, normalize_print, normalize_printer, Batch, Normalizer,
};
pub use timestamp::{parse_or_null, try_parse_timestamp, ChronoParser, Timestamp, TimestampParser};
pub use types::{
    Preferences, Print, Printer, PrinterId, RawPreferences, RawPrint, RawPrinter,
};
