//! printwatch — record normalization for the print-monitoring front end.
//!
//! Re-exports [`printwatch_core`] and adds [`logging::init`] so host
//! applications can install a subscriber for the events the normalizer emits.
//!
//! # Architecture
//!
//! ```text
//! API JSON ──► Raw* records ──► Normalizer ──► display-ready records
//!                                   │
//!                                   └──► tracing events ──► logging::init
//! ```
//!
//! The normalizer is pure and synchronous; it keeps no state between calls.

pub mod logging;

pub use printwatch_core::{
    config, error, normalize_preferences, normalize_print, normalize_printer, normalizer,
    parse_or_null, timestamp, try_parse_timestamp, types, Batch, ChronoParser, FieldIssue,
    NormalizeError, Normalizer, Preferences, Print, Printer, PrinterId, RawPreferences, RawPrint,
    RawPrinter, RecordKind, Timestamp, TimestampParser,
};
