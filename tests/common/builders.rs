//! Test builders — ergonomic constructors for raw API records.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use printwatch::{PrinterId, RawPreferences, RawPrint, RawPrinter};
use serde_json::Value;

// ---------------------------------------------------------------------------
// RawPrintBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`RawPrint`] fixtures.
///
/// # Example
///
/// ```rust
/// let raw = RawPrintBuilder::new()
///     .id(7)
///     .finished_at("2020-02-02T00:00:00Z")
///     .alerted_at("2020-02-01T23:00:00Z")
///     .build();
/// ```
#[derive(Default)]
pub struct RawPrintBuilder {
    raw: RawPrint,
}

impl RawPrintBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(self, id: u64) -> Self {
        self.field("id", id)
    }

    pub fn cancelled_at(mut self, ts: impl Into<String>) -> Self {
        self.raw.cancelled_at = Some(ts.into());
        self
    }

    pub fn finished_at(mut self, ts: impl Into<String>) -> Self {
        self.raw.finished_at = Some(ts.into());
        self
    }

    pub fn started_at(mut self, ts: impl Into<String>) -> Self {
        self.raw.started_at = Some(ts.into());
        self
    }

    pub fn uploaded_at(mut self, ts: impl Into<String>) -> Self {
        self.raw.uploaded_at = Some(ts.into());
        self
    }

    pub fn alerted_at(mut self, value: impl Into<Value>) -> Self {
        self.raw.alerted_at = Some(value.into());
        self
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.raw.extra.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> RawPrint {
        self.raw
    }
}

// ---------------------------------------------------------------------------
// RawPrinterBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`RawPrinter`] fixtures.
#[derive(Default)]
pub struct RawPrinterBuilder {
    raw: RawPrinter,
}

impl RawPrinterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<PrinterId>) -> Self {
        self.raw.id = Some(id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.raw.name = Some(name.into());
        self
    }

    pub fn created_at(mut self, ts: impl Into<String>) -> Self {
        self.raw.created_at = Some(ts.into());
        self
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.raw.extra.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> RawPrinter {
        self.raw
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// A finished print with no alerts.
pub fn finished_print(id: u64, finished_at: &str) -> RawPrint {
    RawPrintBuilder::new().id(id).finished_at(finished_at).build()
}

/// A printer known only by its id.
pub fn anonymous_printer(id: u64) -> RawPrinter {
    RawPrinterBuilder::new().id(id).build()
}

/// Preferences with just a phone number.
pub fn phone_preferences(country_code: &str, number: &str) -> RawPreferences {
    RawPreferences {
        phone_country_code: Some(country_code.to_string()),
        phone_number: Some(number.to_string()),
        ..RawPreferences::default()
    }
}

/// `n` printers, every third one without a name.
pub fn build_printers(n: usize) -> Vec<RawPrinter> {
    (0..n)
        .map(|i| {
            let builder = RawPrinterBuilder::new()
                .id(i as u64)
                .created_at(format!("2020-01-{:02}T00:00:00Z", i % 28 + 1));
            if i % 3 == 0 {
                builder.build()
            } else {
                builder.name(format!("printer-{i}")).build()
            }
        })
        .collect()
}

/// A normalizer with the built-in configuration.
pub fn normalizer() -> printwatch::Normalizer {
    printwatch::Normalizer::default()
}
