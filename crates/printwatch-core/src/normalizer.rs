//! Normalizer — turns raw API records into display-ready values.
//!
//! Every field is computed independently: a bad `started_at` does not stop
//! `ended_at` from being derived. What happens to records with bad fields is
//! decided by [`NormalizerConfig`]: they are either accepted with the field
//! set to `None` (and a warning logged) or rejected with every issue listed.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::{MissingIdPolicy, NormalizerConfig, TimestampPolicy};
use crate::error::{FieldIssue, NormalizeError, RecordKind};
use crate::timestamp::{try_parse_timestamp, ChronoParser, Timestamp, TimestampParser};
use crate::types::{
    is_truthy, Preferences, Print, Printer, RawPreferences, RawPrint, RawPrinter,
    DERIVED_PRINT_KEYS,
};

/// Configured record normalizer, generic over the timestamp parser.
#[derive(Debug, Clone)]
pub struct Normalizer<P = ChronoParser> {
    config: NormalizerConfig,
    parser: P,
}

/// Outcome of normalizing many records of one kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch<T> {
    /// Accepted records, in input order.
    pub records: Vec<T>,
    /// Input index and reason of every rejected record.
    pub rejected: Vec<(usize, NormalizeError)>,
}

impl<T> Batch<T> {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

impl Normalizer<ChronoParser> {
    /// A normalizer using [`ChronoParser`] at the configured naive offset.
    pub fn new(config: NormalizerConfig) -> Self {
        let parser = ChronoParser::with_offset(config.naive_offset());
        Self { config, parser }
    }
}

impl Default for Normalizer<ChronoParser> {
    fn default() -> Self {
        Self::new(NormalizerConfig::default())
    }
}

impl<P: TimestampParser> Normalizer<P> {
    pub fn with_parser(config: NormalizerConfig, parser: P) -> Self {
        Self { config, parser }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Print
    // -----------------------------------------------------------------------

    /// Normalize a print: parse its timestamps, derive `ended_at` and
    /// `has_alerts`.
    pub fn print(&self, raw: RawPrint) -> Result<Print, NormalizeError> {
        let (print, issues) = self.build_print(raw);
        self.settle(RecordKind::Print, issues)?;
        Ok(print)
    }

    /// Deserialize a print from API JSON, then normalize it.
    pub fn print_from_value(&self, value: Value) -> Result<Print, NormalizeError> {
        self.print(from_value(RecordKind::Print, value)?)
    }

    /// Normalize many prints; rejected ones are reported by input index.
    pub fn prints<I>(&self, raws: I) -> Batch<Print>
    where
        I: IntoIterator<Item = RawPrint>,
    {
        batch(RecordKind::Print, raws, |raw| self.print(raw))
    }

    fn build_print(&self, raw: RawPrint) -> (Print, Vec<FieldIssue>) {
        let RawPrint {
            cancelled_at,
            finished_at,
            started_at,
            uploaded_at,
            alerted_at,
            mut extra,
        } = raw;
        let mut issues = Vec::new();

        let ended_at = match cancelled_at.as_deref() {
            Some(cancelled) => self.timestamp("cancelled_at", Some(cancelled), &mut issues),
            None => self.timestamp("finished_at", finished_at.as_deref(), &mut issues),
        };
        let started_at = self.timestamp("started_at", started_at.as_deref(), &mut issues);
        let uploaded_at = self.timestamp("uploaded_at", uploaded_at.as_deref(), &mut issues);

        let alerted_at = alerted_at.filter(is_truthy);
        let has_alerts = alerted_at.is_some();

        for key in DERIVED_PRINT_KEYS {
            extra.remove(*key);
        }

        let print = Print {
            cancelled_at,
            finished_at,
            alerted_at,
            started_at,
            uploaded_at,
            ended_at,
            has_alerts,
            extra,
        };
        (print, issues)
    }

    // -----------------------------------------------------------------------
    // Printer
    // -----------------------------------------------------------------------

    /// Normalize a printer: default its name from the id, parse `created_at`.
    ///
    /// A printer with neither name nor id is rejected unless the config asks
    /// for a placeholder name.
    pub fn printer(&self, raw: RawPrinter) -> Result<Printer, NormalizeError> {
        let RawPrinter {
            id,
            name,
            created_at,
            extra,
        } = raw;
        let mut issues = Vec::new();
        let prefix = &self.config.printer_name_prefix;

        let name = match (name, &id) {
            (Some(name), _) => name,
            (None, Some(id)) => format!("{prefix}{id}"),
            (None, None) => match self.config.missing_printer_id {
                MissingIdPolicy::Placeholder => {
                    tracing::warn!("printer has neither name nor id, using placeholder name");
                    format!("{prefix}{}", self.config.missing_id_placeholder)
                }
                MissingIdPolicy::Reject => {
                    issues.push(FieldIssue::MissingRequiredField { field: "id" });
                    String::new()
                }
            },
        };
        let created_at = self.timestamp("created_at", created_at.as_deref(), &mut issues);

        self.settle(RecordKind::Printer, issues)?;
        Ok(Printer {
            id,
            name,
            created_at,
            extra,
        })
    }

    /// Deserialize a printer from API JSON, then normalize it.
    pub fn printer_from_value(&self, value: Value) -> Result<Printer, NormalizeError> {
        self.printer(from_value(RecordKind::Printer, value)?)
    }

    /// Normalize many printers; rejected ones are reported by input index.
    pub fn printers<I>(&self, raws: I) -> Batch<Printer>
    where
        I: IntoIterator<Item = RawPrinter>,
    {
        batch(RecordKind::Printer, raws, |raw| self.printer(raw))
    }

    // -----------------------------------------------------------------------
    // Preferences
    // -----------------------------------------------------------------------

    /// Normalize account preferences: `+`-prefix the country code. Falsy
    /// chat ids were already read as `None`.
    pub fn preferences(&self, raw: RawPreferences) -> Preferences {
        let phone_country_code = raw.phone_country_code.map(|code| {
            if code.starts_with('+') {
                code
            } else {
                format!("+{code}")
            }
        });
        Preferences {
            phone_country_code,
            phone_number: raw.phone_number,
            telegram_chat_id: raw.telegram_chat_id,
            extra: raw.extra,
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn timestamp(
        &self,
        field: &'static str,
        input: Option<&str>,
        issues: &mut Vec<FieldIssue>,
    ) -> Option<Timestamp> {
        try_parse_timestamp(&self.parser, field, input).unwrap_or_else(|issue| {
            issues.push(issue);
            None
        })
    }

    /// Accept the record (logging each issue) or reject it, per policy.
    fn settle(&self, kind: RecordKind, issues: Vec<FieldIssue>) -> Result<(), NormalizeError> {
        let reject = issues.iter().any(|issue| match issue {
            FieldIssue::UnparseableTimestamp { .. } => {
                self.config.unparseable_timestamp == TimestampPolicy::Reject
            }
            FieldIssue::MissingRequiredField { .. } | FieldIssue::Malformed { .. } => true,
        });
        if reject {
            return Err(NormalizeError::new(kind, issues));
        }
        warn_accepted(kind, &issues);
        Ok(())
    }
}

fn warn_accepted(kind: RecordKind, issues: &[FieldIssue]) {
    for issue in issues {
        tracing::warn!(record = %kind, %issue, "accepted record with unusable field");
    }
}

fn from_value<T: DeserializeOwned>(kind: RecordKind, value: Value) -> Result<T, NormalizeError> {
    serde_json::from_value(value).map_err(|err| {
        NormalizeError::new(
            kind,
            vec![FieldIssue::Malformed {
                reason: err.to_string(),
            }],
        )
    })
}

fn batch<R, T, I, F>(kind: RecordKind, raws: I, mut normalize: F) -> Batch<T>
where
    I: IntoIterator<Item = R>,
    F: FnMut(R) -> Result<T, NormalizeError>,
{
    let mut out = Batch {
        records: Vec::new(),
        rejected: Vec::new(),
    };
    for (index, raw) in raws.into_iter().enumerate() {
        match normalize(raw) {
            Ok(record) => out.records.push(record),
            Err(err) => {
                tracing::debug!(record = %kind, index, error = %err, "rejected record in batch");
                out.rejected.push((index, err));
            }
        }
    }
    tracing::info!(
        record = %kind,
        accepted = out.records.len(),
        rejected = out.rejected.len(),
        "normalized batch"
    );
    out
}

// ---------------------------------------------------------------------------
// Default-config shorthands
// ---------------------------------------------------------------------------

/// Normalize a print with the built-in configuration.
///
/// Unparseable timestamps become `None`, so this never fails.
pub fn normalize_print(raw: RawPrint) -> Print {
    let (print, issues) = Normalizer::new(NormalizerConfig::default()).build_print(raw);
    warn_accepted(RecordKind::Print, &issues);
    print
}

/// Normalize a printer with the built-in configuration.
///
/// Fails only when the printer has neither a name nor an id.
pub fn normalize_printer(raw: RawPrinter) -> Result<Printer, NormalizeError> {
    Normalizer::new(NormalizerConfig::default()).printer(raw)
}

/// Normalize account preferences with the built-in configuration.
pub fn normalize_preferences(raw: RawPreferences) -> Preferences {
    Normalizer::new(NormalizerConfig::default()).preferences(raw)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
