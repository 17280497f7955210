//! Timestamp parsing.
//!
//! Parsing goes through the [`TimestampParser`] trait so callers can swap in
//! their own rules. [`ChronoParser`] is the default and accepts, in order:
//! RFC 3339 → ISO-8601 with a space separator and offset → naive date-time at
//! the default offset → bare date at midnight.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};

use crate::error::FieldIssue;

/// A parsed point in time, keeping the offset it was written with.
pub type Timestamp = DateTime<FixedOffset>;

/// Formats with an explicit offset that RFC 3339 parsing does not cover.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

/// Formats without an offset; the parser's default offset applies.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Turns a non-empty timestamp string into a [`Timestamp`].
pub trait TimestampParser: Send + Sync {
    /// `None` means the input is not a timestamp this parser understands.
    fn parse(&self, input: &str) -> Option<Timestamp>;
}

impl<F> TimestampParser for F
where
    F: Fn(&str) -> Option<Timestamp> + Send + Sync,
{
    fn parse(&self, input: &str) -> Option<Timestamp> {
        self(input)
    }
}

/// The default chrono-backed parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChronoParser {
    default_offset: FixedOffset,
}

impl ChronoParser {
    /// A parser that reads naive date-times at `offset`.
    pub fn with_offset(offset: FixedOffset) -> Self {
        Self {
            default_offset: offset,
        }
    }

    pub fn default_offset(&self) -> FixedOffset {
        self.default_offset
    }

    fn localize(&self, naive: NaiveDateTime) -> Option<Timestamp> {
        self.default_offset.from_local_datetime(&naive).single()
    }
}

impl Default for ChronoParser {
    fn default() -> Self {
        Self::with_offset(utc())
    }
}

impl TimestampParser for ChronoParser {
    fn parse(&self, input: &str) -> Option<Timestamp> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
            return Some(ts);
        }

        if let Some(ts) = OFFSET_FORMATS
            .iter()
            .find_map(|fmt| DateTime::parse_from_str(input, fmt).ok())
        {
            return Some(ts);
        }

        if let Some(naive) = NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        {
            return self.localize(naive);
        }

        NaiveDate::parse_from_str(input, DATE_FORMAT)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .and_then(|naive| self.localize(naive))
    }
}

pub(crate) fn utc() -> FixedOffset {
    Utc.fix()
}

/// Parse `input` with the default [`ChronoParser`], or return `None`.
///
/// Absent and empty inputs give `None`. So do strings that are not
/// timestamps; those are logged at debug level.
pub fn parse_or_null(input: Option<&str>) -> Option<Timestamp> {
    match try_parse_timestamp(&ChronoParser::default(), "timestamp", input) {
        Ok(ts) => ts,
        Err(issue) => {
            tracing::debug!(%issue, "treating unparseable timestamp as absent");
            None
        }
    }
}

/// Parse `input` for `field`, reporting strings that are not timestamps.
///
/// `Ok(None)` for absent or empty input.
pub fn try_parse_timestamp<P>(
    parser: &P,
    field: &'static str,
    input: Option<&str>,
) -> Result<Option<Timestamp>, FieldIssue>
where
    P: TimestampParser + ?Sized,
{
    let Some(input) = input.filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    parser
        .parse(input)
        .map(Some)
        .ok_or_else(|| FieldIssue::UnparseableTimestamp {
            field,
            value: input.to_string(),
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
