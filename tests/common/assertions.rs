//! Domain-specific assertion macros for printwatch harnesses.
//!
//! These add context-rich failure messages that make it clear *which* field
//! of a normalized record was wrong.

use printwatch::{Print, Printer, Timestamp};

// ---------------------------------------------------------------------------
// Timestamp assertions
// ---------------------------------------------------------------------------

/// Assert that an `Option<Timestamp>` holds the instant written as RFC 3339.
///
/// ```rust
/// assert_timestamp!(print.ended_at, "2020-01-01T00:00:00Z");
/// ```
#[macro_export]
macro_rules! assert_timestamp {
    ($actual:expr, $expected:expr) => {{
        let actual: Option<printwatch::Timestamp> = $actual;
        let expected = chrono::DateTime::parse_from_rfc3339($expected)
            .expect("assert_timestamp! expects an RFC 3339 literal");
        match actual {
            Some(ts) if ts == expected => {}
            Some(ts) => panic!(
                "assert_timestamp! failed on `{}`:\n  expected: {}\n  actual:   {}",
                stringify!($actual),
                expected.to_rfc3339(),
                ts.to_rfc3339()
            ),
            None => panic!(
                "assert_timestamp! failed on `{}`: value is None, expected {}",
                stringify!($actual),
                expected.to_rfc3339()
            ),
        }
    }};
}

/// Assert that an `Option<Timestamp>` is the absent marker.
#[macro_export]
macro_rules! assert_no_timestamp {
    ($actual:expr) => {{
        let actual: Option<printwatch::Timestamp> = $actual;
        if let Some(ts) = actual {
            panic!(
                "assert_no_timestamp! failed on `{}`: got {}",
                stringify!($actual),
                ts.to_rfc3339()
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// Rejection assertions
// ---------------------------------------------------------------------------

/// Assert that a normalization result was rejected with an issue on `field`.
///
/// ```rust
/// assert_rejected_on!(normalizer.printer(raw), "id");
/// ```
#[macro_export]
macro_rules! assert_rejected_on {
    ($result:expr, $field:expr) => {{
        let field: &str = $field;
        match $result {
            Ok(record) => panic!(
                "assert_rejected_on! failed: record was accepted.\n  record: {:?}",
                record
            ),
            Err(err) => {
                let hit = err.issues.iter().any(|issue| match issue {
                    printwatch::FieldIssue::UnparseableTimestamp { field: f, .. }
                    | printwatch::FieldIssue::MissingRequiredField { field: f } => *f == field,
                    printwatch::FieldIssue::Malformed { .. } => false,
                });
                if !hit {
                    panic!(
                        "assert_rejected_on! failed: no issue on {:?}.\n  issues: {:?}",
                        field, err.issues
                    );
                }
            }
        }
    }};
}

// ---------------------------------------------------------------------------
// Record invariant helpers
// ---------------------------------------------------------------------------

/// Check the invariants every normalized print must satisfy.
pub fn assert_print_invariants(print: &Print) {
    for key in ["ended_at", "has_alerts"] {
        assert!(
            !print.extra.contains_key(key),
            "derived key {key:?} leaked into passthrough fields: {:?}",
            print.extra
        );
    }
    assert_eq!(
        print.has_alerts,
        print.alerted_at.is_some(),
        "has_alerts must mirror alerted_at: {print:?}"
    );
    if print.cancelled_at.is_none() && print.finished_at.is_none() {
        assert!(
            print.ended_at.is_none(),
            "ended_at without an end timestamp: {print:?}"
        );
    }
}

/// Check the invariants every normalized printer must satisfy.
pub fn assert_printer_invariants(printer: &Printer) {
    assert!(
        !printer.name.is_empty(),
        "normalized printer must have a name: {printer:?}"
    );
}

/// Shorthand for an RFC 3339 literal in expected values.
pub fn ts(s: &str) -> Timestamp {
    chrono::DateTime::parse_from_rfc3339(s).expect("test timestamp must be RFC 3339")
}
