//! Engine configuration.
//!
//! [`DiffSettings`] controls apply-time failure tolerance and the serializer
//! conventions used for scalar equality. Both the differ (so two encodings of
//! the same instant do not spuriously diff) and the applier (`test`
//! operations) consult these conventions.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde_json::Value;

// ── Serializer conventions ────────────────────────────────────────────────

/// How date-shaped strings are interpreted during scalar comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateParseHandling {
    /// Date-shaped strings are compared as plain text.
    None,
    /// Strings parse as date-times, with or without an explicit offset.
    #[default]
    DateTime,
    /// Strings parse as date-times only when they carry an explicit offset.
    DateTimeOffset,
}

/// How the timezone component participates in date equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateTimeZoneHandling {
    /// Equal when the instants are equal.
    Local,
    /// Equal when the instants are equal.
    Utc,
    /// Equal when the wall-clock values are equal; offsets are ignored.
    Unspecified,
    /// Equal when both the instant and the offset are equal.
    #[default]
    RoundtripKind,
}

/// Serialization conventions honored by scalar equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SerializerSettings {
    pub date_parse_handling: DateParseHandling,
    pub date_time_zone_handling: DateTimeZoneHandling,
}

// ── Diff settings ─────────────────────────────────────────────────────────

/// Immutable configuration for diffing and patch application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffSettings {
    /// When true (the default), operations whose target path cannot be
    /// resolved and failed `test` operations are skipped instead of
    /// aborting the batch.
    pub ignore_errors: bool,
    /// Serializer conventions passed through to scalar equality.
    pub serializer: SerializerSettings,
}

impl Default for DiffSettings {
    fn default() -> Self {
        Self {
            ignore_errors: true,
            serializer: SerializerSettings::default(),
        }
    }
}

// ── Scalar equality ───────────────────────────────────────────────────────

/// A parsed date-shaped string.
enum ParsedDate {
    /// Carries an explicit UTC offset.
    Offset(DateTime<FixedOffset>),
    /// No offset in the text.
    Naive(NaiveDateTime),
}

/// Cheap shape check so ordinary strings skip date parsing entirely.
fn looks_like_date(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 10
        && b[..4].iter().all(|c| c.is_ascii_digit())
        && b[4] == b'-'
        && b[7] == b'-'
}

fn parse_date(s: &str, handling: DateParseHandling) -> Option<ParsedDate> {
    if !looks_like_date(s) {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(ParsedDate::Offset(dt));
    }
    if handling == DateParseHandling::DateTimeOffset {
        // Offset-less forms are not dates under this handling.
        return None;
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ParsedDate::Naive(naive));
    }
    None
}

fn dates_equal(a: &ParsedDate, b: &ParsedDate, zone: DateTimeZoneHandling) -> bool {
    match zone {
        DateTimeZoneHandling::Local | DateTimeZoneHandling::Utc => match (a, b) {
            (ParsedDate::Offset(x), ParsedDate::Offset(y)) => {
                x.with_timezone(&Utc) == y.with_timezone(&Utc)
            }
            (ParsedDate::Naive(x), ParsedDate::Naive(y)) => x == y,
            // One side anchored to an instant, the other not: incomparable.
            _ => false,
        },
        DateTimeZoneHandling::Unspecified => {
            let x = match a {
                ParsedDate::Offset(dt) => dt.naive_local(),
                ParsedDate::Naive(n) => *n,
            };
            let y = match b {
                ParsedDate::Offset(dt) => dt.naive_local(),
                ParsedDate::Naive(n) => *n,
            };
            x == y
        }
        DateTimeZoneHandling::RoundtripKind => match (a, b) {
            (ParsedDate::Offset(x), ParsedDate::Offset(y)) => {
                x.with_timezone(&Utc) == y.with_timezone(&Utc) && x.offset() == y.offset()
            }
            (ParsedDate::Naive(x), ParsedDate::Naive(y)) => x == y,
            _ => false,
        },
    }
}

/// Compare two scalar values under the configured serializer conventions.
///
/// Strings that both parse as dates (per `date_parse_handling`) compare per
/// `date_time_zone_handling`; everything else is structural equality.
pub fn scalars_equal(a: &Value, b: &Value, serializer: &SerializerSettings) -> bool {
    if a == b {
        return true;
    }
    if serializer.date_parse_handling == DateParseHandling::None {
        return false;
    }
    if let (Value::String(x), Value::String(y)) = (a, b) {
        if let (Some(dx), Some(dy)) = (
            parse_date(x, serializer.date_parse_handling),
            parse_date(y, serializer.date_parse_handling),
        ) {
            return dates_equal(&dx, &dy, serializer.date_time_zone_handling);
        }
    }
    false
}

/// Deep equality over value trees with settings-aware scalar comparison.
pub fn values_equal(a: &Value, b: &Value, serializer: &SerializerSettings) -> bool {
    match (a, b) {
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter().all(|(k, xv)| {
                    y.get(k).is_some_and(|yv| values_equal(xv, yv, serializer))
                })
        }
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len()
                && x.iter()
                    .zip(y.iter())
                    .all(|(xv, yv)| values_equal(xv, yv, serializer))
        }
        _ => scalars_equal(a, b, serializer),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
