//! Creation timestamps in the shapes a document store may hand back.
//!
//! Older documents carry a `{seconds, nanoseconds}` object, rows written by
//! this service carry a native timestamp, and hand-imported data may hold a
//! plain string. All three sort and format through [`RecordTimestamp::epoch_millis`].

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Text shown when a timestamp is absent.
pub const MISSING_DATE: &str = "N/A";
/// Text shown when a timestamp cannot be interpreted.
pub const INVALID_DATE: &str = "Invalid Date";

/// Stored `createdAt` value.
///
/// Deserialisation tries the variants in order, so an RFC 3339 string lands
/// in [`RecordTimestamp::Native`] and any other string in
/// [`RecordTimestamp::Text`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordTimestamp {
    Structured {
        seconds: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        nanoseconds: Option<u32>,
    },
    Native(DateTime<Utc>),
    Text(String),
}

impl RecordTimestamp {
    /// Milliseconds since the Unix epoch, if the value can be interpreted.
    ///
    /// Structured values use whole seconds only.
    ///
    /// # Examples
    /// ```
    /// use grievance_backend::domain::RecordTimestamp;
    ///
    /// let ts = RecordTimestamp::Structured { seconds: 1_700_000_000, nanoseconds: Some(5) };
    /// assert_eq!(ts.epoch_millis(), Some(1_700_000_000_000));
    /// assert_eq!(RecordTimestamp::Text("garbage".into()).epoch_millis(), None);
    /// ```
    pub fn epoch_millis(&self) -> Option<i64> {
        self.to_datetime().map(|dt| dt.timestamp_millis())
    }

    fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Structured { seconds, .. } => {
                seconds.checked_mul(1000).and_then(DateTime::from_timestamp_millis)
            }
            Self::Native(dt) => Some(*dt),
            Self::Text(raw) => parse_text(raw),
        }
    }
}

impl From<DateTime<Utc>> for RecordTimestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Native(value)
    }
}

fn parse_text(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Render a timestamp as `YYYY-MM-DD` (UTC).
///
/// # Examples
/// ```
/// use grievance_backend::domain::{RecordTimestamp, format_date};
///
/// let ts = RecordTimestamp::Structured { seconds: 1_700_000_000, nanoseconds: None };
/// assert_eq!(format_date(Some(&ts)), "2023-11-14");
/// assert_eq!(format_date(None), "N/A");
/// ```
pub fn format_date(timestamp: Option<&RecordTimestamp>) -> String {
    match timestamp {
        None => MISSING_DATE.to_owned(),
        Some(ts) => ts
            .to_datetime()
            .map_or_else(|| INVALID_DATE.to_owned(), |dt| dt.format("%Y-%m-%d").to_string()),
    }
}

fn dated_first(
    a: Option<&RecordTimestamp>,
    b: Option<&RecordTimestamp>,
    dated: impl FnOnce(i64, i64) -> Ordering,
) -> Ordering {
    let key = |ts: Option<&RecordTimestamp>| ts.and_then(RecordTimestamp::epoch_millis);
    match (key(a), key(b)) {
        (Some(left), Some(right)) => dated(left, right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Newest-first ordering; undated values sort last and compare equal.
pub fn newest_first(a: Option<&RecordTimestamp>, b: Option<&RecordTimestamp>) -> Ordering {
    dated_first(a, b, |left, right| right.cmp(&left))
}

/// Oldest-first ordering; undated values still sort last.
pub fn oldest_first(a: Option<&RecordTimestamp>, b: Option<&RecordTimestamp>) -> Ordering {
    dated_first(a, b, |left, right| left.cmp(&right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn structured(seconds: i64) -> RecordTimestamp {
        RecordTimestamp::Structured {
            seconds,
            nanoseconds: None,
        }
    }

    #[rstest]
    #[case(json!({ "seconds": 1_700_000_000, "nanoseconds": 12 }), "2023-11-14")]
    #[case(json!({ "seconds": 0 }), "1970-01-01")]
    #[case(json!("2024-02-29T23:30:00Z"), "2024-02-29")]
    #[case(json!("2024-02-29T23:30:00-02:00"), "2024-03-01")]
    #[case(json!("2024-03-05 08:15:00"), "2024-03-05")]
    #[case(json!("2024-03-05"), "2024-03-05")]
    #[case(json!("yesterday"), "Invalid Date")]
    fn formats_every_shape(#[case] stored: serde_json::Value, #[case] expected: &str) {
        let ts: RecordTimestamp = serde_json::from_value(stored).expect("any shape deserialises");
        assert_eq!(format_date(Some(&ts)), expected);
    }

    #[rstest]
    fn absence_formats_as_not_available() {
        assert_eq!(format_date(None), MISSING_DATE);
    }

    #[rstest]
    fn rfc3339_strings_become_native() {
        let ts: RecordTimestamp = serde_json::from_value(json!("2024-01-01T00:00:00Z"))
            .expect("deserialise");
        assert!(matches!(ts, RecordTimestamp::Native(_)));
    }

    #[rstest]
    fn ordering_mixes_shapes_and_puts_undated_last() {
        let native = RecordTimestamp::Native(
            DateTime::from_timestamp(1_700_000_100, 0).expect("valid timestamp"),
        );
        let text = RecordTimestamp::Text("2023-11-14 22:13:10".into());
        let old = structured(1_600_000_000);
        let bad = RecordTimestamp::Text("??".into());

        let mut items: Vec<(u8, Option<RecordTimestamp>)> = vec![
            (1, Some(bad)),
            (2, Some(old)),
            (3, None),
            (4, Some(text)),
            (5, Some(native)),
        ];
        items.sort_by(|a, b| newest_first(a.1.as_ref(), b.1.as_ref()));
        let order: Vec<u8> = items.iter().map(|(tag, _)| *tag).collect();
        assert_eq!(order, vec![5, 4, 2, 1, 3]);

        items.sort_by(|a, b| oldest_first(a.1.as_ref(), b.1.as_ref()));
        let order: Vec<u8> = items.iter().map(|(tag, _)| *tag).collect();
        assert_eq!(order, vec![2, 4, 5, 1, 3]);
    }
}
