//! Datetime values with an optional UTC offset.
//!
//! `dt"..."` literals come in two shapes: a bare date (`dt"2024-07-24"`)
//! and a datetime with optional timezone (`dt"2000-01-01T12:47:05-08:00"`).
//! Bare dates map to [`chrono::NaiveDate`]; datetimes map to
//! [`DateTimeValue`], which keeps the distinction between a naive timestamp
//! and one qualified with an offset.

use std::fmt;

use chrono::{FixedOffset, NaiveDateTime};

/// A timestamp with an optional UTC offset.
///
/// Equality compares instants when both sides carry an offset (so
/// `12:00:00Z == 13:00:00+01:00`), and naive timestamps only against naive
/// timestamps.
#[derive(Clone, Copy, Debug)]
pub struct DateTimeValue {
    pub datetime: NaiveDateTime,
    /// `None` for a naive timestamp with no timezone qualifier.
    pub offset: Option<FixedOffset>,
}

impl DateTimeValue {
    /// Naive timestamp with no timezone qualifier.
    pub fn naive(datetime: NaiveDateTime) -> Self {
        DateTimeValue {
            datetime,
            offset: None,
        }
    }

    /// Timestamp qualified with a UTC offset.
    pub fn with_offset(datetime: NaiveDateTime, offset: FixedOffset) -> Self {
        DateTimeValue {
            datetime,
            offset: Some(offset),
        }
    }

    /// UTC timestamp (offset zero).
    pub fn utc(datetime: NaiveDateTime) -> Self {
        // Offset 0 is always in range.
        DateTimeValue {
            datetime,
            offset: FixedOffset::east_opt(0),
        }
    }

    /// `true` when the timestamp has no timezone qualifier.
    pub fn is_naive(&self) -> bool {
        self.offset.is_none()
    }

    /// The timestamp normalized to UTC, when an offset is present.
    ///
    /// Returns the local wall-clock time unchanged for naive timestamps.
    pub fn to_utc(&self) -> NaiveDateTime {
        match self.offset {
            Some(offset) => self.datetime - offset,
            None => self.datetime,
        }
    }
}

impl PartialEq for DateTimeValue {
    fn eq(&self, other: &Self) -> bool {
        match (self.offset, other.offset) {
            (Some(_), Some(_)) => self.to_utc() == other.to_utc(),
            (None, None) => self.datetime == other.datetime,
            _ => false,
        }
    }
}

impl Eq for DateTimeValue {}

impl fmt::Display for DateTimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.datetime.format("%Y-%m-%dT%H:%M:%S"))?;
        match self.offset {
            Some(offset) if offset.local_minus_utc() == 0 => write!(f, "Z"),
            Some(offset) => {
                let total = offset.local_minus_utc();
                let (sign, total) = if total < 0 { ('-', -total) } else { ('+', total) };
                write!(f, "{}{:02}:{:02}", sign, total / 3600, (total % 3600) / 60)
            }
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "test assertions use unwrap for clarity")]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDateTime::new(
            NaiveDate::from_ymd_opt(y, mo, d).unwrap(),
            NaiveTime::from_hms_opt(h, mi, s).unwrap(),
        )
    }

    #[test]
    fn equal_instants_compare_equal() {
        let utc = DateTimeValue::utc(dt(2000, 1, 1, 12, 0, 0));
        let plus_one = DateTimeValue::with_offset(
            dt(2000, 1, 1, 13, 0, 0),
            FixedOffset::east_opt(3600).unwrap(),
        );
        assert_eq!(utc, plus_one);
    }

    #[test]
    fn naive_never_equals_zoned() {
        let naive = DateTimeValue::naive(dt(2000, 1, 1, 12, 0, 0));
        let utc = DateTimeValue::utc(dt(2000, 1, 1, 12, 0, 0));
        assert_ne!(naive, utc);
        assert_eq!(naive, DateTimeValue::naive(dt(2000, 1, 1, 12, 0, 0)));
    }

    #[test]
    fn display_forms() {
        assert_eq!(
            DateTimeValue::naive(dt(2000, 1, 1, 12, 0, 0)).to_string(),
            "2000-01-01T12:00:00"
        );
        assert_eq!(
            DateTimeValue::utc(dt(2000, 1, 1, 12, 0, 0)).to_string(),
            "2000-01-01T12:00:00Z"
        );
        let neg = DateTimeValue::with_offset(
            dt(2000, 1, 1, 12, 47, 5),
            FixedOffset::east_opt(-8 * 3600).unwrap(),
        );
        assert_eq!(neg.to_string(), "2000-01-01T12:47:05-08:00");
        let half = DateTimeValue::with_offset(
            dt(2000, 1, 1, 12, 4, 52),
            FixedOffset::east_opt(12 * 3600 + 30 * 60).unwrap(),
        );
        assert_eq!(half.to_string(), "2000-01-01T12:04:52+12:30");
    }
}
