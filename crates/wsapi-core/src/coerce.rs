//! String-to-value coercion shared by every typed accessor.
//!
//! Raw request values and definition defaults both go through these
//! functions, so a malformed default fails exactly like malformed input.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};

use crate::{ParamEnum, ParamError, ParamResult};

/// Date format accepted by date parameters (`yyyy-MM-dd`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date-time format accepted by date-time parameters (`yyyy-MM-ddTHH:mm:ssZ`).
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Separator of list-valued parameters.
pub const LIST_SEPARATOR: char = ',';

/// Parses a boolean literal: `true`/`yes` or `false`/`no`, any case.
pub fn parse_boolean(key: &str, value: &str) -> ParamResult<bool> {
    if value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("yes") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") || value.eq_ignore_ascii_case("no") {
        Ok(false)
    } else {
        Err(ParamError::NotBoolean {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

/// Parses a decimal 32-bit integer.
pub fn parse_int(key: &str, value: &str) -> ParamResult<i32> {
    value.parse().map_err(|_| ParamError::NotInteger {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Parses a decimal 64-bit integer.
pub fn parse_long(key: &str, value: &str) -> ParamResult<i64> {
    value.parse().map_err(|_| ParamError::NotLong {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Looks up an enumeration member by exact name.
pub fn parse_enum<E: ParamEnum>(key: &str, value: &str) -> ParamResult<E> {
    E::from_name(value).ok_or_else(|| ParamError::UnknownVariant {
        key: key.to_string(),
        value: value.to_string(),
        type_name: E::type_name(),
    })
}

/// Parses a strict `yyyy-MM-dd` date.
pub fn parse_date(key: &str, value: &str) -> ParamResult<NaiveDate> {
    strict_date(value).ok_or_else(|| ParamError::NotDate {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Parses a date-time with offset, falling back to a bare date at midnight UTC.
///
/// Accepted forms, tried in order:
/// 1. `2014-05-27T15:50:45+0100` (colon in the offset is optional)
/// 2. RFC 3339, e.g. `2014-05-27T15:50:45Z`
/// 3. `2014-05-27`
pub fn parse_date_time(key: &str, value: &str) -> ParamResult<DateTime<FixedOffset>> {
    let dated = value.get(..DATE_LEN).is_some_and(has_date_shape);
    if dated {
        if let Ok(date_time) = DateTime::parse_from_str(value, DATETIME_FORMAT) {
            return Ok(date_time);
        }
        if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
            return Ok(date_time);
        }
    }
    strict_date(value)
        .map(|date| date.and_time(NaiveTime::MIN).and_utc().fixed_offset())
        .ok_or_else(|| ParamError::NotDateTime {
            key: key.to_string(),
            value: value.to_string(),
        })
}

const DATE_LEN: usize = "yyyy-MM-dd".len();

// chrono's `%Y-%m-%d` accepts signed years and unpadded fields.
fn has_date_shape(value: &str) -> bool {
    value.len() == DATE_LEN
        && value.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn strict_date(value: &str) -> Option<NaiveDate> {
    if !has_date_shape(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Splits a comma-separated value, trimming tokens and dropping empty ones.
///
/// ```
/// use wsapi_core::coerce::split_list;
///
/// assert_eq!(split_list("bar , baz,,"), vec!["bar", "baz"]);
/// assert!(split_list("").is_empty());
/// ```
pub fn split_list(value: &str) -> Vec<&str> {
    value
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}
