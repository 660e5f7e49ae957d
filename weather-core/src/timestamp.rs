//! Conversion of upstream local-naive timestamps into zone-aware instants.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;

use crate::error::{TimestampError, TimezoneError};

/// Minute-precision local time, no seconds and no offset (`2023-04-14T00:00`).
pub const LOCAL_MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Look up an IANA zone identifier in the compiled tz database.
pub fn resolve_timezone(id: &str) -> Result<Tz, TimezoneError> {
    id.parse::<Tz>().map_err(|source| TimezoneError::Unknown {
        id: id.to_string(),
        source,
    })
}

/// Parse `value` as wall-clock time in `tz`.
///
/// The layout is exact: zero-padded fields, unsigned four-digit year, nothing
/// after the minutes. In an autumn fold the earlier of the two instants wins.
/// A wall-clock time inside a spring gap is read with the offset in force
/// before the transition, which moves it forward by the length of the gap.
pub fn parse_local(tz: &Tz, value: &str) -> Result<DateTime<Tz>, TimestampError> {
    let naive = NaiveDateTime::parse_from_str(value, LOCAL_MINUTE_FORMAT)?;
    if naive.format(LOCAL_MINUTE_FORMAT).to_string() != value {
        return Err(TimestampError::Layout);
    }

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => {
            // Zones never transition twice within a day.
            let day_before = naive
                .checked_sub_signed(Duration::days(1))
                .ok_or(TimestampError::Nonexistent)?;
            let offset = tz.offset_from_utc_datetime(&day_before).fix();

            naive
                .checked_sub_signed(Duration::seconds(i64::from(offset.local_minus_utc())))
                .map(|utc| tz.from_utc_datetime(&utc))
                .ok_or(TimestampError::Nonexistent)
        }
    }
}
