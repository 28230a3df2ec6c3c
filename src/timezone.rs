//! Resolving the configured timezone to local date-times.
//!
//! Write-time date validation compares against "now" in the timezone the
//! user entered the date in, so the application configures a canonical
//! timezone name and resolves it here.

use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// The current UTC offset of a canonical timezone such as
/// `"Asia/Kolkata"`.
///
/// # Errors
/// Returns an [Error::InvalidTimezone] if the name is not a canonical
/// timezone string.
pub fn local_offset(canonical_timezone: &str) -> Result<UtcOffset, Error> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|timezone| timezone.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
        .ok_or_else(|| Error::InvalidTimezone(canonical_timezone.to_owned()))
}

/// The current moment as a local date-time in the given timezone.
pub fn local_now(canonical_timezone: &str) -> Result<PrimitiveDateTime, Error> {
    let now = OffsetDateTime::now_utc().to_offset(local_offset(canonical_timezone)?);

    Ok(PrimitiveDateTime::new(now.date(), now.time()))
}

/// Today's date in the given timezone.
pub fn today(canonical_timezone: &str) -> Result<Date, Error> {
    Ok(local_now(canonical_timezone)?.date())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn resolves_canonical_timezone_names() {
        let offset = local_offset("Asia/Kolkata").expect("Could not resolve timezone");

        assert_eq!(offset.whole_minutes(), 330);
    }

    #[test]
    fn rejects_unknown_timezone_names() {
        let result = local_now("Atlantis/Sunken_City");

        assert_eq!(
            result,
            Err(Error::InvalidTimezone("Atlantis/Sunken_City".to_owned()))
        );
    }
}
