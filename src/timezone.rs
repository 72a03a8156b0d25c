use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Today's date in `local_timezone`.
///
/// # Errors
/// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a
/// canonical timezone name.
pub fn current_local_date(local_timezone: &str) -> Result<Date, Error> {
    let Some(local_offset) = get_local_offset(local_timezone) else {
        tracing::error!("Invalid timezone {}", local_timezone);
        return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
    };

    Ok(OffsetDateTime::now_utc().to_offset(local_offset).date())
}

#[cfg(test)]
mod tests {
    use time::{OffsetDateTime, UtcOffset};

    use crate::Error;

    use super::{current_local_date, get_local_offset};

    #[test]
    fn resolves_fixed_offset_timezone() {
        assert_eq!(
            get_local_offset("Asia/Ho_Chi_Minh"),
            UtcOffset::from_hms(7, 0, 0).ok()
        );
    }

    #[test]
    fn unknown_timezone_is_an_error() {
        assert_eq!(
            current_local_date("Mars/Olympus_Mons"),
            Err(Error::InvalidTimezoneError("Mars/Olympus_Mons".to_owned()))
        );
    }

    #[test]
    fn utc_date_matches_now() {
        let want = OffsetDateTime::now_utc().date();

        let got = current_local_date("Etc/UTC").unwrap();

        // Allow for the test running across midnight.
        assert!((got - want).whole_days().abs() <= 1);
    }
}
