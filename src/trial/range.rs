//! Date ranges for the trial monitor.
//!
//! The queried window is split into consecutive sub-windows ("ranges") of equal
//! width so that the request counts of each range can be compared.

use serde::Deserialize;
use time::{
    Date, Duration, Month, format_description::BorrowedFormatItem, macros::format_description,
};

use crate::Error;

/// The number of ranges used when none has been chosen.
pub const DEFAULT_RANGE_COUNT: usize = 3;
/// The largest number of ranges the window may be split into.
pub const MAX_RANGE_COUNT: usize = 24;
/// The range counts offered in the range selector.
pub const RANGE_COUNT_OPTIONS: [usize; 9] = [1, 2, 3, 4, 5, 6, 9, 12, 24];

const ISO_DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");
const US_DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[month]-[day]-[year]");

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: Date,
    pub to: Date,
}

impl DateRange {
    /// Create a date range, checking that `from` is not after `to`.
    pub fn new(from: Date, to: Date) -> Result<Self, Error> {
        if from > to {
            return Err(Error::InvalidDateRange(from, to));
        }

        Ok(Self { from, to })
    }

    /// The number of days in the range, counting both ends.
    pub fn day_count(&self) -> i64 {
        (self.to - self.from).whole_days() + 1
    }

    /// The label shown above the range's column, e.g. "01/03/2025 - 10/03/2025".
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            format_day_month_year(self.from),
            format_day_month_year(self.to)
        )
    }
}

/// Format a date as "dd/MM/yyyy".
pub fn format_day_month_year(date: Date) -> String {
    format!(
        "{:02}/{:02}/{:04}",
        date.day(),
        u8::from(date.month()),
        date.year()
    )
}

/// Format a date as "MM-DD-YYYY", the format the trial monitor endpoint expects.
pub fn format_month_day_year(date: Date) -> String {
    format!(
        "{:02}-{:02}-{:04}",
        u8::from(date.month()),
        date.day(),
        date.year()
    )
}

/// Parse a date sent by the analytics backend.
///
/// Both "YYYY-MM-DD" and "MM-DD-YYYY" are accepted. Anything after the first
/// ten characters, such as the time of an ISO 8601 timestamp, is ignored.
pub fn parse_backend_date(text: &str) -> Result<Date, Error> {
    let date_part = text.get(..10).unwrap_or(text);

    Date::parse(date_part, ISO_DATE_FORMAT)
        .or_else(|_| Date::parse(date_part, US_DATE_FORMAT))
        .map_err(|error| Error::MalformedResponse(format!("invalid date \"{text}\": {error}")))
}

/// Parse a "YYYY-MM-DD" date from a query string or date input.
pub fn parse_query_date(text: &str) -> Option<Date> {
    Date::parse(text.trim(), ISO_DATE_FORMAT).ok()
}

/// Parse the optional query date `text`, logging a warning when it is present
/// but invalid. `name` says which end of the window it is, e.g. "start".
pub fn parse_date_or_warn(text: Option<&str>, name: &str) -> Option<Date> {
    let text = text?;
    let date = parse_query_date(text);
    if date.is_none() && !text.trim().is_empty() {
        tracing::warn!("Ignoring invalid {name} date \"{text}\"");
    }
    date
}

/// The same day one month before `date`, moved back to the last day of the
/// month if that month is shorter, e.g. 31 March becomes 28 February.
pub fn one_month_before(date: Date) -> Date {
    let month = date.month().previous();
    let year = if month == Month::December {
        date.year() - 1
    } else {
        date.year()
    };

    (1..=date.day())
        .rev()
        .find_map(|day| Date::from_calendar_date(year, month, day).ok())
        .unwrap_or(date)
}

/// The window shown when none has been chosen: the last month up to and
/// including `today`.
pub fn default_window(today: Date) -> DateRange {
    DateRange {
        from: one_month_before(today),
        to: today,
    }
}

/// Check that the window can be split into `count` ranges.
pub fn validate_range_count(count: usize) -> Result<usize, Error> {
    if count == 0 || count > MAX_RANGE_COUNT {
        return Err(Error::InvalidRangeCount(count));
    }

    Ok(count)
}

/// Split `window` into `count` consecutive ranges of equal width.
///
/// The width is the number of days in the window divided by `count`, rounded
/// up. Ranges are laid out backwards from the end of the window, so the
/// oldest range may start before `window.from`. The ranges are returned oldest
/// first.
///
/// # Errors
/// Returns [Error::InvalidRangeCount] if `count` is zero or larger than
/// [MAX_RANGE_COUNT], and [Error::InvalidDateRange] if the oldest range would
/// start before the earliest representable date.
pub fn compute_range_dates(window: DateRange, count: usize) -> Result<Vec<DateRange>, Error> {
    let count = validate_range_count(count)?;
    let day_count = window.day_count().max(1) as usize;
    let width = day_count.div_ceil(count) as i64;

    let mut ranges = (0..count as i64)
        .map(|index| {
            let to = window.to.checked_sub(Duration::days(index * width))?;
            let from = to.checked_sub(Duration::days(width - 1))?;
            Some(DateRange { from, to })
        })
        .collect::<Option<Vec<_>>>()
        .ok_or(Error::InvalidDateRange(window.from, window.to))?;
    ranges.reverse();

    Ok(ranges)
}

/// A range as sent by the trial monitor endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRangeDate {
    #[serde(rename = "fromDate")]
    pub from_date: String,
    #[serde(rename = "toDate")]
    pub to_date: String,
}

impl TryFrom<&RawRangeDate> for DateRange {
    type Error = Error;

    fn try_from(raw: &RawRangeDate) -> Result<Self, Self::Error> {
        let from = parse_backend_date(&raw.from_date)?;
        let to = parse_backend_date(&raw.to_date)?;

        DateRange::new(from, to).map_err(|_| {
            Error::MalformedResponse(format!(
                "range starts on {} after it ends on {}",
                raw.from_date, raw.to_date
            ))
        })
    }
}
