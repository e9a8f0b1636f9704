//! Calendar validation for client-supplied dates.
//!
//! This module only answers whether a string denotes a real calendar date.
//! Range semantics (start before target, and so on) are the callers'
//! concern.

use time::{Date, Month};

use crate::Error;

/// Parse and validate a `YYYY-MM-DD` (or `YYYY/MM/DD`) date string.
///
/// # Errors
/// Returns [Error::InvalidDate] with a caller-facing message when the
/// string is malformed, the month is out of range, or the day does not
/// exist in the given month and year.
pub fn validate_calendar_date(raw: &str) -> Result<Date, Error> {
    let separator = if raw.contains('/') { '/' } else { '-' };
    let parts: Vec<&str> = raw.split(separator).collect();

    let [year, month, day] = parts[..] else {
        return Err(Error::InvalidDate(format!(
            "expected a date in the form YYYY-MM-DD, got \"{raw}\""
        )));
    };

    let year: i32 = year
        .parse()
        .map_err(|_| Error::InvalidDate(format!("\"{year}\" is not a valid year")))?;

    let month_number: u8 = month
        .parse()
        .map_err(|_| Error::InvalidDate(format!("\"{month}\" is not a valid month")))?;

    if !(1..=12).contains(&month_number) {
        return Err(Error::InvalidDate(
            "months must be between 1 (January) and 12 (December)".to_owned(),
        ));
    }

    // The range check above makes this conversion infallible.
    let month = Month::try_from(month_number)
        .map_err(|error| Error::InvalidDate(error.to_string()))?;

    let day: u8 = day
        .parse()
        .map_err(|_| Error::InvalidDate(format!("\"{day}\" is not a valid day")))?;

    let days_in_month = month.length(year);

    if day < 1 || day > days_in_month {
        return Err(Error::InvalidDate(format!(
            "month {month_number} of {year} has at most {days_in_month} days"
        )));
    }

    Date::from_calendar_date(year, month, day).map_err(|error| Error::InvalidDate(error.to_string()))
}

#[cfg(test)]
mod date_validation_tests {
    use time::macros::date;

    use crate::Error;

    use super::validate_calendar_date;

    #[test]
    fn accepts_dash_separated_dates() {
        assert_eq!(validate_calendar_date("2026-01-31"), Ok(date!(2026 - 01 - 31)));
    }

    #[test]
    fn accepts_slash_separated_dates() {
        assert_eq!(validate_calendar_date("2026/01/31"), Ok(date!(2026 - 01 - 31)));
    }

    #[test]
    fn rejects_out_of_range_months() {
        assert!(matches!(
            validate_calendar_date("2026-13-01"),
            Err(Error::InvalidDate(_))
        ));
        assert!(matches!(
            validate_calendar_date("2026-00-01"),
            Err(Error::InvalidDate(_))
        ));
    }

    #[test]
    fn rejects_days_that_do_not_exist() {
        assert!(matches!(
            validate_calendar_date("2026-04-31"),
            Err(Error::InvalidDate(_))
        ));
        // 2026 is not a leap year.
        assert!(matches!(
            validate_calendar_date("2026-02-29"),
            Err(Error::InvalidDate(_))
        ));
    }

    #[test]
    fn accepts_leap_day_in_leap_years() {
        assert_eq!(validate_calendar_date("2028-02-29"), Ok(date!(2028 - 02 - 29)));
    }

    #[test]
    fn rejects_malformed_strings() {
        assert!(matches!(
            validate_calendar_date("tomorrow"),
            Err(Error::InvalidDate(_))
        ));
        assert!(matches!(
            validate_calendar_date("2026-01"),
            Err(Error::InvalidDate(_))
        ));
        assert!(matches!(
            validate_calendar_date(""),
            Err(Error::InvalidDate(_))
        ));
    }
}
