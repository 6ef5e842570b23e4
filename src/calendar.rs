//! Calendar date and clock time text formats shared by the API and the storage documents.

use time::{Date, Time, macros::format_description};

time::serde::format_description!(pub calendar_date, Date, "[year]-[month]-[day]");
time::serde::format_description!(pub clock_time, Time, "[hour]:[minute]");

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Result<Date, time::error::Parse> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]"))
}

/// Parse a clock time, accepting both `HH:MM` and `HH:MM:SS`.
///
/// Seconds are dropped: times are stored and rendered at minute precision.
pub fn parse_time(value: &str) -> Result<Time, time::error::Parse> {
    let value = value.trim();
    Time::parse(value, format_description!("[hour]:[minute]:[second]"))
        .or_else(|_| Time::parse(value, format_description!("[hour]:[minute]")))
        .map(|time| time.replace_second(0).unwrap_or(time))
}

pub fn format_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string())
}

pub fn format_time(time: Time) -> String {
    time.format(format_description!("[hour]:[minute]"))
        .unwrap_or_else(|_| time.to_string())
}

#[cfg(test)]
mod tests {
    use time::macros::{date, time};

    use super::*;

    #[test]
    fn parses_short_and_long_clock_times() {
        assert_eq!(parse_time("19:05").unwrap(), time!(19:05));
        assert_eq!(parse_time("19:05:00").unwrap(), time!(19:05));
        assert!(parse_time("7pm").is_err());
    }

    #[test]
    fn seconds_are_truncated_to_the_minute() {
        let parsed = parse_time("19:05:30").unwrap();
        assert_eq!(parsed, time!(19:05));
        assert_eq!(format_time(parsed), "19:05");
    }

    #[test]
    fn dates_round_trip_through_text() {
        let day = parse_date("2026-04-21").unwrap();
        assert_eq!(day, date!(2026 - 04 - 21));
        assert_eq!(format_date(day), "2026-04-21");
        assert!(parse_date("04/21/2026").is_err());
    }

    #[test]
    fn times_are_formatted_without_seconds() {
        assert_eq!(format_time(time!(9:30)), "09:30");
    }
}
