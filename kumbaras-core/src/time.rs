//! Time utilities: timezone-aware "today" and calendar keys.

use anyhow::Result;
use chrono::{Datelike, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;

/// Today's date in an IANA tz like "Europe/Athens".
pub fn today_in(tz: &str) -> Result<NaiveDate> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;
    Ok(Utc::now().with_timezone(&tz).date_naive())
}

/// Month key `YYYY-MM`
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Full English weekday name ("Saturday"), as stored in processed files.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_key_pads() {
        let d = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        assert_eq!(month_key(d), "2026-03");
    }

    #[test]
    fn test_weekday_name_parses_back() {
        for day in [Weekday::Mon, Weekday::Sat, Weekday::Sun] {
            assert_eq!(weekday_name(day).parse::<Weekday>().unwrap(), day);
        }
    }

    #[test]
    fn test_weekend() {
        assert!(is_weekend(Weekday::Sat));
        assert!(is_weekend(Weekday::Sun));
        assert!(!is_weekend(Weekday::Fri));
    }

    #[test]
    fn test_today_in_rejects_bad_tz() {
        assert!(today_in("Europe/Athens").is_ok());
        assert!(today_in("Mars/Olympus").is_err());
    }
}
