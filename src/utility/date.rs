use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

// Source of "now" for dates that cannot be parsed.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

// Never fails: anything unparseable becomes `clock.now()`.
pub fn normalize_date(date: &str, clock: &dyn Clock) -> NaiveDateTime {
    match parse_date(date) {
        Ok(parsed) => parsed,
        Err(err) => {
            debug!(date, error = %err, "unparseable date, using current time");
            clock.now()
        }
    }
}

pub fn parse_date(date: &str) -> Result<NaiveDateTime> {
    let date = date.trim();

    parse_general_date(date)
        .or_else(|_| parse_device_date(date))
        .with_context(|| format!("Invalid date: {:?}", date))
}

// ISO 8601 / RFC 3339 / RFC 2822 and a few common numeric layouts.
// Zoned inputs keep the wall-clock time they were written with.
fn parse_general_date(date: &str) -> Result<NaiveDateTime> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(date) {
        return Ok(parsed.naive_local());
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(date) {
        return Ok(parsed.naive_local());
    }

    const DATE_TIME_FORMATS: [&str; 5] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
    ];
    for format in DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(date, format) {
            return Ok(parsed);
        }
    }

    const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%d %B %Y"];
    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(date, format) {
            if let Some(parsed) = parsed.and_hms_opt(0, 0, 0) {
                return Ok(parsed);
            }
        }
    }

    bail!("Not a general date: {:?}", date)
}

// "Tuesday, April 1, 2025 4:47:55 PM" or, from day-first locales, "Sunday, 14 July 2019 17:42:25".
// The weekday is dropped rather than checked against the date. A missing time is midnight.
fn parse_device_date(date: &str) -> Result<NaiveDateTime> {
    static REGEX_DEVICE_DATE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"^(?:[[:alpha:]]+,\s*)?(?:(?P<month_first>[[:alpha:]]+\.?\s+\d{1,2},\s*\d{4})|(?P<day_first>\d{1,2}\s+[[:alpha:]]+\.?,?\s+\d{4}))(?:,?\s+(?P<time>\d{1,2}:\d{2}(?::\d{2})?(?:\s*[AaPp]\.?[Mm]\.?)?))?$",
        )
        .unwrap()
    });

    let caps = REGEX_DEVICE_DATE
        .captures(date)
        .with_context(|| format!("Not a device date: {:?}", date))?;

    let day = match (caps.name("month_first"), caps.name("day_first")) {
        (Some(m), _) => NaiveDate::parse_from_str(&m.as_str().replace('.', ""), "%B %d, %Y")
            .with_context(|| format!("Invalid day: {:?}", m.as_str()))?,
        (None, Some(m)) => {
            let day_first = m.as_str().replace(['.', ','], "");
            NaiveDate::parse_from_str(&day_first, "%d %B %Y")
                .with_context(|| format!("Invalid day: {:?}", m.as_str()))?
        }
        (None, None) => bail!("Not a device date: {:?}", date),
    };

    let Some(time) = caps.name("time") else {
        return day
            .and_hms_opt(0, 0, 0)
            .with_context(|| format!("Invalid day: {:?}", date));
    };

    let time = time.as_str().replace('.', "").to_uppercase();
    let has_meridiem = time.ends_with("AM") || time.ends_with("PM");
    let time_formats: &[&str] = if has_meridiem {
        &["%I:%M:%S %p", "%I:%M %p"]
    } else {
        &["%H:%M:%S", "%H:%M"]
    };

    // "4:47:55PM" has no space before the meridiem
    let time = if has_meridiem && !time.contains(' ') {
        let (clock, meridiem) = time.split_at(time.len() - 2);
        format!("{} {}", clock, meridiem)
    } else {
        time
    };

    for format in time_formats {
        if let Ok(parsed) = NaiveTime::parse_from_str(&time, format) {
            return Ok(day.and_time(parsed));
        }
    }

    bail!("Invalid time: {:?}", time)
}
