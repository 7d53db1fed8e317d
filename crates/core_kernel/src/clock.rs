//! Clocks and calendar arithmetic
//!
//! Age eligibility depends on "today", so the current date is read through
//! the [`Clock`] trait. Production code uses [`SystemClock`] in the
//! configured business timezone; tests pin the date with [`FixedClock`].

use chrono::{Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Timezone wrapper with string serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Returns the IANA name of the timezone
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Returns the current calendar date in this timezone
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.0).date_naive()
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::Asia::Tokyo)
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.name())
    }
}

impl FromStr for Timezone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tz::from_str(s)
            .map(Timezone)
            .map_err(|_| format!("Invalid timezone: {}", s))
    }
}

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Source of the current calendar date
pub trait Clock: Send + Sync + 'static {
    /// Returns today's date
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the system time in a fixed timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    pub timezone: Timezone,
}

impl SystemClock {
    pub fn new(timezone: Timezone) -> Self {
        Self { timezone }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        self.timezone.today()
    }
}

/// Clock that always reports the same date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Number of whole years elapsed from `from` to `to`
///
/// A year counts only once the anniversary has been reached, so a person
/// born on 2000-06-15 is 19 on 2020-06-14 and 20 on 2020-06-15. A 29 Feb
/// anniversary is reached on 1 Mar in non-leap years.
pub fn whole_years_between(from: NaiveDate, to: NaiveDate) -> i32 {
    let mut years = to.year() - from.year();
    if (to.month(), to.day()) < (from.month(), from.day()) {
        years -= 1;
    }
    years
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_whole_years_anniversary_boundary() {
        assert_eq!(whole_years_between(date(2000, 6, 15), date(2020, 6, 14)), 19);
        assert_eq!(whole_years_between(date(2000, 6, 15), date(2020, 6, 15)), 20);
        assert_eq!(whole_years_between(date(2000, 6, 15), date(2020, 12, 31)), 20);
    }

    #[test]
    fn test_whole_years_leap_day() {
        assert_eq!(whole_years_between(date(2000, 2, 29), date(2021, 2, 28)), 20);
        assert_eq!(whole_years_between(date(2000, 2, 29), date(2021, 3, 1)), 21);
        assert_eq!(whole_years_between(date(2000, 2, 29), date(2024, 2, 29)), 24);
    }

    #[test]
    fn test_whole_years_future_birth_is_negative() {
        assert_eq!(whole_years_between(date(2030, 1, 1), date(2020, 1, 1)), -10);
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(date(2024, 4, 1));
        assert_eq!(clock.today(), date(2024, 4, 1));
    }

    #[test]
    fn test_timezone_parse_and_serialize() {
        let tz: Timezone = "Asia/Tokyo".parse().unwrap();
        assert_eq!(tz, Timezone::default());
        assert_eq!(serde_json::to_string(&tz).unwrap(), "\"Asia/Tokyo\"");
        assert!("Mars/Olympus".parse::<Timezone>().is_err());
    }
}
