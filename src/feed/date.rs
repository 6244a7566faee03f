// src/feed/date.rs
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

/// Calendar day used as the query key for all three upstream feeds.
///
/// Always renders as `YYYY-MM-DD`, which is the form every endpoint expects
/// and the form shown on cards. Whether the day lies in the future is the
/// caller's concern; the date picker clamps to today before we ever see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FeedDate(NaiveDate);

impl FeedDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Today in local time. Used as the default query day by the demo binary.
    pub fn today() -> Self {
        Self(chrono::Local::now().date_naive())
    }

    /// Zero-padded year/month/day components for archive URL templates.
    pub fn split_ymd(&self) -> (String, String, String) {
        (
            self.0.format("%Y").to_string(),
            self.0.format("%m").to_string(),
            self.0.format("%d").to_string(),
        )
    }
}

impl fmt::Display for FeedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for FeedDate {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays_iso_form() {
        let d: FeedDate = "2024-03-07".parse().unwrap();
        assert_eq!(d.to_string(), "2024-03-07");
    }

    #[test]
    fn renders_zero_padded_components() {
        let d: FeedDate = "2024-3-7".parse().unwrap();
        let (y, m, day) = d.split_ymd();
        assert_eq!((y.as_str(), m.as_str(), day.as_str()), ("2024", "03", "07"));
        // Display re-canonicalizes loosely padded input too.
        assert_eq!(d.to_string(), "2024-03-07");
    }

    #[test]
    fn rejects_garbage() {
        assert!("not-a-date".parse::<FeedDate>().is_err());
        assert!("2024-13-40".parse::<FeedDate>().is_err());
        assert!("".parse::<FeedDate>().is_err());
    }
}
