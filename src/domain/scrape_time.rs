use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Layout of the token embedded in scrape file names
pub const TOKEN_FORMAT: &str = "%Y%m%d_%H%M%S";
const SHORT_TOKEN_FORMAT: &str = "%Y%m%d_%H%M";

const READABLE_FORMAT: &str = "%-d %b %Y, %H:%M";
const AXIS_FORMAT: &str = "%-d %b, %H:%M";

/// Fixed-width, zero-padded timestamp token identifying one scrape (`YYYYMMDD_HHMMSS`).
///
/// Ordering is plain string ordering, which matches chronological order only
/// because every token has the same width.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScrapeTime(String);

impl ScrapeTime {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Token for a scrape taken right now, in local time
    pub fn now() -> Self {
        Self::from_datetime(Local::now().naive_local())
    }

    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        Self(datetime.format(TOKEN_FORMAT).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.0, TOKEN_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(&self.0, SHORT_TOKEN_FORMAT))
            .ok()
    }

    /// "last updated" form, e.g. `5 Mar 2024, 14:07`. Unparseable tokens are shown verbatim.
    pub fn to_readable(&self) -> String {
        self.format_or_raw(READABLE_FORMAT)
    }

    /// Compact form used for chart axis labels, e.g. `5 Mar, 14:07`
    pub fn to_axis_label(&self) -> String {
        self.format_or_raw(AXIS_FORMAT)
    }

    fn format_or_raw(&self, format: &str) -> String {
        match self.to_datetime() {
            Some(datetime) => datetime.format(format).to_string(),
            None => self.0.clone(),
        }
    }
}

impl fmt::Display for ScrapeTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ScrapeTime {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_token_round_trips_through_datetime() {
        let datetime = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(14, 7, 9)
            .unwrap();
        let token = ScrapeTime::from_datetime(datetime);

        assert_eq!(token.as_str(), "20240305_140709");
        assert_eq!(token.to_datetime(), Some(datetime));
    }

    #[test]
    fn test_readable_format() {
        assert_eq!(ScrapeTime::new("20240305_140709").to_readable(), "5 Mar 2024, 14:07");
        assert_eq!(ScrapeTime::new("20241231_235959").to_axis_label(), "31 Dec, 23:59");
    }

    #[test]
    fn test_short_token_is_accepted() {
        assert_eq!(ScrapeTime::new("20240101_0000").to_readable(), "1 Jan 2024, 00:00");
    }

    #[test]
    fn test_unparseable_token_is_shown_verbatim() {
        assert_eq!(ScrapeTime::new("latest").to_readable(), "latest");
    }

    #[test]
    fn test_ordering_is_chronological() {
        let mut times = vec![
            ScrapeTime::new("20240110_090000"),
            ScrapeTime::new("20231231_235959"),
            ScrapeTime::new("20240109_230000"),
        ];
        times.sort();

        let tokens: Vec<&str> = times.iter().map(ScrapeTime::as_str).collect();
        assert_eq!(tokens, ["20231231_235959", "20240109_230000", "20240110_090000"]);
    }
}
