use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `YYYY-MM-DD`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    #[error("startdate and enddate query parameters are required")]
    Missing,
    #[error("Invalid format for startdate, expected YYYY-MM-DD")]
    InvalidStart,
    #[error("Invalid format for enddate, expected YYYY-MM-DD")]
    InvalidEnd,
    #[error("startdate cannot be after enddate")]
    Inverted,
}

/// The query of `GET /api`.
///
/// Both parameters are optional here so that a missing one is reported
/// by [`ReportPeriod::try_from`] and not by the query extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportQuery {
    pub startdate: Option<String>,
    pub enddate: Option<String>,
}

/// A validated, inclusive report period.
///
/// Keeps the dates exactly as they were received,
/// they are forwarded to the upstream API unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPeriod {
    start_date: String,
    end_date: String,
    start: NaiveDate,
    end: NaiveDate,
}

impl ReportPeriod {
    pub fn new(start_date: &str, end_date: &str) -> Result<Self, PeriodError> {
        let start = parse_date(start_date).ok_or(PeriodError::InvalidStart)?;
        let end = parse_date(end_date).ok_or(PeriodError::InvalidEnd)?;

        if start > end {
            return Err(PeriodError::Inverted);
        }

        Ok(Self {
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
            start,
            end,
        })
    }

    /// The start date as received
    pub fn start_date(&self) -> &str {
        &self.start_date
    }

    /// The end date as received
    pub fn end_date(&self) -> &str {
        &self.end_date
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

impl TryFrom<ReportQuery> for ReportPeriod {
    type Error = PeriodError;

    fn try_from(query: ReportQuery) -> Result<Self, Self::Error> {
        match (query.startdate.as_deref(), query.enddate.as_deref()) {
            (Some(start_date), Some(end_date)) if !start_date.is_empty() && !end_date.is_empty() => {
                Self::new(start_date, end_date)
            }
            _ => Err(PeriodError::Missing),
        }
    }
}

/// Only accepts zero-padded dates, e.g. `2024-06-01` but not `2024-6-1`.
///
/// `chrono` alone would also accept a signed year or space-padded fields.
fn parse_date(date: &str) -> Option<NaiveDate> {
    let is_padded = date.len() == 10
        && date.bytes().enumerate().all(|(position, byte)| match position {
            4 | 7 => byte == b'-',
            _ => byte.is_ascii_digit(),
        });

    if !is_padded {
        return None;
    }

    NaiveDate::parse_from_str(date, DATE_FORMAT).ok()
}

impl FromIterator<(String, String)> for ReportQuery {
    /// Keeps the first value of a repeated parameter and ignores unknown ones.
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut query = Self::default();

        for (key, value) in pairs {
            let param = match key.as_str() {
                "startdate" => &mut query.startdate,
                "enddate" => &mut query.enddate,
                _ => continue,
            };

            param.get_or_insert(value);
        }

        query
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn query(startdate: Option<&str>, enddate: Option<&str>) -> ReportQuery {
        ReportQuery {
            startdate: startdate.map(ToString::to_string),
            enddate: enddate.map(ToString::to_string),
        }
    }

    #[test]
    fn valid_period_keeps_raw_dates() {
        let period = ReportPeriod::try_from(query(Some("2024-05-01"), Some("2024-05-10")))
            .expect("Should be valid");

        assert_eq!("2024-05-01", period.start_date());
        assert_eq!("2024-05-10", period.end_date());
        assert_eq!(NaiveDate::from_ymd_opt(2024, 5, 1).expect("Valid date"), period.start());
        assert_eq!(NaiveDate::from_ymd_opt(2024, 5, 10).expect("Valid date"), period.end());
    }

    #[test]
    fn single_day_period() {
        let period = ReportPeriod::new("2024-06-01", "2024-06-01").expect("Should be valid");

        assert_eq!(period.start(), period.end());
    }

    #[test]
    fn missing_dates() {
        let cases = [
            query(None, None),
            query(Some("2024-05-01"), None),
            query(None, Some("2024-05-10")),
            query(Some(""), Some("2024-05-10")),
            query(Some("2024-05-01"), Some("")),
        ];

        for case in cases {
            assert_eq!(Err(PeriodError::Missing), ReportPeriod::try_from(case));
        }
    }

    #[test]
    fn malformed_dates() {
        let malformed_dates = [
            "2024-6-1",
            "01-06-2024",
            "2024/06/01",
            "2024-02-30",
            "2024-06-01T00:00:00",
            "today",
            "2024-06- 1",
            "2024- 6-01",
            " 202-06-01",
            "+202-06-01",
            "-202-06-01",
        ];

        for malformed in malformed_dates {
            assert_eq!(
                Err(PeriodError::InvalidStart),
                ReportPeriod::new(malformed, "2024-06-10"),
                "start: {malformed}"
            );
            assert_eq!(
                Err(PeriodError::InvalidEnd),
                ReportPeriod::new("2024-06-01", malformed),
                "end: {malformed}"
            );
        }
    }

    #[test]
    fn start_is_checked_before_end() {
        assert_eq!(
            Err(PeriodError::InvalidStart),
            ReportPeriod::new("bad", "worse")
        );
    }

    #[test]
    fn inverted_period() {
        assert_eq!(
            Err(PeriodError::Inverted),
            ReportPeriod::new("2024-05-10", "2024-05-01")
        );
    }

    #[test]
    fn deserializes_from_query_string() {
        let parsed =
            serde_urlencoded::from_str::<ReportQuery>("startdate=2024-05-01&enddate=2024-05-10")
                .expect("Should deserialize");
        let empty = serde_urlencoded::from_str::<ReportQuery>("").expect("Should deserialize");

        assert_eq!(query(Some("2024-05-01"), Some("2024-05-10")), parsed);
        assert_eq!(ReportQuery::default(), empty);
    }

    #[test]
    fn first_value_of_a_repeated_parameter_wins() {
        let pairs = [
            ("startdate", "2024-06-01"),
            ("utm_source", "newsletter"),
            ("startdate", "2024-06-02"),
            ("enddate", "2024-06-05"),
            ("enddate", ""),
        ];

        let parsed = pairs
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<ReportQuery>();

        assert_eq!(query(Some("2024-06-01"), Some("2024-06-05")), parsed);
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            "startdate and enddate query parameters are required",
            PeriodError::Missing.to_string()
        );
        assert_eq!(
            "startdate cannot be after enddate",
            PeriodError::Inverted.to_string()
        );
    }
}
