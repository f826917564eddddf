use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::str::FromStr;

use crate::error::Error;
use crate::models::offer::CandidateResponse;

pub const ALL: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseFilter {
    All,
    Only(CandidateResponse),
}

impl FromStr for ResponseFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            return Ok(ResponseFilter::All);
        }
        Ok(ResponseFilter::Only(trimmed.parse()?))
    }
}

/// Position values come from the distinct-position list and are not
/// re-checked against it here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PositionFilter {
    All,
    Only(String),
}

impl Serialize for ResponseFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ResponseFilter::All => serializer.serialize_str(ALL),
            ResponseFilter::Only(response) => serializer.serialize_str(response.as_str()),
        }
    }
}

impl Serialize for PositionFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PositionFilter::All => serializer.serialize_str(ALL),
            PositionFilter::Only(position) => serializer.serialize_str(position),
        }
    }
}

impl PositionFilter {
    pub fn from_input(raw: Option<&str>) -> Self {
        match raw {
            None => PositionFilter::All,
            Some(value) if value.is_empty() || value == ALL => PositionFilter::All,
            Some(value) => PositionFilter::Only(value.to_string()),
        }
    }
}

/// Inclusive calendar-date range. `start > end` is kept as given and matches
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Both bounds or no range at all.
    pub fn from_bounds(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<Self> {
        match (start, end) {
            (Some(start), Some(end)) => Some(Self { start, end }),
            _ => None,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }
}

/// One user interaction's worth of filter choices. Also the result-set cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FilterSelection {
    pub response: ResponseFilter,
    pub position: PositionFilter,
    pub date_range: Option<DateRange>,
}

impl FilterSelection {
    pub fn all() -> Self {
        Self {
            response: ResponseFilter::All,
            position: PositionFilter::All,
            date_range: None,
        }
    }

    pub fn with_response(mut self, response: CandidateResponse) -> Self {
        self.response = ResponseFilter::Only(response);
        self
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = PositionFilter::Only(position.into());
        self
    }

    pub fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.date_range = Some(DateRange { start, end });
        self
    }
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn response_filter_parses_all_and_enum_values() {
        assert_eq!("All".parse::<ResponseFilter>().unwrap(), ResponseFilter::All);
        assert_eq!("".parse::<ResponseFilter>().unwrap(), ResponseFilter::All);
        assert_eq!(
            "REJECTED".parse::<ResponseFilter>().unwrap(),
            ResponseFilter::Only(CandidateResponse::Rejected)
        );
        assert!("SOMETIMES".parse::<ResponseFilter>().is_err());
    }

    #[test]
    fn partial_date_range_means_no_filter() {
        assert_eq!(DateRange::from_bounds(Some(date(2024, 1, 1)), None), None);
        assert_eq!(DateRange::from_bounds(None, Some(date(2024, 1, 1))), None);
        assert_eq!(DateRange::from_bounds(None, None), None);
        assert!(DateRange::from_bounds(Some(date(2024, 1, 1)), Some(date(2024, 1, 2))).is_some());
    }

    #[test]
    fn inverted_range_contains_nothing() {
        let range = DateRange { start: date(2024, 2, 1), end: date(2024, 1, 1) };
        assert!(range.is_inverted());
        assert!(!range.contains(date(2024, 1, 15)));
        assert!(!range.contains(date(2024, 2, 1)));
    }

    #[test]
    fn single_day_range_is_inclusive() {
        let range = DateRange { start: date(2024, 5, 5), end: date(2024, 5, 5) };
        assert!(range.contains(date(2024, 5, 5)));
        assert!(!range.contains(date(2024, 5, 4)));
        assert!(!range.contains(date(2024, 5, 6)));
    }

    #[test]
    fn position_all_is_exact_literal() {
        assert_eq!(PositionFilter::from_input(Some("All")), PositionFilter::All);
        assert_eq!(PositionFilter::from_input(None), PositionFilter::All);
        assert_eq!(
            PositionFilter::from_input(Some("Engineer")),
            PositionFilter::Only("Engineer".into())
        );
    }
}
