use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{Error, Result};
use crate::models::filter::{DateRange, FilterSelection, PositionFilter, ResponseFilter};
use crate::models::offer::Offer;
use crate::services::metrics_service::OfferMetrics;

/// Raw filter controls as they arrive on the query string.
#[derive(Debug, Clone, Serialize, Deserialize, Default, Validate)]
#[serde(default)]
pub struct OfferFilterQuery {
    pub response: Option<String>,
    #[validate(length(max = 255))]
    pub position: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl OfferFilterQuery {
    /// A lone date bound is dropped, yielding no date filter.
    pub fn into_selection(self) -> Result<FilterSelection> {
        self.validate()?;

        let response = match self.response.as_deref() {
            Some(raw) => raw.parse::<ResponseFilter>()?,
            None => ResponseFilter::All,
        };
        let position = PositionFilter::from_input(self.position.as_deref());
        let start = parse_date("start_date", self.start_date.as_deref())?;
        let end = parse_date("end_date", self.end_date.as_deref())?;

        Ok(FilterSelection {
            response,
            position,
            date_range: DateRange::from_bounds(start, end),
        })
    }
}

fn parse_date(field: &str, raw: Option<&str>) -> Result<Option<NaiveDate>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| Error::BadRequest(format!("Invalid {} '{}': {}", field, value, e))),
    }
}

/// Table row as displayed: a 1-based serial number in front of the offer.
#[derive(Debug, Clone, Serialize)]
pub struct OfferRow {
    pub s_no: usize,
    #[serde(flatten)]
    pub offer: Offer,
}

impl OfferRow {
    pub fn numbered(offers: &[Offer]) -> Vec<Self> {
        offers
            .iter()
            .enumerate()
            .map(|(idx, offer)| OfferRow {
                s_no: idx + 1,
                offer: offer.clone(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricCounter {
    pub label: &'static str,
    pub value: usize,
}

/// Raw counts plus the dashboard counters in display order.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsResponse {
    #[serde(flatten)]
    pub counts: OfferMetrics,
    pub counters: Vec<MetricCounter>,
}

impl From<OfferMetrics> for MetricsResponse {
    fn from(counts: OfferMetrics) -> Self {
        let counters = counts
            .labeled()
            .into_iter()
            .map(|(label, value)| MetricCounter { label, value })
            .collect();
        Self { counts, counters }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OfferListResponse {
    pub filter: FilterSelection,
    pub metrics: MetricsResponse,
    pub items: Vec<OfferRow>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PositionListResponse {
    pub positions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::offer::CandidateResponse;

    #[test]
    fn empty_query_selects_everything() {
        let selection = OfferFilterQuery::default().into_selection().unwrap();
        assert_eq!(selection, FilterSelection::all());
    }

    #[test]
    fn full_query_maps_every_dimension() {
        let selection = OfferFilterQuery {
            response: Some("accepted".into()),
            position: Some("Engineer".into()),
            start_date: Some("2024-01-01".into()),
            end_date: Some("2024-01-31".into()),
        }
        .into_selection()
        .unwrap();

        assert_eq!(selection.response, ResponseFilter::Only(CandidateResponse::Accepted));
        assert_eq!(selection.position, PositionFilter::Only("Engineer".into()));
        let range = selection.date_range.unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
    }

    #[test]
    fn single_bound_is_ignored() {
        let selection = OfferFilterQuery {
            start_date: Some("2024-01-01".into()),
            ..Default::default()
        }
        .into_selection()
        .unwrap();
        assert_eq!(selection.date_range, None);
    }

    #[test]
    fn malformed_input_is_rejected() {
        let bad_date = OfferFilterQuery {
            start_date: Some("01/02/2024".into()),
            end_date: Some("2024-02-01".into()),
            ..Default::default()
        };
        assert!(matches!(bad_date.into_selection(), Err(Error::BadRequest(_))));

        let bad_response = OfferFilterQuery {
            response: Some("MAYBE".into()),
            ..Default::default()
        };
        assert!(matches!(bad_response.into_selection(), Err(Error::BadRequest(_))));

        let long_position = OfferFilterQuery {
            position: Some("x".repeat(256)),
            ..Default::default()
        };
        assert!(matches!(long_position.into_selection(), Err(Error::Validation(_))));
    }

    #[test]
    fn metrics_carry_labeled_counters() {
        let counts = OfferMetrics { total: 5, accepted: 2, rejected: 1, pending: 2 };
        let json = serde_json::to_value(MetricsResponse::from(counts)).unwrap();
        assert_eq!(json["total"], 5);
        assert_eq!(
            json["counters"],
            serde_json::json!([
                {"label": "Total Offers", "value": 5},
                {"label": "Accepted", "value": 2},
                {"label": "Rejected", "value": 1},
                {"label": "Pending", "value": 2},
            ])
        );
    }

    #[test]
    fn rows_are_numbered_from_one() {
        let offers = crate::services::test_support::scenario_offers();
        let rows = OfferRow::numbered(&offers);
        assert_eq!(rows.iter().map(|r| r.s_no).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json["s_no"], 1);
        assert_eq!(json["id"], 1);
    }
}
