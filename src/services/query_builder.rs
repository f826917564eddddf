use chrono::NaiveDate;

use crate::models::filter::{DateRange, FilterSelection, PositionFilter, ResponseFilter};
use crate::models::offer::{CandidateResponse, Offer, OFFER_COLUMNS, OFFER_TABLE};

/// A value bound to a `?` placeholder. Never spliced into SQL text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    Text(String),
    Date(NaiveDate),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    ResponseEquals(CandidateResponse),
    PositionEquals(String),
    CreatedBetween(DateRange),
}

impl Clause {
    pub fn sql(&self) -> &'static str {
        match self {
            Clause::ResponseEquals(_) => "candidate_response = ?",
            Clause::PositionEquals(_) => "position = ?",
            Clause::CreatedBetween(_) => "DATE(created_at) BETWEEN ? AND ?",
        }
    }

    pub fn params(&self) -> Vec<BindValue> {
        match self {
            Clause::ResponseEquals(response) => vec![BindValue::Text(response.as_str().to_string())],
            Clause::PositionEquals(position) => vec![BindValue::Text(position.clone())],
            Clause::CreatedBetween(range) => {
                vec![BindValue::Date(range.start), BindValue::Date(range.end)]
            }
        }
    }

    /// In-memory evaluation with the store's semantics: the response column
    /// compares case-insensitively, like the table's default collation.
    pub fn matches(&self, offer: &Offer) -> bool {
        match self {
            Clause::ResponseEquals(response) => offer
                .candidate_response
                .as_deref()
                .is_some_and(|stored| stored.eq_ignore_ascii_case(response.as_str())),
            Clause::PositionEquals(position) => offer.position.as_deref() == Some(position.as_str()),
            Clause::CreatedBetween(range) => range.contains(offer.created_at.date()),
        }
    }
}

/// Conjunction of clauses over an implicit `1=1`. Clause order is fixed:
/// response, position, date range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    pub fn from_filter(filter: &FilterSelection) -> Self {
        let mut clauses = Vec::new();

        if let ResponseFilter::Only(response) = filter.response {
            clauses.push(Clause::ResponseEquals(response));
        }
        if let PositionFilter::Only(position) = &filter.position {
            clauses.push(Clause::PositionEquals(position.clone()));
        }
        if let Some(range) = filter.date_range {
            clauses.push(Clause::CreatedBetween(range));
        }

        Self { clauses }
    }

    pub fn where_sql(&self) -> String {
        let mut sql = String::from("1=1");
        for clause in &self.clauses {
            sql.push_str(" AND ");
            sql.push_str(clause.sql());
        }
        sql
    }

    pub fn params(&self) -> Vec<BindValue> {
        self.clauses.iter().flat_map(Clause::params).collect()
    }

    pub fn matches(&self, offer: &Offer) -> bool {
        self.clauses.iter().all(|clause| clause.matches(offer))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferQuery {
    pub sql: String,
    pub params: Vec<BindValue>,
}

pub fn offers_query(filter: &FilterSelection) -> OfferQuery {
    let predicate = Predicate::from_filter(filter);
    let sql = format!(
        "SELECT {} FROM {} WHERE {} ORDER BY id ASC",
        OFFER_COLUMNS.join(", "),
        OFFER_TABLE,
        predicate.where_sql()
    );
    OfferQuery {
        sql,
        params: predicate.params(),
    }
}

pub fn positions_query() -> String {
    format!(
        "SELECT DISTINCT position FROM {} WHERE position IS NOT NULL",
        OFFER_TABLE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn no_filters_yields_no_clauses() {
        let predicate = Predicate::from_filter(&FilterSelection::all());
        assert!(predicate.clauses.is_empty());
        assert_eq!(predicate.where_sql(), "1=1");

        let query = offers_query(&FilterSelection::all());
        assert_eq!(
            query.sql,
            "SELECT id, email, name, position, salary, status, candidate_response, created_at \
             FROM offer WHERE 1=1 ORDER BY id ASC"
        );
        assert!(query.params.is_empty());
    }

    #[test]
    fn position_only_filter_binds_single_value() {
        let filter = FilterSelection::all().with_position("Engineer");
        let predicate = Predicate::from_filter(&filter);
        assert_eq!(predicate.clauses, [Clause::PositionEquals("Engineer".into())]);
        assert_eq!(predicate.where_sql(), "1=1 AND position = ?");
        assert_eq!(predicate.params(), vec![BindValue::Text("Engineer".into())]);
    }

    #[test]
    fn clauses_appear_in_fixed_order() {
        let filter = FilterSelection::all()
            .with_date_range(date(2024, 1, 1), date(2024, 1, 31))
            .with_position("Analyst")
            .with_response(CandidateResponse::Accepted);
        let query = offers_query(&filter);

        assert!(query.sql.ends_with(
            "WHERE 1=1 AND candidate_response = ? AND position = ? \
             AND DATE(created_at) BETWEEN ? AND ? ORDER BY id ASC"
        ));
        assert_eq!(
            query.params,
            vec![
                BindValue::Text("ACCEPTED".into()),
                BindValue::Text("Analyst".into()),
                BindValue::Date(date(2024, 1, 1)),
                BindValue::Date(date(2024, 1, 31)),
            ]
        );
    }

    #[test]
    fn hostile_position_never_reaches_sql_text() {
        let filter = FilterSelection::all().with_position("x' OR '1'='1");
        let query = offers_query(&filter);
        assert!(!query.sql.contains("OR '1'"));
        assert_eq!(query.params, vec![BindValue::Text("x' OR '1'='1".into())]);
    }

    #[test]
    fn positions_query_excludes_nulls() {
        assert_eq!(
            positions_query(),
            "SELECT DISTINCT position FROM offer WHERE position IS NOT NULL"
        );
    }
}
