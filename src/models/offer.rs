use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

pub const OFFER_TABLE: &str = "offer";

/// Column names in canonical order. Shared by the listing query, the
/// spreadsheet header and the document dump.
pub const OFFER_COLUMNS: [&str; 8] = [
    "id",
    "email",
    "name",
    "position",
    "salary",
    "status",
    "candidate_response",
    "created_at",
];

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Offer {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub position: Option<String>,
    pub salary: Decimal,
    pub status: String,
    pub candidate_response: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Offer {
    /// Uppercases `candidate_response` in place. Applied once, right after
    /// rows leave the store.
    pub fn normalize(mut self) -> Self {
        self.candidate_response = self.candidate_response.map(|r| r.to_uppercase());
        self
    }

    pub fn response(&self) -> CandidateResponse {
        CandidateResponse::classify(self.candidate_response.as_deref())
    }

    /// `(column, value)` pairs in canonical column order, nulls rendered as `None`.
    pub fn fields(&self) -> [(&'static str, Option<String>); 8] {
        [
            (OFFER_COLUMNS[0], Some(self.id.to_string())),
            (OFFER_COLUMNS[1], Some(self.email.clone())),
            (OFFER_COLUMNS[2], Some(self.name.clone())),
            (OFFER_COLUMNS[3], self.position.clone()),
            (OFFER_COLUMNS[4], Some(self.salary.to_string())),
            (OFFER_COLUMNS[5], Some(self.status.clone())),
            (OFFER_COLUMNS[6], self.candidate_response.clone()),
            (OFFER_COLUMNS[7], Some(self.created_at.format("%Y-%m-%d %H:%M:%S").to_string())),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CandidateResponse {
    Pending,
    Accepted,
    Rejected,
}

impl CandidateResponse {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateResponse::Pending => "PENDING",
            CandidateResponse::Accepted => "ACCEPTED",
            CandidateResponse::Rejected => "REJECTED",
        }
    }

    /// Metrics bucket for a stored value. Anything that is not ACCEPTED or
    /// REJECTED, null included, lands in PENDING.
    pub fn classify(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.eq_ignore_ascii_case("ACCEPTED") => CandidateResponse::Accepted,
            Some(value) if value.eq_ignore_ascii_case("REJECTED") => CandidateResponse::Rejected,
            _ => CandidateResponse::Pending,
        }
    }
}

impl fmt::Display for CandidateResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CandidateResponse {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PENDING" => Ok(CandidateResponse::Pending),
            "ACCEPTED" => Ok(CandidateResponse::Accepted),
            "REJECTED" => Ok(CandidateResponse::Rejected),
            other => Err(Error::BadRequest(format!(
                "Unknown candidate response '{}', expected one of All, PENDING, ACCEPTED, REJECTED",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn offer(response: Option<&str>) -> Offer {
        Offer {
            id: 1,
            email: "a@example.com".into(),
            name: "A".into(),
            position: None,
            salary: Decimal::new(150_000, 2),
            status: "sent".into(),
            candidate_response: response.map(str::to_string),
            created_at: NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        }
    }

    #[test]
    fn classify_is_case_insensitive() {
        for raw in ["accepted", "Accepted", "ACCEPTED", "aCcEpTeD"] {
            assert_eq!(CandidateResponse::classify(Some(raw)), CandidateResponse::Accepted);
        }
        for raw in ["rejected", "Rejected", "REJECTED"] {
            assert_eq!(CandidateResponse::classify(Some(raw)), CandidateResponse::Rejected);
        }
    }

    #[test]
    fn classify_collapses_unknown_and_null_into_pending() {
        assert_eq!(CandidateResponse::classify(None), CandidateResponse::Pending);
        assert_eq!(CandidateResponse::classify(Some("pending")), CandidateResponse::Pending);
        assert_eq!(CandidateResponse::classify(Some("withdrawn")), CandidateResponse::Pending);
        assert_eq!(CandidateResponse::classify(Some("")), CandidateResponse::Pending);
    }

    #[test]
    fn normalize_uppercases_and_keeps_null() {
        assert_eq!(offer(Some("Pending")).normalize().candidate_response.as_deref(), Some("PENDING"));
        assert_eq!(offer(None).normalize().candidate_response, None);
    }

    #[test]
    fn fields_follow_canonical_column_order() {
        let fields = offer(Some("ACCEPTED")).fields();
        let names: Vec<_> = fields.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, OFFER_COLUMNS);
        assert_eq!(fields[3].1, None);
        assert_eq!(fields[4].1.as_deref(), Some("1500.00"));
        assert_eq!(fields[7].1.as_deref(), Some("2024-03-01 09:30:00"));
    }

    #[test]
    fn parse_rejects_unknown_response() {
        assert_eq!("accepted".parse::<CandidateResponse>().unwrap(), CandidateResponse::Accepted);
        assert!(matches!("maybe".parse::<CandidateResponse>(), Err(Error::BadRequest(_))));
    }
}
