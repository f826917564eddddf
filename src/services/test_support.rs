use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::offer::Offer;

pub fn make_offer(id: i64, position: Option<&str>, response: Option<&str>) -> Offer {
    Offer {
        id,
        email: format!("candidate{}@example.com", id),
        name: format!("Candidate {}", id),
        position: position.map(str::to_string),
        salary: Decimal::new(50_000 + id * 1_000, 0),
        status: "sent".to_string(),
        candidate_response: response.map(str::to_string),
        created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap(),
    }
}

pub fn offer_on(id: i64, date: NaiveDate, hour: u32) -> Offer {
    Offer {
        created_at: date.and_hms_opt(hour, 0, 0).unwrap(),
        ..make_offer(id, Some("Engineer"), None)
    }
}

/// Ids 1..=5 with responses ACCEPTED, null, "rejected", "Pending", ACCEPTED.
pub fn scenario_offers() -> Vec<Offer> {
    vec![
        make_offer(1, Some("Engineer"), Some("ACCEPTED")),
        make_offer(2, Some("Analyst"), None),
        make_offer(3, Some("Engineer"), Some("rejected")),
        make_offer(4, None, Some("Pending")),
        make_offer(5, Some("Engineer"), Some("ACCEPTED")),
    ]
}

pub fn many_offers(count: i64) -> Vec<Offer> {
    (1..=count)
        .map(|id| make_offer(id, Some("Engineer"), Some("PENDING")))
        .collect()
}
