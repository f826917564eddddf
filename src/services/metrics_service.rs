use serde::Serialize;

use crate::models::offer::{CandidateResponse, Offer};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OfferMetrics {
    pub total: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub pending: usize,
}

impl OfferMetrics {
    /// Buckets are exhaustive: unknown response strings count as pending.
    pub fn from_offers(offers: &[Offer]) -> Self {
        offers.iter().fold(Self::default(), |mut metrics, offer| {
            metrics.total += 1;
            match offer.response() {
                CandidateResponse::Accepted => metrics.accepted += 1,
                CandidateResponse::Rejected => metrics.rejected += 1,
                CandidateResponse::Pending => metrics.pending += 1,
            }
            metrics
        })
    }

    pub fn labeled(&self) -> [(&'static str, usize); 4] {
        [
            ("Total Offers", self.total),
            ("Accepted", self.accepted),
            ("Rejected", self.rejected),
            ("Pending", self.pending),
        ]
    }
}
