use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;
use crate::models::filter::FilterSelection;
use crate::models::offer::Offer;
use crate::services::cache_service::TtlCache;
use crate::services::offer_store::OfferStore;

/// Read-through front of the record store: position list and per-filter
/// result sets, each behind its own freshness window.
#[derive(Clone)]
pub struct OfferService {
    store: Arc<dyn OfferStore>,
    positions: TtlCache<(), Arc<Vec<String>>>,
    offers: TtlCache<FilterSelection, Arc<Vec<Offer>>>,
}

impl OfferService {
    pub fn new(store: Arc<dyn OfferStore>, positions_ttl: Duration, offers_ttl: Duration) -> Self {
        Self {
            store,
            positions: TtlCache::new(positions_ttl),
            offers: TtlCache::new(offers_ttl),
        }
    }

    /// Distinct positions, sorted ascending.
    pub async fn positions(&self) -> Result<Arc<Vec<String>>> {
        if let Some(cached) = self.positions.get(&()) {
            tracing::debug!("Position list served from cache");
            return Ok(cached);
        }

        match self.store.list_distinct_positions().await {
            Ok(mut positions) => {
                positions.sort();
                let positions = Arc::new(positions);
                self.positions.insert((), Arc::clone(&positions));
                tracing::debug!(count = positions.len(), "Position list refreshed");
                Ok(positions)
            }
            Err(e) => match self.positions.get_stale(&()) {
                Some(stale) => {
                    tracing::warn!(error = %e, "Record store failed, serving stale position list");
                    Ok(stale)
                }
                None => Err(e),
            },
        }
    }

    /// Result set for `filter`, ascending by id, responses uppercased.
    pub async fn offers(&self, filter: &FilterSelection) -> Result<Arc<Vec<Offer>>> {
        if let Some(cached) = self.offers.get(filter) {
            tracing::debug!(?filter, rows = cached.len(), "Offers served from cache");
            return Ok(cached);
        }
        if filter.date_range.is_some_and(|range| range.is_inverted()) {
            tracing::debug!(?filter, "Date range starts after it ends, expecting no rows");
        }

        match self.store.query_offers(filter).await {
            Ok(rows) => {
                let offers: Vec<Offer> = rows.into_iter().map(Offer::normalize).collect();
                let offers = Arc::new(offers);
                self.offers.insert(filter.clone(), Arc::clone(&offers));
                tracing::info!(?filter, rows = offers.len(), "Offers loaded from record store");
                Ok(offers)
            }
            Err(e) => match self.offers.get_stale(filter) {
                Some(stale) => {
                    tracing::warn!(error = %e, ?filter, "Record store failed, serving stale offers");
                    Ok(stale)
                }
                None => Err(e),
            },
        }
    }
}
