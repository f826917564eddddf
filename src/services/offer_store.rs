use std::collections::BTreeSet;

use sqlx::MySqlPool;

use crate::error::Result;
use crate::models::filter::FilterSelection;
use crate::models::offer::Offer;
use crate::services::query_builder::{self, BindValue, Predicate};

/// Read access to the offer table.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait OfferStore: Send + Sync {
    /// Every non-null distinct position, in no particular order.
    async fn list_distinct_positions(&self) -> Result<Vec<String>>;

    /// Rows matching `filter`, ascending by id, as stored (not normalized).
    async fn query_offers(&self, filter: &FilterSelection) -> Result<Vec<Offer>>;
}

/// Production [`OfferStore`] over a MySQL pool.
#[derive(Clone)]
pub struct MySqlOfferStore {
    pool: MySqlPool,
}

impl MySqlOfferStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait::async_trait]
impl OfferStore for MySqlOfferStore {
    async fn list_distinct_positions(&self) -> Result<Vec<String>> {
        let sql = query_builder::positions_query();
        let positions = sqlx::query_scalar::<_, String>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(positions)
    }

    async fn query_offers(&self, filter: &FilterSelection) -> Result<Vec<Offer>> {
        let query = query_builder::offers_query(filter);
        tracing::debug!(sql = %query.sql, params = query.params.len(), "Querying offers");

        let mut statement = sqlx::query_as::<_, Offer>(&query.sql);
        for param in query.params {
            statement = match param {
                BindValue::Text(value) => statement.bind(value),
                BindValue::Date(value) => statement.bind(value),
            };
        }

        let offers = statement.fetch_all(&self.pool).await?;
        Ok(offers)
    }
}

/// [`OfferStore`] over a fixed set of rows, evaluating the same predicate the
/// SQL store sends to the database.
#[derive(Debug, Clone, Default)]
pub struct MemoryOfferStore {
    offers: Vec<Offer>,
}

impl MemoryOfferStore {
    pub fn new(mut offers: Vec<Offer>) -> Self {
        offers.sort_by_key(|offer| offer.id);
        Self { offers }
    }
}

#[async_trait::async_trait]
impl OfferStore for MemoryOfferStore {
    async fn list_distinct_positions(&self) -> Result<Vec<String>> {
        let distinct: BTreeSet<&str> = self
            .offers
            .iter()
            .filter_map(|offer| offer.position.as_deref())
            .collect();
        Ok(distinct.into_iter().map(str::to_string).collect())
    }

    async fn query_offers(&self, filter: &FilterSelection) -> Result<Vec<Offer>> {
        let predicate = Predicate::from_filter(filter);
        Ok(self
            .offers
            .iter()
            .filter(|offer| predicate.matches(offer))
            .cloned()
            .collect())
    }
}
