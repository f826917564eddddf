pub mod cache_service;
pub mod document_service;
pub mod export_service;
pub mod metrics_service;
pub mod offer_service;
pub mod offer_store;
pub mod query_builder;

#[cfg(test)]
pub(crate) mod test_support;
