use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
};

use crate::{
    dto::offer_dto::{
        MetricsResponse, OfferFilterQuery, OfferListResponse, OfferRow, PositionListResponse,
    },
    error::Result,
    services::metrics_service::OfferMetrics,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/offers/positions",
    responses(
        (status = 200, description = "Distinct non-null positions, sorted", body = Json<PositionListResponse>),
        (status = 503, description = "Record store unavailable")
    )
)]
pub async fn list_positions(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let positions = state.offer_service.positions().await?;
    Ok(Json(PositionListResponse {
        positions: positions.as_ref().clone(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/offers",
    params(
        ("response" = Option<String>, Query, description = "All, PENDING, ACCEPTED or REJECTED"),
        ("position" = Option<String>, Query, description = "All or an exact position"),
        ("start_date" = Option<String>, Query, description = "YYYY-MM-DD, used only with end_date"),
        ("end_date" = Option<String>, Query, description = "YYYY-MM-DD, used only with start_date")
    ),
    responses(
        (status = 200, description = "Metrics and numbered offer rows", body = Json<OfferListResponse>),
        (status = 400, description = "Invalid filter value"),
        (status = 503, description = "Record store unavailable")
    )
)]
pub async fn list_offers(
    State(state): State<AppState>,
    Query(query): Query<OfferFilterQuery>,
) -> Result<impl IntoResponse> {
    let filter = query.into_selection()?;
    let offers = state.offer_service.offers(&filter).await?;

    Ok(Json(OfferListResponse {
        metrics: OfferMetrics::from_offers(&offers).into(),
        items: OfferRow::numbered(&offers),
        total: offers.len(),
        filter,
    }))
}

#[utoipa::path(
    get,
    path = "/api/offers/metrics",
    responses(
        (status = 200, description = "Counts and labeled dashboard counters", body = Json<MetricsResponse>),
        (status = 400, description = "Invalid filter value")
    )
)]
pub async fn get_metrics(
    State(state): State<AppState>,
    Query(query): Query<OfferFilterQuery>,
) -> Result<impl IntoResponse> {
    let filter = query.into_selection()?;
    let offers = state.offer_service.offers(&filter).await?;
    Ok(Json(MetricsResponse::from(OfferMetrics::from_offers(&offers))))
}
