use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};

use crate::{
    dto::offer_dto::OfferFilterQuery,
    error::Result,
    services::{
        document_service::{DocumentService, PDF_CONTENT_TYPE, PDF_FILENAME},
        export_service::{ExportService, XLSX_CONTENT_TYPE, XLSX_FILENAME},
    },
    AppState,
};

fn attachment(content_type: &'static str, filename: &str, bytes: Vec<u8>) -> impl IntoResponse {
    let disposition = format!("attachment; filename=\"{}\"", filename);
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
}

/// Export the filtered offers as XLSX (every row)
#[utoipa::path(
    get,
    path = "/api/offers/export/xlsx",
    responses(
        (status = 200, description = "offer_report.xlsx", content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = 400, description = "Invalid filter value")
    )
)]
pub async fn export_xlsx(
    State(state): State<AppState>,
    Query(query): Query<OfferFilterQuery>,
) -> Result<impl IntoResponse> {
    let filter = query.into_selection()?;
    let offers = state.offer_service.offers(&filter).await?;

    let report = ExportService::generate_offers_xlsx(&offers)?;
    tracing::info!(rows = report.rows, "Spreadsheet export served");

    Ok(attachment(XLSX_CONTENT_TYPE, XLSX_FILENAME, report.bytes))
}

/// Export the filtered offers as PDF (first 100 rows only)
#[utoipa::path(
    get,
    path = "/api/offers/export/pdf",
    responses(
        (status = 200, description = "offer_report.pdf", content_type = "application/pdf"),
        (status = 400, description = "Invalid filter value")
    )
)]
pub async fn export_pdf(
    State(state): State<AppState>,
    Query(query): Query<OfferFilterQuery>,
) -> Result<impl IntoResponse> {
    let filter = query.into_selection()?;
    let offers = state.offer_service.offers(&filter).await?;

    let report = DocumentService::generate_offers_pdf(&offers)?;
    tracing::info!(
        rows = report.rows,
        pages = report.pages,
        available = offers.len(),
        "Document export served"
    );

    Ok(attachment(PDF_CONTENT_TYPE, PDF_FILENAME, report.bytes))
}
