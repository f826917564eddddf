use crate::error::Result;
use crate::models::offer::{Offer, OFFER_COLUMNS};
use chrono::{Datelike, NaiveDateTime, Timelike};
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::*;

pub const XLSX_FILENAME: &str = "offer_report.xlsx";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Excel refuses longer strings in a single cell.
const MAX_CELL_CHARS: usize = 32_767;

/// Encoded workbook plus the number of data rows under the header.
#[derive(Debug, Clone)]
pub struct SpreadsheetReport {
    pub bytes: Vec<u8>,
    pub rows: usize,
}

pub struct ExportService;

impl ExportService {
    /// Header row of column names, then every offer in the given order.
    pub fn generate_offers_xlsx(offers: &[Offer]) -> Result<SpreadsheetReport> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Offers")?;

        // ── Color palette ──
        let header_bg = Color::RGB(0x0F172A);          // Slate 900
        let header_text = Color::White;
        let alt_row_1 = Color::RGB(0xF8FAFC);          // Slate 50
        let alt_row_2 = Color::White;
        let border_color = Color::RGB(0xE2E8F0);       // Slate 200

        let widths = [8.0, 30.0, 26.0, 24.0, 14.0, 14.0, 20.0, 20.0];
        for (i, width) in widths.iter().enumerate() {
            worksheet.set_column_width(i as u16, *width)?;
        }

        // ── Header row ──
        let header_format = Format::new()
            .set_bold()
            .set_font_size(10)
            .set_font_color(header_text)
            .set_background_color(header_bg)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);

        let header_row = 0;
        worksheet.set_row_height(header_row, 24)?;
        for (i, name) in OFFER_COLUMNS.iter().enumerate() {
            worksheet.write_string_with_format(header_row, i as u16, *name, &header_format)?;
        }

        // ── Data rows ──
        let data_start_row = 1;
        let mut rows = 0;
        for (idx, offer) in offers.iter().enumerate() {
            let row = data_start_row + idx as u32;
            let bg = if idx % 2 == 0 { alt_row_1 } else { alt_row_2 };

            let base_fmt = Format::new()
                .set_font_size(10)
                .set_background_color(bg)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin)
                .set_border_color(border_color);
            let center_fmt = base_fmt.clone().set_align(FormatAlign::Center);
            let money_fmt = base_fmt.clone().set_num_format("#,##0.00");
            let datetime_fmt = center_fmt.clone().set_num_format("yyyy-mm-dd hh:mm:ss");

            worksheet.write_number_with_format(row, 0, offer.id as f64, &center_fmt)?;
            worksheet.write_string_with_format(row, 1, cell_text(&offer.email), &base_fmt)?;
            worksheet.write_string_with_format(row, 2, cell_text(&offer.name), &base_fmt)?;
            match offer.position.as_deref() {
                Some(position) => {
                    worksheet.write_string_with_format(row, 3, cell_text(position), &base_fmt)?
                }
                None => worksheet.write_blank(row, 3, &base_fmt)?,
            };
            match offer.salary.to_f64() {
                Some(salary) => worksheet.write_number_with_format(row, 4, salary, &money_fmt)?,
                None => worksheet.write_string_with_format(row, 4, offer.salary.to_string(), &base_fmt)?,
            };
            worksheet.write_string_with_format(row, 5, cell_text(&offer.status), &center_fmt)?;
            match offer.candidate_response.as_deref() {
                Some(response) => {
                    worksheet.write_string_with_format(row, 6, cell_text(response), &center_fmt)?
                }
                None => worksheet.write_blank(row, 6, &center_fmt)?,
            };
            match excel_datetime(&offer.created_at) {
                Some(created) => worksheet.write_datetime_with_format(row, 7, &created, &datetime_fmt)?,
                None => {
                    let created = offer.created_at.format("%Y-%m-%d %H:%M:%S").to_string();
                    worksheet.write_string_with_format(row, 7, &created, &center_fmt)?
                }
            };

            rows += 1;
        }

        // Freeze panes (header stays visible while scrolling)
        worksheet.set_freeze_panes(1, 0)?;

        // Auto-filter on data columns
        let last_row = (data_start_row + offers.len() as u32).saturating_sub(1).max(header_row);
        worksheet.autofilter(header_row, 0, last_row, (OFFER_COLUMNS.len() - 1) as u16)?;

        let bytes = workbook.save_to_buffer()?;
        tracing::debug!(rows, bytes = bytes.len(), "Spreadsheet report generated");
        Ok(SpreadsheetReport { bytes, rows })
    }
}

/// `None` outside Excel's 1900..=9999 calendar.
fn excel_datetime(value: &NaiveDateTime) -> Option<ExcelDateTime> {
    let year = u16::try_from(value.year()).ok()?;
    ExcelDateTime::from_ymd(year, value.month() as u8, value.day() as u8)
        .and_then(|date| {
            date.and_hms(value.hour() as u16, value.minute() as u8, f64::from(value.second()))
        })
        .ok()
}

/// Cuts `value` at Excel's per-cell character limit.
fn cell_text(value: &str) -> &str {
    match value.char_indices().nth(MAX_CELL_CHARS) {
        Some((cut, _)) => {
            tracing::warn!(chars = value.chars().count(), "Truncating oversized spreadsheet cell");
            &value[..cut]
        }
        None => value,
    }
}
