use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::error::Result;
use crate::models::offer::Offer;

pub const PDF_FILENAME: &str = "offer_report.pdf";
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// The document path is a preview, not a full export.
pub const MAX_DOCUMENT_ROWS: usize = 100;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
/// Space kept free at the bottom of every page before breaking.
const BOTTOM_RESERVE_MM: f32 = 10.0;
const LINE_HEIGHT_MM: f32 = 5.0;
const RECORD_GAP_MM: f32 = 1.0;
const FONT_SIZE_PT: f32 = 8.0;
/// Courier advances 0.6 em per glyph: 8pt * 0.6 = 1.69 mm, over 190 mm printable.
const CHARS_PER_LINE: usize = 112;

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    /// Distance from the top edge of the page to the top of the line box.
    pub top_mm: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub pages: Vec<Vec<PlacedLine>>,
    pub rows: usize,
}

impl DocumentLayout {
    /// Lays out the first [`MAX_DOCUMENT_ROWS`] offers, one wrapped record per
    /// block. Always yields at least one (possibly empty) page.
    pub fn from_offers(offers: &[Offer]) -> Self {
        let selected = &offers[..offers.len().min(MAX_DOCUMENT_ROWS)];
        let page_bottom = PAGE_HEIGHT_MM - BOTTOM_RESERVE_MM;

        let mut pages = Vec::new();
        let mut current = Vec::new();
        let mut y = MARGIN_MM;

        for offer in selected {
            for text in wrap(&record_text(offer), CHARS_PER_LINE) {
                if y + LINE_HEIGHT_MM > page_bottom {
                    pages.push(std::mem::take(&mut current));
                    y = MARGIN_MM;
                }
                current.push(PlacedLine { text, top_mm: y });
                y += LINE_HEIGHT_MM;
            }
            y += RECORD_GAP_MM;
        }
        pages.push(current);

        Self {
            pages,
            rows: selected.len(),
        }
    }

    #[cfg(test)]
    fn lines(&self) -> impl Iterator<Item = &PlacedLine> {
        self.pages.iter().flatten()
    }
}

/// Encoded PDF plus what went into it.
#[derive(Debug, Clone)]
pub struct DocumentReport {
    pub bytes: Vec<u8>,
    pub rows: usize,
    pub pages: usize,
}

pub struct DocumentService;

impl DocumentService {
    pub fn generate_offers_pdf(offers: &[Offer]) -> Result<DocumentReport> {
        let layout = DocumentLayout::from_offers(offers);

        let (doc, first_page, first_layer) = PdfDocument::new(
            "Offer Report",
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Page 1",
        );
        let font = doc.add_builtin_font(BuiltinFont::Courier)?;

        for (index, lines) in layout.pages.iter().enumerate() {
            let layer = if index == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page, layer) = doc.add_page(
                    Mm(PAGE_WIDTH_MM),
                    Mm(PAGE_HEIGHT_MM),
                    format!("Page {}", index + 1),
                );
                doc.get_page(page).get_layer(layer)
            };

            for line in lines {
                // PDF y grows upwards from the bottom edge; place the baseline
                // three quarters into the line box.
                let baseline = PAGE_HEIGHT_MM - line.top_mm - LINE_HEIGHT_MM * 0.75;
                layer.use_text(line.text.clone(), FONT_SIZE_PT, Mm(MARGIN_MM), Mm(baseline), &font);
            }
        }

        let bytes = doc.save_to_bytes()?;
        tracing::debug!(
            rows = layout.rows,
            pages = layout.pages.len(),
            bytes = bytes.len(),
            "Document report generated"
        );
        Ok(DocumentReport {
            bytes,
            rows: layout.rows,
            pages: layout.pages.len(),
        })
    }
}

/// Flat key-value dump of every field. The built-in font is WinAnsi encoded,
/// so printable Latin-1 passes through and anything else becomes `?`.
fn record_text(offer: &Offer) -> String {
    offer
        .fields()
        .iter()
        .map(|(name, value)| format!("{}: {}", name, value.as_deref().unwrap_or("-")))
        .collect::<Vec<_>>()
        .join(", ")
        .chars()
        .map(|c| match c {
            ' '..='~' | '\u{A0}'..='\u{FF}' => c,
            c if c.is_whitespace() => ' ',
            _ => '?',
        })
        .collect()
}

/// Greedy word wrap; words longer than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split(' ').filter(|w| !w.is_empty()) {
        let mut word: Vec<char> = word.chars().collect();
        loop {
            let used = line.chars().count();
            let needed = if used == 0 { word.len() } else { used + 1 + word.len() };
            if needed <= width {
                if used > 0 {
                    line.push(' ');
                }
                line.extend(word.iter());
                break;
            }
            if used > 0 {
                lines.push(std::mem::take(&mut line));
                continue;
            }
            let rest = word.split_off(width);
            lines.push(word.iter().collect());
            word = rest;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
