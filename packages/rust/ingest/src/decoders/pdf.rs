//! PDF decoder: one section per page, in document order.

use campaign_shared::{CampaignError, DocumentFormat, Result};
use lopdf::Document;
use tracing::debug;

use super::{Decoder, Section};

/// Paginated decoder backed by `lopdf`.
pub struct PdfDecoder;

impl Decoder for PdfDecoder {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    fn extract(&self, name: &str, bytes: &[u8]) -> Result<Vec<Section>> {
        let doc = Document::load_mem(bytes)
            .map_err(|e| CampaignError::decode(DocumentFormat::Pdf, e.to_string()))?;

        // BTreeMap keyed by page number, so iteration is document order.
        let pages = doc.get_pages();
        debug!(name, pages = pages.len(), "decoding pdf");

        let mut sections = Vec::with_capacity(pages.len());
        for (index, &page_number) in pages.keys().enumerate() {
            let text = doc.extract_text(&[page_number]).map_err(|e| {
                CampaignError::decode(
                    DocumentFormat::Pdf,
                    format!("page {}: {e}", index + 1),
                )
            })?;
            sections.push(Section::new(format!("{name} [PDF page {}]", index + 1), text));
        }

        Ok(sections)
    }
}
