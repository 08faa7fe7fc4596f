//! CSV decoder: strict UTF-8, one row per line, fields re-joined with `", "`.

use campaign_shared::{CampaignError, DocumentFormat, Result};

use super::{Decoder, Section};

/// Row-oriented decoder backed by the `csv` crate.
pub struct CsvDecoder;

impl Decoder for CsvDecoder {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Csv
    }

    fn extract(&self, name: &str, bytes: &[u8]) -> Result<Vec<Section>> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| CampaignError::decode(DocumentFormat::Csv, e.to_string()))?;

        // One row per line. The csv reader skips blank lines, so those are
        // emitted here as empty rows.
        let mut body = String::new();
        for line in text.lines() {
            if !line.is_empty() {
                body.push_str(&parse_row(line)?.join(", "));
            }
            body.push('\n');
        }

        Ok(vec![Section::new(format!("{name} [CSV]"), body)])
    }
}

/// Split a single line into its fields.
fn parse_row(line: &str) -> Result<Vec<String>> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    let mut fields = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| CampaignError::decode(DocumentFormat::Csv, e.to_string()))?;
        fields.extend(record.iter().map(String::from));
    }
    Ok(fields)
}
