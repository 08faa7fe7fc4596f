//! Format decoders and the registry that picks one per document.
//!
//! Each [`DocumentFormat`] has one decoder turning fetched bytes into ordered
//! [`Section`]s. [`RawTextDecoder`] is the fallback and never fails.

mod csv;
mod docx;
mod pdf;
mod raw;

use campaign_shared::{DocumentFormat, Result};

pub use self::csv::CsvDecoder;
pub use self::docx::DocxDecoder;
pub use self::pdf::PdfDecoder;
pub use self::raw::RawTextDecoder;

// ---------------------------------------------------------------------------
// Section
// ---------------------------------------------------------------------------

/// One delimited unit of extracted text: a marker line and the text after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Marker label without the dashes, e.g. `brief.pdf [PDF page 2]`.
    pub label: String,
    /// Text appended verbatim after the marker line.
    pub body: String,
}

impl Section {
    pub fn new(label: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            body: body.into(),
        }
    }

    /// The full marker line, e.g. `--- notes.txt [RAW TEXT] ---`.
    pub fn marker(&self) -> String {
        format!("--- {} ---", self.label)
    }
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Capability shared by every format decoder.
pub trait Decoder: Send + Sync {
    /// The format this decoder handles.
    fn format(&self) -> DocumentFormat;

    /// Extract ordered sections from the raw bytes of a file called `name`.
    fn extract(&self, name: &str, bytes: &[u8]) -> Result<Vec<Section>>;
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Holds one decoder per format.
pub struct DecoderRegistry {
    decoders: Vec<Box<dyn Decoder>>,
}

impl DecoderRegistry {
    /// Create a registry with all built-in decoders.
    pub fn new() -> Self {
        Self {
            decoders: vec![
                Box::new(PdfDecoder),
                Box::new(DocxDecoder),
                Box::new(CsvDecoder),
                Box::new(RawTextDecoder),
            ],
        }
    }

    /// Replace the decoder registered for `decoder.format()`.
    pub fn with_decoder(mut self, decoder: Box<dyn Decoder>) -> Self {
        let format = decoder.format();
        self.decoders.retain(|d| d.format() != format);
        self.decoders.insert(0, decoder);
        self
    }

    /// Look up the decoder for `format`, falling back to raw text.
    pub fn get(&self, format: DocumentFormat) -> &dyn Decoder {
        self.decoders
            .iter()
            .find(|d| d.format() == format)
            .map(|d| d.as_ref())
            .unwrap_or(&RawTextDecoder)
    }
}

impl Default for DecoderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ShoutingCsv;

    impl Decoder for ShoutingCsv {
        fn format(&self) -> DocumentFormat {
            DocumentFormat::Csv
        }

        fn extract(&self, name: &str, bytes: &[u8]) -> Result<Vec<Section>> {
            let text = String::from_utf8_lossy(bytes).to_uppercase();
            Ok(vec![Section::new(format!("{name} [CSV]"), text)])
        }
    }

    #[test]
    fn registry_dispatches_by_format() {
        let registry = DecoderRegistry::new();
        for format in [
            DocumentFormat::Pdf,
            DocumentFormat::Docx,
            DocumentFormat::Csv,
            DocumentFormat::RawText,
        ] {
            assert_eq!(registry.get(format).format(), format);
        }
    }

    #[test]
    fn registry_falls_back_to_raw_text() {
        let registry = DecoderRegistry {
            decoders: Vec::new(),
        };
        assert_eq!(
            registry.get(DocumentFormat::Pdf).format(),
            DocumentFormat::RawText
        );
    }

    #[test]
    fn registry_accepts_replacement_decoder() {
        let registry = DecoderRegistry::new().with_decoder(Box::new(ShoutingCsv));
        let sections = registry
            .get(DocumentFormat::Csv)
            .extract("a.csv", b"x,y")
            .unwrap();
        assert_eq!(sections[0].body, "X,Y");
        // other formats untouched
        assert_eq!(registry.decoders.len(), 4);
    }

    #[test]
    fn section_marker() {
        let section = Section::new("brief.pdf [PDF page 3]", "text");
        assert_eq!(section.marker(), "--- brief.pdf [PDF page 3] ---");
    }
}
