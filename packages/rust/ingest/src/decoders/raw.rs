//! Fallback decoder for any other extension.

use campaign_shared::{DocumentFormat, Result};

use super::{Decoder, Section};

/// Lossy UTF-8 decoder. Undecodable bytes become U+FFFD; never fails.
pub struct RawTextDecoder;

impl Decoder for RawTextDecoder {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::RawText
    }

    fn extract(&self, name: &str, bytes: &[u8]) -> Result<Vec<Section>> {
        let mut body = String::from_utf8_lossy(bytes).into_owned();
        body.push('\n');
        Ok(vec![Section::new(format!("{name} [RAW TEXT]"), body)])
    }
}
