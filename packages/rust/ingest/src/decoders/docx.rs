//! DOCX decoder: body paragraphs, one per line.

use campaign_shared::{CampaignError, DocumentFormat, Result};
use docx_rs::{DocumentChild, Paragraph, ParagraphChild, RunChild};

use super::{Decoder, Section};

/// Paragraph-structured decoder backed by `docx-rs`.
pub struct DocxDecoder;

impl Decoder for DocxDecoder {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Docx
    }

    fn extract(&self, name: &str, bytes: &[u8]) -> Result<Vec<Section>> {
        let docx = docx_rs::read_docx(bytes)
            .map_err(|e| CampaignError::decode(DocumentFormat::Docx, e.to_string()))?;

        // Top-level body paragraphs only; table cells are not paragraphs of the body.
        let mut body = String::new();
        for child in &docx.document.children {
            if let DocumentChild::Paragraph(paragraph) = child {
                body.push_str(&paragraph_text(paragraph));
                body.push('\n');
            }
        }

        Ok(vec![Section::new(format!("{name} [DOCX]"), body)])
    }
}

/// Concatenate the visible text of a paragraph's runs.
fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        push_child_text(child, &mut text);
    }
    text
}

fn push_child_text(child: &ParagraphChild, out: &mut String) {
    match child {
        ParagraphChild::Run(run) => {
            for run_child in &run.children {
                match run_child {
                    RunChild::Text(t) => out.push_str(&t.text),
                    RunChild::Tab(_) => out.push('\t'),
                    RunChild::Break(_) => out.push('\n'),
                    _ => {}
                }
            }
        }
        ParagraphChild::Hyperlink(link) => {
            for inner in &link.children {
                push_child_text(inner, out);
            }
        }
        _ => {}
    }
}
