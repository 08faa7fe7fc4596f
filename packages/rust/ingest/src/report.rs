//! Per-file outcomes and their rendering into the aggregate text blob.

use campaign_shared::{DocumentFormat, SourceRef};
use serde::Serialize;

use crate::decoders::Section;

/// Outcome for one input URL.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub source: SourceRef,
    /// Extracted sections, or the error detail rendered inline.
    pub outcome: Result<Vec<Section>, String>,
}

impl FileReport {
    /// Append this file's text to `out`.
    pub fn render_into(&self, out: &mut String) {
        match &self.outcome {
            Ok(sections) => {
                for section in sections {
                    out.push('\n');
                    out.push_str(&section.marker());
                    out.push('\n');
                    out.push_str(&section.body);
                }
            }
            Err(detail) => {
                out.push_str(&format!(
                    "\n[Error reading {}]: {detail}\n",
                    self.source.filename
                ));
            }
        }
    }

    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Serializable summary (no extracted text).
    pub fn summary(&self) -> FileSummary {
        let (sections, error) = match &self.outcome {
            Ok(sections) => (sections.len(), None),
            Err(detail) => (0, Some(detail.clone())),
        };
        FileSummary {
            url: self.source.url.clone(),
            filename: self.source.filename.clone(),
            format: self.source.format,
            sections,
            error,
        }
    }
}

/// Lightweight per-file status for APIs and logs.
#[derive(Debug, Clone, Serialize)]
pub struct FileSummary {
    pub url: String,
    pub filename: String,
    pub format: DocumentFormat,
    pub sections: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of a whole batch, in input order.
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub files: Vec<FileReport>,
}

impl IngestReport {
    /// Concatenate every file's rendering into the aggregate blob.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for file in &self.files {
            file.render_into(&mut out);
        }
        out
    }

    /// Number of files that failed.
    pub fn failed(&self) -> usize {
        self.files.iter().filter(|f| !f.is_ok()).count()
    }

    pub fn summaries(&self) -> Vec<FileSummary> {
        self.files.iter().map(FileReport::summary).collect()
    }
}
