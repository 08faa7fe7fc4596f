//! Core domain types for document ingestion.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DocumentFormat
// ---------------------------------------------------------------------------

/// Format tag inferred from a source's filename extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Csv,
    /// Fallback for any other extension, or none at all.
    #[serde(rename = "raw")]
    RawText,
}

impl DocumentFormat {
    /// Classify a filename by its extension, case-insensitively.
    pub fn classify(filename: &str) -> Self {
        let lower = filename.to_ascii_lowercase();
        if lower.ends_with(".pdf") {
            Self::Pdf
        } else if lower.ends_with(".docx") {
            Self::Docx
        } else if lower.ends_with(".csv") {
            Self::Csv
        } else {
            Self::RawText
        }
    }

    /// Short tag used in logs and serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Csv => "csv",
            Self::RawText => "raw",
        }
    }

    /// Label used inside section markers (`[DOCX]`, `[RAW TEXT]`, ...).
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "DOCX",
            Self::Csv => "CSV",
            Self::RawText => "RAW TEXT",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// SourceRef
// ---------------------------------------------------------------------------

/// A caller-supplied URL plus what we infer from it before fetching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    /// The URL exactly as supplied.
    pub url: String,
    /// Display filename: last path segment, no query or fragment.
    pub filename: String,
    /// Format inferred from `filename`.
    pub format: DocumentFormat,
}

impl SourceRef {
    /// Build a source reference from a raw URL string. Never fails; an
    /// unparseable URL still gets a best-effort filename.
    pub fn from_url(raw: &str) -> Self {
        let filename = display_filename(raw);
        let format = DocumentFormat::classify(&filename);
        Self {
            url: raw.to_string(),
            filename,
            format,
        }
    }
}

/// Derive the display filename for a URL: the last segment of its path,
/// taken verbatim (no percent-decoding or dot-segment normalization).
///
/// A path ending in `/` yields an empty name.
pub fn display_filename(raw: &str) -> String {
    let without_query = raw.split(['?', '#']).next().unwrap_or("");
    let path = match without_query.split_once(':') {
        Some((scheme, rest)) if is_scheme(scheme) => match rest.strip_prefix("//") {
            // authority runs to the next '/'
            Some(after) => after.find('/').map_or("", |slash| &after[slash..]),
            None => rest,
        },
        _ => without_query,
    };
    path.rsplit('/').next().unwrap_or("").to_string()
}

fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
