//! Document ingestion for campaign agents.
//!
//! This crate provides:
//! - [`decoders`]: PDF, DOCX, CSV and raw-text extraction into delimited sections
//! - [`IngestClient`]: Sequential fetcher that never aborts a batch on a bad file
//! - [`get_file_text_from_urls`]: One-shot helper returning the aggregate text blob

mod client;
pub mod decoders;
pub mod progress;
pub mod report;

#[cfg(test)]
mod test_support;

pub use client::{IngestClient, get_file_text_from_urls, get_file_text_from_urls_with};
pub use decoders::{Decoder, DecoderRegistry, Section};
pub use progress::{IngestProgress, SilentProgress};
pub use report::{FileReport, FileSummary, IngestReport};
