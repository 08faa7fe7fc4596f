//! Progress callbacks for a running ingestion batch.

use campaign_shared::SourceRef;

use crate::report::FileReport;

/// Progress callback for reporting batch status.
pub trait IngestProgress: Send + Sync {
    /// Called before a file is fetched. `current` is 1-based.
    fn file_started(&self, source: &SourceRef, current: usize, total: usize);
    /// Called once a file has been decoded or has failed.
    fn file_finished(&self, report: &FileReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl IngestProgress for SilentProgress {
    fn file_started(&self, _source: &SourceRef, _current: usize, _total: usize) {}
    fn file_finished(&self, _report: &FileReport) {}
}
