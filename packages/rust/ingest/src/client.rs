//! Sequential document fetcher.
//!
//! Fetches each URL in input order, one at a time, hands the bytes to the
//! decoder for the file's format, and records a per-file outcome. A failure
//! never aborts the batch.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Instant;

use reqwest::Client;
use tracing::{debug, info, instrument, warn};
use url::Url;

use campaign_shared::{CampaignError, IngestConfig, Result, SourceRef};

use crate::decoders::{DecoderRegistry, Section};
use crate::progress::{IngestProgress, SilentProgress};
use crate::report::{FileReport, IngestReport};

// ---------------------------------------------------------------------------
// IngestClient
// ---------------------------------------------------------------------------

/// HTTP client plus decoders for one or more ingestion batches.
pub struct IngestClient {
    client: Client,
    registry: DecoderRegistry,
}

impl IngestClient {
    /// Create a client with the given configuration and the built-in decoders.
    ///
    /// Idle connections are not kept, so nothing is reused between requests.
    pub fn new(config: &IngestConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .pool_max_idle_per_host(0);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| CampaignError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            registry: DecoderRegistry::new(),
        })
    }

    /// Swap in a custom decoder registry.
    pub fn with_registry(mut self, registry: DecoderRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Fetch and decode every URL, in order, reporting progress as it goes.
    #[instrument(skip_all, fields(files = urls.len()))]
    pub async fn ingest<S: AsRef<str>>(
        &self,
        urls: &[S],
        progress: &dyn IngestProgress,
    ) -> IngestReport {
        let start = Instant::now();
        let total = urls.len();
        let mut files = Vec::with_capacity(total);

        for (index, raw) in urls.iter().enumerate() {
            let source = SourceRef::from_url(raw.as_ref());
            progress.file_started(&source, index + 1, total);

            let outcome = match self.process(&source).await {
                Ok(sections) => {
                    debug!(
                        name = %source.filename,
                        format = source.format.as_str(),
                        sections = sections.len(),
                        "file decoded"
                    );
                    Ok(sections)
                }
                Err(e) => {
                    warn!(url = %source.url, name = %source.filename, error = %e, "file failed");
                    Err(e.to_string())
                }
            };

            let report = FileReport { source, outcome };
            progress.file_finished(&report);
            files.push(report);
        }

        let report = IngestReport { files };
        info!(
            files = total,
            failed = report.failed(),
            duration_ms = start.elapsed().as_millis(),
            "ingestion completed"
        );
        report
    }

    /// Fetch and decode every URL into the aggregate text blob.
    pub async fn text_from_urls<S: AsRef<str>>(&self, urls: &[S]) -> String {
        self.ingest(urls, &SilentProgress).await.render()
    }

    async fn process(&self, source: &SourceRef) -> Result<Vec<Section>> {
        let bytes = self.fetch(&source.url).await?;
        let decoder = self.registry.get(source.format);

        // Third-party decoders can panic on malformed input; keep that to this file.
        catch_unwind(AssertUnwindSafe(|| decoder.extract(&source.filename, &bytes)))
            .unwrap_or_else(|payload| {
                Err(CampaignError::decode(
                    source.format,
                    format!("decoder panicked: {}", panic_message(payload.as_ref())),
                ))
            })
    }

    /// GET a URL and return its body. Non-2xx statuses are errors.
    async fn fetch(&self, raw: &str) -> Result<Vec<u8>> {
        let url = Url::parse(raw)
            .map_err(|e| CampaignError::validation(format!("invalid URL '{raw}': {e}")))?;

        debug!(%url, "fetching document");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| CampaignError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CampaignError::Network(format!("HTTP {status} for url: {url}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CampaignError::Network(format!("{url}: body read failed: {e}")))?;

        Ok(body.to_vec())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}

/// Fetch `urls` with a fresh default client and return the aggregate text blob.
pub async fn get_file_text_from_urls<S: AsRef<str>>(urls: &[S]) -> String {
    get_file_text_from_urls_with(&IngestConfig::default(), urls).await
}

/// Like [`get_file_text_from_urls`] with an explicit configuration.
///
/// Never fails: if the client cannot be built, every URL gets an error section.
pub async fn get_file_text_from_urls_with<S: AsRef<str>>(
    config: &IngestConfig,
    urls: &[S],
) -> String {
    match IngestClient::new(config) {
        Ok(client) => client.text_from_urls(urls).await,
        Err(e) => {
            warn!(error = %e, "HTTP client unavailable");
            let detail = e.to_string();
            IngestReport {
                files: urls
                    .iter()
                    .map(|raw| FileReport {
                        source: SourceRef::from_url(raw.as_ref()),
                        outcome: Err(detail.clone()),
                    })
                    .collect(),
            }
            .render()
        }
    }
}
