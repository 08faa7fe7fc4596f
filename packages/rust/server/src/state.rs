//! Shared state handed to every route.

use std::sync::Arc;

use campaign_agents::{AgentInfo, root_agent};
use campaign_ingest::IngestClient;
use campaign_shared::{AppConfig, IngestConfig, Result};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Summary of the root agent, or `None` when no catalog is loaded.
    agent_info: Option<AgentInfo>,
    ingest: IngestClient,
}

impl AppState {
    /// State with the configured agent catalog and ingestion client.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let root = root_agent(&config.agents);
        Self::build(Some(AgentInfo::from(&root)), IngestConfig::from(config))
    }

    /// State without an agent catalog; `/agent-info` serves the fallback.
    pub fn without_agents(ingest: IngestConfig) -> Result<Self> {
        Self::build(None, ingest)
    }

    fn build(agent_info: Option<AgentInfo>, ingest: IngestConfig) -> Result<Self> {
        Ok(Self {
            inner: Arc::new(AppStateInner {
                agent_info,
                ingest: IngestClient::new(&ingest)?,
            }),
        })
    }

    pub fn agent_info(&self) -> AgentInfo {
        self.inner
            .agent_info
            .clone()
            .unwrap_or_else(AgentInfo::fallback)
    }

    pub fn ingest(&self) -> &IngestClient {
        &self.inner.ingest
    }
}
