//! Structured inputs and outputs exchanged between agents.

use std::collections::BTreeMap;

use campaign_shared::{CampaignError, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// What the user hands the design agent: a message plus optional file links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignDesignAgentInput {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<Url>>,
}

impl CampaignDesignAgentInput {
    /// Parse and check that every file link is http(s).
    pub fn from_json(raw: &str) -> Result<Self> {
        let input: Self = serde_json::from_str(raw)
            .map_err(|e| CampaignError::validation(format!("invalid design input: {e}")))?;
        input.validate()?;
        Ok(input)
    }

    pub fn validate(&self) -> Result<()> {
        for url in self.files.iter().flatten() {
            if !matches!(url.scheme(), "http" | "https") {
                return Err(CampaignError::validation(format!(
                    "file link must be http or https: {url}"
                )));
            }
        }
        Ok(())
    }

    /// File links as strings, in the order given.
    pub fn file_urls(&self) -> Vec<String> {
        self.files
            .iter()
            .flatten()
            .map(|u| u.as_str().to_string())
            .collect()
    }
}

/// Fields the design agent confirms before research starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignDesignOutput {
    pub confirmed_goals: String,
    pub confirmed_financial_metrics: String,
    pub confirmed_timeline: String,
    pub confirmed_budget: String,
}

/// Research input. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResearchAgentInput {
    /// High-level campaign objectives.
    #[serde(default)]
    pub goals: Option<String>,
    /// Financial goals and KPIs (ROI, CAC, LTV).
    #[serde(default)]
    pub financial_metrics: Option<String>,
    /// Start/end dates or phases.
    #[serde(default)]
    pub timeline: Option<String>,
    /// Total budget, with channel breakdown when known.
    #[serde(default)]
    pub budget: Option<String>,
}

impl From<CampaignDesignOutput> for ResearchAgentInput {
    fn from(out: CampaignDesignOutput) -> Self {
        Self {
            goals: Some(out.confirmed_goals),
            financial_metrics: Some(out.confirmed_financial_metrics),
            timeline: Some(out.confirmed_timeline),
            budget: Some(out.confirmed_budget),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkstreamBrief {
    pub campaign_message: String,
    pub influencer_profiles: Vec<String>,
    pub content_formats: Vec<String>,
    pub timeline_and_deliverables: BTreeMap<String, String>,
    pub summary: String,
}

/// The brief record persisted to the `campaignBrief` collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignBrief {
    pub brief_type: String,
    pub design_aspects: String,
    pub brand_tone: String,
    pub brand_history: String,
    pub brand_strategy: String,
    pub strategic_fit: String,
    pub campaign_goals: String,
    pub campaign_objectives: String,
}
