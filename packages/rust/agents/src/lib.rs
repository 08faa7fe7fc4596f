//! Campaign agent definitions.
//!
//! This crate provides:
//! - [`catalog`]: The orchestrator/sub-agent tree and [`AgentInfo`] summaries
//! - [`schemas`]: Structured inputs and outputs passed between agents
//! - [`tools`]: `file_review_tool` and `insert_brief`

pub mod catalog;
pub mod schemas;
pub mod tools;

pub use catalog::{AgentInfo, AgentSpec, ROOT_AGENT, root_agent};
pub use schemas::{
    CampaignBrief, CampaignDesignAgentInput, CampaignDesignOutput, ResearchAgentInput,
    WorkstreamBrief,
};
pub use tools::{BRIEF_COLLECTION, Tool, file_review_tool, insert_brief};
