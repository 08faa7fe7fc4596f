//! Declarative agent catalog.
//!
//! The campaign workflow is a tree: one orchestrator delegating, in order, to
//! design, research, brief and creator-research agents. This module only
//! describes that tree; running it belongs to the host agent framework.

use campaign_shared::AgentsConfig;
use serde::Serialize;

use crate::tools::Tool;

/// Name of the orchestrator at the root of the tree.
pub const ROOT_AGENT: &str = "campaign_agent";

/// One node of the agent tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentSpec {
    pub name: &'static str,
    pub model: String,
    pub description: &'static str,
    pub instruction: &'static str,
    pub tools: Vec<Tool>,
    /// Name of the structured input type, if the agent takes one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<&'static str>,
    /// Session key the agent's final answer is written under.
    pub output_key: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sub_agents: Vec<AgentSpec>,
}

impl AgentSpec {
    /// Depth-first lookup by name, including `self`.
    pub fn find(&self, name: &str) -> Option<&AgentSpec> {
        if self.name == name {
            return Some(self);
        }
        self.sub_agents.iter().find_map(|a| a.find(name))
    }

    /// Every agent in the tree, parent before children.
    pub fn walk(&self) -> Vec<&AgentSpec> {
        let mut out = vec![self];
        for sub in &self.sub_agents {
            out.extend(sub.walk());
        }
        out
    }

    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(Tool::name).collect()
    }
}

/// Build the campaign agent tree using the configured model.
pub fn root_agent(config: &AgentsConfig) -> AgentSpec {
    let model = config.model.clone();
    let agent = |name, description, instruction, tools, input_schema, output_key| AgentSpec {
        name,
        model: model.clone(),
        description,
        instruction,
        tools,
        input_schema,
        output_key,
        sub_agents: Vec::new(),
    };

    let design = agent(
        "campaign_design_agent",
        "Extracts campaign inputs from brand files or user input, then validates all required information.",
        DESIGN_INSTRUCTION,
        vec![Tool::FileReview],
        Some("CampaignDesignAgentInput"),
        "campaign_design_output",
    );
    let research = agent(
        "research_agent",
        "Performs campaign-related research and produces a competitor report.",
        RESEARCH_INSTRUCTION,
        Vec::new(),
        Some("ResearchAgentInput"),
        "competitor_report",
    );
    let brief = agent(
        "brief_agent",
        "Creates a structured campaign brief from brand documents and templates.",
        BRIEF_INSTRUCTION,
        Vec::new(),
        None,
        "campaign_brief",
    );
    let creators = agent(
        "creator_research_agent",
        "Conducts structured research to identify creators, evaluate scope, assess storage needs, and define data sources.",
        CREATOR_RESEARCH_INSTRUCTION,
        Vec::new(),
        None,
        "creator_research",
    );

    let mut root = agent(
        ROOT_AGENT,
        "Orchestrates the design, research, brief creation, and creator discovery process for a new campaign.",
        ORCHESTRATOR_INSTRUCTION,
        Vec::new(),
        None,
        "root_agent",
    );
    root.sub_agents = vec![design, research, brief, creators];
    root
}

// ---------------------------------------------------------------------------
// AgentInfo
// ---------------------------------------------------------------------------

/// Public summary of an agent, as served by `/agent-info`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentInfo {
    pub name: String,
    pub description: String,
    pub model: String,
    pub tools: Vec<String>,
}

impl AgentInfo {
    /// Placeholder used when no agent tree is available.
    pub fn fallback() -> Self {
        Self {
            name: "Agent".into(),
            description: "Default agent description".into(),
            model: "Unknown".into(),
            tools: Vec::new(),
        }
    }
}

impl From<&AgentSpec> for AgentInfo {
    fn from(agent: &AgentSpec) -> Self {
        Self {
            name: agent.name.to_string(),
            description: agent.description.to_string(),
            model: agent.model.clone(),
            tools: agent.tool_names().into_iter().map(String::from).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Instructions
// ---------------------------------------------------------------------------

const ORCHESTRATOR_INSTRUCTION: &str = "\
You are the Campaign Orchestrator. You control the flow between agents and do not answer the user yourself.

1. Run campaign_design_agent. Guide the user to provide brand guidelines, RFPs, budget and timeline, and validate every input.
2. Once the required data is confirmed, tell the user it is complete and pass the structured output straight to research_agent without asking again. Do not show the design agent's raw output.
3. Show the competitor report produced by research_agent.
4. Pass everything to brief_agent, which must produce the complete brief in one response.
5. Finally run creator_research_agent to list matching creators and estimate how many are needed.

Only one agent responds at a time. Ask the user before moving to the next step.";

const DESIGN_INSTRUCTION: &str = "\
You are the Campaign Design Agent. Gather everything needed to design a marketing campaign.

Ask the user for brand guidelines, documentation samples and requests for proposals. When files arrive, first ask whether more files are coming; once the user is done, read them with file_review_tool.

Extract these required inputs:
- Campaign goals
- Financial metrics (expected ROI, CAC, LTV)
- Timeline (start and end dates, phases)
- Budget (total, and per channel when available)

Always show what you have gathered and what is still missing. Ask for any missing or unclear field and do not proceed until all of them are confirmed.

When done, ask: \"Should we move to next step to create Competitor Report?\"";

const RESEARCH_INSTRUCTION: &str = "\
You are the Research Agent. Given a campaign's goals, financial metrics, timeline and budget:

1. Research historical data for this campaign type, planning assumptions (platform trends, average CPMs) and priorities for first- and third-party data.
2. Write a concise competitor report: campaigns competitors have run, what to copy and what to avoid.
3. Formulate a one-line campaign design statement, e.g. \"Working for McDonald's with a $500 budget to see if we can get creators to promote their new sandwich.\"

Be data-driven and return the whole response at once.

When done, ask: \"Would you like to create the campaign brief now?\"";

const BRIEF_INSTRUCTION: &str = "\
You are the Brief Agent. Build a structured campaign brief from the brand-provided material, including a concrete campaign idea.

Extract:
1. Type of brief
2. Campaign design aspects to be fulfilled
3. Brand attributes: tone, history, overall strategy, and how this campaign fits it

Combine them into a campaign brief with clear goals, specific objectives and strategic context. Do not assume anything; ask the user for whatever is missing. Respond in one piece.

When done, ask: \"Would you like to initiate creator research now?\"";

const CREATOR_RESEARCH_INSTRUCTION: &str = "\
You are the Creator Research Agent.

1. List creators matching the campaign's audience and platforms (TikTok, Instagram) with handle, follower count, niche and engagement.
2. Estimate how many creators are needed to reach the campaign's reach and engagement targets within budget.
3. Also return the data as JSON with keys Goals, KPIs, Timeline and Budget, each a list of strings (Timeline and Budget hold exactly one entry).

Output your full findings in structured text without skipping steps.";
