//! CLI command definitions, routing, and tracing setup.

use std::io::Read;
use std::path::PathBuf;

use campaign_agents::{AgentSpec, insert_brief, root_agent};
use campaign_ingest::{FileReport, IngestClient, IngestProgress};
use campaign_server::Server;
use campaign_shared::{AppConfig, IngestConfig, SourceRef, init_config, load_config};
use campaign_storage::Storage;
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Campaign: brand files in, campaign context out.
#[derive(Parser)]
#[command(
    name = "campaign",
    version,
    about = "Read campaign documents from URLs, manage briefs, and serve the agent API.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Fetch documents and print their combined text.
    Ingest {
        /// Document URLs, read in the order given.
        #[arg(required = true)]
        urls: Vec<String>,

        /// Write the text to a file instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Show the agent catalog.
    Agents {
        /// Print the full tree as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Campaign brief storage.
    Brief {
        #[command(subcommand)]
        action: BriefAction,
    },

    /// Start the HTTP API.
    Serve {
        /// Bind address (overrides config).
        #[arg(long)]
        host: Option<String>,

        /// Port (overrides config and PORT).
        #[arg(long)]
        port: Option<u16>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Brief subcommands.
#[derive(Subcommand)]
pub(crate) enum BriefAction {
    /// Store a JSON brief and print its id.
    Insert {
        /// Path to a JSON file, or `-` for stdin.
        file: String,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr so stdout stays clean.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "campaign=info",
        1 => "campaign=debug,tower_http=debug",
        _ => "campaign=trace,tower_http=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Ingest { urls, out } => cmd_ingest(&urls, out).await,
        Command::Agents { json } => cmd_agents(json),
        Command::Brief { action } => match action {
            BriefAction::Insert { file } => cmd_brief_insert(&file).await,
        },
        Command::Serve { host, port } => cmd_serve(host, port).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_ingest(urls: &[String], out: Option<PathBuf>) -> Result<()> {
    let config = load_config()?;
    let client = IngestClient::new(&IngestConfig::from(&config))?;

    let progress = CliProgress::new();
    let report = client.ingest(urls, &progress).await;
    progress.finish();

    let failed = report.failed();
    if failed > 0 {
        warn!(failed, total = urls.len(), "some files could not be read");
    }

    let text = report.render();
    match out {
        Some(path) => {
            std::fs::write(&path, &text)
                .map_err(|e| eyre!("cannot write '{}': {e}", path.display()))?;
            info!(path = %path.display(), bytes = text.len(), "text written");
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn cmd_agents(json: bool) -> Result<()> {
    let config = load_config()?;
    let root = root_agent(&config.agents);

    if json {
        println!("{}", serde_json::to_string_pretty(&root)?);
    } else {
        print_agent(&root, 0);
    }
    Ok(())
}

fn print_agent(agent: &AgentSpec, depth: usize) {
    let indent = "  ".repeat(depth);
    let tools = agent.tool_names();
    let tools = if tools.is_empty() {
        String::new()
    } else {
        format!(" tools=[{}]", tools.join(", "))
    };
    println!(
        "{indent}{} ({}) -> {}{tools}",
        agent.name, agent.model, agent.output_key
    );
    println!("{indent}  {}", agent.description);
    for sub in &agent.sub_agents {
        print_agent(sub, depth + 1);
    }
}

async fn cmd_brief_insert(file: &str) -> Result<()> {
    let raw = if file == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(file).map_err(|e| eyre!("cannot read '{file}': {e}"))?
    };
    let brief: serde_json::Value =
        serde_json::from_str(&raw).map_err(|e| eyre!("brief is not valid JSON: {e}"))?;

    let config = load_config()?;
    let storage = Storage::open(&config.storage.resolved_path()?).await?;
    let reply = insert_brief(&storage, &brief).await;
    storage.close();

    println!("{}", reply?);
    Ok(())
}

async fn cmd_serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = load_config()?;
    let mut server = Server::new(&config)?;
    if let Some(host) = host {
        server = server.with_host(host);
    }
    if let Some(port) = port {
        server = server.with_port(port);
    }
    server.start().await?;
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Progress reporter
// ---------------------------------------------------------------------------

/// Spinner on stderr showing which file is being read.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl IngestProgress for CliProgress {
    fn file_started(&self, source: &SourceRef, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Reading [{current}/{total}] {}", source.filename));
    }

    fn file_finished(&self, report: &FileReport) {
        if let Err(detail) = &report.outcome {
            self.spinner
                .println(format!("  failed: {} ({detail})", report.source.filename));
        }
    }
}
