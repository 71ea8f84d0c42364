//! CLI command definitions and handlers

use crate::interactive::Prompt;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use soc2ops_evidence::{EvidencePipeline, GeneratorConfig};
use soc2ops_tracker::{GithubClient, IssueCatalog, IssueSeeder, SeedOutcome, TrackerConfig};
use std::path::{Path, PathBuf};
use tracing::info;

/// Main CLI structure
#[derive(Parser)]
#[command(name = "soc2ops")]
#[command(about = "SOC 2 program utilities: tracking issues and synthetic audit evidence")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Create the catalog's missing issues in a GitHub repository
    SeedIssues {
        /// Repository name or owner/name; prompted for when omitted
        #[arg(short, long)]
        repo: Option<String>,

        /// Environment variable holding the API token
        #[arg(long, default_value = TrackerConfig::DEFAULT_TOKEN_VAR)]
        token_env: String,

        /// API base URL
        #[arg(long, default_value = TrackerConfig::DEFAULT_API_URL)]
        api_url: String,

        /// JSON catalog file (defaults to the bundled SOC 2 catalog)
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Per-request timeout in seconds
        #[arg(long, default_value = "30")]
        timeout: u64,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Generate synthetic audit evidence snapshots
    GenerateEvidence {
        /// Output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Number of employees
        #[arg(long)]
        employees: Option<usize>,

        /// Access log window in days
        #[arg(long)]
        access_days: Option<u32>,

        /// Audit trail window in days
        #[arg(long)]
        audit_days: Option<u32>,

        /// Number of incident reports
        #[arg(long)]
        incidents: Option<usize>,

        /// Number of risk assessment entries
        #[arg(long)]
        risks: Option<usize>,

        /// RNG seed for reproducible output
        #[arg(short, long)]
        seed: Option<u64>,

        /// JSON generator config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show the issue catalog without touching any tracker
    Catalog {
        /// JSON catalog file (defaults to the bundled SOC 2 catalog)
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

/// Output format options
#[derive(Clone, Debug, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    JsonPretty,
}

/// Command execution result
pub struct CommandResult {
    pub success: bool,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Execute CLI commands
pub struct CommandExecutor {
    prompt: Prompt,
}

impl CommandExecutor {
    pub fn new() -> Self {
        Self::with_prompt(Prompt::stdio())
    }

    pub fn with_prompt(prompt: Prompt) -> Self {
        Self { prompt }
    }

    /// Execute a CLI command
    pub async fn execute(&mut self, command: Commands) -> Result<CommandResult> {
        match command {
            Commands::SeedIssues {
                repo,
                token_env,
                api_url,
                catalog,
                timeout,
                format,
            } => {
                self.execute_seed_issues(repo, &token_env, &api_url, catalog, timeout, format)
                    .await
            }
            Commands::GenerateEvidence {
                output_dir,
                employees,
                access_days,
                audit_days,
                incidents,
                risks,
                seed,
                config,
                format,
            } => {
                let mut generator_config = match config {
                    Some(path) => GeneratorConfig::from_file(&path)
                        .with_context(|| format!("loading generator config {}", path.display()))?,
                    None => GeneratorConfig::default(),
                };
                if let Some(dir) = output_dir {
                    generator_config.output_dir = dir;
                }
                if let Some(count) = employees {
                    generator_config.employee_count = count;
                }
                if let Some(days) = access_days {
                    generator_config.access_log_days = days;
                }
                if let Some(days) = audit_days {
                    generator_config.audit_trail_days = days;
                }
                if let Some(count) = incidents {
                    generator_config.incident_count = count;
                }
                if let Some(count) = risks {
                    generator_config.risk_count = count;
                }
                if seed.is_some() {
                    generator_config.seed = seed;
                }
                self.execute_generate_evidence(generator_config, format)
            }
            Commands::Catalog { catalog, format } => self.execute_catalog(catalog, format),
        }
    }

    async fn execute_seed_issues(
        &mut self,
        repo: Option<String>,
        token_env: &str,
        api_url: &str,
        catalog: Option<PathBuf>,
        timeout: u64,
        format: OutputFormat,
    ) -> Result<CommandResult> {
        // Token first: nothing is asked or fetched without credentials
        let config = TrackerConfig::from_env(token_env)?
            .with_api_url(api_url)
            .with_timeout(timeout);

        let repo = match repo {
            Some(repo) => repo,
            None => self.prompt.ask_repository()?,
        };
        let catalog = load_catalog(catalog.as_deref())?;

        let client = GithubClient::connect(config, &repo).await?;
        info!(repository = %client.repository(), "repository resolved");

        let seeder = IssueSeeder::new(client);
        let report = seeder.seed(&catalog).await?;

        let mut text = String::new();
        for outcome in &report.outcomes {
            if let SeedOutcome::Failed { title, error } = outcome {
                text.push_str(&format!("Error creating {}: {}\n", title, error));
            }
        }
        text.push_str(&report.summary());
        println!("{}", render(&format, text, &report)?);

        Ok(CommandResult {
            success: report.is_success(),
            message: report.summary(),
            data: Some(serde_json::to_value(&report)?),
        })
    }

    fn execute_generate_evidence(&self, config: GeneratorConfig, format: OutputFormat) -> Result<CommandResult> {
        info!("Generating SOC 2 audit evidence...");
        let run = EvidencePipeline::new(config).run()?;

        let text = run
            .files
            .iter()
            .map(|file| format!("Generated {} evidence: {}", file.kind, file.path.display()))
            .collect::<Vec<_>>()
            .join("\n");
        println!("{}", render(&format, text, &run)?);

        Ok(CommandResult {
            success: true,
            message: format!("Generated {} evidence files", run.files.len()),
            data: Some(serde_json::to_value(&run)?),
        })
    }

    fn execute_catalog(&self, catalog: Option<PathBuf>, format: OutputFormat) -> Result<CommandResult> {
        let catalog = load_catalog(catalog.as_deref())?;

        let mut text = format!("{} issues:\n", catalog.len());
        for definition in &catalog {
            text.push_str(&format!(
                "  {}  [{}]  ({})\n",
                definition.title,
                definition.milestone,
                definition.labels.join(", ")
            ));
        }
        println!("{}", render(&format, text, catalog.definitions())?);

        Ok(CommandResult {
            success: true,
            message: format!("Catalog contains {} issues", catalog.len()),
            data: Some(serde_json::json!({
                "issues": catalog.len(),
                "milestones": catalog.milestones(),
            })),
        })
    }
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

fn load_catalog(path: Option<&Path>) -> Result<IssueCatalog> {
    let catalog = match path {
        Some(path) => IssueCatalog::from_file(path)
            .with_context(|| format!("loading issue catalog {}", path.display()))?,
        None => IssueCatalog::builtin()?,
    };
    Ok(catalog)
}

fn render<T: Serialize + ?Sized>(format: &OutputFormat, text: String, value: &T) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => text,
        OutputFormat::Json => serde_json::to_string(value)?,
        OutputFormat::JsonPretty => serde_json::to_string_pretty(value)?,
    })
}
