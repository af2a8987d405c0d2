//! Command-line access to Linear reference validation.
//!
//! Usage:
//!
//! ```text
//! trackline [--api-key KEY] [--settings-dir DIR] [--project ID] <command>
//! ```
//!
//! The API key comes from `--api-key` or `LINEAR_API_KEY`, falling back to
//! the configuration saved under `--settings-dir` for `--project`. Logging
//! is controlled by `TRACKLINE_LOG`, then `RUST_LOG`.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use eyre::{Result, WrapErr, eyre};
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use trackline::reference::{
    adapters::linear::{LINEAR_API_URL, LinearTracker},
    domain::extract_references,
    ports::IssueTracker,
    services::ReferenceValidationService,
};
use trackline::settings::{
    adapters::local::LocalSettingsStore,
    domain::{IntegrationConfig, SETTINGS_KEY, SettingsScope},
    ports::SettingsStore,
};
use trackline::surfaces::{pr_status::validation_status, render_text};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const DEFAULT_PROJECT: &str = "default";

#[derive(Debug, Parser)]
#[command(name = "trackline", version, about = "Validate Linear issue references")]
struct Cli {
    /// Linear API key.
    #[arg(long, env = "LINEAR_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Directory holding saved settings.
    #[arg(long, value_name = "DIR", global = true)]
    settings_dir: Option<Utf8PathBuf>,

    /// Project whose saved settings are used.
    #[arg(long, default_value = DEFAULT_PROJECT, global = true)]
    project: String,

    /// GraphQL endpoint.
    #[arg(long, env = "LINEAR_API_URL", default_value = LINEAR_API_URL, global = true)]
    endpoint: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate the references in TEXT, or stdin; exits non-zero when invalid.
    Check {
        /// Text to scan.
        text: Option<String>,
    },
    /// Print the references in TEXT, or stdin, without contacting Linear.
    Extract {
        /// Text to scan.
        text: Option<String>,
    },
    /// List issues whose title contains QUERY.
    Search {
        /// Title substring; empty lists recent issues.
        query: String,
    },
    /// Show the user and organization the API key belongs to.
    VerifyKey,
}

fn init_tracing() {
    let filter = std::env::var("TRACKLINE_LOG")
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn input_text(argument: Option<String>) -> Result<String> {
    if let Some(text) = argument {
        return Ok(text);
    }
    let mut buffer = String::new();
    tokio::io::stdin()
        .read_to_string(&mut buffer)
        .await
        .wrap_err("failed to read stdin")?;
    Ok(buffer)
}

async fn saved_config(cli: &Cli) -> Result<Option<IntegrationConfig>> {
    let Some(dir) = cli.settings_dir.as_deref() else {
        return Ok(None);
    };
    let store = LocalSettingsStore::open(dir)
        .wrap_err_with(|| format!("failed to open settings directory {dir}"))?;
    let scope = SettingsScope::new(cli.project.as_str())?;
    let Some(value) = store.get_value(&scope, SETTINGS_KEY).await? else {
        return Ok(None);
    };
    debug!(%scope, "using saved settings");
    Ok(Some(serde_json::from_value(value).wrap_err("saved settings are malformed")?))
}

async fn tracker(cli: &Cli) -> Result<LinearTracker> {
    let api_key = match cli.api_key.as_deref() {
        Some(key) if !key.trim().is_empty() => key.to_owned(),
        _ => saved_config(cli)
            .await?
            .map(|config| config.api_key.expose().to_owned())
            .unwrap_or_default(),
    };
    Ok(LinearTracker::with_endpoint(&api_key, cli.endpoint.as_str()))
}

async fn run(cli: &Cli) -> Result<ExitCode> {
    let mut out = std::io::stdout().lock();
    match &cli.command {
        Command::Check { text } => {
            let source = input_text(text.clone()).await?;
            let service = ReferenceValidationService::new(Arc::new(tracker(cli).await?));
            let result = service.validate_text(&source).await;
            writeln!(out, "{}", render_text(&validation_status(&result)))?;
            Ok(if result.is_valid() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Extract { text } => {
            for reference in extract_references(&input_text(text.clone()).await?) {
                writeln!(out, "{}", reference.issue_id())?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Search { query } => {
            let linear = tracker(cli).await?;
            if !linear.is_initialized() {
                return Err(eyre!("Linear API key not configured"));
            }
            for issue in linear.search_by_text(query).await? {
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}",
                    issue.identifier, issue.state.name, issue.team.name, issue.title
                )?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::VerifyKey => {
            let check = tracker(cli).await?.verify_credentials().await?;
            writeln!(out, "Viewer: {} <{}>", check.viewer.name, check.viewer.email)?;
            if let Some(organization) = check.organization {
                writeln!(out, "Organization: {} ({})", organization.name, organization.id)?;
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();
    run(&Cli::parse()).await
}
