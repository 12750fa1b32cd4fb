//! pf - CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pf_cli::assist::{Outcome, run_workflow};
use pf_cli::config::{self, http_client};
use pf_cli::llm::OpenAiClient;
use pf_cli::typegen::{self, TypeScriptInferrer, TypegenArgs};
use pf_cli::{Context, SystemRunner, TerminalPrompter};

/// Generate TypeScript types from an API, or run the AI git workflow.
#[derive(Parser, Debug)]
#[command(name = "pf")]
#[command(about = "Generate TypeScript types from a JSON API, plus an AI-assisted git workflow")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// API URL to fetch the JSON sample from (prompts interactively if omitted)
    #[arg(short, long)]
    url: Option<String>,

    /// Name of the generated type (default: ApiTypes)
    #[arg(short, long)]
    name: Option<String>,

    /// Directory to save the generated file in (default: current directory)
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Stage changes, draft a commit message with AI, commit, pull and push
    #[command(alias = "c")]
    Commit,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\nError: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    config::load_dotenv();

    let runner = SystemRunner;
    let prompter = TerminalPrompter;
    let client = http_client().context("Failed to build HTTP client")?;

    match cli.command {
        Some(Command::Commit) => {
            println!("AI git workflow\n");
            let generator = OpenAiClient::from_env(client);
            let outcome = run_workflow(&runner, &prompter, &generator)
                .await
                .context("Git workflow failed, resolve the issue and retry")?;

            if outcome == Outcome::Cancelled {
                println!("No commit was made.");
            }
        }
        None => {
            let ctx = Context::detect(&runner).context("Failed to read the current directory")?;
            let args = TypegenArgs {
                url: cli.url,
                name: cli.name,
                path: cli.path,
            };
            let inferrer = TypeScriptInferrer::default();

            typegen::run(&ctx, &prompter, &runner, &client, &inferrer, &args).await?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
