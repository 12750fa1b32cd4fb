//! Type definitions from live JSON endpoints.
//!
//! Fetches a sample payload, hands it to a sample-based inference engine and
//! writes the resulting TypeScript to disk.

pub mod config;
pub mod fetch;
pub mod infer;
pub mod writer;

use std::path::{Path, PathBuf};

use reqwest::Url;
use tracing::warn;

use crate::context::Context;
use crate::error::TypegenError;
use crate::prompt::Prompter;
use crate::runner::CommandRunner;

pub use config::{DEFAULT_TYPE_NAME, TypegenConfig, collect_interactive, validate_type_name, validate_url};
pub use fetch::{fetch_json, select_sample};
pub use infer::{TypeInferrer, TypeScriptInferrer};
pub use writer::write_types;

/// Flags given on the command line.
#[derive(Debug, Clone, Default)]
pub struct TypegenArgs {
    pub url: Option<String>,
    pub name: Option<String>,
    pub path: Option<PathBuf>,
}

/// Fetch `url` and infer a definition named `name`.
///
/// Fails with [`TypegenError::EmptyGeneration`] when there is nothing to
/// write, including an empty top-level array.
pub async fn generate_types<I: TypeInferrer + ?Sized>(
    client: &reqwest::Client,
    inferrer: &I,
    url: &Url,
    name: &str,
) -> Result<Vec<String>, TypegenError> {
    let payload = fetch_json(client, url).await?;
    let sample = select_sample(payload).ok_or(TypegenError::EmptyGeneration)?;

    let lines = inferrer.infer(name, &sample)?;
    if lines.iter().all(|line| line.trim().is_empty()) {
        return Err(TypegenError::EmptyGeneration);
    }

    Ok(lines)
}

/// Run the whole type generation flow.
///
/// Uses flags when `--url` is given, otherwise asks interactively. Returns
/// the path of the written file.
pub async fn run<P, R, I>(
    ctx: &Context,
    prompter: &P,
    runner: &R,
    client: &reqwest::Client,
    inferrer: &I,
    args: &TypegenArgs,
) -> Result<PathBuf, TypegenError>
where
    P: Prompter + ?Sized,
    R: CommandRunner + ?Sized,
    I: TypeInferrer + ?Sized,
{
    let config = match &args.url {
        Some(url) => {
            TypegenConfig::from_flags(ctx, url, args.name.as_deref(), args.path.as_deref())?
        }
        None => {
            print_banner();
            collect_interactive(ctx, prompter)?
        }
    };

    println!("Fetching {}...", config.url);
    let lines = generate_types(client, inferrer, &config.url, &config.name).await?;
    println!("  [DONE] Generated {} lines", lines.len());

    let path = write_types(&config.path, &config.name, inferrer.extension(), &lines)?;
    println!("  [DONE] Saved {}", path.display());

    print_preview(&lines);
    offer_editor(ctx, prompter, runner, &path)?;

    Ok(path)
}

fn print_banner() {
    println!();
    println!("  PF-CLI {}", env!("CARGO_PKG_VERSION"));
    println!("  Generate TypeScript types from a JSON API");
    println!();
}

fn print_preview(lines: &[String]) {
    println!();
    println!("Preview:");
    println!("----------------------------------------");
    for line in lines {
        println!("{}", line);
    }
    println!("----------------------------------------");
    println!();
}

/// Offer to open the written file when an editor is available.
///
/// A launcher failure is reported but never fails the run.
fn offer_editor<P, R>(
    ctx: &Context,
    prompter: &P,
    runner: &R,
    path: &Path,
) -> Result<(), TypegenError>
where
    P: Prompter + ?Sized,
    R: CommandRunner + ?Sized,
{
    let Some(editor) = &ctx.editor else {
        return Ok(());
    };

    if !prompter.confirm("Open the generated file in your editor?", false)? {
        return Ok(());
    }

    let program = editor.display().to_string();
    match runner.run(&program, &[path.display().to_string()]) {
        Ok(output) if output.success() => println!("  [DONE] Opened in editor"),
        Ok(output) => {
            warn!("Editor exited with {:?}: {}", output.code, output.stderr.trim());
            println!("  [WARN] Could not open the file automatically, open it manually");
        }
        Err(e) => {
            warn!("Failed to launch editor: {}", e);
            println!("  [WARN] Could not open the file automatically, open it manually");
        }
    }

    Ok(())
}
