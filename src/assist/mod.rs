//! Commit workflow: stage, draft a message, commit, pull and push.
//!
//! Runs strictly in order. Each stage either completes, ends the run early
//! with an [`Outcome`], or fails with an [`AssistError`].

pub mod compose;
pub mod preflight;
pub mod stage;
pub mod sync;

use crate::error::AssistError;
use crate::git::Git;
use crate::llm::CommitMessageGenerator;
use crate::prompt::Prompter;
use crate::runner::CommandRunner;

use self::stage::Staging;

pub use sync::SyncStep;

/// How a workflow run ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed { message: String },
    /// The working tree was clean.
    NothingToCommit,
    /// The operator aborted at staging or rejected the message.
    Cancelled,
}

/// Run the full commit workflow.
pub async fn run_workflow<R, P, G>(
    runner: &R,
    prompter: &P,
    generator: &G,
) -> Result<Outcome, AssistError>
where
    R: CommandRunner + ?Sized,
    P: Prompter + ?Sized,
    G: CommitMessageGenerator + ?Sized,
{
    let git = Git::new(runner);

    // ── Stage 1: Preflight ──
    preflight::run_checks(&git)?;

    // ── Stage 2: Staging ──
    match stage::stage_changes(&git, prompter)? {
        Staging::Clean => {
            println!("No changes detected. Nothing to commit.");
            return Ok(Outcome::NothingToCommit);
        }
        Staging::Cancelled => {
            println!("Cancelled.");
            return Ok(Outcome::Cancelled);
        }
        Staging::Staged(_) => {}
    }

    // ── Stage 3: Commit message ──
    let Some(message) = compose::compose_message(&git, prompter, generator).await? else {
        println!("Commit cancelled.");
        return Ok(Outcome::Cancelled);
    };

    // ── Stage 4: Commit ──
    git.commit(&message)?;
    println!("  [DONE] Committed: {}", message);

    // ── Stage 5: Pull, then push ──
    sync::pull(&git)?;
    sync::push(&git)?;

    println!();
    println!("Workflow complete.");
    println!("Final commit: {}", message);

    Ok(Outcome::Completed { message })
}
