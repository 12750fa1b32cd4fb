//! Pull from and push to the remote after committing.

use tracing::debug;

use crate::error::AssistError;
use crate::git::{Git, mentions_conflict, mentions_no_upstream};
use crate::runner::CommandRunner;

/// Result of a pull or push step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStep {
    Done,
    /// Nothing to do; the reason was shown to the operator.
    Skipped(String),
}

/// Prefer `origin`, otherwise the first configured remote.
pub fn select_remote(remotes: &[String]) -> Option<&str> {
    remotes
        .iter()
        .find(|r| r.as_str() == "origin")
        .or_else(|| remotes.first())
        .map(String::as_str)
}

fn skip(reason: String) -> SyncStep {
    println!("  [SKIP] {}", reason);
    SyncStep::Skipped(reason)
}

/// Pull the current branch from its same-named remote branch.
///
/// No remote, no current branch, or no remote branch are skips. A failure
/// that mentions a conflict, or leaves unmerged paths behind, is a
/// [`AssistError::MergeConflict`].
pub fn pull<R: CommandRunner + ?Sized>(git: &Git<'_, R>) -> Result<SyncStep, AssistError> {
    let remotes = git.remotes()?;
    let Some(remote) = select_remote(&remotes) else {
        return Ok(skip("No remote configured, skipping pull".to_string()));
    };

    let Some(branch) = git.current_branch()? else {
        return Ok(skip("No current branch detected, skipping pull".to_string()));
    };

    if !git.remote_branch_exists(remote, &branch)? {
        return Ok(skip(format!(
            "Remote branch {}/{} does not exist, skipping pull",
            remote, branch
        )));
    }

    println!("Pulling {}/{}...", remote, branch);
    let output = git.pull(remote, &branch)?;

    if !output.success() {
        let files = git.conflicted_files().unwrap_or_else(|e| {
            debug!("Could not list conflicted files: {}", e);
            Vec::new()
        });

        if mentions_conflict(&output) || !files.is_empty() {
            eprintln!("  [FAIL] Merge conflict detected");
            for file in &files {
                eprintln!("    {}", file);
            }
            eprintln!("  Resolve the conflicts, then run: git add . && git commit");
            return Err(AssistError::MergeConflict {
                remote: remote.to_string(),
                branch,
                files,
            });
        }

        return Err(AssistError::PullFailed(output.stderr.trim().to_string()));
    }

    if output.stdout.contains("Already up to date") {
        println!("  [DONE] Already up to date");
    } else {
        println!("  [DONE] Pulled remote changes");
        let summary = output.stdout.trim();
        if !summary.is_empty() {
            println!("{}", summary);
        }
    }

    Ok(SyncStep::Done)
}

/// Push the current branch, setting the upstream on a single retry if git
/// reports there is none.
pub fn push<R: CommandRunner + ?Sized>(git: &Git<'_, R>) -> Result<SyncStep, AssistError> {
    let remotes = git.remotes()?;
    let Some(remote) = select_remote(&remotes) else {
        return Ok(skip("No remote configured, skipping push".to_string()));
    };

    let branch = git.current_branch()?.ok_or(AssistError::NoCurrentBranch)?;

    println!("Pushing {} to {}...", branch, remote);
    let output = git.push(remote, &branch, false)?;
    if output.success() {
        println!("  [DONE] Pushed {}/{}", remote, branch);
        return Ok(SyncStep::Done);
    }

    if !mentions_no_upstream(&output) {
        return Err(AssistError::PushFailed(output.stderr.trim().to_string()));
    }

    println!("  Setting upstream branch...");
    let retry = git.push(remote, &branch, true)?;
    if !retry.success() {
        return Err(AssistError::UpstreamFailed(retry.stderr.trim().to_string()));
    }

    println!("  [DONE] Pushed {}/{} and set upstream", remote, branch);
    Ok(SyncStep::Done)
}
