//! Choose and stage working tree changes.

use crate::error::AssistError;
use crate::git::{Git, StageScope, StatusEntry};
use crate::prompt::Prompter;
use crate::runner::CommandRunner;

/// What happened at the staging step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Staging {
    /// The working tree had no changes.
    Clean,
    /// The operator aborted.
    Cancelled,
    Staged(StageScope),
}

const CHOICES: [&str; 4] = [
    "Stage all changes (git add .)",
    "Stage tracked modifications only (git add -u)",
    "Choose files",
    "Cancel",
];

/// Show the change list and stage what the operator picks.
pub fn stage_changes<R, P>(git: &Git<'_, R>, prompter: &P) -> Result<Staging, AssistError>
where
    R: CommandRunner + ?Sized,
    P: Prompter + ?Sized,
{
    let entries = git.status()?;
    if entries.is_empty() {
        return Ok(Staging::Clean);
    }

    println!("Changes:");
    for entry in &entries {
        println!("  {:<10} {}", entry.kind, entry.path);
    }
    println!();

    let items: Vec<String> = CHOICES.iter().map(|c| c.to_string()).collect();
    let scope = match prompter.select("What should be staged?", &items, 0)? {
        0 => StageScope::All,
        1 => StageScope::Tracked,
        2 => StageScope::Paths(choose_files(prompter, &entries)?),
        _ => return Ok(Staging::Cancelled),
    };

    git.stage(&scope)?;
    println!("  [DONE] Staged changes");

    Ok(Staging::Staged(scope))
}

/// Ask until at least one file is picked.
fn choose_files<P: Prompter + ?Sized>(
    prompter: &P,
    entries: &[StatusEntry],
) -> Result<Vec<String>, AssistError> {
    let labels: Vec<String> = entries
        .iter()
        .map(|e| format!("{} ({})", e.path, e.kind))
        .collect();

    loop {
        let picked = prompter.multi_select("Files to stage", &labels)?;
        if !picked.is_empty() {
            return Ok(picked.into_iter().map(|i| entries[i].path.clone()).collect());
        }
        println!("  Select at least one file.");
    }
}
