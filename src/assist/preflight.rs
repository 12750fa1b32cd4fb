//! Preflight checks for the commit workflow.

use crate::error::AssistError;
use crate::git::Git;
use crate::runner::CommandRunner;

/// Fail fast unless git is installed and we are inside a work tree.
pub fn run_checks<R: CommandRunner + ?Sized>(git: &Git<'_, R>) -> Result<(), AssistError> {
    if !git.is_installed() {
        return Err(AssistError::GitNotInstalled);
    }

    if !git.is_work_tree()? {
        return Err(AssistError::NotARepository);
    }

    Ok(())
}
