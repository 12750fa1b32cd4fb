//! Commit message composition with AI drafting and manual fallback.

use tracing::debug;

use crate::error::{AssistError, LlmError};
use crate::git::Git;
use crate::llm::CommitMessageGenerator;
use crate::prompt::{Prompter, require_non_empty};
use crate::runner::CommandRunner;

const REVIEW_CHOICES: [&str; 4] = [
    "Use this message",
    "Edit this message",
    "Write my own message",
    "Cancel",
];

/// Produce the commit message, or `None` if the operator cancels.
///
/// Any drafting failure (missing key, quota, network, empty reply) drops to
/// manual entry; it never ends the workflow.
pub async fn compose_message<R, P, G>(
    git: &Git<'_, R>,
    prompter: &P,
    generator: &G,
) -> Result<Option<String>, AssistError>
where
    R: CommandRunner + ?Sized,
    P: Prompter + ?Sized,
    G: CommitMessageGenerator + ?Sized,
{
    let diff = git.staged_diff()?;
    if diff.trim().is_empty() {
        return Err(AssistError::NothingStaged);
    }
    let status = git.status_porcelain()?;

    println!("Drafting commit message...");
    match generator.generate(&status, &diff).await {
        Ok(suggestion) => review_suggestion(prompter, &suggestion),
        Err(e) => {
            report_draft_failure(&e);
            manual_entry(prompter).map(Some)
        }
    }
}

/// Let the operator accept, edit, replace or reject the suggestion.
fn review_suggestion<P: Prompter + ?Sized>(
    prompter: &P,
    suggestion: &str,
) -> Result<Option<String>, AssistError> {
    println!();
    println!("Suggested commit message:");
    println!("  {}", suggestion);
    println!();

    let items: Vec<String> = REVIEW_CHOICES.iter().map(|c| c.to_string()).collect();
    let message = match prompter.select("Commit with this message?", &items, 0)? {
        0 => suggestion.to_string(),
        1 => prompter.input("Commit message", Some(suggestion), &require_non_empty)?,
        2 => prompter.input("Commit message", None, &require_non_empty)?,
        _ => return Ok(None),
    };

    Ok(Some(message.trim().to_string()))
}

fn manual_entry<P: Prompter + ?Sized>(prompter: &P) -> Result<String, AssistError> {
    println!("Falling back to manual entry.");
    let message = prompter.input("Commit message", None, &require_non_empty)?;
    Ok(message.trim().to_string())
}

fn report_draft_failure(err: &LlmError) {
    debug!("Commit message drafting failed: {:?}", err);
    match err {
        LlmError::Credential(reason) => {
            eprintln!("  [WARN] {}", reason);
            eprintln!("  Set it with: export OPENAI_API_KEY=\"sk-your-real-key\"");
        }
        LlmError::QuotaExceeded | LlmError::InvalidApiKey => {
            eprintln!("  [WARN] {}", err);
        }
        other => eprintln!("  [WARN] AI service unavailable: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CredentialError;
    use crate::llm::client::MockCommitMessageGenerator;
    use crate::prompt::{Answer, ScriptedPrompter};
    use crate::runner::{CommandOutput, MockCommandRunner};

    fn runner_with_diff(diff: &'static str) -> MockCommandRunner {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().returning(move |_, a| {
            let out = match a.first().map(String::as_str) {
                Some("diff") => diff,
                Some("status") => "M  src/lib.rs\n",
                _ => "",
            };
            Ok(CommandOutput::ok(out))
        });
        runner
    }

    fn suggesting(message: &'static str) -> MockCommitMessageGenerator {
        let mut generator = MockCommitMessageGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .returning(move |_, _| Ok(message.to_string()));
        generator
    }

    #[tokio::test]
    async fn test_nothing_staged_is_error() {
        let runner = runner_with_diff("  \n");
        let mut generator = MockCommitMessageGenerator::new();
        generator.expect_generate().never();
        let prompter = ScriptedPrompter::new([]);

        let result = compose_message(&Git::new(&runner), &prompter, &generator).await;
        assert!(matches!(result, Err(AssistError::NothingStaged)));
    }

    #[tokio::test]
    async fn test_accept_suggestion() {
        let runner = runner_with_diff("+added line");
        let generator = suggesting("✨ Add: greeting");
        let prompter = ScriptedPrompter::new([Answer::Choice(0)]);

        let message = compose_message(&Git::new(&runner), &prompter, &generator)
            .await
            .unwrap();
        assert_eq!(message.as_deref(), Some("✨ Add: greeting"));
    }

    #[tokio::test]
    async fn test_edit_suggestion_defaults_to_it() {
        let runner = runner_with_diff("+added line");
        let generator = suggesting("✨ Add: greeting");
        let prompter = ScriptedPrompter::new([Answer::Choice(1), Answer::Default]);

        let message = compose_message(&Git::new(&runner), &prompter, &generator)
            .await
            .unwrap();
        assert_eq!(message.as_deref(), Some("✨ Add: greeting"));
    }

    #[tokio::test]
    async fn test_replace_suggestion() {
        let runner = runner_with_diff("+added line");
        let generator = suggesting("✨ Add: greeting");
        let prompter = ScriptedPrompter::new([Answer::Choice(2), Answer::text("docs: hello")]);

        let message = compose_message(&Git::new(&runner), &prompter, &generator)
            .await
            .unwrap();
        assert_eq!(message.as_deref(), Some("docs: hello"));
    }

    #[tokio::test]
    async fn test_cancel_suggestion() {
        let runner = runner_with_diff("+added line");
        let generator = suggesting("✨ Add: greeting");
        let prompter = ScriptedPrompter::new([Answer::Choice(3)]);

        let message = compose_message(&Git::new(&runner), &prompter, &generator)
            .await
            .unwrap();
        assert!(message.is_none());
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_manual_entry() {
        let runner = runner_with_diff("+added line");
        let mut generator = MockCommitMessageGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .returning(|_, _| Err(LlmError::QuotaExceeded));
        let prompter = ScriptedPrompter::new([Answer::text(""), Answer::text(" fix: manual ")]);

        let message = compose_message(&Git::new(&runner), &prompter, &generator)
            .await
            .unwrap();
        assert_eq!(message.as_deref(), Some("fix: manual"));
    }

    #[tokio::test]
    async fn test_generator_receives_status_and_diff() {
        let runner = runner_with_diff("+added line");
        let mut generator = MockCommitMessageGenerator::new();
        generator
            .expect_generate()
            .withf(|status, diff| status.contains("src/lib.rs") && diff == "+added line")
            .times(1)
            .returning(|_, _| Err(LlmError::Credential(CredentialError::Missing)));
        let prompter = ScriptedPrompter::new([Answer::text("chore: x")]);

        let message = compose_message(&Git::new(&runner), &prompter, &generator)
            .await
            .unwrap();
        assert_eq!(message.as_deref(), Some("chore: x"));
    }
}
