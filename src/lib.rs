//! pf-cli - TypeScript types from JSON APIs, plus an AI-assisted commit workflow.
//!
//! # Overview
//!
//! Two independent flows share one binary:
//!
//! - [`typegen`] fetches a JSON sample from a URL, infers a TypeScript
//!   definition from it and writes `<name>.ts`.
//! - [`assist`] stages changes, drafts a commit message through a
//!   chat-completion API (falling back to manual entry), commits, pulls and
//!   pushes.
//!
//! External effects go through two capabilities so both flows run
//! unattended in tests: [`runner::CommandRunner`] for subprocesses and
//! [`prompt::Prompter`] for operator questions.

pub mod assist;
pub mod config;
pub mod context;
pub mod error;
pub mod git;
pub mod llm;
pub mod prompt;
pub mod runner;
pub mod typegen;

// Re-export commonly used types
pub use assist::{Outcome, run_workflow};
pub use context::Context;
pub use error::{AssistError, CredentialError, GitError, LlmError, PromptError, TypegenError};
pub use git::{ChangeKind, StageScope, StatusEntry};
pub use prompt::{Answer, Prompter, ScriptedPrompter, TerminalPrompter};
pub use runner::{CommandOutput, CommandRunner, SystemRunner};
