//! Error types for pf-cli modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the type generation flow.
#[derive(Error, Debug)]
pub enum TypegenError {
    #[error("Invalid URL '{input}': {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error("Invalid type name '{0}': must start with a letter and contain only letters and digits")]
    InvalidTypeName(String),

    #[error("Directory does not exist: {}", .0.display())]
    InvalidPath(PathBuf),

    #[error("API request failed: {status_text}")]
    Network { status: u16, status_text: String },

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Response is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Cannot infer a named type from a top-level {0} value")]
    UnsupportedSample(&'static str),

    #[error("Generated type definition is empty. Check the data returned by the API.")]
    EmptyGeneration,

    #[error("Type inference failed: {0}")]
    Inference(String),

    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Prompt(#[from] PromptError),
}

/// Why a configured API key cannot be used.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialError {
    #[error("OPENAI_API_KEY is not set")]
    Missing,

    #[error("OPENAI_API_KEY still holds the placeholder value")]
    Placeholder,

    #[error("OPENAI_API_KEY does not look like an API key (expected prefix 'sk-')")]
    BadPrefix,
}

/// Errors from the language model API.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API key unavailable: {0}")]
    Credential(#[from] CredentialError),

    #[error("API quota exhausted, check the account balance")]
    QuotaExceeded,

    #[error("API key rejected, check OPENAI_API_KEY")]
    InvalidApiKey,

    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to reach the API: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("API returned an unreadable response: {0}")]
    InvalidResponse(String),

    #[error("API returned an empty message")]
    EmptyResponse,
}

/// Errors from running git through a command runner.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to run git {operation}: {source}")]
    SpawnFailed {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {operation} failed: {stderr}")]
    CommandFailed { operation: String, stderr: String },
}

/// Errors that end the commit workflow.
#[derive(Error, Debug)]
pub enum AssistError {
    #[error("Git is not installed or not on PATH")]
    GitNotInstalled,

    #[error("The current directory is not inside a git work tree")]
    NotARepository,

    #[error(transparent)]
    Git(#[from] GitError),

    #[error("No staged changes to commit")]
    NothingStaged,

    #[error("Could not determine the current branch")]
    NoCurrentBranch,

    #[error("Merge conflict while pulling {remote}/{branch}, resolve it manually and retry")]
    MergeConflict {
        remote: String,
        branch: String,
        files: Vec<String>,
    },

    #[error("git pull failed: {0}")]
    PullFailed(String),

    #[error("git push failed: {0}")]
    PushFailed(String),

    #[error("Failed to set upstream branch: {0}")]
    UpstreamFailed(String),

    #[error(transparent)]
    Prompt(#[from] PromptError),
}

/// Errors from asking the operator a question.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Terminal interaction failed: {0}")]
    Interaction(#[from] dialoguer::Error),

    #[error("No scripted answer left for prompt '{0}'")]
    ScriptExhausted(String),

    #[error("Scripted answer for prompt '{prompt}' is not a {expected}")]
    UnexpectedAnswer {
        prompt: String,
        expected: &'static str,
    },
}
