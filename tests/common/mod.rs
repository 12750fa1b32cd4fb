//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use pf_cli::llm::CommitMessageGenerator;
use pf_cli::{CommandOutput, CommandRunner, Context, LlmError};

/// Command runner that answers from a table keyed by the full command line
/// (`"git status --porcelain"`) and records every call.
///
/// Unlisted commands succeed with empty output.
pub struct FakeRunner {
    responses: HashMap<String, CommandOutput>,
    installed: Vec<String>,
    calls: RefCell<Vec<String>>,
}

impl FakeRunner {
    /// A runner with git installed and the current directory inside a work tree.
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            installed: vec!["git".to_string()],
            calls: RefCell::new(Vec::new()),
        }
        .respond("git rev-parse --is-inside-work-tree", CommandOutput::ok("true\n"))
    }

    pub fn respond(mut self, command: &str, output: CommandOutput) -> Self {
        self.responses.insert(command.to_string(), output);
        self
    }

    pub fn installed(mut self, programs: &[&str]) -> Self {
        self.installed = programs.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Number of calls whose command line starts with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
        let mut line = program.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        self.calls.borrow_mut().push(line.clone());
        Ok(self
            .responses
            .get(&line)
            .cloned()
            .unwrap_or_else(|| CommandOutput::ok("")))
    }

    fn locate(&self, program: &str) -> Option<PathBuf> {
        self.installed
            .iter()
            .any(|p| p == program)
            .then(|| PathBuf::from(format!("/usr/bin/{}", program)))
    }
}

/// A repository with one modified file staged on `main`, tracking `origin/main`.
pub fn dirty_repo() -> FakeRunner {
    FakeRunner::new()
        .respond("git status --porcelain", CommandOutput::ok(" M src/lib.rs\n"))
        .respond(
            "git diff --cached",
            CommandOutput::ok("diff --git a/src/lib.rs b/src/lib.rs\n+pub fn hello() {}\n"),
        )
        .respond("git remote", CommandOutput::ok("origin\n"))
        .respond("git branch --show-current", CommandOutput::ok("main\n"))
        .respond(
            "git ls-remote --heads origin main",
            CommandOutput::ok("0123abcd\trefs/heads/main\n"),
        )
        .respond("git pull origin main", CommandOutput::ok("Already up to date.\n"))
}

/// Generator with a fixed reply, counting calls.
pub struct FakeGenerator {
    reply: Option<String>,
    calls: AtomicUsize,
}

impl FakeGenerator {
    pub fn replying(message: &str) -> Self {
        Self {
            reply: Some(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always fails as if the service were down.
    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CommitMessageGenerator for FakeGenerator {
    async fn generate(&self, _status: &str, _diff: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone().ok_or(LlmError::EmptyResponse)
    }
}

/// Context rooted at `dir` with no editor.
pub fn test_context(dir: &Path) -> Context {
    Context {
        current_dir: dir.to_path_buf(),
        desktop_dir: dir.join("Desktop"),
        editor: None,
    }
}

/// Create a temporary directory for test output.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}
