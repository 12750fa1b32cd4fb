//! Git operations over a [`CommandRunner`].
//!
//! All operations shell out to the system `git` binary, inheriting the user's
//! existing git config, SSH agent, and credential store.

use std::fmt;

use tracing::debug;

use crate::error::GitError;
use crate::runner::{CommandOutput, CommandRunner};

/// Kind of change reported by `git status --porcelain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Modified,
    Added,
    Deleted,
    Renamed,
    Untracked,
    Other,
}

impl ChangeKind {
    /// Classify a two-character porcelain status code.
    pub fn from_code(code: &str) -> Self {
        if code == "??" {
            ChangeKind::Untracked
        } else if code.contains('M') {
            ChangeKind::Modified
        } else if code.contains('A') {
            ChangeKind::Added
        } else if code.contains('D') {
            ChangeKind::Deleted
        } else if code.contains('R') {
            ChangeKind::Renamed
        } else {
            ChangeKind::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Modified => "Modified",
            ChangeKind::Added => "Added",
            ChangeKind::Deleted => "Deleted",
            ChangeKind::Renamed => "Renamed",
            ChangeKind::Untracked => "Untracked",
            ChangeKind::Other => "Changed",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of `git status --porcelain`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    /// Raw two-character status code, e.g. `" M"` or `"??"`.
    pub code: String,
    /// Path to stage. For renames this is the new path.
    pub path: String,
    pub kind: ChangeKind,
}

/// Which changes `git add` should pick up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageScope {
    /// `git add .`
    All,
    /// `git add -u`
    Tracked,
    /// `git add -- <paths>`
    Paths(Vec<String>),
}

/// Parse `git status --porcelain` (v1) output.
///
/// Leading spaces are significant (`" M"` is an unstaged modification), so
/// lines are never trimmed on the left.
pub fn parse_porcelain(output: &str) -> Vec<StatusEntry> {
    output
        .lines()
        .filter(|line| line.len() > 3)
        .filter_map(|line| {
            let code = line.get(..2)?;
            let rest = line.get(3..)?.trim_end();
            let path = match rest.split_once(" -> ") {
                Some((_, new)) => new,
                None => rest,
            };
            Some(StatusEntry {
                code: code.to_string(),
                path: unquote(path),
                kind: ChangeKind::from_code(code),
            })
        })
        .collect()
}

/// Undo the C-style quoting git applies to paths with special characters.
///
/// With `core.quotePath` (the default) every non-ASCII byte is written as a
/// three-digit octal escape, so escapes are collected as raw bytes and the
/// result decoded as UTF-8 at the end.
fn unquote(path: &str) -> String {
    let Some(inner) = path.strip_prefix('"').and_then(|p| p.strip_suffix('"')) else {
        return path.to_string();
    };

    let bytes = inner.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'\\' || i + 1 >= bytes.len() {
            out.push(bytes[i]);
            i += 1;
            continue;
        }

        let escaped = bytes[i + 1];
        match escaped {
            b'0'..=b'7' => {
                let digits = bytes[i + 1..]
                    .iter()
                    .take(3)
                    .take_while(|b| (b'0'..=b'7').contains(*b))
                    .count();
                let value = bytes[i + 1..i + 1 + digits]
                    .iter()
                    .fold(0u32, |acc, d| acc * 8 + u32::from(d - b'0'));
                out.push(value as u8);
                i += 1 + digits;
                continue;
            }
            b'a' => out.push(0x07),
            b'b' => out.push(0x08),
            b't' => out.push(b'\t'),
            b'n' => out.push(b'\n'),
            b'v' => out.push(0x0b),
            b'f' => out.push(0x0c),
            b'r' => out.push(b'\r'),
            other => out.push(other),
        }
        i += 2;
    }

    String::from_utf8_lossy(&out).into_owned()
}

/// Does a failed command's output look like a merge conflict?
pub fn mentions_conflict(output: &CommandOutput) -> bool {
    [&output.stdout, &output.stderr]
        .iter()
        .any(|text| text.contains("CONFLICT") || text.contains("conflict"))
}

/// Does a failed push say the branch has no upstream?
pub fn mentions_no_upstream(output: &CommandOutput) -> bool {
    output.stderr.contains("no upstream branch")
}

/// Thin typed wrapper around the `git` executable.
pub struct Git<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
}

impl<'a, R: CommandRunner + ?Sized> Git<'a, R> {
    pub fn new(runner: &'a R) -> Self {
        Self { runner }
    }

    /// Whether a `git` executable is on `PATH`.
    pub fn is_installed(&self) -> bool {
        self.runner.locate("git").is_some()
    }

    /// Run git and return its output regardless of exit status.
    pub fn exec(&self, args: &[&str]) -> Result<CommandOutput, GitError> {
        let owned: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        debug!("git {}", owned.join(" "));
        self.runner
            .run("git", &owned)
            .map_err(|source| GitError::SpawnFailed {
                operation: operation_name(args),
                source,
            })
    }

    /// Run git and return stdout, failing on non-zero exit.
    fn checked(&self, args: &[&str]) -> Result<String, GitError> {
        let output = self.exec(args)?;
        if !output.success() {
            return Err(GitError::CommandFailed {
                operation: operation_name(args),
                stderr: output.stderr.trim().to_string(),
            });
        }
        Ok(output.stdout)
    }

    pub fn is_work_tree(&self) -> Result<bool, GitError> {
        let output = self.exec(&["rev-parse", "--is-inside-work-tree"])?;
        Ok(output.success() && output.stdout.trim() == "true")
    }

    /// Raw `git status --porcelain` text.
    pub fn status_porcelain(&self) -> Result<String, GitError> {
        self.checked(&["status", "--porcelain"])
    }

    pub fn status(&self) -> Result<Vec<StatusEntry>, GitError> {
        Ok(parse_porcelain(&self.status_porcelain()?))
    }

    pub fn stage(&self, scope: &StageScope) -> Result<(), GitError> {
        match scope {
            StageScope::All => self.checked(&["add", "."])?,
            StageScope::Tracked => self.checked(&["add", "-u"])?,
            StageScope::Paths(paths) => {
                let mut args = vec!["add", "--"];
                args.extend(paths.iter().map(String::as_str));
                self.checked(&args)?
            }
        };
        Ok(())
    }

    pub fn staged_diff(&self) -> Result<String, GitError> {
        self.checked(&["diff", "--cached"])
    }

    pub fn commit(&self, message: &str) -> Result<(), GitError> {
        self.checked(&["commit", "-m", message])?;
        Ok(())
    }

    pub fn remotes(&self) -> Result<Vec<String>, GitError> {
        let stdout = self.checked(&["remote"])?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect())
    }

    /// Current branch name, `None` on a detached HEAD.
    pub fn current_branch(&self) -> Result<Option<String>, GitError> {
        let output = self.exec(&["branch", "--show-current"])?;
        let name = output.stdout.trim();
        if !output.success() || name.is_empty() {
            return Ok(None);
        }
        Ok(Some(name.to_string()))
    }

    pub fn remote_branch_exists(&self, remote: &str, branch: &str) -> Result<bool, GitError> {
        let output = self.exec(&["ls-remote", "--heads", remote, branch])?;
        Ok(output.success() && !output.stdout.trim().is_empty())
    }

    /// `git pull <remote> <branch>`; the caller classifies failures.
    pub fn pull(&self, remote: &str, branch: &str) -> Result<CommandOutput, GitError> {
        self.exec(&["pull", remote, branch])
    }

    /// `git push [-u] <remote> <branch>`; the caller classifies failures.
    pub fn push(
        &self,
        remote: &str,
        branch: &str,
        set_upstream: bool,
    ) -> Result<CommandOutput, GitError> {
        if set_upstream {
            self.exec(&["push", "-u", remote, branch])
        } else {
            self.exec(&["push", remote, branch])
        }
    }

    /// Paths with unresolved merge conflicts.
    pub fn conflicted_files(&self) -> Result<Vec<String>, GitError> {
        let stdout = self.checked(&["diff", "--name-only", "--diff-filter=U"])?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect())
    }
}

fn operation_name(args: &[&str]) -> String {
    args.first().copied().unwrap_or("").to_string()
}
