//! Per-invocation environment facts, resolved once at startup.

use std::env;
use std::io;
use std::path::PathBuf;

use crate::runner::CommandRunner;

/// Editor launcher offered after a type file is written.
pub const EDITOR_COMMAND: &str = "code";

/// Paths and tools the flows need, passed explicitly instead of read from
/// globals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    pub current_dir: PathBuf,
    pub desktop_dir: PathBuf,
    /// Resolved editor executable, if one is on `PATH`.
    pub editor: Option<PathBuf>,
}

impl Context {
    /// Resolve the context from the process environment.
    pub fn detect<R: CommandRunner + ?Sized>(runner: &R) -> io::Result<Self> {
        let current_dir = env::current_dir()?;
        let desktop_dir = home_dir()
            .map(|home| home.join("Desktop"))
            .unwrap_or_else(|| current_dir.clone());

        Ok(Self {
            current_dir,
            desktop_dir,
            editor: runner.locate(EDITOR_COMMAND),
        })
    }
}

fn home_dir() -> Option<PathBuf> {
    ["HOME", "USERPROFILE"]
        .iter()
        .find_map(|name| env::var_os(name).filter(|v| !v.is_empty()))
        .map(PathBuf::from)
}
