//! Commit message drafting through a chat-completion API.

pub mod client;
pub mod credential;
pub mod prompt;

pub use client::{CommitMessageGenerator, OpenAiClient};
pub use credential::Credential;
pub use prompt::{MAX_DIFF_CHARS, build_user_prompt, truncate_chars};
