//! Prompt construction for commit message drafting.

/// Maximum characters of the staged diff sent to the model.
pub const MAX_DIFF_CHARS: usize = 3_000;

pub const SYSTEM_PROMPT: &str = "You write git commit messages. Given a git status summary and a \
staged diff, reply with exactly one commit message line and nothing else.

Rules:
1. At most 50 characters
2. Describe what changed accurately
3. A light touch of humor is fine, but stay professional
4. Start with a fitting emoji
5. Format: <emoji> <action>: <details>

Examples:
- 🐛 Fix: null pointer on user login
- ✨ Add: AI-generated commit messages
- 🎨 Refactor: restructure user service
- 📝 Docs: expand README usage section
- 🔧 Config: add lint rules";

/// Take at most `max_chars` characters, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Build the user message carrying the status summary and the diff.
pub fn build_user_prompt(status: &str, diff: &str) -> String {
    format!(
        "Write a commit message for these changes:\n\nGit Status:\n{}\n\nGit Diff:\n{}",
        status.trim_end(),
        truncate_chars(diff, MAX_DIFF_CHARS)
    )
}

/// Normalize a model reply into a single commit message.
///
/// Trims whitespace and strips one layer of wrapping quotes or backticks.
pub fn clean_reply(reply: &str) -> String {
    let trimmed = reply.trim();
    for quote in ['"', '\'', '`'] {
        if let Some(inner) = trimmed
            .strip_prefix(quote)
            .and_then(|s| s.strip_suffix(quote))
        {
            return inner.trim().to_string();
        }
    }
    trimmed.to_string()
}
