//! Environment-driven settings shared by both flows.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, warn};

/// Default HTTP request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable to override the HTTP timeout.
pub const TIMEOUT_ENV_VAR: &str = "PF_HTTP_TIMEOUT";

/// Environment variable overriding the chat-completion API base URL.
pub const BASE_URL_ENV_VAR: &str = "OPENAI_BASE_URL";

/// Environment variable overriding the chat model.
pub const MODEL_ENV_VAR: &str = "PF_OPENAI_MODEL";

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Get the configured HTTP timeout.
///
/// Logs a warning and falls back to the default if the variable is set
/// but does not hold a whole number of seconds.
pub fn http_timeout() -> Duration {
    match env::var(TIMEOUT_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_ENV_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
        _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}

/// Chat-completion API base URL, without a trailing slash.
pub fn openai_base_url() -> String {
    non_empty_var(BASE_URL_ENV_VAR)
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

pub fn openai_model() -> String {
    non_empty_var(MODEL_ENV_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string())
}

/// Build the HTTP client used for sample fetching and API calls.
pub fn http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(http_timeout())
        .user_agent(concat!("pf-cli/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Load `.env` from the working directory or its parents.
///
/// Returns whether a file was loaded. A missing file is normal; a malformed
/// one is reported and skipped.
pub fn load_dotenv() -> bool {
    report_env_file(dotenvy::dotenv())
}

/// Load a specific env file, with the same reporting as [`load_dotenv`].
pub fn load_env_file(path: &Path) -> bool {
    report_env_file(dotenvy::from_path(path).map(|()| path.to_path_buf()))
}

fn report_env_file(result: Result<PathBuf, dotenvy::Error>) -> bool {
    match result {
        Ok(path) => {
            debug!("Loaded environment from {}", path.display());
            true
        }
        Err(e) if e.not_found() => false,
        Err(e) => {
            warn!("Ignoring unreadable .env file: {}", e);
            false
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_timeout_default() {
        temp_env::with_var_unset(TIMEOUT_ENV_VAR, || {
            assert_eq!(http_timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        });
    }

    #[test]
    fn test_http_timeout_from_env() {
        temp_env::with_var(TIMEOUT_ENV_VAR, Some("5"), || {
            assert_eq!(http_timeout(), Duration::from_secs(5));
        });
    }

    #[test]
    fn test_http_timeout_invalid_env_uses_default() {
        temp_env::with_var(TIMEOUT_ENV_VAR, Some("soon"), || {
            assert_eq!(http_timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        });
    }

    #[test]
    fn test_base_url_strips_trailing_slash() {
        temp_env::with_var(BASE_URL_ENV_VAR, Some("http://localhost:8080/v1/"), || {
            assert_eq!(openai_base_url(), "http://localhost:8080/v1");
        });
    }

    #[test]
    fn test_base_url_default() {
        temp_env::with_var_unset(BASE_URL_ENV_VAR, || {
            assert_eq!(openai_base_url(), DEFAULT_BASE_URL);
        });
    }

    #[test]
    fn test_load_env_file_missing_is_not_loaded() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!load_env_file(&dir.path().join(".env")));
    }

    #[test]
    #[serial_test::serial]
    fn test_load_env_file_sets_variables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "PF_CLI_DOTENV_TEST=loaded\n").unwrap();

        temp_env::with_var_unset("PF_CLI_DOTENV_TEST", || {
            assert!(load_env_file(&path));
            assert_eq!(env::var("PF_CLI_DOTENV_TEST").unwrap(), "loaded");
        });
    }

    #[test]
    #[serial_test::serial]
    fn test_load_env_file_malformed_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "THIS LINE HAS NO ASSIGNMENT\n").unwrap();

        assert!(!load_env_file(&path));
    }

    #[test]
    fn test_model_blank_env_uses_default() {
        temp_env::with_var(MODEL_ENV_VAR, Some("  "), || {
            assert_eq!(openai_model(), DEFAULT_MODEL);
        });
    }
}
