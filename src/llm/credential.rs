//! API key discovery and validation.
//!
//! Lookup order:
//! 1. OPENAI_API_KEY
//! 2. REACT_APP_OPENAI_API_KEY

use std::env;
use std::fmt;

use crate::error::CredentialError;

pub const PRIMARY_ENV_VAR: &str = "OPENAI_API_KEY";
pub const FALLBACK_ENV_VAR: &str = "REACT_APP_OPENAI_API_KEY";

/// Value shipped in example `.env` files.
const PLACEHOLDER: &str = "your-openai-api-key-here";
const KEY_PREFIX: &str = "sk-";

/// A validated API key.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Read and validate the key from the environment.
    pub fn from_env() -> Result<Self, CredentialError> {
        let raw = [PRIMARY_ENV_VAR, FALLBACK_ENV_VAR]
            .iter()
            .find_map(|name| env::var(name).ok().filter(|v| !v.is_empty()));

        match raw {
            Some(key) => Self::parse(&key),
            None => Err(CredentialError::Missing),
        }
    }

    /// Validate a raw key.
    pub fn parse(raw: &str) -> Result<Self, CredentialError> {
        let key = raw.trim();
        if key.is_empty() {
            return Err(CredentialError::Missing);
        }
        if key == PLACEHOLDER {
            return Err(CredentialError::Placeholder);
        }
        if !key.starts_with(KEY_PREFIX) {
            return Err(CredentialError::BadPrefix);
        }
        Ok(Self(key.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

// Keep the key out of logs and panics.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(sk-***)")
    }
}
