//! Run configuration for type generation: validation and collection.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex_lite::Regex;
use reqwest::Url;

use crate::context::Context;
use crate::error::TypegenError;
use crate::prompt::Prompter;

pub const DEFAULT_TYPE_NAME: &str = "ApiTypes";

static TYPE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9]*$").expect("Invalid regex"));

/// Validated inputs for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypegenConfig {
    pub url: Url,
    pub name: String,
    /// Destination directory; created on write if missing.
    pub path: PathBuf,
}

impl TypegenConfig {
    pub fn new(url: &str, name: &str, path: PathBuf) -> Result<Self, TypegenError> {
        Ok(Self {
            url: validate_url(url)?,
            name: validate_type_name(name)?,
            path,
        })
    }

    /// Build from command-line flags, defaulting the name and path.
    pub fn from_flags(
        ctx: &Context,
        url: &str,
        name: Option<&str>,
        path: Option<&Path>,
    ) -> Result<Self, TypegenError> {
        Self::new(
            url,
            name.unwrap_or(DEFAULT_TYPE_NAME),
            path.map(Path::to_path_buf)
                .unwrap_or_else(|| ctx.current_dir.clone()),
        )
    }
}

/// Parse an absolute URL.
pub fn validate_url(input: &str) -> Result<Url, TypegenError> {
    Url::parse(input.trim()).map_err(|e| TypegenError::InvalidUrl {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

pub fn validate_type_name(input: &str) -> Result<String, TypegenError> {
    if TYPE_NAME_RE.is_match(input) {
        Ok(input.to_string())
    } else {
        Err(TypegenError::InvalidTypeName(input.to_string()))
    }
}

/// An operator-supplied directory must already exist.
pub fn validate_directory(input: &str) -> Result<PathBuf, TypegenError> {
    let path = PathBuf::from(input.trim());
    if path.is_dir() {
        Ok(path)
    } else {
        Err(TypegenError::InvalidPath(path))
    }
}

/// Where to save the generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Destination {
    Desktop,
    Current,
    Custom,
}

impl Destination {
    const ALL: [Destination; 3] = [Destination::Desktop, Destination::Current, Destination::Custom];

    fn label(&self) -> &'static str {
        match self {
            Destination::Desktop => "Desktop",
            Destination::Current => "Current directory",
            Destination::Custom => "Custom path",
        }
    }
}

/// Ask the operator for URL, type name and destination.
pub fn collect_interactive<P: Prompter + ?Sized>(
    ctx: &Context,
    prompter: &P,
) -> Result<TypegenConfig, TypegenError> {
    let url = prompter.input("API URL", None, &|input: &str| {
        validate_url(input)
            .map(|_| ())
            .map_err(|_| "Invalid URL, enter a full URL such as https://example.com/data".to_string())
    })?;

    let name = prompter.input("Type name", Some(DEFAULT_TYPE_NAME), &|input: &str| {
        validate_type_name(input)
            .map(|_| ())
            .map_err(|_| "Type names start with a letter and contain only letters and digits".to_string())
    })?;

    let labels: Vec<String> = Destination::ALL
        .iter()
        .map(|d| d.label().to_string())
        .collect();
    let choice = prompter.select("Save location", &labels, 0)?;

    let path = match Destination::ALL[choice] {
        Destination::Desktop => ctx.desktop_dir.clone(),
        Destination::Current => ctx.current_dir.clone(),
        Destination::Custom => {
            let default = ctx.current_dir.display().to_string();
            let raw = prompter.input("Save path", Some(&default), &|input: &str| {
                validate_directory(input)
                    .map(|_| ())
                    .map_err(|_| "Directory does not exist".to_string())
            })?;
            validate_directory(&raw)?
        }
    };

    TypegenConfig::new(&url, &name, path)
}
