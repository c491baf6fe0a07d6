//! Token resolution
//!
//! A token comes from the command line, or failing that from the JSON
//! file the hosting CLI keeps, which maps project ids to tokens.
use core::fmt::{self, Display};
use indexmap::IndexMap;
use serde_json::Value;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const PREVIEW_CHARS: usize = 20;

/// Bearer credential for the hosting API. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// First 20 characters followed by `...`.
    pub fn preview(&self) -> String {
        let head: String = self.0.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({})", self.preview())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    Argument,
    File { path: PathBuf, project: String },
}

impl Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenSource::Argument => write!(f, "argument"),
            TokenSource::File { path, project } => {
                write!(f, "{} ({})", path.display(), project)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedToken {
    pub token: Token,
    pub source: TokenSource,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("{} does not exist", .path.display())]
    Missing { path: PathBuf },
    #[error("can not read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is not a JSON object of project to token: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{} contains no tokens", .path.display())]
    Empty { path: PathBuf },
    #[error("token of {project} in {} is empty", .path.display())]
    EmptyToken { path: PathBuf, project: String },
    #[error("token of {project} in {} is not a string", .path.display())]
    NotAString { path: PathBuf, project: String },
}

/// Read the token file and pick a token for `project`.
///
/// The entry for `project` wins. Otherwise the first entry in file order is
/// used, and a warning names the project it belongs to.
pub fn read_token_file(path: &Path, project: &str) -> Result<ResolvedToken, TokenError> {
    log::trace!("reading {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => TokenError::Missing {
            path: path.to_path_buf(),
        },
        _ => TokenError::Unreadable {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let mut tokens: IndexMap<String, Value> =
        serde_json::from_str(&content).map_err(|source| TokenError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
    log::trace!("{} has {} tokens", path.display(), tokens.len());

    let (project, token) = match tokens.shift_remove_entry(project) {
        Some(entry) => entry,
        None => {
            let entry = tokens.shift_remove_index(0).ok_or_else(|| TokenError::Empty {
                path: path.to_path_buf(),
            })?;
            log::warn!(
                "no token for {} in {}, using the token of {}",
                project,
                path.display(),
                entry.0
            );
            entry
        }
    };

    // only the chosen entry has to be a usable token
    let token = match token {
        Value::String(token) if token.is_empty() => {
            return Err(TokenError::EmptyToken {
                path: path.to_path_buf(),
                project,
            })
        }
        Value::String(token) => token,
        _ => {
            return Err(TokenError::NotAString {
                path: path.to_path_buf(),
                project,
            })
        }
    };

    Ok(ResolvedToken {
        token: Token::new(token),
        source: TokenSource::File {
            path: path.to_path_buf(),
            project,
        },
    })
}

/// A non-empty argument is taken verbatim and the file is not read.
pub fn resolve_token(
    argument: Option<String>,
    tokens_file: &Path,
    project: &str,
) -> Result<ResolvedToken, TokenError> {
    match argument.filter(|token| !token.is_empty()) {
        Some(token) => Ok(ResolvedToken {
            token: Token::new(token),
            source: TokenSource::Argument,
        }),
        None => read_token_file(tokens_file, project),
    }
}
