//! Application config
//!
//! Everything the deploy needs that is not the token itself lives here:
//! the project id, the public URL, where the token file is, where to run
//! the hosting CLI and how to invoke it.
use crate::path::expand_path;
use anyhow::{bail, ensure, Context as _, Result};
use cfg_if::cfg_if;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

cfg_if! {
    if #[cfg(target_os = "windows")] {
        const CURRENT_OS: &str = "Windows";
        fn current_os_path(path: &OsPath) -> Option<&String> {
            path.windows.as_ref()
        }
    } else if #[cfg(target_os = "macos")] {
        const CURRENT_OS: &str = "Mac";
        fn current_os_path(path: &OsPath) -> Option<&String> {
            path.mac.as_ref()
        }
    } else {
        const CURRENT_OS: &str = "Linux";
        fn current_os_path(path: &OsPath) -> Option<&String> {
            path.linux.as_ref()
        }
    }
}

/// A path given separately for each OS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsPath {
    pub windows: Option<String>,
    pub mac: Option<String>,
    pub linux: Option<String>,
}

impl OsPath {
    /// The same path on every OS.
    pub fn all(path: &str) -> Self {
        Self {
            windows: Some(path.to_string()),
            mac: Some(path.to_string()),
            linux: Some(path.to_string()),
        }
    }

    fn current(&self) -> Result<&str> {
        match current_os_path(self) {
            Some(path) => Ok(path.as_str()),
            None => bail!("{} Path not defined.", CURRENT_OS),
        }
    }

    pub fn to_pathbuf(&self) -> Result<PathBuf> {
        expand_path(self.current()?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Project id, also the preferred key in the token file.
    pub project: String,
    /// Where the site is served once deployed.
    pub site_url: String,
    /// JSON object of project id to token.
    pub tokens_file: OsPath,
    /// Directory the hosting CLI runs in. Current directory when absent.
    #[serde(default)]
    pub workdir: Option<OsPath>,
    /// Program and leading arguments, e.g. `["npx", "firebase"]`.
    pub command: Vec<String>,
    /// Hosting target passed to `--only`.
    pub target: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let tokens_file = OsPath {
            windows: Some("%USERPROFILE%\\.config\\firebase\\tokens.json".to_string()),
            mac: Some("${HOME}/.config/firebase/tokens.json".to_string()),
            linux: Some("${HOME}/.config/firebase/tokens.json".to_string()),
        };

        Self {
            project: "app-pilot-60ce3".to_string(),
            site_url: "https://app-pilot-60ce3.web.app".to_string(),
            tokens_file,
            workdir: None,
            command: vec!["firebase".to_string()],
            target: "hosting".to_string(),
        }
    }
}

/// Values given on the command line that win over the config file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub project: Option<String>,
    pub workdir: Option<PathBuf>,
}

/// Config with every path resolved for this machine.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub project: String,
    /// As configured, after validation.
    pub site_url: String,
    pub tokens_file: PathBuf,
    pub workdir: PathBuf,
    pub program: String,
    pub program_args: Vec<String>,
    pub target: String,
}

impl AppConfig {
    pub fn resolve(&self, overrides: &Overrides) -> Result<Settings> {
        let Some((program, program_args)) = self.command.split_first() else {
            bail!("command is empty.");
        };
        ensure!(!program.trim().is_empty(), "command program is empty.");
        ensure!(!self.target.trim().is_empty(), "target is empty.");

        let project = overrides
            .project
            .clone()
            .unwrap_or_else(|| self.project.clone());
        ensure!(!project.trim().is_empty(), "project is empty.");

        Url::parse(&self.site_url)
            .with_context(|| format!("Invalid site_url {:?}", self.site_url))?;

        let tokens_file = self
            .tokens_file
            .to_pathbuf()
            .context("Can not resolve tokens_file")?;

        let workdir = match (&overrides.workdir, &self.workdir) {
            (Some(dir), _) => dir.clone(),
            (None, Some(dir)) => dir.to_pathbuf().context("Can not resolve workdir")?,
            (None, None) => std::env::current_dir()?,
        };

        Ok(Settings {
            project,
            site_url: self.site_url.clone(),
            tokens_file,
            workdir: canonical_workdir(&workdir)?,
            program: program.clone(),
            program_args: program_args.to_vec(),
            target: self.target.clone(),
        })
    }
}

fn canonical_workdir(path: &Path) -> Result<PathBuf> {
    ensure!(path.exists(), "{} does not exist.", path.display());
    ensure!(path.is_dir(), "{} is not a directory.", path.display());
    Ok(dunce::canonicalize(path)?)
}

pub fn load_app_config() -> Result<AppConfig> {
    let config = confy::load(env!("CARGO_PKG_NAME"), "config")?;
    log::debug!(
        "config: {}",
        confy::get_configuration_file_path(env!("CARGO_PKG_NAME"), "config")?.display()
    );
    Ok(config)
}

pub fn load_app_config_with_path(path: &Path) -> Result<AppConfig> {
    ensure!(path.exists(), "{} does not exist.", path.display());
    ensure!(path.is_file(), "{} is not a file.", path.display());
    log::debug!("config: {}", path.display());
    Ok(confy::load_path(path)?)
}
