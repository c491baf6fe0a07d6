//! Unix specific path expansion
//! This module is enabled on every OS except Windows.
//! `${VARNAME}` references are replaced with the variable's value.
use anyhow::Context as _;
use anyhow::{bail, Result};
use std::env;
use std::path::PathBuf;

/// XDG Base Directory default for a variable that is not set.
/// https://specifications.freedesktop.org/basedir-spec/basedir-spec-latest.html
///
/// | Variable | Default Value |
/// |----------|---------------|
/// | XDG_CONFIG_HOME | $HOME/.config |
/// | XDG_DATA_HOME | $HOME/.local/share |
fn xdg_default(name: &str) -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    match name {
        "XDG_CONFIG_HOME" => Some(home.join(".config")),
        "XDG_DATA_HOME" => Some(home.join(".local").join("share")),
        _ => None,
    }
}

fn lookup(name: &str) -> Result<String> {
    if let Ok(value) = env::var(name) {
        if !value.is_empty() {
            return Ok(value);
        }
    }
    let path = xdg_default(name).with_context(|| format!("env var {} not found", name))?;
    Ok(path.to_string_lossy().into_owned())
}

/// Expand `${VARNAME}` references in `s`.
/// A `$` not followed by `{` is kept as is.
pub fn expand_env_var(s: &str) -> Result<String> {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            bail!("invalid env var name: {}", after);
        };
        let name = &after[..end];
        if name.is_empty() {
            bail!("variable name is empty");
        }
        result.push_str(&lookup(name)?);
        rest = &after[end + 1..];
    }
    result.push_str(rest);
    Ok(result)
}
