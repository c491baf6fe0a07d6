//! Windows specific path expansion
//! `%VARNAME%` references are replaced with the variable's value,
//! matching how cmd.exe expands them.
use anyhow::Context as _;
use anyhow::{bail, Result};
use std::env;

/// Expand `%VARNAME%` references in `s`.
pub fn expand_env_var(s: &str) -> Result<String> {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(start) = rest.find('%') {
        result.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find('%') else {
            bail!("invalid environment variable: {}", s);
        };
        let name = &after[..end];
        if name.is_empty() {
            bail!("variable name is empty");
        }
        let value = env::var(name).with_context(|| format!("env var {} not found", name))?;
        result.push_str(&value);
        rest = &after[end + 1..];
    }
    result.push_str(rest);
    Ok(result)
}
