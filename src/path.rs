#[cfg(not(target_os = "windows"))]
mod unix;

#[cfg(not(target_os = "windows"))]
pub use crate::path::unix::expand_env_var;

#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "windows")]
pub use crate::path::windows::expand_env_var;

use anyhow::{Context as _, Result};
use std::path::PathBuf;

/// Expand environment references and a leading `~` into a concrete path.
pub fn expand_path(s: &str) -> Result<PathBuf> {
    let expanded = expand_env_var(s)?;
    if expanded == "~" {
        return dirs::home_dir().context("Can not determine home directory");
    }
    if let Some(rest) = expanded
        .strip_prefix("~/")
        .or_else(|| expanded.strip_prefix("~\\"))
    {
        let home = dirs::home_dir().context("Can not determine home directory")?;
        return Ok(home.join(rest));
    }
    Ok(PathBuf::from(expanded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("~", "")]
    #[case("~/.config/firebase/tokens.json", ".config/firebase/tokens.json")]
    fn test_expand_path_tilde(#[case] s: &str, #[case] rest: &str) -> Result<()> {
        let home = dirs::home_dir().unwrap();
        let expected = if rest.is_empty() {
            home
        } else {
            home.join(rest)
        };
        assert_eq!(expand_path(s)?, expected);
        Ok(())
    }

    #[test]
    fn test_expand_path_plain() -> Result<()> {
        assert_eq!(expand_path("site/public")?, PathBuf::from("site/public"));
        Ok(())
    }

    #[test]
    fn test_expand_path_tilde_in_middle_is_literal() -> Result<()> {
        assert_eq!(expand_path("a/~/b")?, PathBuf::from("a/~/b"));
        Ok(())
    }
}
