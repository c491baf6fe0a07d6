#![allow(dead_code)]
use anyhow::Result;
use assert_cmd::Command;
use assert_fs::fixture::ChildPath;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use hostdeploy::config::{AppConfig, OsPath};
use std::path::Path;

pub const PROJECT: &str = "app-pilot-60ce3";
pub const SITE_URL: &str = "https://app-pilot-60ce3.web.app";

pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?.into_persistent_if(false))
}

fn os_path(path: &Path) -> OsPath {
    OsPath::all(&path.to_string_lossy())
}

/// Write `config.yaml` pointing at `tokens.json` and the `site` directory
/// inside `temp`, running `command` as the hosting CLI.
pub fn create_app_config(temp: &TempDir, command: &[String]) -> Result<ChildPath> {
    let site = temp.child("site");
    site.create_dir_all()?;

    let config = AppConfig {
        project: PROJECT.to_string(),
        site_url: SITE_URL.to_string(),
        tokens_file: os_path(temp.child("tokens.json").path()),
        workdir: Some(os_path(site.path())),
        command: command.to_vec(),
        target: "hosting".to_string(),
    };

    let config_file = temp.child("config.yaml");
    config_file.write_str(&serde_yml::to_string(&config)?)?;
    Ok(config_file)
}

pub fn write_tokens(temp: &TempDir, content: &str) -> Result<ChildPath> {
    let tokens = temp.child("tokens.json");
    tokens.write_str(content)?;
    Ok(tokens)
}

/// A stand-in for the hosting CLI. It echoes its arguments and working
/// directory, touches `ran` next to itself and exits with `code`.
/// Returns the `command` to put in the config.
#[cfg(unix)]
pub fn create_fake_cli(temp: &TempDir, code: i32, stderr: &str) -> Result<Vec<String>> {
    let cli = temp.child("firebase");
    let marker = temp.child("ran");
    cli.write_str(&indoc::formatdoc!(
        r#"
        #!/bin/sh
        touch "{marker}"
        echo "args: $*"
        echo "cwd: $(pwd -P)"
        if [ -n "{stderr}" ]; then
            echo "{stderr}" >&2
        fi
        exit {code}
        "#,
        marker = marker.path().display(),
        stderr = stderr,
        code = code,
    ))?;
    Ok(vec![
        "sh".to_string(),
        cli.path().to_string_lossy().into_owned(),
    ])
}

pub fn fake_cli_ran(temp: &TempDir) -> bool {
    temp.child("ran").path().exists()
}

pub fn create_cmd(config_file: &ChildPath) -> Result<Command> {
    let mut cmd = Command::cargo_bin("hostdeploy")?;
    cmd.arg("--config").arg(config_file.path());
    Ok(cmd)
}
