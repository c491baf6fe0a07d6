//! Top-level control
//!
//! Resolve a token, run the deploy, report. Every failure ends in exit
//! code 1.
use crate::config::Settings;
use crate::runner::{run_deploy, CommandRunner, DeployOutcome};
use crate::token::{resolve_token, TokenError, TokenSource};
use indoc::formatdoc;
use nu_ansi_term::Color::{Cyan, Green, Red, Yellow};
use std::process::ExitCode;

const HEADER: &str = "\
╔═══════════════════════════════════════════════════════╗
║  Firebase Hosting Deployment                          ║
╚═══════════════════════════════════════════════════════╝";

/// Where the report goes. Quiet output prints nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    quiet: bool,
}

impl Output {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn line(&self, s: &str) {
        if !self.quiet {
            println!("{}", s);
        }
    }
}

fn usage(err: &TokenError) -> String {
    formatdoc!(
        "
        {title}
          ({err})

        Please provide token as argument:
          {pkg_name} YOUR_TOKEN_HERE

        To get a token, run:
          firebase login:ci
        ",
        title = Red.bold().paint("❌ No token found!"),
        err = err,
        pkg_name = env!("CARGO_PKG_NAME"),
    )
}

fn success_banner(settings: &Settings) -> String {
    formatdoc!(
        "
        {title}

        Your app is live at:
          {url}
        ",
        title = Green.bold().paint("✅ DEPLOYMENT SUCCESSFUL!"),
        url = Cyan.paint(settings.site_url.as_str()),
    )
}

fn failure_banner(outcome: &DeployOutcome) -> String {
    let message = match outcome {
        DeployOutcome::Failed { code: Some(code) } => {
            format!("❌ Deployment failed with exit code {}", code)
        }
        _ => "❌ Deployment failed".to_string(),
    };
    Red.bold().paint(message).to_string()
}

/// Resolve the token, deploy and report.
///
/// `argument` is the token given on the command line, if any.
pub fn run<R>(settings: &Settings, argument: Option<String>, runner: &R, out: &Output) -> ExitCode
where
    R: CommandRunner + ?Sized,
{
    out.line(HEADER);
    out.line("");

    let resolved = match resolve_token(argument, &settings.tokens_file, &settings.project) {
        Ok(resolved) => resolved,
        Err(err) => {
            log::warn!("token lookup failed: {}", err);
            out.line(&usage(&err));
            return ExitCode::FAILURE;
        }
    };
    if let TokenSource::File { .. } = resolved.source {
        out.line(&format!(
            "{} {}",
            Green.paint("✅ Found token in"),
            resolved.source
        ));
    }

    out.line(&format!("📁 Project: {}", settings.project));
    out.line(&format!("📂 Directory: {}", settings.workdir.display()));
    out.line(&format!("Using token: {}", resolved.token.preview()));

    match run_deploy(settings, &resolved.token, runner, out) {
        Ok(DeployOutcome::Succeeded) => {
            log::info!("deployed {} to {}", settings.project, settings.site_url);
            out.line(&success_banner(settings));
            ExitCode::SUCCESS
        }
        Ok(outcome) => {
            log::info!("deploy of {}: {}", settings.project, outcome);
            out.line(&failure_banner(&outcome));
            ExitCode::FAILURE
        }
        Err(err) => {
            log::error!("{}", err);
            out.line(&format!(
                "{} {}",
                Red.bold().paint("❌ Deployment error:"),
                Yellow.paint(err.to_string())
            ));
            ExitCode::FAILURE
        }
    }
}
