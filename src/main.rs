use anyhow::Result;
use clap::{ArgGroup, Parser};
use hostdeploy::config::{self, Overrides};
use hostdeploy::{Output, SystemRunner};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[clap(
    name = env!("CARGO_PKG_NAME"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
)]
#[clap(group(
    ArgGroup::new("log")
        .args(["quiet", "verbose", "debug", "trace"])
        .multiple(false)
))]
struct Args {
    /// Hosting CI token. Read from the token file when omitted.
    token: Option<String>,

    /// Config file path. Defaults to the per-user config.
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Project id, overrides the config file.
    #[clap(long)]
    project: Option<String>,

    /// Directory to run the hosting CLI in, overrides the config file.
    #[clap(short, long)]
    workdir: Option<PathBuf>,

    /// Print nothing.
    #[clap(short, long, default_value_t = false)]
    quiet: bool,

    /// Print info logs.
    #[clap(short, long, default_value_t = false)]
    verbose: bool,

    /// Print debug logs.
    #[clap(short, long, default_value_t = false)]
    debug: bool,

    /// Print trace logs.
    #[clap(short, long, default_value_t = false)]
    trace: bool,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Off
        } else if self.trace {
            LevelFilter::Trace
        } else if self.debug {
            LevelFilter::Debug
        } else if self.verbose {
            LevelFilter::Info
        } else {
            LevelFilter::Warn
        }
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // stdout carries the report, logs go to stderr
    TermLogger::init(
        args.log_level(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let app_config = match &args.config {
        Some(path) => config::load_app_config_with_path(path)?,
        None => config::load_app_config()?,
    };
    let overrides = Overrides {
        project: args.project,
        workdir: args.workdir,
    };
    let settings = app_config.resolve(&overrides)?;
    log::debug!("{:?}", settings);

    Ok(hostdeploy::run(
        &settings,
        args.token,
        &SystemRunner,
        &Output::new(args.quiet),
    ))
}
