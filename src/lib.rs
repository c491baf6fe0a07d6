pub mod config;
pub mod deploy;
mod path;
pub mod runner;
pub mod token;

pub use deploy::{run, Output};
pub use runner::{run_deploy, CommandRunner, SystemRunner};
pub use token::resolve_token;
