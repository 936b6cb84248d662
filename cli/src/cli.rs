use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};
use serde_json::Value;
use tracing::debug;

use crate::{error::CliError, registry::CommandRegistry};

#[derive(Debug, Parser)]
#[command(name = "command-config")]
#[command(about = "Manage a JSON key/value configuration file")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Root clap command with every registered command mounted.
    pub fn command_with(registry: &CommandRegistry) -> clap::Command {
        registry.augment(<Self as CommandFactory>::command())
    }

    pub fn from_matches(matches: &ArgMatches) -> Result<Self, CliError> {
        Ok(<Self as FromArgMatches>::from_arg_matches(matches)?)
    }

    pub fn run(&self, registry: &CommandRegistry, matches: &ArgMatches) -> Result<(), CliError> {
        match registry.dispatch(matches)? {
            Some(argv) => {
                let argv = Value::Object(argv);
                debug!("Final arguments: {}", argv);
                Ok(())
            }
            None => {
                // No subcommand provided, show help
                println!("command-config - manage a JSON key/value configuration file");
                println!("Commands: {}", registry.names().join(", "));
                println!("Run 'command-config --help' for usage information.");
                Ok(())
            }
        }
    }
}
