//! Mounting the config command on a clap command tree.

use crate::descriptor::CommandDescriptor;
use crate::handler::Argv;
use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgMatches, Command};
use serde_json::{Number, Value};

impl CommandDescriptor {
    /// Build the clap subcommand for this descriptor.
    pub fn clap_command(&self) -> Command {
        let config = self.handler.config();
        let about = self.describe.lines().next().unwrap_or_default().to_string();

        Command::new(config.command.clone())
            .about(about)
            .long_about(self.describe.clone())
            .arg(
                Arg::new(config.task_arg.clone())
                    .required(true)
                    .value_parser(PossibleValuesParser::new(config.tasks.names()))
                    .help("Task to run"),
            )
            .arg(Arg::new(config.option_arg.clone()).help("Key to set or delete"))
            .arg(Arg::new(config.value_arg.clone()).help("Value to store under the key"))
            .arg(
                Arg::new(config.file_arg.clone())
                    .long(config.file_arg.clone())
                    .value_name("PATH")
                    .help("Config file to operate on"),
            )
    }

    /// Turn the matches of [`clap_command`](Self::clap_command) into handler
    /// arguments. The value is coerced with [`coerce_value`]; everything else
    /// stays a string.
    pub fn argv_from_matches(&self, matches: &ArgMatches) -> Argv {
        let config = self.handler.config();
        let mut argv = Argv::new();

        for name in [&config.task_arg, &config.option_arg, &config.file_arg] {
            if let Some(raw) = matches.get_one::<String>(name) {
                argv.insert(name.clone(), Value::String(raw.clone()));
            }
        }
        if let Some(raw) = matches.get_one::<String>(&config.value_arg) {
            argv.insert(config.value_arg.clone(), coerce_value(raw));
        }

        argv
    }

    /// Parse matches and run the handler in one step.
    pub fn run_matches(&self, matches: &ArgMatches) -> crate::Result<Argv> {
        self.handler.handle(self.argv_from_matches(matches))
    }
}

/// Interpret a raw command-line value: `true`, `false`, `null` and numbers
/// become JSON scalars, anything else stays a string.
///
/// A number is only produced when printing it back gives `raw` again, so
/// `007`, `1e3` and integers past `i64` keep their exact text.
pub fn coerce_value(raw: &str) -> Value {
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        "null" => return Value::Null,
        _ => {}
    }

    if let Ok(n) = raw.parse::<i64>() {
        if n.to_string() == raw {
            return Value::Number(n.into());
        }
    } else if let Ok(n) = raw.parse::<f64>() {
        if n.to_string() == raw {
            if let Some(n) = Number::from_f64(n) {
                return Value::Number(n);
            }
        }
    }
    Value::String(raw.to_string())
}
