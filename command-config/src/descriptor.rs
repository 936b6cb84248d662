use crate::handler::ConfigHandler;
use crate::options::{CommandConfig, Task};
use std::sync::Arc;

/// What a host CLI needs to mount the config command: its pattern, its
/// help text and the handler to call with the parsed arguments.
#[derive(Debug, Clone)]
pub struct CommandDescriptor {
    /// Pattern such as `config <task> [key] [value]`
    pub command: String,
    pub describe: String,
    pub handler: ConfigHandler,
}

impl CommandDescriptor {
    pub(crate) fn from_config(config: CommandConfig) -> Self {
        let command = command_pattern(&config);
        let describe = config.describe.clone();
        Self {
            command,
            describe,
            handler: ConfigHandler::new(Arc::new(config)),
        }
    }

    /// Base command name, the first word of the pattern.
    pub fn name(&self) -> &str {
        &self.handler.config().command
    }
}

fn command_pattern(config: &CommandConfig) -> String {
    format!(
        "{} <{}> [{}] [{}]",
        config.command, config.task_arg, config.option_arg, config.value_arg
    )
}

pub(crate) fn describe_text(config: &CommandConfig) -> String {
    let command = &config.command;
    let key = &config.option_arg;
    let value = &config.value_arg;
    let name = |task: Task| config.tasks.name(task);

    let location = match &config.file {
        Some(path) => format!("'{}'", path.display()),
        None => format!("the file given by --{}", config.file_arg),
    };

    let mut text = format!("Manage the configuration file at {}\n\nTasks:\n", location);
    let rows = [
        (name(Task::View).to_string(), "show the stored configuration"),
        (name(Task::Reset).to_string(), "restore the default configuration"),
        (name(Task::Clear).to_string(), "remove every stored key"),
        (
            format!("{} <{}>", name(Task::Delete), key),
            "remove a single key",
        ),
        (
            format!("{} <{}> <{}>", name(Task::Set), key, value),
            "store a value under a key",
        ),
    ];
    let width = rows.iter().map(|(usage, _)| usage.len()).max().unwrap_or(0);
    for (usage, help) in &rows {
        text.push_str(&format!("  {} {:<width$}  {}\n", command, usage, help));
    }

    text.push_str("\nExamples:\n");
    text.push_str(&format!("  {} {}\n", command, name(Task::View)));
    text.push_str(&format!("  {} {} name demo\n", command, name(Task::Set)));
    text.push_str(&format!("  {} {} name\n", command, name(Task::Delete)));
    text.push_str(&format!(
        "  {} {} --{} ./config.json",
        command,
        name(Task::Reset),
        config.file_arg
    ));
    text
}
