use crate::error::CliError;
use clap::{ArgMatches, Command};
use command_config::{Argv, CommandDescriptor};
use tracing::debug;

/// Commands mounted on the root CLI, looked up by name at dispatch time.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    descriptors: Vec<CommandDescriptor>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command. A later registration under the same name replaces the
    /// earlier one.
    pub fn register(&mut self, descriptor: CommandDescriptor) -> &mut Self {
        self.descriptors
            .retain(|existing| existing.name() != descriptor.name());
        self.descriptors.push(descriptor);
        self
    }

    pub fn get(&self, name: &str) -> Option<&CommandDescriptor> {
        self.descriptors.iter().find(|d| d.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.descriptors.iter().map(|d| d.name()).collect()
    }

    /// Attach every registered command to `root` as a subcommand.
    pub fn augment(&self, root: Command) -> Command {
        self.descriptors
            .iter()
            .fold(root, |root, descriptor| root.subcommand(descriptor.clap_command()))
    }

    /// Run the handler of the selected subcommand and return its arguments.
    /// Returns `Ok(None)` when no subcommand was given.
    pub fn dispatch(&self, matches: &ArgMatches) -> Result<Option<Argv>, CliError> {
        let Some((name, sub_matches)) = matches.subcommand() else {
            return Ok(None);
        };

        let descriptor = self
            .get(name)
            .ok_or_else(|| CliError::Command(format!("Unknown command: {}", name)))?;
        debug!("Dispatching to '{}'", descriptor.command);

        let argv = descriptor.run_matches(sub_matches)?;
        Ok(Some(argv))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use command_config::{CommandOptions, SilentReporter};
    use serde_json::json;
    use std::sync::Arc;

    fn registry_for(path: &std::path::Path) -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        registry.register(
            CommandOptions::new()
                .file(path)
                .reporter(Arc::new(SilentReporter))
                .build(),
        );
        registry
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = CommandRegistry::new();
        registry
            .register(CommandOptions::new().build())
            .register(CommandOptions::new().command("settings").build())
            .register(CommandOptions::new().describe("second").build());

        assert_eq!(registry.names(), vec!["settings", "config"]);
        assert_eq!(registry.get("config").unwrap().describe, "second");
    }

    #[test]
    fn test_dispatch_runs_handler() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        let registry = registry_for(&path);

        let matches = registry
            .augment(Command::new("app"))
            .try_get_matches_from(["app", "config", "set", "port", "8080"])
            .unwrap();
        let argv = registry.dispatch(&matches).unwrap().unwrap();

        assert_eq!(argv.get("port"), Some(&json!(8080)));
        let stored: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(stored, json!({"port": 8080}));
    }

    #[test]
    fn test_dispatch_without_subcommand() {
        let temp_dir = tempfile::tempdir().unwrap();
        let registry = registry_for(&temp_dir.path().join("config.json"));

        let matches = registry
            .augment(Command::new("app"))
            .try_get_matches_from(["app"])
            .unwrap();
        assert!(registry.dispatch(&matches).unwrap().is_none());
    }

    #[test]
    fn test_dispatch_surfaces_handler_errors() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        let registry = registry_for(&path);

        let matches = registry
            .augment(Command::new("app"))
            .try_get_matches_from(["app", "config", "view"])
            .unwrap();
        let err = registry.dispatch(&matches).unwrap_err();

        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("not valid JSON"));
    }
}
