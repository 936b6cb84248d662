//! The `config` command as mounted by this CLI

use command_config::{CommandDescriptor, CommandOptions};
use std::path::PathBuf;

/// Directory under the platform config dir that holds our store
pub const APP_DIR: &str = "command-config";

/// `<config dir>/command-config/config.json`, if the platform has a config dir
pub fn default_store_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.json"))
}

/// Build the config command descriptor for this CLI.
///
/// Without a platform config dir the command still mounts; invocations then
/// need an explicit `--file`.
pub fn config_command() -> CommandDescriptor {
    let options = CommandOptions::new();
    match default_store_path() {
        Some(path) => options.file(path).build(),
        None => options.build(),
    }
}
