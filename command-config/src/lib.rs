//! # command-config
//!
//! A `config` command that a host CLI can mount to manage a small JSON
//! key/value file.
//!
//! This crate provides:
//! - A descriptor builder producing the command pattern, help text and handler
//! - A handler that views, resets, clears, sets or deletes keys in the file
//! - Merge-back of the stored keys into the invocation's arguments
//! - A clap bridge for mounting the command as a subcommand
//!
//! ```rust,no_run
//! use command_config::CommandOptions;
//! use serde_json::json;
//!
//! let descriptor = CommandOptions::new().file("./config.json").build();
//! let argv = json!({"task": "set", "key": "name", "value": "demo"});
//! let argv = descriptor.handler.handle(argv.as_object().cloned().unwrap_or_default())?;
//! assert_eq!(argv["name"], "demo");
//! # Ok::<(), command_config::ConfigError>(())
//! ```

pub mod cli;
pub mod descriptor;
pub mod error;
pub mod handler;
pub mod options;
pub mod reporter;
pub mod store;

/// Re-export commonly used types
pub use descriptor::CommandDescriptor;
pub use error::{ConfigError, Result};
pub use handler::{Argv, ConfigHandler};
pub use options::{CommandConfig, CommandOptions, Task, TaskNames};
pub use reporter::{CaptureReporter, Reporter, SilentReporter, StdoutReporter};
pub use store::{BlobStore, FsBlobStore, MemoryBlobStore, Store};

/// Build the config command descriptor from `options`.
pub fn command(options: CommandOptions) -> CommandDescriptor {
    options.build()
}
