//! Command implementations for the command-config CLI
//!
//! Each command is built as a descriptor and mounted through the registry.

pub mod config;

pub use config::*;

use crate::registry::CommandRegistry;

/// Registry holding every command this CLI ships with
pub fn registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry.register(config_command());
    registry
}
