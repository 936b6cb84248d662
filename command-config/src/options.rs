//! Build-time configuration for the config command.

use crate::descriptor::CommandDescriptor;
use crate::reporter::{Reporter, StdoutReporter};
use crate::store::{BlobStore, FsBlobStore, Store};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

pub const DEFAULT_COMMAND: &str = "config";
pub const DEFAULT_TASK_ARG: &str = "task";
pub const DEFAULT_OPTION_ARG: &str = "key";
pub const DEFAULT_VALUE_ARG: &str = "value";
pub const DEFAULT_FILE_ARG: &str = "file";
pub const DEFAULT_CONFIG_ARG: &str = "config";

/// The five things the command can do. Display names are configurable
/// through [`TaskNames`]; the meanings are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Task {
    Reset,
    Clear,
    View,
    Delete,
    Set,
}

impl Task {
    pub const ALL: [Task; 5] = [Task::Reset, Task::Clear, Task::View, Task::Delete, Task::Set];

    pub fn as_str(&self) -> &'static str {
        match self {
            Task::Reset => "reset",
            Task::Clear => "clear",
            Task::View => "view",
            Task::Delete => "delete",
            Task::Set => "set",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Names under which each task is parsed and displayed.
///
/// Rename a subset with struct update syntax:
///
/// ```rust
/// use command_config::TaskNames;
///
/// let names = TaskNames {
///     view: "show".to_string(),
///     ..TaskNames::default()
/// };
/// assert_eq!(names.names()[2], "show");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskNames {
    pub reset: String,
    pub clear: String,
    pub view: String,
    pub delete: String,
    pub set: String,
}

impl Default for TaskNames {
    fn default() -> Self {
        Self {
            reset: Task::Reset.as_str().to_string(),
            clear: Task::Clear.as_str().to_string(),
            view: Task::View.as_str().to_string(),
            delete: Task::Delete.as_str().to_string(),
            set: Task::Set.as_str().to_string(),
        }
    }
}

impl TaskNames {
    pub fn name(&self, task: Task) -> &str {
        match task {
            Task::Reset => &self.reset,
            Task::Clear => &self.clear,
            Task::View => &self.view,
            Task::Delete => &self.delete,
            Task::Set => &self.set,
        }
    }

    /// Map a parsed name back to its task.
    pub fn resolve(&self, name: &str) -> Option<Task> {
        Task::ALL.into_iter().find(|task| self.name(*task) == name)
    }

    /// Display names in `reset, clear, view, delete, set` order.
    pub fn names(&self) -> Vec<String> {
        Task::ALL
            .iter()
            .map(|task| self.name(*task).to_string())
            .collect()
    }
}

/// Options accepted by the descriptor builder. Every field is optional;
/// [`CommandOptions::build`] fills the gaps.
#[derive(Default, Clone)]
pub struct CommandOptions {
    file: Option<PathBuf>,
    command: Option<String>,
    tasks: Option<TaskNames>,
    task_arg: Option<String>,
    option_arg: Option<String>,
    value_arg: Option<String>,
    file_arg: Option<String>,
    config_arg: Option<String>,
    defaults: Option<Store>,
    describe: Option<String>,
    reporter: Option<Arc<dyn Reporter>>,
    backend: Option<Arc<dyn BlobStore>>,
}

impl CommandOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default store path, used when an invocation does not pass one
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    pub fn command(mut self, name: impl Into<String>) -> Self {
        self.command = Some(name.into());
        self
    }

    pub fn tasks(mut self, names: TaskNames) -> Self {
        self.tasks = Some(names);
        self
    }

    /// Argument name carrying the selected task
    pub fn task_arg(mut self, name: impl Into<String>) -> Self {
        self.task_arg = Some(name.into());
        self
    }

    /// Argument name carrying the key for `set` and `delete`
    pub fn option_arg(mut self, name: impl Into<String>) -> Self {
        self.option_arg = Some(name.into());
        self
    }

    /// Argument name carrying the value for `set`
    pub fn value_arg(mut self, name: impl Into<String>) -> Self {
        self.value_arg = Some(name.into());
        self
    }

    /// Argument name carrying a per-invocation store path
    pub fn file_arg(mut self, name: impl Into<String>) -> Self {
        self.file_arg = Some(name.into());
        self
    }

    /// Argument name where an upstream command may have left a defaults object
    pub fn config_arg(mut self, name: impl Into<String>) -> Self {
        self.config_arg = Some(name.into());
        self
    }

    pub fn defaults(mut self, defaults: Store) -> Self {
        self.defaults = Some(defaults);
        self
    }

    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.describe = Some(text.into());
        self
    }

    pub fn reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn backend(mut self, backend: Arc<dyn BlobStore>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Resolve every option and produce the command descriptor.
    pub fn build(self) -> CommandDescriptor {
        CommandDescriptor::from_config(self.resolve())
    }

    pub(crate) fn resolve(self) -> CommandConfig {
        let mut config = CommandConfig {
            file: self.file,
            command: self.command.unwrap_or_else(|| DEFAULT_COMMAND.to_string()),
            tasks: self.tasks.unwrap_or_default(),
            task_arg: self.task_arg.unwrap_or_else(|| DEFAULT_TASK_ARG.to_string()),
            option_arg: self
                .option_arg
                .unwrap_or_else(|| DEFAULT_OPTION_ARG.to_string()),
            value_arg: self.value_arg.unwrap_or_else(|| DEFAULT_VALUE_ARG.to_string()),
            file_arg: self.file_arg.unwrap_or_else(|| DEFAULT_FILE_ARG.to_string()),
            config_arg: self
                .config_arg
                .unwrap_or_else(|| DEFAULT_CONFIG_ARG.to_string()),
            defaults: self.defaults,
            describe: String::new(),
            reporter: self.reporter.unwrap_or_else(|| Arc::new(StdoutReporter)),
            backend: self.backend.unwrap_or_else(|| Arc::new(FsBlobStore)),
        };
        config.describe = self
            .describe
            .unwrap_or_else(|| crate::descriptor::describe_text(&config));
        config
    }
}

/// Fully resolved configuration, shared by the descriptor and its handler.
pub struct CommandConfig {
    pub file: Option<PathBuf>,
    pub command: String,
    pub tasks: TaskNames,
    pub task_arg: String,
    pub option_arg: String,
    pub value_arg: String,
    pub file_arg: String,
    pub config_arg: String,
    pub defaults: Option<Store>,
    pub describe: String,
    pub reporter: Arc<dyn Reporter>,
    pub backend: Arc<dyn BlobStore>,
}

impl fmt::Debug for CommandConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandConfig")
            .field("file", &self.file)
            .field("command", &self.command)
            .field("tasks", &self.tasks)
            .field("task_arg", &self.task_arg)
            .field("option_arg", &self.option_arg)
            .field("value_arg", &self.value_arg)
            .field("file_arg", &self.file_arg)
            .field("config_arg", &self.config_arg)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}
