//! The config command handler.
//!
//! One call per CLI invocation: resolve the store path, create the store
//! from defaults if the file is absent, run exactly one task, then merge the
//! resulting store into the argument map and hand it back.

use crate::error::{ConfigError, Result};
use crate::options::{CommandConfig, Task};
use crate::store::{self, Store};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Parsed arguments of one invocation, keyed by argument name.
pub type Argv = Map<String, Value>;

/// A task together with the arguments it needs.
#[derive(Debug, Clone, PartialEq)]
enum Request {
    Reset,
    Clear,
    View,
    Delete { key: String },
    Set { key: String, value: Value },
}

impl Request {
    fn task(&self) -> Task {
        match self {
            Request::Reset => Task::Reset,
            Request::Clear => Task::Clear,
            Request::View => Task::View,
            Request::Delete { .. } => Task::Delete,
            Request::Set { .. } => Task::Set,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigHandler {
    config: Arc<CommandConfig>,
}

impl ConfigHandler {
    pub fn new(config: Arc<CommandConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CommandConfig {
        &self.config
    }

    /// Run the requested task and return `argv` with the store merged in.
    ///
    /// Argument and path errors are raised before the filesystem is touched.
    /// An existing store that does not parse is an error; it is never
    /// replaced with defaults.
    pub fn handle(&self, mut argv: Argv) -> Result<Argv> {
        let request = self.parse_request(&argv)?;
        let path = self.resolve_path(&argv)?;
        let backend = self.config.backend.as_ref();
        debug!("Running {} against {}", request.task(), path.display());

        if !backend.exists(&path) {
            info!("Creating {} from defaults", path.display());
            store::save(backend, &path, &self.resolve_defaults(&argv))?;
        }

        let mut current = store::load(backend, &path)?;
        let message = self.apply(request, &mut current, &argv, &path)?;
        self.config.reporter.report(&message);

        for (key, value) in current {
            argv.insert(key, value);
        }
        Ok(argv)
    }

    fn apply(
        &self,
        request: Request,
        current: &mut Store,
        argv: &Argv,
        path: &Path,
    ) -> Result<String> {
        let backend = self.config.backend.as_ref();
        let message = match request {
            Request::View => return store::render(current),
            Request::Reset => {
                *current = self.resolve_defaults(argv);
                format!("Reset {} to defaults", path.display())
            }
            Request::Clear => {
                current.clear();
                format!("Cleared {}", path.display())
            }
            Request::Delete { key } => match current.remove(&key) {
                Some(old) => format!("Deleted {} (was {}) from {}", key, old, path.display()),
                None => {
                    warn!("Key {} not present in {}", key, path.display());
                    format!("{} is not set in {}, nothing deleted", key, path.display())
                }
            },
            Request::Set { key, value } => {
                let message = match current.get(&key) {
                    Some(old) => format!(
                        "Set {} to {} (was {}) in {}",
                        key,
                        value,
                        old,
                        path.display()
                    ),
                    None => format!("Set {} to {} in {}", key, value, path.display()),
                };
                current.insert(key, value);
                message
            }
        };

        store::save(backend, path, current)?;
        Ok(message)
    }

    fn parse_request(&self, argv: &Argv) -> Result<Request> {
        let config = &self.config;
        let name = match argv.get(&config.task_arg) {
            Some(Value::String(name)) => name,
            Some(Value::Null) | None => {
                return Err(ConfigError::MissingArgument(config.task_arg.clone()))
            }
            Some(other) => {
                return Err(ConfigError::InvalidArgument {
                    name: config.task_arg.clone(),
                    reason: format!("expected a task name, got {}", other),
                })
            }
        };

        let task = config
            .tasks
            .resolve(name)
            .ok_or_else(|| ConfigError::UnknownTask(name.clone()))?;

        Ok(match task {
            Task::Reset => Request::Reset,
            Task::Clear => Request::Clear,
            Task::View => Request::View,
            Task::Delete => Request::Delete {
                key: self.key_from(argv)?,
            },
            Task::Set => {
                let key = self.key_from(argv)?;
                let value = argv
                    .get(&config.value_arg)
                    .cloned()
                    .ok_or_else(|| ConfigError::MissingArgument(config.value_arg.clone()))?;
                Request::Set { key, value }
            }
        })
    }

    fn key_from(&self, argv: &Argv) -> Result<String> {
        let name = &self.config.option_arg;
        let invalid = |reason: &str| ConfigError::InvalidArgument {
            name: name.clone(),
            reason: reason.to_string(),
        };

        match argv.get(name) {
            Some(Value::String(key)) if key.is_empty() => Err(invalid("key must not be empty")),
            Some(Value::String(key)) => Ok(key.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(Value::Bool(b)) => Ok(b.to_string()),
            Some(Value::Null) | None => Err(ConfigError::MissingArgument(name.clone())),
            Some(_) => Err(invalid("keys are flat strings, not arrays or objects")),
        }
    }

    /// Per-invocation path first, then the configured default.
    fn resolve_path(&self, argv: &Argv) -> Result<PathBuf> {
        let config = &self.config;
        match argv.get(&config.file_arg) {
            Some(Value::String(path)) if !path.is_empty() => return Ok(PathBuf::from(path)),
            Some(Value::String(_)) | Some(Value::Null) | None => {}
            Some(other) => {
                return Err(ConfigError::InvalidArgument {
                    name: config.file_arg.clone(),
                    reason: format!("expected a path, got {}", other),
                })
            }
        }

        config.file.clone().ok_or(ConfigError::MissingStorePath)
    }

    /// Configured defaults, else a `config` object already in argv, else empty.
    fn resolve_defaults(&self, argv: &Argv) -> Store {
        if let Some(defaults) = &self.config.defaults {
            return defaults.clone();
        }
        match argv.get(&self.config.config_arg) {
            Some(Value::Object(map)) => map.clone(),
            _ => Store::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{CommandOptions, TaskNames};
    use crate::reporter::CaptureReporter;
    use crate::store::MemoryBlobStore;
    use serde_json::json;

    const PATH: &str = "store/config.json";

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn setup(
        options: CommandOptions,
    ) -> (ConfigHandler, Arc<MemoryBlobStore>, Arc<CaptureReporter>) {
        let backend = Arc::new(MemoryBlobStore::new());
        let reporter = Arc::new(CaptureReporter::new());
        let descriptor = options
            .file(PATH)
            .backend(backend.clone())
            .reporter(reporter.clone())
            .build();
        (descriptor.handler, backend, reporter)
    }

    fn stored(backend: &MemoryBlobStore) -> Store {
        store::load(backend, Path::new(PATH)).unwrap()
    }

    #[test]
    fn test_missing_task_is_rejected_before_io() {
        let (handler, backend, _) = setup(CommandOptions::new());
        let err = handler.handle(object(json!({}))).unwrap_err();

        assert!(matches!(err, ConfigError::MissingArgument(ref name) if name == "task"));
        assert!(backend.is_empty());
    }

    #[test]
    fn test_unknown_task_is_rejected_before_io() {
        let (handler, backend, _) = setup(CommandOptions::new());
        let err = handler.handle(object(json!({"task": "rename"}))).unwrap_err();

        assert!(matches!(err, ConfigError::UnknownTask(ref name) if name == "rename"));
        assert!(backend.is_empty());
    }

    #[test]
    fn test_set_requires_key_and_value() {
        let (handler, backend, _) = setup(CommandOptions::new());

        let err = handler.handle(object(json!({"task": "set"}))).unwrap_err();
        assert!(matches!(err, ConfigError::MissingArgument(ref name) if name == "key"));

        let err = handler
            .handle(object(json!({"task": "set", "key": "name"})))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingArgument(ref name) if name == "value"));
        assert!(backend.is_empty());
    }

    #[test]
    fn test_structured_key_is_invalid() {
        let (handler, _, _) = setup(CommandOptions::new());
        let err = handler
            .handle(object(json!({"task": "delete", "key": ["a", "b"]})))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidArgument { .. }));
    }

    #[test]
    fn test_numeric_key_is_stringified() {
        let (handler, backend, _) = setup(CommandOptions::new());
        handler
            .handle(object(json!({"task": "set", "key": 42, "value": true})))
            .unwrap();
        assert_eq!(stored(&backend), object(json!({"42": true})));
    }

    #[test]
    fn test_set_reports_old_and_new_value() {
        let (handler, _, reporter) = setup(CommandOptions::new());

        handler
            .handle(object(json!({"task": "set", "key": "name", "value": "one"})))
            .unwrap();
        assert_eq!(
            reporter.last().unwrap(),
            format!("Set name to \"one\" in {}", PATH)
        );

        handler
            .handle(object(json!({"task": "set", "key": "name", "value": "two"})))
            .unwrap();
        assert_eq!(
            reporter.last().unwrap(),
            format!("Set name to \"two\" (was \"one\") in {}", PATH)
        );
    }

    #[test]
    fn test_handler_debug_shows_config() {
        let handler = CommandOptions::new().command("settings").build().handler;
        let debug = format!("{:?}", handler);
        assert!(debug.starts_with("ConfigHandler { config: CommandConfig {"));
        assert!(debug.contains("command: \"settings\""));
    }

    #[test]
    fn test_view_reports_pretty_store() {
        let (handler, backend, reporter) = setup(CommandOptions::new());
        backend.insert(PATH, r#"{"name":"demo"}"#);

        handler.handle(object(json!({"task": "view"}))).unwrap();

        assert_eq!(reporter.lines(), vec!["{\n  \"name\": \"demo\"\n}"]);
        assert_eq!(backend.get(Path::new(PATH)).unwrap(), r#"{"name":"demo"}"#);
    }

    #[test]
    fn test_delete_absent_key_reports_noop() {
        let (handler, backend, reporter) = setup(CommandOptions::new());
        backend.insert(PATH, r#"{"name":"demo"}"#);

        handler
            .handle(object(json!({"task": "delete", "key": "missing"})))
            .unwrap();

        assert_eq!(stored(&backend), object(json!({"name": "demo"})));
        assert!(reporter.last().unwrap().contains("nothing deleted"));
    }

    #[test]
    fn test_argv_file_overrides_configured_path() {
        let (handler, backend, _) = setup(CommandOptions::new());

        handler
            .handle(object(json!({"task": "set", "file": "other.json", "key": "a", "value": 1})))
            .unwrap();

        assert!(backend.get(Path::new(PATH)).is_none());
        let other = store::load(backend.as_ref(), Path::new("other.json")).unwrap();
        assert_eq!(other, object(json!({"a": 1})));
    }

    #[test]
    fn test_no_path_is_configuration_error() {
        let backend = Arc::new(MemoryBlobStore::new());
        let handler = CommandOptions::new()
            .backend(backend.clone())
            .reporter(Arc::new(CaptureReporter::new()))
            .build()
            .handler;

        let err = handler.handle(object(json!({"task": "view"}))).unwrap_err();
        assert!(matches!(err, ConfigError::MissingStorePath));
        assert!(backend.is_empty());
    }

    #[test]
    fn test_argv_config_used_when_no_defaults_configured() {
        let (handler, backend, _) = setup(CommandOptions::new());
        handler
            .handle(object(json!({"task": "reset", "config": {"theme": "dark"}})))
            .unwrap();
        assert_eq!(stored(&backend), object(json!({"theme": "dark"})));
    }

    #[test]
    fn test_configured_defaults_win_over_argv_config() {
        let (handler, backend, _) =
            setup(CommandOptions::new().defaults(object(json!({"theme": "light"}))));
        handler
            .handle(object(json!({"task": "reset", "config": {"theme": "dark"}})))
            .unwrap();
        assert_eq!(stored(&backend), object(json!({"theme": "light"})));
    }

    #[test]
    fn test_renamed_arguments_and_tasks() {
        let options = CommandOptions::new()
            .task_arg("action")
            .option_arg("field")
            .value_arg("data")
            .tasks(TaskNames {
                set: "put".to_string(),
                ..TaskNames::default()
            });
        let (handler, backend, _) = setup(options);

        let argv = handler
            .handle(object(json!({"action": "put", "field": "size", "data": 3})))
            .unwrap();

        assert_eq!(stored(&backend), object(json!({"size": 3})));
        assert_eq!(argv.get("size"), Some(&json!(3)));

        let err = handler
            .handle(object(json!({"action": "set", "field": "size", "data": 4})))
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownTask(_)));
    }
}
