// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::LazyLock;
use std::sync::Mutex;

use crate::Append;
use crate::Error;
use crate::Level;
use crate::logger::AppenderRegistry;
use crate::logger::Categories;
use crate::logger::Logger;

/// An explicitly owned logging setup: one appender registry and the loggers bound to it.
///
/// Loggers are created lazily on first request and cached by category for the lifetime of the
/// context; asking twice for the same category returns the same logger.
///
/// The crate-level functions ([`get_logger`](crate::get_logger),
/// [`add_appender`](crate::add_appender), ...) operate on a process-wide default context.
/// Construct a fresh context where isolation matters, e.g. one per test.
///
/// # Examples
///
/// ```
/// use logtrellis::LoggerContext;
/// use logtrellis::append::Console;
///
/// let context = LoggerContext::new();
/// context.add_appender(Console::default(), "tests");
/// context.get_logger("tests").info("hello");
/// ```
#[derive(Debug)]
pub struct LoggerContext {
    registry: Arc<AppenderRegistry>,
    loggers: Mutex<HashMap<String, Arc<Logger>>>,
    default_level: Level,
}

impl Default for LoggerContext {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerContext {
    /// Create a context with an empty [`AppenderRegistry`].
    pub fn new() -> Self {
        Self::with_registry(AppenderRegistry::new())
    }

    /// Create a context around an existing registry.
    pub fn with_registry(registry: AppenderRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            loggers: Mutex::new(HashMap::new()),
            default_level: Level::Trace,
        }
    }

    /// Set the level that newly created loggers start with.
    ///
    /// Default to [`Level::Trace`]. Loggers that already exist keep their level.
    pub fn default_level(mut self, level: Level) -> Self {
        self.default_level = level;
        self
    }

    /// Return the logger for `category`, creating it on first request.
    pub fn get_logger(&self, category: &str) -> Arc<Logger> {
        let mut loggers = self.loggers.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(logger) = loggers.get(category) {
            return logger.clone();
        }

        let logger = Arc::new(Logger::new(
            category,
            self.default_level,
            self.registry.clone(),
        ));
        loggers.insert(category.to_string(), logger.clone());
        logger
    }

    /// The appender registry of this context.
    pub fn registry(&self) -> &AppenderRegistry {
        &self.registry
    }

    /// Register an appender. See [`AppenderRegistry::add_appender`].
    pub fn add_appender(
        &self,
        append: impl Into<Box<dyn Append>>,
        categories: impl Into<Categories>,
    ) {
        self.registry.add_appender(append, categories);
    }

    /// Remove every registered appender. See [`AppenderRegistry::clear_appenders`].
    pub fn clear_appenders(&self) {
        self.registry.clear_appenders();
    }

    /// Flush every registered appender. See [`AppenderRegistry::flush`].
    pub fn flush(&self) -> Result<(), Error> {
        self.registry.flush()
    }

    /// Load a JSON descriptor from `path` and apply it to this context.
    ///
    /// See [`Config`](crate::config::Config) for the descriptor format.
    #[cfg(feature = "config")]
    pub fn configure(&self, path: impl AsRef<std::path::Path>) -> Result<(), Error> {
        crate::config::Config::from_path(path)?.apply(self)
    }
}

static DEFAULT_CONTEXT: LazyLock<LoggerContext> = LazyLock::new(LoggerContext::new);

/// Return the process-wide default [`LoggerContext`].
pub fn default_context() -> &'static LoggerContext {
    &DEFAULT_CONTEXT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loggers_are_cached_by_category() {
        let context = LoggerContext::new();
        let a = context.get_logger("tests");
        let b = context.get_logger("tests");
        let c = context.get_logger("cheese");

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(a.category(), "tests");
        assert_eq!(c.category(), "cheese");

        a.set_min_level(Level::Warn);
        assert_eq!(context.get_logger("tests").level(), Level::Warn);
    }

    #[test]
    fn test_new_loggers_use_default_level() {
        let context = LoggerContext::new();
        assert_eq!(context.get_logger("tests").level(), Level::Trace);

        let context = LoggerContext::new().default_level(Level::Info);
        assert_eq!(context.get_logger("tests").level(), Level::Info);
    }
}
