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

use std::fmt;
use std::sync::Arc;
use std::sync::RwLock;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use crate::Error;
use crate::ErrorPayload;
use crate::Level;
use crate::error::ErrorKind;
use crate::error::catch_unwind;
use crate::event::Event;
use crate::logger::AppenderRegistry;

type Listener = dyn Fn(&Event) + Send + Sync + 'static;

/// A handle for emitting events under one category.
///
/// Loggers are obtained from a [`LoggerContext`](crate::LoggerContext) (or the
/// [`get_logger`](crate::get_logger) facade) and cached for the lifetime of the context. Every
/// event at or above the logger's level is first handed to the logger's listeners, in
/// registration order, and then dispatched to the context's appenders.
pub struct Logger {
    category: Arc<str>,
    level: AtomicUsize,
    listeners: RwLock<Vec<Arc<Listener>>>,
    registry: Arc<AppenderRegistry>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("category", &self.category)
            .field("level", &self.level())
            .field("listeners", &self.listeners().len())
            .finish_non_exhaustive()
    }
}

impl Logger {
    pub(crate) fn new(category: &str, level: Level, registry: Arc<AppenderRegistry>) -> Self {
        Self {
            category: Arc::from(category),
            level: AtomicUsize::new(level.rank()),
            listeners: RwLock::new(vec![]),
            registry,
        }
    }

    /// The category of this logger.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// The minimum level this logger emits.
    pub fn level(&self) -> Level {
        Level::from_rank(self.level.load(Ordering::Relaxed)).unwrap_or(Level::Trace)
    }

    /// Set the minimum level from a level name.
    ///
    /// # Errors
    ///
    /// Return an error of kind [`InvalidLevel`](ErrorKind::InvalidLevel) if the name is not a
    /// known level. The current level is kept in that case.
    pub fn set_level(&self, name: &str) -> Result<(), Error> {
        let level = name.parse::<Level>()?;
        self.set_min_level(level);
        Ok(())
    }

    /// Set the minimum level.
    pub fn set_min_level(&self, level: Level) {
        self.level.store(level.rank(), Ordering::Relaxed);
    }

    /// Whether an event at `level` would be emitted.
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.level()
    }

    /// Register a listener that observes every emitted event before dispatch.
    pub fn add_listener(&self, listener: impl Fn(&Event) + Send + Sync + 'static) {
        self.listeners
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(Arc::new(listener));
    }

    /// Remove every listener of this logger.
    pub fn clear_listeners(&self) {
        self.listeners
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    /// Emit an event at `level`.
    ///
    /// Nothing is built, notified or dispatched when `level` is below the logger's level.
    pub fn log(&self, level: Level, message: impl Into<String>) {
        if !self.enabled(level) {
            return;
        }
        self.emit(level, message.into(), None);
    }

    /// Emit an event at `level` with an attached error.
    pub fn log_with_error(
        &self,
        level: Level,
        message: impl Into<String>,
        error: impl Into<ErrorPayload>,
    ) {
        if !self.enabled(level) {
            return;
        }
        self.emit(level, message.into(), Some(error.into()));
    }

    /// Emit an event at [`Level::Trace`].
    pub fn trace(&self, message: impl Into<String>) {
        self.log(Level::Trace, message);
    }

    /// Emit an event at [`Level::Debug`].
    pub fn debug(&self, message: impl Into<String>) {
        self.log(Level::Debug, message);
    }

    /// Emit an event at [`Level::Info`].
    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::Info, message);
    }

    /// Emit an event at [`Level::Warn`].
    pub fn warn(&self, message: impl Into<String>) {
        self.log(Level::Warn, message);
    }

    /// Emit an event at [`Level::Error`].
    pub fn error(&self, message: impl Into<String>) {
        self.log(Level::Error, message);
    }

    /// Emit an event at [`Level::Fatal`].
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(Level::Fatal, message);
    }

    fn emit(&self, level: Level, message: String, error: Option<ErrorPayload>) {
        let event = Event::builder()
            .category(self.category.clone())
            .level(level)
            .message(message)
            .error(error)
            .build();

        for listener in self.listeners() {
            if let Err(err) = catch_unwind(ErrorKind::Listener, || {
                listener(&event);
                Ok(())
            }) {
                self.registry
                    .trap(&err.with_context("category", event.category()));
            }
        }

        self.registry.dispatch(&event);
    }

    // snapshot, so listeners may register further listeners
    fn listeners(&self) -> Vec<Arc<Listener>> {
        self.listeners
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
