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

//! Logtrellis is a category-based, level-filtered logging library: loggers named by category
//! emit events to a registry of appenders, routed globally or per category.
//!
//! # Overview
//!
//! A [`Logger`] belongs to one category and carries a minimum [`Level`]. Events below the level
//! are dropped before anything else happens. Accepted events are handed to the logger's
//! listeners, then to the [`AppenderRegistry`]: first to every global appender, then to the
//! appenders registered for exactly that category.
//!
//! Built-in appenders write to the console, append to a file on a background thread, or wrap
//! another appender with a level threshold. Layouts turn an event into text.
//!
//! # Examples
//!
//! Log to the console from every category:
//!
//! ```
//! use logtrellis::append::Console;
//!
//! logtrellis::add_appender(Console::default(), ());
//! logtrellis::get_logger("app").info("started");
//! ```
//!
//! Send warnings of the `db` category to a file, and everything else to the console:
//!
//! ```no_run
//! use logtrellis::append::Console;
//! use logtrellis::append::FileAppenderBuilder;
//! use logtrellis::append::LogLevelFilter;
//! use logtrellis::Level;
//!
//! let file = FileAppenderBuilder::new("db-warnings.log").build()?;
//! logtrellis::add_appender(LogLevelFilter::new(Level::Warn, file), "db");
//! logtrellis::add_appender(Console::default(), ());
//!
//! let db = logtrellis::get_logger("db");
//! db.set_level("DEBUG")?;
//! db.debug("connection pool warmed up");
//! db.warn("slow query");
//!
//! logtrellis::flush()?;
//! # Ok::<(), logtrellis::Error>(())
//! ```
//!
//! Independent setups, for example in tests, use their own [`LoggerContext`] instead of the
//! process-wide one.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

use std::sync::Arc;

pub mod append;
pub mod layout;
pub mod logger;
pub mod time;
pub mod trap;

#[cfg(feature = "bridge-log")]
pub mod bridge;
#[cfg(feature = "config")]
pub mod config;

mod error;
mod event;
mod level;

pub use append::Append;
pub use error::Error;
pub use error::ErrorKind;
pub use event::ErrorPayload;
pub use event::Event;
pub use event::EventBuilder;
pub use layout::Layout;
pub use level::InvalidLevelError;
pub use level::Level;
pub use logger::AppenderRegistry;
pub use logger::Categories;
pub use logger::Logger;
pub use logger::LoggerContext;
pub use logger::default_context;
pub use trap::Trap;

/// Return the logger of `category` in the [default context](default_context).
pub fn get_logger(category: &str) -> Arc<Logger> {
    default_context().get_logger(category)
}

/// Register an appender in the [default context](default_context).
///
/// Empty `categories` register the appender globally.
pub fn add_appender(append: impl Into<Box<dyn Append>>, categories: impl Into<Categories>) {
    default_context().add_appender(append, categories);
}

/// Remove every appender of the [default context](default_context).
pub fn clear_appenders() {
    default_context().clear_appenders();
}

/// Flush every appender of the [default context](default_context).
pub fn flush() -> Result<(), Error> {
    default_context().flush()
}

/// Load a JSON descriptor and apply it to the [default context](default_context).
///
/// See [`config::Config`] for the descriptor format.
#[cfg(feature = "config")]
pub fn configure(path: impl AsRef<std::path::Path>) -> Result<(), Error> {
    default_context().configure(path)
}
