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

//! Appenders: sinks that receive log events and perform an effect.

use std::fmt;
use std::sync::Arc;

use crate::Error;
use crate::event::Event;

mod console;
mod custom;
mod file;
mod filter;

pub use self::console::Console;
pub use self::custom::CustomAppend;
pub use self::file::FileAppender;
pub use self::file::FileAppenderBuilder;
pub use self::file::file_appender;
pub use self::filter::LogLevelFilter;
pub use self::filter::log_level_filter;

/// An appender that can process log events.
pub trait Append: fmt::Debug + Send + Sync + 'static {
    /// Dispatch a log event to the append target.
    ///
    /// This must not block on I/O that the appender queues for later.
    fn append(&self, event: &Event) -> Result<(), Error>;

    /// Flush any buffered events.
    ///
    /// Default to a no-op.
    fn flush(&self) -> Result<(), Error> {
        Ok(())
    }
}

impl<T: Append> From<T> for Box<dyn Append> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

/// A shared appender, so that one instance can be registered more than once.
impl<T: Append + ?Sized> Append for Arc<T> {
    fn append(&self, event: &Event) -> Result<(), Error> {
        (**self).append(event)
    }

    fn flush(&self) -> Result<(), Error> {
        (**self).flush()
    }
}
