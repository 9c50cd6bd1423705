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

use std::io;
use std::io::Write;

use crate::Error;
use crate::Layout;
use crate::append::Append;
use crate::event::Event;
use crate::layout::BasicLayout;

/// An appender that prints log events to stdout, synchronously.
///
/// # Examples
///
/// ```
/// use logtrellis::append::Console;
///
/// let console_appender = Console::default();
/// ```
#[derive(Debug)]
pub struct Console {
    layout: Box<dyn Layout>,
}

impl Default for Console {
    fn default() -> Self {
        Self {
            layout: Box::new(BasicLayout::default()),
        }
    }
}

impl Console {
    /// Set the layout for the [`Console`] appender.
    ///
    /// Default to [`BasicLayout`].
    ///
    /// # Examples
    ///
    /// ```
    /// use logtrellis::append::Console;
    /// use logtrellis::layout::MessagePassThroughLayout;
    ///
    /// let console_appender = Console::default().with_layout(MessagePassThroughLayout::default());
    /// ```
    pub fn with_layout(mut self, layout: impl Into<Box<dyn Layout>>) -> Self {
        self.layout = layout.into();
        self
    }
}

impl Append for Console {
    fn append(&self, event: &Event) -> Result<(), Error> {
        let mut text = self.layout.format(event)?;
        text.push('\n');
        io::stdout()
            .lock()
            .write_all(text.as_bytes())
            .map_err(Error::from_io_error)
    }

    fn flush(&self) -> Result<(), Error> {
        io::stdout().flush().map_err(Error::from_io_error)
    }
}
