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

//! Appender for writing log events to a file through an ordered background queue.
//!
//! # Example
//!
//! ```no_run
//! use logtrellis::append::FileAppenderBuilder;
//! use logtrellis::layout::MessagePassThroughLayout;
//!
//! let file = FileAppenderBuilder::new("/path/to/file.log")
//!     .layout(MessagePassThroughLayout::default())
//!     .build()
//!     .unwrap();
//!
//! logtrellis::add_appender(file, "tests");
//! logtrellis::get_logger("tests").info("This will be written to a file.");
//! logtrellis::flush().unwrap();
//! ```

pub use self::append::FileAppender;
pub use self::append::FileAppenderBuilder;
pub use self::append::file_appender;

mod append;
mod worker;

enum Task {
    Write(String),
    Flush(oneshot::Sender<Result<(), crate::Error>>),
}

