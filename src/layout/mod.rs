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

//! Layouts for rendering log events as text.

use std::fmt;

use crate::Error;
use crate::event::Event;

mod basic;
mod colored;
mod custom;
mod pass_through;

pub use self::basic::BasicLayout;
pub use self::basic::basic_layout;
pub use self::colored::ColoredLayout;
pub use self::custom::CustomLayout;
pub use self::pass_through::MessagePassThroughLayout;
pub use self::pass_through::message_pass_through_layout;

/// A layout for rendering log events.
///
/// Layouts are pure: the same event always renders to the same text.
pub trait Layout: fmt::Debug + Send + Sync + 'static {
    /// Render a log event.
    fn format(&self, event: &Event) -> Result<String, Error>;
}

impl<T: Layout> From<T> for Box<dyn Layout> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}
