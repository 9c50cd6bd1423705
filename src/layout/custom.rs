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

use std::fmt::Debug;
use std::fmt::Formatter;

use crate::Error;
use crate::event::Event;
use crate::layout::Layout;

type FormatFunction = dyn Fn(&Event) -> String + Send + Sync + 'static;

/// A layout backed by a closure.
///
/// # Examples
///
/// ```
/// use logtrellis::layout::CustomLayout;
///
/// let layout = CustomLayout::new(|event| format!("{} {}", event.level(), event.message()));
/// ```
pub struct CustomLayout {
    f: Box<FormatFunction>,
}

impl Debug for CustomLayout {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "CustomLayout {{ ... }}")
    }
}

impl CustomLayout {
    /// Create a layout from a closure.
    pub fn new(layout: impl Fn(&Event) -> String + Send + Sync + 'static) -> Self {
        CustomLayout {
            f: Box::new(layout),
        }
    }
}

impl Layout for CustomLayout {
    fn format(&self, event: &Event) -> Result<String, Error> {
        Ok((self.f)(event))
    }
}
