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
use crate::append::Append;
use crate::event::Event;

type AppendFunction = dyn Fn(&Event) -> Result<(), Error> + Send + Sync + 'static;

/// An appender backed by a closure.
///
/// # Examples
///
/// ```
/// use logtrellis::append::CustomAppend;
///
/// let append = CustomAppend::new(|event| eprintln!("{}", event.message()));
/// ```
pub struct CustomAppend {
    f: Box<AppendFunction>,
}

impl Debug for CustomAppend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "CustomAppend {{ ... }}")
    }
}

impl CustomAppend {
    /// Create an appender from an infallible closure.
    pub fn new(f: impl Fn(&Event) + Send + Sync + 'static) -> Self {
        Self::fallible(move |event| {
            f(event);
            Ok(())
        })
    }

    /// Create an appender from a closure that may fail.
    pub fn fallible(f: impl Fn(&Event) -> Result<(), Error> + Send + Sync + 'static) -> Self {
        CustomAppend { f: Box::new(f) }
    }
}

impl Append for CustomAppend {
    fn append(&self, event: &Event) -> Result<(), Error> {
        (self.f)(event)
    }
}
