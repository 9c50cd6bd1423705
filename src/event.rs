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

//! Log events and their error payloads.

use std::error::Error as StdError;
use std::sync::Arc;

use jiff::Timestamp;

use crate::level::Level;

/// The error attached to a log event, if any.
///
/// An error either carries a stack of lines (the first line conventionally
/// `"<ErrorName>: <message>"`), or only a name and a message. Layouts render the
/// two shapes differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorPayload {
    /// A real error with an ordered stack of lines.
    Stack {
        /// The error message.
        message: String,
        /// The stack lines, outermost first.
        stack: Vec<String>,
    },
    /// A value that only looks like an error: a name and a message, no stack.
    Named {
        /// The error name, e.g. the error type.
        name: String,
        /// The error message.
        message: String,
    },
}

impl ErrorPayload {
    /// Create a payload from a message and explicit stack lines.
    ///
    /// Entries containing newlines are split so that the stack holds one line per entry. An
    /// empty stack becomes the single line `"Error: <message>"`.
    pub fn stack(message: impl Into<String>, stack: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let message = message.into();
        let mut lines = vec![];
        for entry in stack {
            let entry: String = entry.into();
            push_lines(&mut lines, &entry);
        }
        if lines.is_empty() {
            push_lines(&mut lines, &format!("Error: {message}"));
        }
        ErrorPayload::Stack {
            message,
            stack: lines,
        }
    }

    /// Create a payload that only has a name and a message.
    pub fn named(name: impl Into<String>, message: impl Into<String>) -> Self {
        ErrorPayload::Named {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Capture a Rust error.
    ///
    /// The first stack line is `"<TypeName>: <message>"`, followed by one indented line per
    /// error in the [`source`](StdError::source) chain.
    ///
    /// # Examples
    ///
    /// ```
    /// use logtrellis::ErrorPayload;
    ///
    /// let err = std::io::Error::other("disk on fire");
    /// let payload = ErrorPayload::from_error(&err);
    /// assert_eq!(payload.stack_lines(), Some(&["Error: disk on fire".to_string()][..]));
    /// ```
    pub fn from_error<E: StdError + ?Sized>(err: &E) -> Self {
        Self::from_chain(short_type_name::<E>(), err.to_string(), err.source())
    }

    fn from_chain(name: &str, message: String, mut source: Option<&dyn StdError>) -> Self {
        let mut stack = vec![];
        push_lines(&mut stack, &format!("{name}: {message}"));
        while let Some(err) = source {
            push_lines(&mut stack, &format!("    caused by: {err}"));
            source = err.source();
        }
        ErrorPayload::Stack { message, stack }
    }

    /// The error message.
    pub fn message(&self) -> &str {
        match self {
            ErrorPayload::Stack { message, .. } => message,
            ErrorPayload::Named { message, .. } => message,
        }
    }

    /// The stack lines, if this is a real error.
    pub fn stack_lines(&self) -> Option<&[String]> {
        match self {
            ErrorPayload::Stack { stack, .. } => Some(stack),
            ErrorPayload::Named { .. } => None,
        }
    }
}

impl From<&anyhow::Error> for ErrorPayload {
    fn from(err: &anyhow::Error) -> Self {
        let root: &(dyn StdError + 'static) = err.as_ref();
        Self::from_chain("Error", root.to_string(), root.source())
    }
}

impl From<anyhow::Error> for ErrorPayload {
    fn from(err: anyhow::Error) -> Self {
        ErrorPayload::from(&err)
    }
}

impl From<std::io::Error> for ErrorPayload {
    fn from(err: std::io::Error) -> Self {
        ErrorPayload::from_error(&err)
    }
}

// one stack entry per line, whatever the error's Display emits
fn push_lines(stack: &mut Vec<String>, text: &str) {
    stack.extend(text.lines().map(str::to_string));
}

fn short_type_name<E: ?Sized>() -> &'static str {
    let name = std::any::type_name::<E>();
    let base = name.split('<').next().unwrap_or(name);
    base.rsplit("::").next().unwrap_or(base)
}

/// An immutable value produced once per log call.
///
/// Events are handed by reference to listeners and appenders.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    category: Arc<str>,
    level: Level,
    message: String,
    error: Option<ErrorPayload>,
    start_time: Timestamp,
}

impl Event {
    /// Create a new [`EventBuilder`].
    pub fn builder() -> EventBuilder {
        EventBuilder::default()
    }

    /// The category of the logger that produced this event.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// The severity of this event.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The message body.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The attached error, if any.
    pub fn error(&self) -> Option<&ErrorPayload> {
        self.error.as_ref()
    }

    /// The time the event was created.
    pub fn start_time(&self) -> Timestamp {
        self.start_time
    }
}

/// Builder for [`Event`].
#[derive(Debug)]
pub struct EventBuilder {
    event: Event,
}

impl Default for EventBuilder {
    fn default() -> Self {
        EventBuilder {
            event: Event {
                category: Arc::from("default"),
                level: Level::Info,
                message: String::new(),
                error: None,
                start_time: Timestamp::now(),
            },
        }
    }
}

impl EventBuilder {
    /// Set [`category`](Event::category).
    pub fn category(mut self, category: impl Into<Arc<str>>) -> Self {
        self.event.category = category.into();
        self
    }

    /// Set [`level`](Event::level).
    pub fn level(mut self, level: Level) -> Self {
        self.event.level = level;
        self
    }

    /// Set [`message`](Event::message).
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.event.message = message.into();
        self
    }

    /// Set [`error`](Event::error).
    pub fn error(mut self, error: Option<ErrorPayload>) -> Self {
        self.event.error = error;
        self
    }

    /// Set [`start_time`](Event::start_time).
    pub fn start_time(mut self, start_time: Timestamp) -> Self {
        self.event.start_time = start_time;
        self
    }

    /// Invoke the builder and return an `Event`.
    pub fn build(self) -> Event {
        self.event
    }
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use super::*;

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("failed to load cheese")
        }
    }

    impl StdError for Outer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_from_error_walks_the_source_chain() {
        let err = Outer(std::io::Error::other("gorgonzola smells"));
        let payload = ErrorPayload::from_error(&err);
        assert_eq!(payload.message(), "failed to load cheese");
        assert_eq!(
            payload.stack_lines().unwrap(),
            &[
                "Outer: failed to load cheese".to_string(),
                "    caused by: gorgonzola smells".to_string(),
            ]
        );
    }

    #[test]
    fn test_from_anyhow_uses_context_chain() {
        let err = anyhow::anyhow!("root cause").context("outer context");
        let payload = ErrorPayload::from(&err);
        assert_eq!(payload.message(), "outer context");
        assert_eq!(
            payload.stack_lines().unwrap(),
            &[
                "Error: outer context".to_string(),
                "    caused by: root cause".to_string(),
            ]
        );
    }

    #[test]
    fn test_multiline_messages_become_separate_stack_lines() {
        let err = std::io::Error::other("line one\nline two");
        let payload = ErrorPayload::from_error(&err);
        assert_eq!(payload.message(), "line one\nline two");
        assert_eq!(
            payload.stack_lines().unwrap(),
            &["Error: line one".to_string(), "line two".to_string()]
        );

        let payload = ErrorPayload::stack("boom", ["Error: boom\n    at a", "    at b"]);
        assert_eq!(payload.stack_lines().unwrap().len(), 3);
    }

    #[test]
    fn test_empty_stack_falls_back_to_message() {
        let payload = ErrorPayload::stack("Some made-up error", Vec::<String>::new());
        assert_eq!(
            payload.stack_lines().unwrap(),
            &["Error: Some made-up error".to_string()]
        );
    }

    #[test]
    fn test_named_payload_has_no_stack() {
        let payload = ErrorPayload::named("Cheese", "Gorgonzola smells.");
        assert_eq!(payload.message(), "Gorgonzola smells.");
        assert!(payload.stack_lines().is_none());
    }

    #[test]
    fn test_builder_defaults_and_overrides() {
        let ts: Timestamp = "2010-01-11T14:31:30.005Z".parse().unwrap();
        let event = Event::builder()
            .category("tests")
            .level(Level::Debug)
            .message("this is a test")
            .start_time(ts)
            .build();
        assert_eq!(event.category(), "tests");
        assert_eq!(event.level(), Level::Debug);
        assert_eq!(event.message(), "this is a test");
        assert_eq!(event.start_time(), ts);
        assert!(event.error().is_none());

        let event = Event::builder().build();
        assert_eq!(event.category(), "default");
        assert_eq!(event.level(), Level::Info);
    }
}
