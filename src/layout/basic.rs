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

use std::fmt::Display;
use std::fmt::Write;

use jiff::tz::TimeZone;

use crate::Error;
use crate::event::ErrorPayload;
use crate::event::Event;
use crate::layout::Layout;
use crate::time::format_timestamp;

/// A layout that renders an event as one line of text, plus the attached error if any.
///
/// Output format:
///
/// ```text
/// [2010-01-11 14:31:30.005] [DEBUG] tests - this is a test
/// [2010-01-11 14:31:30.005] [DEBUG] tests - Error: Some made-up error
///     caused by: the underlying failure
/// ```
///
/// An error with a stack renders its first stack line on the second line, followed by the
/// remaining stack lines verbatim. An error with only a name and a message renders exactly one
/// extra line, `<name>: <message>`.
///
/// # Examples
///
/// ```
/// use jiff::tz::TimeZone;
/// use logtrellis::layout::BasicLayout;
///
/// let layout = BasicLayout::default().timezone(TimeZone::UTC);
/// ```
#[derive(Debug, Clone)]
pub struct BasicLayout {
    timezone: TimeZone,
}

impl Default for BasicLayout {
    fn default() -> Self {
        Self {
            timezone: TimeZone::system(),
        }
    }
}

impl BasicLayout {
    /// Set the timezone for timestamps.
    ///
    /// Defaults to the system timezone if not set.
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.timezone = tz;
        self
    }
}

impl Layout for BasicLayout {
    fn format(&self, event: &Event) -> Result<String, Error> {
        Ok(render(event, &self.timezone, event.level()))
    }
}

/// Render an event with [`BasicLayout`] in the system timezone.
pub fn basic_layout(event: &Event) -> String {
    render(event, &TimeZone::system(), event.level())
}

pub(super) fn render(event: &Event, tz: &TimeZone, level: impl Display) -> String {
    let time = format_timestamp(event.start_time(), tz);
    let prefix = format!("[{time}] [{level}] {} - ", event.category());

    let mut text = String::with_capacity(prefix.len() + event.message().len());
    text.push_str(&prefix);
    text.push_str(event.message());

    match event.error() {
        None => {}
        Some(ErrorPayload::Stack { stack, message }) if stack.is_empty() => {
            // SAFETY: write to a string always succeeds
            write!(&mut text, "\n{prefix}Error: {message}").unwrap();
        }
        Some(ErrorPayload::Stack { stack, .. }) => {
            text.push('\n');
            text.push_str(&prefix);
            text.push_str(&stack.join("\n"));
        }
        Some(ErrorPayload::Named { name, message }) => {
            // SAFETY: write to a string always succeeds
            write!(&mut text, "\n{prefix}{name}: {message}").unwrap();
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use jiff::Timestamp;

    use super::*;
    use crate::Level;

    fn event() -> crate::event::EventBuilder {
        let ts: Timestamp = "2010-01-11T14:31:30.005Z".parse().unwrap();
        Event::builder()
            .category("tests")
            .level(Level::Debug)
            .message("this is a test")
            .start_time(ts)
    }

    fn layout() -> BasicLayout {
        BasicLayout::default().timezone(TimeZone::UTC)
    }

    #[test]
    fn test_single_line_without_error() {
        let text = layout().format(&event().build()).unwrap();
        assert_snapshot!(text, @"[2010-01-11 14:31:30.005] [DEBUG] tests - this is a test");
        assert_eq!(text.lines().count(), 1);
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_stack_error_adds_one_line_per_stack_line() {
        let stack = [
            "Error: Some made-up error",
            "    at Object.<anonymous> (cheese.js:1:1)",
            "    at run (runner.js:2:2)",
        ];
        let event = event()
            .error(Some(ErrorPayload::stack("Some made-up error", stack)))
            .build();
        let text = layout().format(&event).unwrap();
        let lines = text.split('\n').collect::<Vec<_>>();

        assert_eq!(lines.len(), stack.len() + 1);
        assert_eq!(
            lines[0],
            "[2010-01-11 14:31:30.005] [DEBUG] tests - this is a test"
        );
        assert_eq!(
            lines[1],
            "[2010-01-11 14:31:30.005] [DEBUG] tests - Error: Some made-up error"
        );
        for i in 1..stack.len() {
            assert_eq!(lines[i + 1], stack[i]);
        }
    }

    #[test]
    fn test_empty_stack_renders_one_error_line() {
        let expected = "[2010-01-11 14:31:30.005] [DEBUG] tests - this is a test\n\
                        [2010-01-11 14:31:30.005] [DEBUG] tests - Error: Some made-up error";

        let payload = ErrorPayload::stack("Some made-up error", Vec::<String>::new());
        assert_eq!(payload.stack_lines().map(<[String]>::len), Some(1));
        let text = layout().format(&event().error(Some(payload)).build()).unwrap();
        assert_eq!(text, expected);

        let bare = ErrorPayload::Stack {
            message: "Some made-up error".to_string(),
            stack: vec![],
        };
        let text = layout().format(&event().error(Some(bare)).build()).unwrap();
        assert_eq!(text, expected);
    }

    #[test]
    fn test_multiline_error_keeps_one_line_per_stack_line() {
        let err = std::io::Error::other("line one\nline two");
        let payload = ErrorPayload::from_error(&err);
        let stack_len = payload.stack_lines().unwrap().len();
        let text = layout().format(&event().error(Some(payload)).build()).unwrap();

        assert_eq!(stack_len, 2);
        assert_eq!(text.split('\n').count(), stack_len + 1);
        assert_eq!(
            text.split('\n').nth(1),
            Some("[2010-01-11 14:31:30.005] [DEBUG] tests - Error: line one")
        );
    }

    #[test]
    fn test_named_error_adds_exactly_one_line() {
        let event = event()
            .error(Some(ErrorPayload::named("Cheese", "Gorgonzola smells.")))
            .build();
        let text = layout().format(&event).unwrap();
        let lines = text.split('\n').collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "[2010-01-11 14:31:30.005] [DEBUG] tests - Cheese: Gorgonzola smells."
        );
    }

    #[test]
    fn test_rust_error_renders_source_chain() {
        let err = anyhow::anyhow!("socket closed").context("failed to send");
        let event = event().error(Some(ErrorPayload::from(&err))).build();
        let text = layout().format(&event).unwrap();
        assert_eq!(
            text,
            "[2010-01-11 14:31:30.005] [DEBUG] tests - this is a test\n\
             [2010-01-11 14:31:30.005] [DEBUG] tests - Error: failed to send\n    caused by: socket closed"
        );
    }

    #[test]
    fn test_free_function_matches_shape() {
        let text = basic_layout(&event().level(Level::Warn).build());
        let (head, tail) = text.split_once("] ").unwrap();
        assert!(head.starts_with('['));
        assert_eq!(tail, "[WARN] tests - this is a test");
    }
}
