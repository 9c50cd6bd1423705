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

use colored::Color;
use colored::ColoredString;
use colored::Colorize;
use jiff::tz::TimeZone;

use crate::Error;
use crate::Level;
use crate::event::Event;
use crate::layout::Layout;
use crate::layout::basic::render;

/// A layout that renders like [`BasicLayout`](crate::layout::BasicLayout), with the level
/// colored.
///
/// By default, log levels are colored. Call [`no_color`](ColoredLayout::no_color) to disable
/// coloring. The color of each level can be customized with
/// [`error_color`](ColoredLayout::error_color) and so on.
///
/// # Examples
///
/// ```
/// use logtrellis::layout::ColoredLayout;
///
/// let layout = ColoredLayout::default();
/// ```
#[derive(Debug, Clone)]
pub struct ColoredLayout {
    colors: LevelColor,
    no_color: bool,
    timezone: TimeZone,
}

impl Default for ColoredLayout {
    fn default() -> Self {
        Self {
            colors: LevelColor::default(),
            no_color: false,
            timezone: TimeZone::system(),
        }
    }
}

impl ColoredLayout {
    /// Customize the color of the fatal log level. Default to bright red.
    pub fn fatal_color(mut self, color: Color) -> Self {
        self.colors.fatal = color;
        self
    }

    /// Customize the color of the error log level. Default to red.
    pub fn error_color(mut self, color: Color) -> Self {
        self.colors.error = color;
        self
    }

    /// Customize the color of the warn log level. Default to yellow.
    pub fn warn_color(mut self, color: Color) -> Self {
        self.colors.warn = color;
        self
    }

    /// Customize the color of the info log level. Default to green.
    pub fn info_color(mut self, color: Color) -> Self {
        self.colors.info = color;
        self
    }

    /// Customize the color of the debug log level. Default to cyan.
    pub fn debug_color(mut self, color: Color) -> Self {
        self.colors.debug = color;
        self
    }

    /// Customize the color of the trace log level. Default to blue.
    pub fn trace_color(mut self, color: Color) -> Self {
        self.colors.trace = color;
        self
    }

    /// Disable colored output.
    pub fn no_color(mut self) -> Self {
        self.no_color = true;
        self
    }

    /// Set the timezone for timestamps.
    ///
    /// Defaults to the system timezone if not set.
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.timezone = tz;
        self
    }
}

impl Layout for ColoredLayout {
    fn format(&self, event: &Event) -> Result<String, Error> {
        let level = self.colors.colorize(self.no_color, event.level());
        Ok(render(event, &self.timezone, level))
    }
}

#[derive(Debug, Clone)]
struct LevelColor {
    fatal: Color,
    error: Color,
    warn: Color,
    info: Color,
    debug: Color,
    trace: Color,
}

impl Default for LevelColor {
    fn default() -> Self {
        Self {
            fatal: Color::BrightRed,
            error: Color::Red,
            warn: Color::Yellow,
            info: Color::Green,
            debug: Color::Cyan,
            trace: Color::Blue,
        }
    }
}

impl LevelColor {
    fn colorize(&self, no_color: bool, level: Level) -> ColoredString {
        if no_color {
            return ColoredString::from(level.as_str());
        }

        let color = match level {
            Level::Fatal => self.fatal,
            Level::Error => self.error,
            Level::Warn => self.warn,
            Level::Info => self.info,
            Level::Debug => self.debug,
            Level::Trace => self.trace,
        };
        level.as_str().color(color)
    }
}
