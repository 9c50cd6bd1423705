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

//! Severity levels.

use std::fmt;
use std::str::FromStr;

/// An enum representing the available severity levels, ordered from the least to the most severe.
///
/// Comparison is by rank: `Trace < Debug < Info < Warn < Error < Fatal`.
#[repr(usize)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum Level {
    /// The "trace" level.
    ///
    /// Designates very low priority, often extremely verbose, information.
    Trace = 5000,
    /// The "debug" level.
    ///
    /// Designates lower priority information.
    Debug = 10000,
    /// The "info" level.
    ///
    /// Designates useful information.
    Info = 20000,
    /// The "warn" level.
    ///
    /// Designates hazardous situations.
    Warn = 30000,
    /// The "error" level.
    ///
    /// Designates very serious errors.
    Error = 40000,
    /// The "fatal" level.
    ///
    /// Designates errors the application is not expected to survive.
    Fatal = 50000,
}

impl Level {
    /// All levels, from the least to the most severe.
    pub const ALL: [Level; 6] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
    ];

    /// Return the canonical upper-case name of the `Level`.
    ///
    /// This returns the same string as the `fmt::Display` implementation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        }
    }

    /// The numeric rank of the level. Higher is more severe.
    pub fn rank(&self) -> usize {
        *self as usize
    }

    pub(crate) fn from_rank(rank: usize) -> Option<Level> {
        Level::ALL.into_iter().find(|level| level.rank() == rank)
    }

    /// Parse a level name, falling back to `default` when the name is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use logtrellis::Level;
    ///
    /// assert_eq!(Level::parse_or("warn", Level::Info), Level::Warn);
    /// assert_eq!(Level::parse_or("cheese", Level::Info), Level::Info);
    /// ```
    pub fn parse_or(name: &str, default: Level) -> Level {
        name.parse().unwrap_or(default)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// The error returned when a string doesn't match any of the levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidLevelError {
    name: String,
}

impl InvalidLevelError {
    /// The name that failed to parse.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for InvalidLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid log level: {:?}", self.name)
    }
}

impl std::error::Error for InvalidLevelError {}

impl FromStr for Level {
    type Err = InvalidLevelError;

    fn from_str(s: &str) -> Result<Level, Self::Err> {
        for level in Level::ALL {
            if s.eq_ignore_ascii_case(level.as_str()) {
                return Ok(level);
            }
        }

        Err(InvalidLevelError { name: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered_by_rank() {
        for pair in Level::ALL.windows(2) {
            assert!(pair[0] < pair[1], "{} should be below {}", pair[0], pair[1]);
            assert!(pair[0].rank() < pair[1].rank());
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("TRACE".parse::<Level>().unwrap(), Level::Trace);
        assert_eq!("debug".parse::<Level>().unwrap(), Level::Debug);
        assert_eq!("Info".parse::<Level>().unwrap(), Level::Info);
        assert_eq!("wArN".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!("error".parse::<Level>().unwrap(), Level::Error);
        assert_eq!("FATAL".parse::<Level>().unwrap(), Level::Fatal);
    }

    #[test]
    fn test_parse_rejects_unknown_names() {
        let err = "cheese".parse::<Level>().unwrap_err();
        assert_eq!(err.name(), "cheese");
        assert_eq!(err.to_string(), "invalid log level: \"cheese\"");
        assert!("".parse::<Level>().is_err());
        assert!("WARNING".parse::<Level>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for level in Level::ALL {
            assert_eq!(level.to_string().parse::<Level>().unwrap(), level);
        }
        assert_eq!(format!("{:>6}", Level::Warn), "  WARN");
    }
}
