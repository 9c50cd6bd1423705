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

use crate::Error;
use crate::Level;
use crate::append::Append;
use crate::event::Event;

/// An appender that forwards only events at or above a level to the wrapped appender.
///
/// Filters compose: the wrapped appender may itself be a [`LogLevelFilter`].
///
/// # Examples
///
/// ```
/// use logtrellis::Level;
/// use logtrellis::append::Console;
/// use logtrellis::append::LogLevelFilter;
///
/// let errors_only = LogLevelFilter::new(Level::Error, Console::default());
/// ```
#[derive(Debug)]
pub struct LogLevelFilter {
    level: Level,
    append: Box<dyn Append>,
}

impl LogLevelFilter {
    /// Wrap `append` so that it only sees events at `level` or above.
    pub fn new(level: Level, append: impl Into<Box<dyn Append>>) -> Self {
        Self {
            level,
            append: append.into(),
        }
    }

    /// The threshold of this filter.
    pub fn level(&self) -> Level {
        self.level
    }
}

impl Append for LogLevelFilter {
    fn append(&self, event: &Event) -> Result<(), Error> {
        if event.level() < self.level {
            return Ok(());
        }
        self.append.append(event)
    }

    fn flush(&self) -> Result<(), Error> {
        self.append.flush()
    }
}

/// Create a [`LogLevelFilter`] from a level name.
///
/// # Errors
///
/// Return an error of kind [`InvalidLevel`](crate::ErrorKind::InvalidLevel) if the name is not
/// a known level.
pub fn log_level_filter(
    level: &str,
    append: impl Into<Box<dyn Append>>,
) -> Result<LogLevelFilter, Error> {
    let level = level.parse::<Level>()?;
    Ok(LogLevelFilter::new(level, append))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use super::*;
    use crate::ErrorKind;
    use crate::append::CustomAppend;

    fn collector() -> (CustomAppend, Arc<Mutex<Vec<Level>>>) {
        let seen = Arc::new(Mutex::new(vec![]));
        let sink = seen.clone();
        let append = CustomAppend::new(move |event| sink.lock().unwrap().push(event.level()));
        (append, seen)
    }

    fn emit_all(filter: &dyn Append) {
        for level in Level::ALL {
            filter
                .append(&Event::builder().level(level).build())
                .unwrap();
        }
    }

    #[test]
    fn test_forwards_at_or_above_threshold() {
        let (append, seen) = collector();
        let filter = log_level_filter("ERROR", append).unwrap();
        emit_all(&filter);
        assert_eq!(*seen.lock().unwrap(), vec![Level::Error, Level::Fatal]);
    }

    #[test]
    fn test_nested_filters_use_the_stricter_threshold() {
        let (append, seen) = collector();
        let inner = LogLevelFilter::new(Level::Warn, append);
        let outer = LogLevelFilter::new(Level::Debug, inner);
        emit_all(&outer);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![Level::Warn, Level::Error, Level::Fatal]
        );
    }

    #[test]
    fn test_rejects_unknown_level_name() {
        let (append, _) = collector();
        let err = log_level_filter("LOUD", append).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidLevel);
    }
}
