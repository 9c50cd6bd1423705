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

//! Configuration from JSON descriptors.
//!
//! A descriptor lists appenders and per-category levels:
//!
//! ```json
//! {
//!   "appenders": [
//!     {
//!       "type": "logLevelFilter",
//!       "level": "WARN",
//!       "category": "tests",
//!       "appender": { "type": "file", "filename": "warnings.log", "layout": "messagePassThrough" }
//!     },
//!     { "type": "file", "filename": "all.log", "categories": ["tests", "db"] },
//!     { "type": "console", "layout": { "type": "colored" } }
//!   ],
//!   "levels": { "tests": "DEBUG" }
//! }
//! ```
//!
//! Appender `type` is one of `console`, `file` (requires `filename`) or `logLevelFilter`
//! (requires `level` and the wrapped `appender`). `layout` is `basic` (the default),
//! `messagePassThrough` or `colored`, given either as a string or as `{ "type": ... }`.
//! `category`/`categories` take a string or an array; without them the appender is global.

use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Deserializer;
use serde::de::MapAccess;
use serde::de::Visitor;

use crate::Append;
use crate::Error;
use crate::Layout;
use crate::Level;
use crate::LoggerContext;
use crate::append::Console;
use crate::append::FileAppenderBuilder;
use crate::append::log_level_filter;
use crate::error::ErrorKind;
use crate::layout::BasicLayout;
use crate::layout::ColoredLayout;
use crate::layout::MessagePassThroughLayout;
use crate::logger::Categories;

/// A parsed configuration descriptor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Appenders, in registration order.
    #[serde(default)]
    pub appenders: Vec<AppenderConfig>,
    /// Category levels, in descriptor order.
    #[serde(default, deserialize_with = "ordered_levels")]
    pub levels: Vec<(String, String)>,
}

/// One appender entry of a descriptor.
#[derive(Debug, Clone, Deserialize)]
pub struct AppenderConfig {
    /// The appender type.
    #[serde(rename = "type")]
    pub kind: AppenderKind,
    /// The layout; [`LayoutKind::Basic`] when absent.
    #[serde(default)]
    pub layout: Option<LayoutConfig>,
    /// The target file of a `file` appender.
    #[serde(default)]
    pub filename: Option<PathBuf>,
    /// The categories to register for; global when absent.
    #[serde(default, alias = "category")]
    pub categories: Option<CategoryList>,
    /// The threshold of a `logLevelFilter` appender.
    #[serde(default)]
    pub level: Option<String>,
    /// The appender wrapped by a `logLevelFilter` appender.
    #[serde(default)]
    pub appender: Option<Box<AppenderConfig>>,
}

/// Appender types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AppenderKind {
    /// [`Console`].
    Console,
    /// [`FileAppender`](crate::append::FileAppender).
    File,
    /// [`LogLevelFilter`](crate::append::LogLevelFilter).
    LogLevelFilter,
}

/// A layout, given by name or as `{ "type": name }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LayoutConfig {
    /// `"layout": "basic"`
    Name(LayoutKind),
    /// `"layout": { "type": "basic" }`
    Object {
        /// The layout type.
        #[serde(rename = "type")]
        kind: LayoutKind,
    },
}

/// Layout types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutKind {
    /// [`BasicLayout`].
    Basic,
    /// [`MessagePassThroughLayout`].
    MessagePassThrough,
    /// [`ColoredLayout`].
    #[serde(alias = "coloured")]
    Colored,
}

/// One category or a list of categories.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CategoryList {
    /// `"category": "tests"`
    One(String),
    /// `"categories": ["tests", "db"]`
    Many(Vec<String>),
}

impl From<CategoryList> for Categories {
    fn from(list: CategoryList) -> Self {
        match list {
            CategoryList::One(category) => Categories::from(category),
            CategoryList::Many(categories) => Categories::from(categories),
        }
    }
}

impl Config {
    /// Parse a descriptor from JSON text.
    pub fn from_json(text: &str) -> Result<Config, Error> {
        serde_json::from_str(text).map_err(|err| {
            Error::new(ErrorKind::Config, "failed to parse config descriptor").with_source(err)
        })
    }

    /// Read and parse a descriptor file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Config, Error> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| {
            Error::new(ErrorKind::Config, "failed to read config descriptor")
                .with_context("path", path.display())
                .with_source(err)
        })?;
        Config::from_json(&text).map_err(|err| err.with_context("path", path.display()))
    }

    /// Register every appender and set every level on `context`.
    ///
    /// All appenders are built and all levels are parsed before anything is registered, so on
    /// error the context is left untouched. Appenders are registered in descriptor order, then
    /// levels are set in descriptor order.
    pub fn apply(&self, context: &LoggerContext) -> Result<(), Error> {
        let mut appenders = Vec::with_capacity(self.appenders.len());
        for (index, entry) in self.appenders.iter().enumerate() {
            let append = entry.build().map_err(|err| {
                Error::new(ErrorKind::Config, "failed to build appender")
                    .with_context("entry", index)
                    .with_source(err)
            })?;
            let categories = entry.categories.clone().map(Categories::from);
            appenders.push((append, categories.unwrap_or_default()));
        }

        let mut levels = Vec::with_capacity(self.levels.len());
        for (category, name) in &self.levels {
            let level = name.parse::<Level>().map_err(|err| {
                Error::new(ErrorKind::Config, "failed to parse category level")
                    .with_context("category", category)
                    .with_source(err)
            })?;
            levels.push((category, level));
        }

        for (append, categories) in appenders {
            context.add_appender(append, categories);
        }
        for (category, level) in levels {
            context.get_logger(category).set_min_level(level);
        }
        Ok(())
    }
}

impl AppenderConfig {
    fn build(&self) -> Result<Box<dyn Append>, Error> {
        match self.kind {
            AppenderKind::Console => Ok(Box::new(Console::default().with_layout(self.layout()))),
            AppenderKind::File => {
                let filename = self.filename.as_ref().ok_or_else(|| {
                    Error::new(ErrorKind::Config, "file appender requires a filename")
                })?;
                let file = FileAppenderBuilder::new(filename)
                    .layout(self.layout())
                    .build()?;
                Ok(Box::new(file))
            }
            AppenderKind::LogLevelFilter => {
                let level = self.level.as_deref().ok_or_else(|| {
                    Error::new(ErrorKind::Config, "logLevelFilter appender requires a level")
                })?;
                let wrapped = self.appender.as_deref().ok_or_else(|| {
                    Error::new(ErrorKind::Config, "logLevelFilter appender requires an appender")
                })?;
                Ok(Box::new(log_level_filter(level, wrapped.build()?)?))
            }
        }
    }

    fn layout(&self) -> Box<dyn Layout> {
        let kind = match self.layout {
            None => LayoutKind::Basic,
            Some(LayoutConfig::Name(kind)) | Some(LayoutConfig::Object { kind }) => kind,
        };
        match kind {
            LayoutKind::Basic => Box::new(BasicLayout::default()),
            LayoutKind::MessagePassThrough => Box::new(MessagePassThroughLayout::default()),
            LayoutKind::Colored => Box::new(ColoredLayout::default()),
        }
    }
}

fn ordered_levels<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OrderedLevels;

    impl<'de> Visitor<'de> for OrderedLevels {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map from category to level name")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(OrderedLevels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_full_descriptor() {
        let config = Config::from_json(
            r#"{
                "appenders": [
                    {
                        "type": "logLevelFilter",
                        "level": "WARN",
                        "category": "tests",
                        "appender": { "type": "file", "filename": "w.log", "layout": { "type": "messagePassThrough" } }
                    },
                    { "type": "console", "layout": "coloured", "categories": ["a", "b"] }
                ],
                "levels": { "zeta": "DEBUG", "alpha": "WARN" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.appenders.len(), 2);
        let filter = &config.appenders[0];
        assert_eq!(filter.kind, AppenderKind::LogLevelFilter);
        assert_eq!(filter.categories, Some(CategoryList::One("tests".into())));
        let wrapped = filter.appender.as_deref().unwrap();
        assert_eq!(wrapped.kind, AppenderKind::File);
        assert_eq!(
            wrapped.layout,
            Some(LayoutConfig::Object {
                kind: LayoutKind::MessagePassThrough
            })
        );

        let console = &config.appenders[1];
        assert_eq!(console.layout, Some(LayoutConfig::Name(LayoutKind::Colored)));
        assert_eq!(
            console.categories,
            Some(CategoryList::Many(vec!["a".into(), "b".into()]))
        );

        // document order, not sorted
        assert_eq!(
            config.levels,
            vec![
                ("zeta".to_string(), "DEBUG".to_string()),
                ("alpha".to_string(), "WARN".to_string())
            ]
        );
    }

    #[test]
    fn test_empty_descriptor() {
        let config = Config::from_json("{}").unwrap();
        assert!(config.appenders.is_empty());
        assert!(config.levels.is_empty());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Config::from_json(r#"{ "appenders": [ { "type": "carrier-pigeon" } ] }"#)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);

        let err = Config::from_json("not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_missing_required_fields() {
        let config = Config::from_json(r#"{ "appenders": [ { "type": "file" } ] }"#).unwrap();
        let err = config.apply(&LoggerContext::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("entry: 0"), "{err}");
        assert!(err.to_string().contains("requires a filename"), "{err}");

        let config = Config::from_json(
            r#"{ "appenders": [ { "type": "console" }, { "type": "logLevelFilter", "level": "WARN" } ] }"#,
        )
        .unwrap();
        let err = config.apply(&LoggerContext::new()).unwrap_err();
        assert!(err.to_string().contains("entry: 1"), "{err}");
        assert!(err.to_string().contains("requires an appender"), "{err}");
    }
}
