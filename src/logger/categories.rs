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

/// The categories an appender is registered for.
///
/// No categories means the appender is global and receives every event. Otherwise it receives
/// only events whose category exactly equals one of the listed strings; there is no prefix or
/// hierarchy matching.
///
/// A single category, an array, a slice or a `Vec` of categories all convert into
/// `Categories`, and `()` converts into the empty (global) set.
///
/// # Examples
///
/// ```
/// use logtrellis::Categories;
///
/// assert!(Categories::from(()).is_empty());
/// assert_eq!(Categories::from(["tests", "pants"]), Categories::from(vec!["tests", "pants"]));
/// assert_eq!(Categories::from("tests").iter().collect::<Vec<_>>(), ["tests"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Categories(Vec<String>);

impl Categories {
    /// No categories: the appender receives every event.
    pub fn global() -> Self {
        Categories(vec![])
    }

    /// Whether this is the global (empty) set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the categories in registration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<()> for Categories {
    fn from(_: ()) -> Self {
        Categories::global()
    }
}

impl From<&str> for Categories {
    fn from(category: &str) -> Self {
        Categories(vec![category.to_string()])
    }
}

impl From<String> for Categories {
    fn from(category: String) -> Self {
        Categories(vec![category])
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for Categories {
    fn from(categories: [S; N]) -> Self {
        categories.into_iter().collect()
    }
}

impl<S: Into<String>> From<Vec<S>> for Categories {
    fn from(categories: Vec<S>) -> Self {
        categories.into_iter().collect()
    }
}

impl<S: AsRef<str>> From<&[S]> for Categories {
    fn from(categories: &[S]) -> Self {
        categories.iter().map(|c| c.as_ref().to_string()).collect()
    }
}

impl<S: Into<String>> FromIterator<S> for Categories {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Categories(iter.into_iter().map(Into::into).collect())
    }
}
