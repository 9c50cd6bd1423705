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

//! Loggers, the appender registry and the context that binds them.

mod categories;
pub use self::categories::Categories;

mod context;
pub use self::context::LoggerContext;
pub use self::context::default_context;

#[allow(clippy::module_inception)]
mod logger;
pub use self::logger::Logger;

mod registry;
pub use self::registry::AppenderRegistry;
