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

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::RwLock;
use std::sync::RwLockReadGuard;
use std::sync::RwLockWriteGuard;

use crate::Append;
use crate::Error;
use crate::Trap;
use crate::error::ErrorKind;
use crate::error::catch_unwind;
use crate::event::Event;
use crate::logger::Categories;
use crate::trap::DefaultTrap;

/// The routing table from categories to appenders.
///
/// Appenders registered without categories are global and receive every event. Appenders
/// registered with categories receive only events whose category exactly equals one of them.
///
/// Registration is expected to happen before concurrent logging starts, e.g. during setup or
/// between test scenarios. It is synchronized, but an appender that is registered while another
/// thread dispatches may or may not see that event.
#[derive(Debug)]
pub struct AppenderRegistry {
    routes: RwLock<Routes>,
    trap: Box<dyn Trap>,
}

#[derive(Debug, Default)]
struct Routes {
    global: Vec<Arc<dyn Append>>,
    categories: HashMap<String, Vec<Arc<dyn Append>>>,
}

impl Default for AppenderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AppenderRegistry {
    /// Create an empty registry that reports appender failures to [`DefaultTrap`].
    pub fn new() -> Self {
        Self::with_trap(DefaultTrap::default())
    }

    /// Create an empty registry that reports appender and listener failures to `trap`.
    pub fn with_trap(trap: impl Into<Box<dyn Trap>>) -> Self {
        Self {
            routes: RwLock::new(Routes::default()),
            trap: trap.into(),
        }
    }

    /// Register an appender.
    ///
    /// With no categories the appender is global. Otherwise it is appended, in order, to the
    /// list of every given category. Registering the same category twice delivers events twice.
    ///
    /// # Examples
    ///
    /// ```
    /// use logtrellis::AppenderRegistry;
    /// use logtrellis::append::Console;
    ///
    /// let registry = AppenderRegistry::new();
    /// registry.add_appender(Console::default(), ());
    /// registry.add_appender(Console::default(), ["tests", "pants"]);
    /// ```
    pub fn add_appender(
        &self,
        append: impl Into<Box<dyn Append>>,
        categories: impl Into<Categories>,
    ) {
        let append: Box<dyn Append> = append.into();
        let append: Arc<dyn Append> = Arc::from(append);
        let categories = categories.into();

        let mut routes = self.routes_mut();
        if categories.is_empty() {
            routes.global.push(append);
            return;
        }
        for category in categories.iter() {
            routes
                .categories
                .entry(category.to_string())
                .or_default()
                .push(append.clone());
        }
    }

    /// Remove every registered appender.
    ///
    /// Appenders are dropped after the routing table is reset; a [`FileAppender`] drains its
    /// queue when dropped.
    ///
    /// [`FileAppender`]: crate::append::FileAppender
    pub fn clear_appenders(&self) {
        let routes = std::mem::take(&mut *self.routes_mut());
        drop(routes);
    }

    /// Invoke every matching appender with `event`.
    ///
    /// Global appenders run first, in registration order, followed by the appenders of the
    /// event's category. A failing appender is reported to the trap and does not stop delivery
    /// to the others.
    pub fn dispatch(&self, event: &Event) {
        for append in self.matching(event.category()) {
            if let Err(err) = catch_unwind(ErrorKind::Append, || append.append(event)) {
                let err = err
                    .with_context("category", event.category())
                    .with_context("level", event.level());
                self.trap.trap(&err);
            }
        }
    }

    /// Flush every registered appender.
    ///
    /// For a [`FileAppender`] this waits until all queued lines are written.
    ///
    /// # Errors
    ///
    /// Every appender is flushed even if some fail. The first failure is returned and the rest
    /// are reported to the trap.
    ///
    /// [`FileAppender`]: crate::append::FileAppender
    pub fn flush(&self) -> Result<(), Error> {
        let routes = self.routes();
        let appends = routes
            .global
            .iter()
            .chain(routes.categories.values().flatten());

        let mut first = None;
        for append in appends {
            if let Err(err) = append.flush() {
                if first.is_none() {
                    first = Some(err);
                } else {
                    self.trap.trap(&err);
                }
            }
        }

        match first {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }

    // snapshot, so appenders may log or re-register without holding the lock
    fn matching(&self, category: &str) -> Vec<Arc<dyn Append>> {
        let routes = self.routes();
        let scoped = routes.categories.get(category);
        routes
            .global
            .iter()
            .chain(scoped.into_iter().flatten())
            .cloned()
            .collect()
    }

    pub(crate) fn trap(&self, err: &Error) {
        self.trap.trap(err);
    }

    fn routes(&self) -> RwLockReadGuard<'_, Routes> {
        self.routes.read().unwrap_or_else(|e| e.into_inner())
    }

    fn routes_mut(&self) -> RwLockWriteGuard<'_, Routes> {
        self.routes.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::Level;
    use crate::append::CustomAppend;

    #[derive(Debug, Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl Recorder {
        fn named(self: &Arc<Self>, name: &'static str) -> CustomAppend {
            let this = self.clone();
            CustomAppend::new(move |event| {
                this.0
                    .lock()
                    .unwrap()
                    .push(format!("{name}:{}", event.message()))
            })
        }

        fn take(&self) -> Vec<String> {
            std::mem::take(&mut *self.0.lock().unwrap())
        }
    }

    #[derive(Debug, Default)]
    struct CollectTrap(Arc<Mutex<Vec<String>>>);

    impl Trap for CollectTrap {
        fn trap(&self, err: &Error) {
            self.0.lock().unwrap().push(err.to_string());
        }
    }

    fn event(category: &str, message: &str) -> Event {
        Event::builder()
            .category(category)
            .level(Level::Debug)
            .message(message)
            .build()
    }

    #[test]
    fn test_global_runs_before_category_in_registration_order() {
        let recorder = Arc::new(Recorder::default());
        let registry = AppenderRegistry::new();
        registry.add_appender(recorder.named("cat1"), "cheese");
        registry.add_appender(recorder.named("global1"), ());
        registry.add_appender(recorder.named("cat2"), "cheese");
        registry.add_appender(recorder.named("global2"), ());

        registry.dispatch(&event("cheese", "m"));
        assert_eq!(
            recorder.take(),
            ["global1:m", "global2:m", "cat1:m", "cat2:m"]
        );

        registry.dispatch(&event("pants", "m"));
        assert_eq!(recorder.take(), ["global1:m", "global2:m"]);
    }

    #[test]
    fn test_category_matching_is_exact() {
        let recorder = Arc::new(Recorder::default());
        let registry = AppenderRegistry::new();
        registry.add_appender(recorder.named("a"), "tests");

        registry.dispatch(&event("tests.sub", "m"));
        registry.dispatch(&event("test", "m"));
        registry.dispatch(&event("TESTS", "m"));
        assert!(recorder.take().is_empty());

        registry.dispatch(&event("tests", "m"));
        assert_eq!(recorder.take(), ["a:m"]);
    }

    #[test]
    fn test_shared_appender_registered_twice_is_invoked_twice() {
        let recorder = Arc::new(Recorder::default());
        let shared = Arc::new(recorder.named("shared"));
        let registry = AppenderRegistry::new();
        registry.add_appender(shared.clone(), ());
        registry.add_appender(shared, "tests");

        registry.dispatch(&event("tests", "m"));
        assert_eq!(recorder.take(), ["shared:m", "shared:m"]);
    }

    #[test]
    fn test_clear_leaves_no_trace() {
        let recorder = Arc::new(Recorder::default());
        let registry = AppenderRegistry::new();
        registry.add_appender(recorder.named("old"), ());
        registry.add_appender(recorder.named("old"), "tests");

        registry.clear_appenders();
        registry.clear_appenders();
        registry.dispatch(&event("tests", "m"));
        assert!(recorder.take().is_empty());

        registry.add_appender(recorder.named("new"), ());
        registry.dispatch(&event("tests", "m"));
        assert_eq!(recorder.take(), ["new:m"]);
    }

    #[test]
    fn test_failing_appender_does_not_stop_dispatch() {
        let recorder = Arc::new(Recorder::default());
        let trapped = Arc::new(Mutex::new(vec![]));
        let registry = AppenderRegistry::with_trap(CollectTrap(trapped.clone()));

        registry.add_appender(
            CustomAppend::fallible(|_| Err(Error::new(ErrorKind::Append, "disk full"))),
            (),
        );
        registry.add_appender(CustomAppend::new(|_| panic!("appender exploded")), ());
        registry.add_appender(recorder.named("survivor"), ());

        registry.dispatch(&event("tests", "m"));

        assert_eq!(recorder.take(), ["survivor:m"]);
        let trapped = trapped.lock().unwrap();
        assert_eq!(trapped.len(), 2);
        assert!(trapped[0].starts_with("disk full"), "{}", trapped[0]);
        assert!(trapped[0].contains("category: tests"), "{}", trapped[0]);
        assert!(trapped[1].contains("appender exploded"), "{}", trapped[1]);
    }

    #[test]
    fn test_appenders_may_touch_the_registry_while_dispatching() {
        let recorder = Arc::new(Recorder::default());
        let registry = Arc::new(AppenderRegistry::new());

        let inner = registry.clone();
        let late = recorder.clone();
        registry.add_appender(
            CustomAppend::new(move |event| {
                if event.message() == "register" {
                    inner.add_appender(late.named("late"), ());
                } else if event.message() == "nested" {
                    inner.dispatch(&Event::builder().category("inner").message("again").build());
                }
            }),
            (),
        );

        registry.dispatch(&event("tests", "register"));
        assert!(recorder.take().is_empty());

        registry.dispatch(&event("tests", "nested"));
        assert_eq!(recorder.take(), ["late:again", "late:nested"]);

        registry.clear_appenders();
    }

    #[test]
    fn test_flush_reports_first_failure() {
        let trapped = Arc::new(Mutex::new(vec![]));
        let registry = AppenderRegistry::with_trap(CollectTrap(trapped.clone()));

        #[derive(Debug)]
        struct FailingFlush(&'static str);

        impl Append for FailingFlush {
            fn append(&self, _: &Event) -> Result<(), Error> {
                Ok(())
            }

            fn flush(&self) -> Result<(), Error> {
                Err(Error::new(ErrorKind::Append, self.0))
            }
        }

        registry.add_appender(FailingFlush("first"), ());
        registry.add_appender(FailingFlush("second"), "tests");

        let err = registry.flush().unwrap_err();
        assert_eq!(err.message(), "first");
        assert_eq!(*trapped.lock().unwrap(), ["second"]);
    }
}
