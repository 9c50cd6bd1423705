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

//! Records of the `log` crate reach the default context.

use std::sync::Arc;
use std::sync::Mutex;

use logtrellis::Level;
use logtrellis::append::CustomAppend;

#[test]
fn test_log_crate_records_are_routed_by_target() {
    logtrellis::bridge::setup_log_crate();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    logtrellis::add_appender(
        CustomAppend::new(move |event| {
            sink.lock()
                .unwrap()
                .push((event.level(), event.message().to_string()))
        }),
        "bridge",
    );
    logtrellis::get_logger("bridge").set_min_level(Level::Info);

    log::debug!(target: "bridge", "below the category level");
    log::info!(target: "bridge", "answer is {}", 42);
    log::error!(target: "bridge", "something broke");
    log::warn!(target: "elsewhere", "not routed to this appender");
    log::Log::flush(log::logger());

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            (Level::Info, "answer is 42".to_string()),
            (Level::Error, "something broke".to_string()),
        ]
    );
    assert!(!log::log_enabled!(target: "bridge", log::Level::Debug));
    assert!(log::log_enabled!(target: "bridge", log::Level::Warn));
}
