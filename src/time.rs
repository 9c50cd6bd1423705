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

//! Timestamp rendering for layouts.

use jiff::Timestamp;
use jiff::Zoned;
use jiff::tz::TimeZone;

/// Render a timestamp in the given time zone as `YYYY-MM-DD HH:mm:ss.SSS`.
///
/// # Examples
///
/// ```
/// use jiff::tz::TimeZone;
/// use logtrellis::time::format_timestamp;
///
/// let ts = "2010-01-11T14:31:30.005Z".parse().unwrap();
/// assert_eq!(format_timestamp(ts, &TimeZone::UTC), "2010-01-11 14:31:30.005");
/// ```
pub fn format_timestamp(ts: Timestamp, tz: &TimeZone) -> String {
    format_zoned(&ts.to_zoned(tz.clone()))
}

/// Render a zoned datetime as `YYYY-MM-DD HH:mm:ss.SSS`.
pub fn format_zoned(zoned: &Zoned) -> String {
    format!(
        "{}.{:03}",
        zoned.strftime("%Y-%m-%d %H:%M:%S"),
        zoned.millisecond()
    )
}
