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
use crate::event::Event;
use crate::layout::Layout;

/// A layout that renders only the message, ignoring category, level and error.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct MessagePassThroughLayout {}

impl Layout for MessagePassThroughLayout {
    fn format(&self, event: &Event) -> Result<String, Error> {
        Ok(message_pass_through_layout(event))
    }
}

/// Render only the message of an event.
pub fn message_pass_through_layout(event: &Event) -> String {
    event.message().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorPayload;
    use crate::Level;

    #[test]
    fn test_outputs_only_the_message() {
        for level in Level::ALL {
            let event = Event::builder()
                .category("some other category")
                .level(level)
                .message("this is a test")
                .error(Some(ErrorPayload::named("Cheese", "Gorgonzola smells.")))
                .build();
            assert_eq!(message_pass_through_layout(&event), "this is a test");
            assert_eq!(
                MessagePassThroughLayout::default().format(&event).unwrap(),
                event.message()
            );
        }
    }
}
