// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

/// A non-fatal diagnostic (§7's `UserWarning` kind), e.g. the `costs`/`costs_N`
/// key-collision warning of §4.5. Collected during execution and returned
/// alongside results rather than logged-and-discarded, so callers (and tests)
/// can assert on it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub message: String,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>) -> Self {
        Diagnostic { message: message.into() }
    }

    pub fn costs_key_collision(original_key: &str, renamed_key: &str) -> Self {
        Diagnostic::new(format!(
            "A task is named \"{original_key}\"; its cost telemetry was moved to \"{renamed_key}\" to avoid colliding with the costs sub-mapping"
        ))
    }
}
