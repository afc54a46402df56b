// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Timestamp helpers.

use chrono::{SecondsFormat, Utc};

/// Current UTC time as RFC 3339 with fixed millisecond precision.
///
/// The fixed width keeps stored timestamps lexicographically sortable, which
/// the message history queries rely on.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_has_fixed_millisecond_width() {
        let ts = now_rfc3339();
        // e.g. 2026-08-05T12:34:56.789Z
        assert_eq!(ts.len(), 24, "unexpected timestamp shape: {ts}");
        assert!(ts.ends_with('Z'));
        assert_eq!(&ts[19..20], ".");
    }

    #[test]
    fn timestamps_sort_lexicographically() {
        let a = now_rfc3339();
        let b = now_rfc3339();
        assert!(a <= b);
    }
}
