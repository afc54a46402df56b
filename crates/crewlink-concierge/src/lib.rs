// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AI concierge side-channel for the Crewlink chat core.
//!
//! The session keeps a bounded, process-local conversation per
//! `(user, topic)` and routes messages through whatever
//! [`crewlink_core::ConciergeProvider`] was wired at construction time.
//! Model failures never escape as connection errors; they come back as
//! distinct user-facing messages.

pub mod session;
pub mod unavailable;

pub use session::{
    ConciergeSession, HISTORY_WINDOW, PROCESSING_ERROR_MESSAGE, UNAVAILABLE_MESSAGE,
    user_message,
};
pub use unavailable::UnavailableConcierge;
