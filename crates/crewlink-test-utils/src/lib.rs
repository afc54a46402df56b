// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Crewlink integration tests.

pub mod mock_concierge;

pub use mock_concierge::MockConcierge;
