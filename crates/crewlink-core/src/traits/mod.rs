// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the Crewlink chat core.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod concierge;
pub mod store;

pub use adapter::PluginAdapter;
pub use concierge::ConciergeProvider;
pub use store::ChatStore;
