// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock concierge provider for deterministic testing.
//!
//! `MockConcierge` implements `ConciergeProvider` with pre-configured
//! replies, failure injection, and request capture, enabling fast,
//! CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crewlink_core::types::{ConciergeReply, ConciergeRequest};
use crewlink_core::{ConciergeProvider, CrewlinkError, HealthStatus, PluginAdapter};

/// A mock concierge backend that returns pre-configured replies.
///
/// Replies are popped from a FIFO queue; when the queue is empty a default
/// "mock concierge reply" text is returned. Every request is captured for
/// later inspection, and failures can be forced with [`set_fail`].
///
/// [`set_fail`]: MockConcierge::set_fail
pub struct MockConcierge {
    replies: Arc<Mutex<VecDeque<String>>>,
    requests: Arc<Mutex<Vec<ConciergeRequest>>>,
    fail: AtomicBool,
    available: bool,
}

impl MockConcierge {
    /// Create an available mock with an empty reply queue.
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            fail: AtomicBool::new(false),
            available: true,
        }
    }

    /// Create an available mock pre-loaded with the given replies.
    pub fn with_replies(replies: Vec<String>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
            ..Self::new()
        }
    }

    /// Create a mock that reports itself unavailable.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Add a reply to the end of the queue.
    pub async fn add_reply(&self, text: String) {
        self.replies.lock().await.push_back(text);
    }

    /// Force (or stop forcing) every completion to fail.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// All requests seen so far, in order.
    pub async fn requests(&self) -> Vec<ConciergeRequest> {
        self.requests.lock().await.clone()
    }

    async fn next_reply(&self) -> String {
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| "mock concierge reply".to_string())
    }
}

impl Default for MockConcierge {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockConcierge {
    fn name(&self) -> &str {
        "mock-concierge"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, CrewlinkError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), CrewlinkError> {
        Ok(())
    }
}

#[async_trait]
impl ConciergeProvider for MockConcierge {
    fn available(&self) -> bool {
        self.available
    }

    async fn complete(
        &self,
        request: ConciergeRequest,
    ) -> Result<ConciergeReply, CrewlinkError> {
        self.requests.lock().await.push(request);

        if self.fail.load(Ordering::SeqCst) {
            return Err(CrewlinkError::Concierge {
                message: "mock failure injected".to_string(),
                source: None,
            });
        }

        Ok(ConciergeReply {
            content: self.next_reply().await,
            model: "mock-model".to_string(),
            stop_reason: Some("end_turn".to_string()),
        })
    }
}
