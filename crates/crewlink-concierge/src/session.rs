// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-(user, topic) concierge conversations with a bounded memory window.
//!
//! Conversations live only in process memory for the lifetime of the server;
//! they do not survive restarts and are never shared with the durable message
//! store. The window is trimmed lazily: each call keeps the most recent
//! [`HISTORY_WINDOW`] entries before building the model request, while
//! appends after a successful call are uncapped.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tracing::{debug, warn};

use crewlink_config::model::ConciergeConfig;
use crewlink_core::types::{ConciergeRequest, ConversationEntry, ConversationRole};
use crewlink_core::{ConciergeProvider, CrewlinkError};

/// Maximum conversation entries retained ahead of a model call.
pub const HISTORY_WINDOW: usize = 20;

/// Fixed user-facing text when the capability is not configured.
pub const UNAVAILABLE_MESSAGE: &str =
    "The crew concierge is not available right now. Please try again later.";

/// Fixed user-facing text when a model call fails or times out.
pub const PROCESSING_ERROR_MESSAGE: &str =
    "The crew concierge could not process that message. Please try again.";

const DEFAULT_SYSTEM_PROMPT: &str = "You are the Crewlink concierge for {topic}. \
You help airline crew make the most of their layovers: food, transit, rest, \
and local tips. Keep answers short and practical.";

/// Map a concierge error to the text shown to the user.
///
/// Distinguishes only unavailability from processing failure; details stay in
/// the logs.
pub fn user_message(err: &CrewlinkError) -> &'static str {
    match err {
        CrewlinkError::ConciergeUnavailable => UNAVAILABLE_MESSAGE,
        _ => PROCESSING_ERROR_MESSAGE,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ConversationKey {
    user_id: String,
    topic_key: String,
}

/// Routes user messages through the concierge capability, maintaining the
/// bounded conversation window per `(user, topic)`.
pub struct ConciergeSession {
    provider: Arc<dyn ConciergeProvider + Send + Sync>,
    conversations: DashMap<ConversationKey, Vec<ConversationEntry>>,
    system_prompt: Option<String>,
    max_tokens: u32,
    request_timeout: Duration,
}

impl ConciergeSession {
    pub fn new(
        provider: Arc<dyn ConciergeProvider + Send + Sync>,
        config: &ConciergeConfig,
    ) -> Self {
        Self {
            provider,
            conversations: DashMap::new(),
            system_prompt: config.system_prompt.clone(),
            max_tokens: config.max_tokens,
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }

    /// Whether the underlying capability is configured.
    pub fn available(&self) -> bool {
        self.provider.available()
    }

    /// Handle one user message for `(user_id, topic_key)`.
    ///
    /// On success the user message and the assistant reply are appended to
    /// the stored conversation and the reply text is returned. On any
    /// provider failure the stored conversation is left untouched and the
    /// error is returned for the caller to convert into a user-facing event;
    /// the connection itself must survive either way.
    pub async fn handle(
        &self,
        user_id: &str,
        topic_key: &str,
        message: &str,
    ) -> Result<String, CrewlinkError> {
        if !self.provider.available() {
            return Err(CrewlinkError::ConciergeUnavailable);
        }

        let key = ConversationKey {
            user_id: user_id.to_string(),
            topic_key: topic_key.to_string(),
        };

        // Trim the stored window, then snapshot it for the request.
        let history: Vec<ConversationEntry> = {
            let mut conversation = self.conversations.entry(key.clone()).or_default();
            if conversation.len() > HISTORY_WINDOW {
                let excess = conversation.len() - HISTORY_WINDOW;
                conversation.drain(..excess);
            }
            conversation.clone()
        };

        let mut messages = history;
        messages.push(ConversationEntry {
            role: ConversationRole::User,
            content: message.to_string(),
        });

        let request = ConciergeRequest {
            system: Some(self.system_context(topic_key)),
            messages,
            max_tokens: self.max_tokens,
        };

        let reply = match tokio::time::timeout(
            self.request_timeout,
            self.provider.complete(request),
        )
        .await
        {
            Ok(Ok(reply)) => reply,
            Ok(Err(e)) => {
                warn!(user_id, topic_key, error = %e, "concierge request failed");
                return Err(e);
            }
            Err(_) => {
                warn!(
                    user_id,
                    topic_key,
                    timeout_secs = self.request_timeout.as_secs(),
                    "concierge request timed out"
                );
                return Err(CrewlinkError::Timeout {
                    duration: self.request_timeout,
                });
            }
        };

        // Append both sides only after the call succeeded.
        let mut conversation = self.conversations.entry(key).or_default();
        conversation.push(ConversationEntry {
            role: ConversationRole::User,
            content: message.to_string(),
        });
        conversation.push(ConversationEntry {
            role: ConversationRole::Assistant,
            content: reply.content.clone(),
        });

        debug!(
            user_id,
            topic_key,
            entries = conversation.len(),
            model = %reply.model,
            "concierge exchange recorded"
        );
        Ok(reply.content)
    }

    /// Delete the conversation for `(user_id, topic_key)`.
    ///
    /// Returns `true` when an entry existed; no-op otherwise.
    pub fn clear(&self, user_id: &str, topic_key: &str) -> bool {
        self.conversations
            .remove(&ConversationKey {
                user_id: user_id.to_string(),
                topic_key: topic_key.to_string(),
            })
            .is_some()
    }

    /// Number of stored entries for `(user_id, topic_key)`.
    pub fn conversation_len(&self, user_id: &str, topic_key: &str) -> usize {
        self.conversations
            .get(&ConversationKey {
                user_id: user_id.to_string(),
                topic_key: topic_key.to_string(),
            })
            .map_or(0, |c| c.len())
    }

    fn system_context(&self, topic_key: &str) -> String {
        self.system_prompt
            .as_deref()
            .unwrap_or(DEFAULT_SYSTEM_PROMPT)
            .replace("{topic}", topic_key)
    }
}
