// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic Claude provider for the Crewlink concierge.
//!
//! Implements [`crewlink_core::ConciergeProvider`] over the Messages API.
//! Only the non-streaming completion path is used; the concierge returns a
//! single text event per exchange.

pub mod client;
pub mod types;

use async_trait::async_trait;

use crewlink_config::model::ConciergeConfig;
use crewlink_core::types::{ConciergeReply, ConciergeRequest, ConversationRole};
use crewlink_core::{ConciergeProvider, CrewlinkError, HealthStatus, PluginAdapter};

pub use client::AnthropicClient;
use types::{ApiMessage, MessageRequest};

/// Anthropic-backed concierge provider.
pub struct AnthropicConcierge {
    client: AnthropicClient,
    model: String,
}

impl AnthropicConcierge {
    /// Build a provider from configuration.
    ///
    /// Fails when no API key is configured; callers that want a disabled
    /// concierge should wire the no-op provider instead.
    pub fn new(config: &ConciergeConfig) -> Result<Self, CrewlinkError> {
        let api_key = config.api_key.as_deref().ok_or_else(|| {
            CrewlinkError::Config("concierge.api_key is required for the Anthropic provider".into())
        })?;
        let client = AnthropicClient::new(api_key, &config.api_version)?;
        Ok(Self {
            client,
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl PluginAdapter for AnthropicConcierge {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, CrewlinkError> {
        // No cheap ping endpoint; construction implies configuration.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), CrewlinkError> {
        Ok(())
    }
}

#[async_trait]
impl ConciergeProvider for AnthropicConcierge {
    fn available(&self) -> bool {
        true
    }

    async fn complete(
        &self,
        request: ConciergeRequest,
    ) -> Result<ConciergeReply, CrewlinkError> {
        // System entries fold into the request-level system prompt; the
        // Messages API only accepts user/assistant turns in `messages`.
        let mut system_parts: Vec<String> = request.system.into_iter().collect();
        let mut messages = Vec::with_capacity(request.messages.len());
        for entry in request.messages {
            match entry.role {
                ConversationRole::System => system_parts.push(entry.content),
                ConversationRole::User | ConversationRole::Assistant => {
                    messages.push(ApiMessage {
                        role: entry.role.to_string(),
                        content: entry.content,
                    });
                }
            }
        }

        let api_request = MessageRequest {
            model: self.model.clone(),
            messages,
            system: if system_parts.is_empty() {
                None
            } else {
                Some(system_parts.join("\n\n"))
            },
            max_tokens: request.max_tokens,
            stream: false,
        };

        let response = self.client.complete_message(&api_request).await?;
        let content = response.text();
        if content.is_empty() {
            return Err(CrewlinkError::Concierge {
                message: "API response contained no text content".into(),
                source: None,
            });
        }

        Ok(ConciergeReply {
            content,
            model: response.model,
            stop_reason: response.stop_reason,
        })
    }
}
