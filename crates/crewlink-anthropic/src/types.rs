// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request and response types for the Anthropic Messages API.

use serde::{Deserialize, Serialize};

/// Request body for `POST /v1/messages`.
#[derive(Debug, Clone, Serialize)]
pub struct MessageRequest {
    /// Model identifier.
    pub model: String,
    /// Conversation messages, oldest first.
    pub messages: Vec<ApiMessage>,
    /// Optional system prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Whether to stream the response. Always false for the concierge.
    pub stream: bool,
}

/// A single message in the request.
#[derive(Debug, Clone, Serialize)]
pub struct ApiMessage {
    /// "user" or "assistant".
    pub role: String,
    /// Text content.
    pub content: String,
}

/// Response body for a non-streaming message.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub id: String,
    pub content: Vec<ResponseContent>,
    pub model: String,
    pub stop_reason: Option<String>,
    pub usage: Usage,
}

impl MessageResponse {
    /// Concatenated text of all text content blocks.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| block.text.as_deref())
            .collect::<Vec<_>>()
            .join("")
    }
}

/// One content block in the response.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseContent {
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default)]
    pub text: Option<String>,
}

/// Token usage reported by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Error envelope returned by the API on non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Error detail inside the envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(rename = "type")]
    pub type_: String,
    pub message: String,
}
