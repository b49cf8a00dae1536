//! Chat session and message resources

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A playground conversation with an agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    /// Session ID
    #[serde(rename = "sessionId", alias = "id")]
    pub id: String,

    /// Agent the session belongs to
    #[serde(rename = "agentId")]
    pub agent_id: String,

    /// Title derived from the first user message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Number of messages exchanged
    #[serde(skip_serializing_if = "Option::is_none", rename = "messageCount")]
    pub message_count: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none", rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// A single message within a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message ID
    #[serde(rename = "messageId", alias = "id")]
    pub id: String,

    pub role: MessageRole,

    pub content: String,

    #[serde(skip_serializing_if = "Option::is_none", rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}
