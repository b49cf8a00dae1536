//! Display model implementations for table and JSON output
//!
//! Display models transform API response types into CLI-friendly formats
//! with appropriate column names and serialization.

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::{Agent, ChatMessage, ChatSession, Source, UsagePoint, UserProfile};
use crate::output::formatters::{format_bytes, format_datetime, or_dash, truncate};

/// Agent display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct AgentDisplay {
    #[tabled(rename = "AGENT ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "MODEL")]
    pub model: String,

    #[tabled(rename = "VISIBILITY")]
    pub visibility: String,

    #[tabled(rename = "SOURCES")]
    pub sources: String,

    #[tabled(rename = "CREATED")]
    pub created: String,
}

impl From<Agent> for AgentDisplay {
    fn from(agent: Agent) -> Self {
        Self {
            id: agent.id,
            name: agent.name,
            model: or_dash(agent.model),
            visibility: or_dash(agent.visibility),
            sources: or_dash(agent.source_count),
            created: format_datetime(agent.created_at),
        }
    }
}

/// Knowledge source display model.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct SourceDisplay {
    #[tabled(rename = "SOURCE ID")]
    pub id: String,

    #[tabled(rename = "TYPE")]
    pub kind: String,

    #[tabled(rename = "TITLE")]
    pub title: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "SIZE")]
    pub size: String,
}

impl From<Source> for SourceDisplay {
    fn from(source: Source) -> Self {
        Self {
            id: source.id,
            kind: source.kind.to_string(),
            title: truncate(&source.title, 48),
            status: or_dash(source.status),
            size: format_bytes(source.size_bytes),
        }
    }
}

/// Chat session display model.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct SessionDisplay {
    #[tabled(rename = "SESSION ID")]
    pub id: String,

    #[tabled(rename = "TITLE")]
    pub title: String,

    #[tabled(rename = "MESSAGES")]
    pub messages: String,

    #[tabled(rename = "CREATED")]
    pub created: String,
}

impl From<ChatSession> for SessionDisplay {
    fn from(session: ChatSession) -> Self {
        Self {
            id: session.id,
            title: truncate(&session.title.unwrap_or_else(|| "(untitled)".to_string()), 40),
            messages: or_dash(session.message_count),
            created: format_datetime(session.created_at),
        }
    }
}

/// Chat message display model.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct MessageDisplay {
    #[tabled(rename = "WHEN")]
    pub when: String,

    #[tabled(rename = "ROLE")]
    pub role: String,

    #[tabled(rename = "CONTENT")]
    pub content: String,
}

impl From<ChatMessage> for MessageDisplay {
    fn from(msg: ChatMessage) -> Self {
        Self {
            when: format_datetime(msg.created_at),
            role: format!("{:?}", msg.role).to_lowercase(),
            content: truncate(&msg.content, 80),
        }
    }
}

/// Daily usage display model.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct UsageDisplay {
    #[tabled(rename = "DATE")]
    pub date: String,

    #[tabled(rename = "SESSIONS")]
    pub sessions: u64,

    #[tabled(rename = "MESSAGES")]
    pub messages: u64,
}

impl From<UsagePoint> for UsageDisplay {
    fn from(point: UsagePoint) -> Self {
        Self {
            date: point.date,
            sessions: point.sessions,
            messages: point.messages,
        }
    }
}

/// Signed-in user display model.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct UserDisplay {
    #[tabled(rename = "USER ID")]
    pub id: String,

    #[tabled(rename = "EMAIL")]
    pub email: String,

    #[tabled(rename = "NAME")]
    pub name: String,
}

impl From<UserProfile> for UserDisplay {
    fn from(user: UserProfile) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: or_dash(user.name),
        }
    }
}
