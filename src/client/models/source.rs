//! Knowledge source resources

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of knowledge source attached to an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Uploaded document (created through the web UI; listed here, not created)
    File,
    Text,
    Website,
    Database,
    Qa,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SourceKind::File => "file",
            SourceKind::Text => "text",
            SourceKind::Website => "website",
            SourceKind::Database => "database",
            SourceKind::Qa => "qa",
        };
        f.write_str(s)
    }
}

/// A knowledge source attached to an agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    /// Source ID
    #[serde(rename = "sourceId", alias = "id")]
    pub id: String,

    /// Owning agent
    #[serde(rename = "agentId")]
    pub agent_id: String,

    /// Source kind
    #[serde(rename = "type")]
    pub kind: SourceKind,

    /// Human-readable title (file name, page URL, etc.)
    pub title: String,

    /// Ingestion status (e.g. "pending", "trained", "failed")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Size of the ingested content in bytes
    #[serde(skip_serializing_if = "Option::is_none", rename = "sizeBytes")]
    pub size_bytes: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none", rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request body for a plain text source
#[derive(Debug, Clone, Serialize)]
pub struct TextSourceRequest {
    pub title: String,
    pub content: String,
}

/// Request body for a website source
#[derive(Debug, Clone, Serialize)]
pub struct WebsiteSourceRequest {
    pub url: String,

    /// Whether to crawl linked pages under the same host
    pub crawl: bool,
}

/// Request body for a database source
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseSourceRequest {
    #[serde(rename = "connectionUri")]
    pub connection_uri: String,

    /// Tables to ingest; empty means all accessible tables
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<String>,
}

/// A question/answer pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

/// Request body for a Q&A source
#[derive(Debug, Clone, Serialize)]
pub struct QaSourceRequest {
    pub pairs: Vec<QaPair>,
}
