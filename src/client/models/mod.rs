//! Typed resources of the ChatVerse REST API

pub mod agent;
pub mod analytics;
pub mod chat;
pub mod source;
pub mod user;

pub use agent::{Agent, CreateAgentRequest, UpdateAgentRequest};
pub use analytics::{AnalyticsOverview, UsagePoint};
pub use chat::{ChatMessage, ChatSession, MessageRole};
pub use source::{
    DatabaseSourceRequest, QaPair, QaSourceRequest, Source, SourceKind, TextSourceRequest,
    WebsiteSourceRequest,
};
pub use user::{LoginResponse, RegisterRequest, UserProfile};
