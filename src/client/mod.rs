//! ChatVerse API client

use async_trait::async_trait;

use crate::error::Result;

pub mod envelope;
pub mod http;
pub mod models;
pub mod pagination;

mod chatverse;

pub use envelope::ApiResponse;
pub use http::ChatVerseClient;
pub use pagination::{DEFAULT_PAGE_SIZE, PaginationParams};

use models::{
    Agent, AnalyticsOverview, ChatMessage, ChatSession, CreateAgentRequest, DatabaseSourceRequest,
    LoginResponse, QaSourceRequest, RegisterRequest, Source, TextSourceRequest, UpdateAgentRequest,
    UsagePoint, UserProfile, WebsiteSourceRequest,
};

/// ChatVerse API surface.
///
/// Everything flows through the request pipeline in [`http`]; this trait is
/// the seam commands program against.
#[async_trait]
pub trait ChatVerseApi: Send + Sync {
    /// Sign in with email/password. On success the client stores the token
    /// and user record in its session store.
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse>;

    /// Create an account. Behaves like [`login`](Self::login) on success.
    async fn register(&self, req: &RegisterRequest) -> Result<LoginResponse>;

    /// Fetch the signed-in user.
    async fn current_user(&self) -> Result<UserProfile>;

    // Agents

    async fn list_agents(&self, pagination: Option<&PaginationParams>) -> Result<Vec<Agent>>;

    async fn get_agent(&self, agent_id: &str) -> Result<Agent>;

    async fn create_agent(&self, req: &CreateAgentRequest) -> Result<Agent>;

    async fn update_agent(&self, agent_id: &str, req: &UpdateAgentRequest) -> Result<Agent>;

    async fn delete_agent(&self, agent_id: &str) -> Result<()>;

    // Knowledge sources

    async fn list_sources(&self, agent_id: &str) -> Result<Vec<Source>>;

    async fn add_text_source(&self, agent_id: &str, req: &TextSourceRequest) -> Result<Source>;

    async fn add_website_source(
        &self,
        agent_id: &str,
        req: &WebsiteSourceRequest,
    ) -> Result<Source>;

    async fn add_database_source(
        &self,
        agent_id: &str,
        req: &DatabaseSourceRequest,
    ) -> Result<Source>;

    async fn add_qa_source(&self, agent_id: &str, req: &QaSourceRequest) -> Result<Source>;

    async fn delete_source(&self, source_id: &str) -> Result<()>;

    // Chat

    async fn create_session(&self, agent_id: &str) -> Result<ChatSession>;

    async fn list_sessions(
        &self,
        agent_id: &str,
        pagination: Option<&PaginationParams>,
    ) -> Result<Vec<ChatSession>>;

    async fn session_messages(&self, session_id: &str) -> Result<Vec<ChatMessage>>;

    async fn send_message(&self, session_id: &str, content: &str) -> Result<ChatMessage>;

    // Analytics

    async fn analytics_overview(&self, agent_id: Option<&str>) -> Result<AnalyticsOverview>;

    async fn usage_series(&self, agent_id: Option<&str>, days: u32) -> Result<Vec<UsagePoint>>;
}
