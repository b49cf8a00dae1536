//! ChatVerse API endpoints
//!
//! Thin endpoint bindings over the request pipeline. Paths and payload
//! shapes live here; transport, caching, and error classification live in
//! [`super::http`].

use async_trait::async_trait;
use serde_json::json;

use crate::client::models::{
    Agent, AnalyticsOverview, ChatMessage, ChatSession, CreateAgentRequest, DatabaseSourceRequest,
    LoginResponse, QaSourceRequest, RegisterRequest, Source, TextSourceRequest, UpdateAgentRequest,
    UsagePoint, UserProfile, WebsiteSourceRequest,
};
use crate::client::pagination::{self, PaginationParams};
use crate::client::{ChatVerseApi, ChatVerseClient};
use crate::error::Result;

#[async_trait]
impl ChatVerseApi for ChatVerseClient {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let body = json!({"email": email, "password": password});
        let resp = self
            .post::<LoginResponse>("/users/login", Some(&body))
            .await?;
        let login = resp.into_data();

        self.session().set_token(&login.token)?;
        self.session().set_user(login.user.clone())?;
        log::info!("Signed in as {}", login.user.email);

        Ok(login)
    }

    async fn register(&self, req: &RegisterRequest) -> Result<LoginResponse> {
        let body = serde_json::to_value(req)?;
        let resp = self
            .post::<LoginResponse>("/users/register", Some(&body))
            .await?;
        let login = resp.into_data();

        self.session().set_token(&login.token)?;
        self.session().set_user(login.user.clone())?;
        log::info!("Registered {}", login.user.email);

        Ok(login)
    }

    async fn current_user(&self) -> Result<UserProfile> {
        let resp = self.get::<UserProfile>("/users/me", &[]).await?;
        let user = resp.into_data();
        // Refresh the cached record so `whoami` stays accurate offline
        self.session().set_user(user.clone())?;
        Ok(user)
    }

    async fn list_agents(&self, pagination: Option<&PaginationParams>) -> Result<Vec<Agent>> {
        let query = pagination::to_query(pagination);
        let resp = self.get::<Vec<Agent>>("/agents", &query).await?;
        Ok(resp.into_data())
    }

    async fn get_agent(&self, agent_id: &str) -> Result<Agent> {
        let path = format!("/agents/{}", agent_id);
        let resp = self.get::<Agent>(&path, &[]).await?;
        Ok(resp.into_data())
    }

    async fn create_agent(&self, req: &CreateAgentRequest) -> Result<Agent> {
        let body = serde_json::to_value(req)?;
        let resp = self.post::<Agent>("/agents", Some(&body)).await?;
        Ok(resp.into_data())
    }

    async fn update_agent(&self, agent_id: &str, req: &UpdateAgentRequest) -> Result<Agent> {
        let path = format!("/agents/{}", agent_id);
        let body = serde_json::to_value(req)?;
        let resp = self.put::<Agent>(&path, &body).await?;
        Ok(resp.into_data())
    }

    async fn delete_agent(&self, agent_id: &str) -> Result<()> {
        self.delete(&format!("/agents/{}", agent_id)).await
    }

    async fn list_sources(&self, agent_id: &str) -> Result<Vec<Source>> {
        let path = format!("/agents/{}/sources", agent_id);
        let resp = self.get::<Vec<Source>>(&path, &[]).await?;
        Ok(resp.into_data())
    }

    async fn add_text_source(&self, agent_id: &str, req: &TextSourceRequest) -> Result<Source> {
        self.add_source(agent_id, "text", serde_json::to_value(req)?)
            .await
    }

    async fn add_website_source(
        &self,
        agent_id: &str,
        req: &WebsiteSourceRequest,
    ) -> Result<Source> {
        self.add_source(agent_id, "website", serde_json::to_value(req)?)
            .await
    }

    async fn add_database_source(
        &self,
        agent_id: &str,
        req: &DatabaseSourceRequest,
    ) -> Result<Source> {
        self.add_source(agent_id, "database", serde_json::to_value(req)?)
            .await
    }

    async fn add_qa_source(&self, agent_id: &str, req: &QaSourceRequest) -> Result<Source> {
        self.add_source(agent_id, "qa", serde_json::to_value(req)?)
            .await
    }

    async fn delete_source(&self, source_id: &str) -> Result<()> {
        self.delete(&format!("/sources/{}", source_id)).await
    }

    async fn create_session(&self, agent_id: &str) -> Result<ChatSession> {
        let path = format!("/agents/{}/sessions", agent_id);
        let resp = self.post::<ChatSession>(&path, None).await?;
        Ok(resp.into_data())
    }

    async fn list_sessions(
        &self,
        agent_id: &str,
        pagination: Option<&PaginationParams>,
    ) -> Result<Vec<ChatSession>> {
        let path = format!("/agents/{}/sessions", agent_id);
        let query = pagination::to_query(pagination);
        let resp = self.get::<Vec<ChatSession>>(&path, &query).await?;
        Ok(resp.into_data())
    }

    async fn session_messages(&self, session_id: &str) -> Result<Vec<ChatMessage>> {
        let path = format!("/sessions/{}/messages", session_id);
        let resp = self.get::<Vec<ChatMessage>>(&path, &[]).await?;
        Ok(resp.into_data())
    }

    async fn send_message(&self, session_id: &str, content: &str) -> Result<ChatMessage> {
        let path = format!("/sessions/{}/messages", session_id);
        let body = json!({"content": content});
        let resp = self.post::<ChatMessage>(&path, Some(&body)).await?;
        Ok(resp.into_data())
    }

    async fn analytics_overview(&self, agent_id: Option<&str>) -> Result<AnalyticsOverview> {
        let mut query = Vec::new();
        if let Some(agent_id) = agent_id {
            query.push(("agent_id", agent_id.to_string()));
        }
        let resp = self
            .get::<AnalyticsOverview>("/analytics/overview", &query)
            .await?;
        Ok(resp.into_data())
    }

    async fn usage_series(&self, agent_id: Option<&str>, days: u32) -> Result<Vec<UsagePoint>> {
        let mut query = vec![("days", days.to_string())];
        if let Some(agent_id) = agent_id {
            query.push(("agent_id", agent_id.to_string()));
        }
        let resp = self
            .get::<Vec<UsagePoint>>("/analytics/usage", &query)
            .await?;
        Ok(resp.into_data())
    }
}

impl ChatVerseClient {
    async fn add_source(
        &self,
        agent_id: &str,
        kind: &str,
        mut body: serde_json::Value,
    ) -> Result<Source> {
        if let Some(obj) = body.as_object_mut() {
            obj.insert("type".to_string(), json!(kind));
        }
        let path = format!("/agents/{}/sources", agent_id);
        let resp = self.post::<Source>(&path, Some(&body)).await?;
        Ok(resp.into_data())
    }
}
