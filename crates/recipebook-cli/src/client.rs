use anyhow::{Context, anyhow};
use clap::ValueEnum;
use reqwest::RequestBuilder;
use serde_json::Value;

use crate::config::Profile;

/// Resource collections exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Entity {
    Recipe,
    Menu,
}

impl Entity {
    pub fn path(self) -> &'static str {
        match self {
            Entity::Recipe => "recipe",
            Entity::Menu => "menu",
        }
    }
}

pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn from_profile(profile: &Profile) -> anyhow::Result<Self> {
        let base_url = profile
            .url
            .as_deref()
            .ok_or_else(|| anyhow!("No API URL configured, run `configure` first"))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: profile.token.clone(),
            http: reqwest::Client::new(),
        })
    }

    pub fn list_url(&self, entity: Entity, page: Option<u32>) -> String {
        match page {
            Some(page) => format!("{}/{}?page={page}", self.base_url, entity.path()),
            None => format!("{}/{}", self.base_url, entity.path()),
        }
    }

    pub fn item_url(&self, entity: Entity, id: i64) -> String {
        format!("{}/{}/{id}", self.base_url, entity.path())
    }

    /// Reads are public, so no credentials are sent.
    pub async fn get(&self, url: &str) -> anyhow::Result<Value> {
        self.send(self.http.get(url)).await
    }

    pub async fn add(&self, entity: Entity, payload: &Value) -> anyhow::Result<Value> {
        let url = format!("{}/{}", self.base_url, entity.path());
        self.send(self.authorized(self.http.post(url)).json(payload))
            .await
    }

    pub async fn update(&self, entity: Entity, id: i64, payload: &Value) -> anyhow::Result<Value> {
        let url = self.item_url(entity, id);
        self.send(self.authorized(self.http.patch(url)).json(payload))
            .await
    }

    pub async fn delete(&self, entity: Entity, id: i64) -> anyhow::Result<Value> {
        let url = self.item_url(entity, id);
        self.send(self.authorized(self.http.delete(url))).await
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> anyhow::Result<Value> {
        let response = request.send().await.context("Request failed")?;
        response
            .json()
            .await
            .context("Response body is not JSON")
    }
}

/// Parses a JSON payload given on the command line.
pub fn parse_payload(raw: &str) -> anyhow::Result<Value> {
    serde_json::from_str(raw).context("Payload is not valid JSON")
}
