use crate::domain::ports::{ConfigProvider, FreeCompanySource};
use crate::utils::error::{FcError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://xivapi.com";

/// XIVAPI 的 Free Company 端點
pub struct XivApiClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl XivApiClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            client: Client::new(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        Ok(Self {
            base_url: config.base_url().trim_end_matches('/').to_string(),
            api_key: config.api_key().map(str::to_string),
            client,
        })
    }

    async fn get_json(&self, url: &str, params: &[(&str, &str)]) -> Result<Value> {
        let mut request = self.client.get(url).query(params);

        // API key 以 query 參數傳遞
        if let Some(key) = &self.api_key {
            request = request.query(&[("private_key", key)]);
        }

        tracing::debug!("📡 Making API request to: {}", url);
        let response = request.send().await?;
        tracing::debug!("📡 API response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            tracing::error!("❌ API request to {} failed with status: {}", url, status);
            return Err(FcError::Status {
                status,
                url: url.to_string(),
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl FreeCompanySource for XivApiClient {
    async fn search_by_name(&self, server: &str, name: &str) -> Result<Value> {
        let url = format!("{}/freecompany/search", self.base_url);
        self.get_json(&url, &[("name", name), ("server", server)]).await
    }

    async fn fetch_by_id(&self, id: u64, include_members: bool) -> Result<Value> {
        let url = format!("{}/freecompany/{}", self.base_url, id);
        let params: &[(&str, &str)] = if include_members { &[("data", "FCM")] } else { &[] };
        self.get_json(&url, params).await
    }
}
