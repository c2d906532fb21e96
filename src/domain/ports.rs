use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// 取得 Free Company 原始 JSON 的來源
#[async_trait]
pub trait FreeCompanySource: Send + Sync {
    /// Search result object; its `Results` array holds candidates with an `ID`.
    async fn search_by_name(&self, server: &str, name: &str) -> Result<Value>;

    /// Full record for one Free Company, members included only when requested.
    async fn fetch_by_id(&self, id: u64, include_members: bool) -> Result<Value>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn timeout_seconds(&self) -> u64;
    fn include_members(&self) -> bool;
}
