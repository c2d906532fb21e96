use crate::core::transform::transform;
use crate::domain::model::StructuredNode;
use crate::domain::ports::FreeCompanySource;
use crate::utils::error::{FcError, Result};
use serde_json::Value;
use std::fmt;

pub const ROOT_LABEL: &str = "FreeCompany";

/// 查詢 Free Company 的兩種方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FreeCompanyLookup {
    ByName { server: String, name: String },
    ById(u64),
}

impl fmt::Display for FreeCompanyLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FreeCompanyLookup::ByName { server, name } => write!(f, "'{}' on {}", name, server),
            FreeCompanyLookup::ById(id) => write!(f, "#{}", id),
        }
    }
}

pub struct FreeCompanyAssembler<S: FreeCompanySource> {
    source: S,
}

impl<S: FreeCompanySource> FreeCompanyAssembler<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// 取得原始資料並轉成結構化的 Free Company
    pub async fn assemble(
        &self,
        lookup: &FreeCompanyLookup,
        include_members: bool,
    ) -> Result<StructuredNode> {
        tracing::info!("🔍 Looking up Free Company {}", lookup);

        let id = match lookup {
            FreeCompanyLookup::ByName { server, name } => self.resolve_id(server, name).await?,
            FreeCompanyLookup::ById(id) => *id,
        };

        tracing::debug!("📡 Fetching Free Company #{} (members: {})", id, include_members);
        let raw = self.source.fetch_by_id(id, include_members).await?;

        let view = transform(&raw, ROOT_LABEL);
        tracing::info!("✅ Free Company #{} assembled", id);
        Ok(view)
    }

    async fn resolve_id(&self, server: &str, name: &str) -> Result<u64> {
        let search = self.source.search_by_name(server, name).await?;

        let first = search
            .get("Results")
            .and_then(Value::as_array)
            .and_then(|results| results.first())
            .ok_or_else(|| FcError::NotFound {
                server: server.to_string(),
                name: name.to_string(),
            })?;

        let id = first.get("ID").and_then(parse_id).ok_or_else(|| FcError::InvalidResponse {
            message: format!("search result has no usable ID: {}", first),
        })?;

        tracing::debug!("🔎 '{}' on {} resolved to #{}", name, server, id);
        Ok(id)
    }
}

/// Lodestone ID 可能是數字，也可能是數字字串
fn parse_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
