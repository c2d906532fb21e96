use crate::adapters::http::DEFAULT_BASE_URL;
use crate::core::assembly::FreeCompanyLookup;
use crate::core::ConfigProvider;
use crate::utils::error::{FcError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub lookup: LookupConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LookupConfig {
    pub server: Option<String>,
    pub name: Option<String>,
    pub id: Option<LodestoneId>,
    pub include_members: Option<bool>,
}

/// Lodestone ID 可寫成整數或字串 (超過 TOML 整數範圍時用字串)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LodestoneId {
    Number(u64),
    Text(String),
}

impl LodestoneId {
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            LodestoneId::Number(id) => Some(*id),
            LodestoneId::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FcError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| FcError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${XIVAPI_KEY})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    /// 檔案中設定的查詢方式，`id` 優先
    pub fn lookup(&self) -> Option<FreeCompanyLookup> {
        let id = self.lookup.id.as_ref().and_then(LodestoneId::as_u64);
        match (id, &self.lookup.server, &self.lookup.name) {
            (Some(id), _, _) => Some(FreeCompanyLookup::ById(id)),
            (None, Some(server), Some(name)) => Some(FreeCompanyLookup::ByName {
                server: server.clone(),
                name: name.clone(),
            }),
            _ => None,
        }
    }
}

/// 未替換的 `${VAR}` 或空字串視為沒有設定 key
pub(crate) fn usable_api_key(key: Option<&str>) -> Option<&str> {
    key.map(str::trim)
        .filter(|key| !key.is_empty() && !ENV_VAR.is_match(key))
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        self.client.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    fn api_key(&self) -> Option<&str> {
        usable_api_key(self.client.api_key.as_deref())
    }

    fn timeout_seconds(&self) -> u64 {
        self.client.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn include_members(&self) -> bool {
        self.lookup.include_members.unwrap_or(true)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("client.base_url", self.base_url())?;
        validation::validate_range(
            "client.timeout_seconds",
            self.timeout_seconds(),
            1,
            MAX_TIMEOUT_SECONDS,
        )?;
        self.validate_lookup()
    }
}

impl TomlConfig {
    /// 只檢查 `[lookup]` 區段，命令列指定查詢方式時不需要
    pub(crate) fn validate_lookup(&self) -> Result<()> {
        if let Some(id) = &self.lookup.id {
            if id.as_u64().is_none() {
                return Err(FcError::InvalidConfigValueError {
                    field: "lookup.id".to_string(),
                    value: format!("{:?}", id),
                    reason: "Lodestone ID must be a non-negative integer".to_string(),
                });
            }
        }
        if let Some(server) = &self.lookup.server {
            validation::validate_non_empty_string("lookup.server", server)?;
        }
        if let Some(name) = &self.lookup.name {
            validation::validate_non_empty_string("lookup.name", name)?;
        }

        Ok(())
    }
}
