use crate::adapters::http::DEFAULT_BASE_URL;
use crate::config::toml_config::{usable_api_key, TomlConfig, DEFAULT_TIMEOUT_SECONDS, MAX_TIMEOUT_SECONDS};
use crate::core::assembly::FreeCompanyLookup;
use crate::core::ConfigProvider;
use crate::utils::error::{FcError, Result};
use crate::utils::validation::{self, Validate};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum OutputFormat {
    /// 單行 JSON
    Json,
    /// 縮排 JSON
    #[default]
    Pretty,
    /// FreeCompany(name="...", ...) 形式
    Repr,
}

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "fcview")]
#[command(about = "Look up a Free Company on XIVAPI and print it with snake_case fields")]
pub struct CliConfig {
    /// Lodestone ID of the Free Company
    #[arg(long, conflicts_with_all = ["server", "name"])]
    pub id: Option<u64>,

    /// Server to search on (requires --name)
    #[arg(long, requires = "name")]
    pub server: Option<String>,

    /// Free Company name to search for (requires --server)
    #[arg(long, requires = "server")]
    pub name: Option<String>,

    #[arg(long, conflicts_with = "no_members", help = "Request the member list even if the config file disables it")]
    pub members: bool,

    #[arg(long, help = "Do not request the member list")]
    pub no_members: bool,

    /// Dotted field path to print, e.g. free_company.active_member_count
    #[arg(long)]
    pub field: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(long, env = "XIVAPI_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[arg(skip)]
    #[serde(skip)]
    file: Option<TomlConfig>,
}

impl CliConfig {
    /// 合併 TOML 檔案設定，命令列參數優先
    pub fn with_file(mut self, file: TomlConfig) -> Self {
        self.file = Some(file);
        self
    }

    /// 讀取 `--config` 指定的檔案 (若有)
    pub fn load_file(self) -> Result<Self> {
        match &self.config {
            Some(path) => {
                let file = TomlConfig::from_file(path)?;
                Ok(self.with_file(file))
            }
            None => Ok(self),
        }
    }

    pub fn lookup(&self) -> Result<FreeCompanyLookup> {
        if let Some(id) = self.id {
            return Ok(FreeCompanyLookup::ById(id));
        }

        if self.server.is_some() || self.name.is_some() {
            let server = validation::validate_required_field("server", &self.server)?;
            let name = validation::validate_required_field("name", &self.name)?;
            return Ok(FreeCompanyLookup::ByName {
                server: server.clone(),
                name: name.clone(),
            });
        }

        self.file
            .as_ref()
            .and_then(TomlConfig::lookup)
            .ok_or_else(|| FcError::MissingConfigError {
                field: "--id or --server/--name".to_string(),
            })
    }
}

impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        match (&self.base_url, &self.file) {
            (Some(url), _) => url.as_str(),
            (None, Some(file)) => file.base_url(),
            (None, None) => DEFAULT_BASE_URL,
        }
    }

    fn api_key(&self) -> Option<&str> {
        usable_api_key(self.api_key.as_deref()).or_else(|| self.file.as_ref().and_then(TomlConfig::api_key))
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout
            .or_else(|| self.file.as_ref().map(TomlConfig::timeout_seconds))
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn include_members(&self) -> bool {
        match (self.members, self.no_members) {
            (true, _) => true,
            (_, true) => false,
            _ => self.file.as_ref().map_or(true, TomlConfig::include_members),
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        // 檔案中的 client 設定可能被旗標覆蓋，只驗證合併後的值
        let lookup_from_flags = self.id.is_some() || self.server.is_some() || self.name.is_some();
        if let (Some(file), false) = (&self.file, lookup_from_flags) {
            file.validate_lookup()?;
        }

        validation::validate_url("base_url", self.base_url())?;
        validation::validate_range("timeout", self.timeout_seconds(), 1, MAX_TIMEOUT_SECONDS)?;

        match self.lookup()? {
            FreeCompanyLookup::ByName { server, name } => {
                validation::validate_non_empty_string("server", &server)?;
                validation::validate_non_empty_string("name", &name)?;
            }
            FreeCompanyLookup::ById(_) => {}
        }

        if let Some(field) = &self.field {
            validation::validate_non_empty_string("field", field)?;
        }

        Ok(())
    }
}
