use thiserror::Error;

#[derive(Error, Debug)]
pub enum FcError {
    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API request to {url} failed with status: {status}")]
    Status { status: u16, url: String },

    #[error("No Free Company named '{name}' found on server '{server}'")]
    NotFound { server: String, name: String },

    #[error("Unexpected API response: {message}")]
    InvalidResponse { message: String },

    #[error("Field not found: {path}")]
    FieldNotFound { path: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl FcError {
    /// 傳輸層錯誤 (網路失敗或非 2xx 狀態)
    pub fn is_transport(&self) -> bool {
        matches!(self, FcError::Transport(_) | FcError::Status { .. })
    }

    /// 給使用者的修正建議
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FcError::Transport(_) => "Check your network connection and the --base-url setting",
            FcError::Status { status: 401 | 403, .. } => {
                "Check that the API key (--api-key or XIVAPI_KEY) is valid"
            }
            FcError::Status { status: 404, .. } => "Check that the Free Company ID exists",
            FcError::Status { .. } => "The API returned an error, try again later",
            FcError::NotFound { .. } => "Check the server and Free Company name spelling",
            FcError::InvalidResponse { .. } => "The API response format may have changed",
            FcError::FieldNotFound { .. } => {
                "Use snake_case field names, e.g. free_company.active_member_count"
            }
            FcError::IoError(_) | FcError::SerializationError(_) => {
                "Check file permissions and the output destination"
            }
            FcError::ConfigValidationError { .. }
            | FcError::InvalidConfigValueError { .. }
            | FcError::MissingConfigError { .. } => "Fix the configuration file or CLI flags",
        }
    }

    /// CLI 結束代碼
    pub fn exit_code(&self) -> i32 {
        match self {
            FcError::ConfigValidationError { .. }
            | FcError::InvalidConfigValueError { .. }
            | FcError::MissingConfigError { .. } => 2,
            FcError::Transport(_) | FcError::Status { .. } => 3,
            FcError::NotFound { .. } | FcError::FieldNotFound { .. } => 4,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, FcError>;
