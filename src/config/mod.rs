use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use thiserror::Error;

pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_SHEETS_API_BASE: &str = "https://sheets.googleapis.com";
pub const DEFAULT_SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing configuration: {0} is not set")]
    Missing(&'static str),

    #[error("Invalid configuration: {name} = {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub google: GoogleConfig,
    pub sheets: SheetsConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Service-account credentials and OAuth2 endpoint
#[derive(Clone, Serialize, Deserialize)]
pub struct GoogleConfig {
    pub client_email: String,
    #[serde(skip_serializing)]
    pub private_key: String,
    pub token_uri: String,
    pub scope: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    pub api_base: String,
    pub request_timeout_secs: u64,
    pub cache_tokens: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
}

// Never print the key material
impl fmt::Debug for GoogleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleConfig")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("token_uri", &self.token_uri)
            .field("scope", &self.scope)
            .finish()
    }
}

impl GoogleConfig {
    pub fn new(client_email: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            client_email: client_email.into(),
            private_key: unescape_private_key(&private_key.into()),
            token_uri: DEFAULT_TOKEN_URI.to_string(),
            scope: DEFAULT_SHEETS_SCOPE.to_string(),
        }
    }

    pub fn with_token_uri(mut self, token_uri: impl Into<String>) -> Self {
        self.token_uri = token_uri.into();
        self
    }
}

impl SheetsConfig {
    pub fn new(spreadsheet_id: impl Into<String>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            api_base: DEFAULT_SHEETS_API_BASE.to_string(),
            request_timeout_secs: 30,
            cache_tokens: false,
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

/// Keys delivered through environment variables usually carry literal `\n`
/// sequences instead of line breaks.
pub fn unescape_private_key(raw: &str) -> String {
    raw.trim().trim_matches('"').replace("\\n", "\n")
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let spreadsheet_id = required("GOOGLE_SHEETS_SPREADSHEET_ID")?;
        let client_email = required("GOOGLE_SERVICE_ACCOUNT_EMAIL")?;
        let private_key = required("GOOGLE_PRIVATE_KEY")?;

        Self::preset(environment, spreadsheet_id, client_email, private_key).with_env_overrides()
    }

    fn preset(
        environment: Environment,
        spreadsheet_id: String,
        client_email: String,
        private_key: String,
    ) -> Self {
        let google = GoogleConfig::new(client_email, private_key);
        let mut sheets = SheetsConfig::new(spreadsheet_id);
        let api = ApiConfig { port: 3000 };

        match environment {
            Environment::Development => {}
            Environment::Staging => {
                sheets.request_timeout_secs = 20;
                sheets.cache_tokens = true;
            }
            Environment::Production => {
                sheets.request_timeout_secs = 15;
                sheets.cache_tokens = true;
            }
        }

        Self {
            environment,
            google,
            sheets,
            api,
        }
    }

    fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Google overrides
        if let Ok(v) = env::var("GOOGLE_TOKEN_URI") {
            self.google.token_uri = v;
        }
        if let Ok(v) = env::var("GOOGLE_SHEETS_SCOPE") {
            self.google.scope = v;
        }

        // Sheets overrides
        if let Ok(v) = env::var("GOOGLE_SHEETS_API_BASE") {
            self.sheets.api_base = v.trim_end_matches('/').to_string();
        }
        if let Ok(v) = env::var("SHEETS_REQUEST_TIMEOUT_SECS") {
            self.sheets.request_timeout_secs = parse_var("SHEETS_REQUEST_TIMEOUT_SECS", v)?;
        }
        if let Ok(v) = env::var("SHEETS_TOKEN_CACHE") {
            self.sheets.cache_tokens = parse_var("SHEETS_TOKEN_CACHE", v)?;
        }

        // API overrides
        if let Some((name, v)) = port_var(|name| env::var(name).ok()) {
            self.api.port = parse_var(name, v)?;
        }

        Ok(self)
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(name)),
    }
}

/// `UTM_DESK_PORT` wins over the platform-provided `PORT`. Returns the name
/// actually read so parse errors point at the right variable.
fn port_var(lookup: impl Fn(&'static str) -> Option<String>) -> Option<(&'static str, String)> {
    ["UTM_DESK_PORT", "PORT"]
        .into_iter()
        .find_map(|name| lookup(name).map(|v| (name, v)))
}

fn parse_var<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}
