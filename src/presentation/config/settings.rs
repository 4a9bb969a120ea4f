use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;

pub const DEFAULT_EXTRACTION_MODEL: &str = "ibm/granite-3-3-8b-instruct";
pub const DEFAULT_GENERATION_MODEL: &str = "ibm/granite-3-8b-instruct";
pub const DEFAULT_SPEECH_MODEL: &str = "en-US_BroadbandModel";
pub const DEFAULT_WATSONX_URL: &str = "https://us-south.ml.cloud.ibm.com";
pub const DEFAULT_OPENWEATHER_URL: &str = "https://api.openweathermap.org";

/// Legacy flat variables and the settings keys they populate.
const LEGACY_VARIABLES: &[(&str, &str)] = &[
    ("SERVER_PORT", "server.port"),
    ("TWILIO_ACCOUNT_SID", "twilio.account_sid"),
    ("TWILIO_AUTH_TOKEN", "twilio.auth_token"),
    ("WATSONX_APIKEY", "llm.api_key"),
    ("WATSONX_URL", "llm.base_url"),
    ("WATSONX_PROJECT_ID", "llm.project_id"),
    ("WATSON_STT_APIKEY", "speech.api_key"),
    ("WATSON_STT_URL", "speech.service_url"),
    ("WATSON_ORCHESTRATE_URL", "orchestrate.base_url"),
    ("WATSON_ORCHESTRATE_INSTANCE_ID", "orchestrate.instance_id"),
    ("WATSON_ORCHESTRATE_ORCHESTRATION_ID", "orchestrate.orchestration_id"),
    ("WATSON_ORCHESTRATE_APIKEY", "orchestrate.api_key"),
    ("WATSON_ORCHESTRATE_TOKEN", "orchestrate.bearer_token"),
    ("OPENWEATHER_API_KEY", "weather.api_key"),
    ("FIREBASE_DATABASE_URL", "work_orders.database_url"),
    ("FIREBASE_AUTH_TOKEN", "work_orders.auth_token"),
    ("FIREBASE_STORAGE_BUCKET", "storage.bucket"),
    ("FIREBASE_SERVICE_ACCOUNT_KEY_PATH", "storage.service_account_path"),
];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub iam: IamSettings,
    pub llm: LlmSettings,
    pub speech: SpeechSettings,
    pub twilio: TwilioSettings,
    pub weather: WeatherSettings,
    pub orchestrate: OrchestrateSettings,
    pub work_orders: WorkOrderStoreSettings,
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info,civicbridge=debug,tower_http=debug".to_string(),
            enable_json: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IamSettings {
    /// Overrides the IBM Cloud IAM token endpoint.
    pub token_url: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    Watsonx,
    #[serde(rename = "openai")]
    OpenAi,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub project_id: Option<String>,
    pub extraction_model: String,
    pub generation_model: String,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: LlmProvider::Watsonx,
            api_key: None,
            base_url: None,
            project_id: None,
            extraction_model: DEFAULT_EXTRACTION_MODEL.to_string(),
            generation_model: DEFAULT_GENERATION_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechProvider {
    #[default]
    Watson,
    #[serde(rename = "openai")]
    OpenAi,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpeechSettings {
    pub provider: SpeechProvider,
    pub api_key: Option<String>,
    pub service_url: Option<String>,
    pub model: String,
    /// When set, voice notes are answered with this text instead of calling speech-to-text.
    pub stub_transcript: Option<String>,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            provider: SpeechProvider::Watson,
            api_key: None,
            service_url: None,
            model: DEFAULT_SPEECH_MODEL.to_string(),
            stub_transcript: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TwilioSettings {
    pub account_sid: Option<String>,
    pub auth_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeatherSettings {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_OPENWEATHER_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrchestrateSettings {
    pub base_url: Option<String>,
    pub instance_id: Option<String>,
    pub orchestration_id: Option<String>,
    pub api_key: Option<String>,
    pub bearer_token: Option<String>,
}

impl OrchestrateSettings {
    /// The relay is enabled once an endpoint and some credential are present.
    pub fn is_configured(&self) -> bool {
        present(&self.base_url)
            && present(&self.instance_id)
            && present(&self.orchestration_id)
            && (present(&self.api_key) || present(&self.bearer_token))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkOrderStoreProvider {
    #[default]
    Memory,
    Firebase,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorkOrderStoreSettings {
    pub provider: WorkOrderStoreProvider,
    pub database_url: Option<String>,
    pub auth_token: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProvider {
    #[default]
    Local,
    Gcs,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub provider: StorageProvider,
    pub local_path: String,
    /// Prefix for URLs of files served from `local_path`.
    pub public_base_url: String,
    pub bucket: Option<String>,
    pub service_account_path: Option<String>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            provider: StorageProvider::Local,
            local_path: "./data/reports".to_string(),
            public_base_url: "http://localhost:3000".to_string(),
            bucket: None,
            service_account_path: None,
        }
    }
}

impl Settings {
    /// Loads `.env`, `appsettings.<environment>.toml`, `APP__SECTION__KEY`
    /// variables and the legacy flat variables, in increasing precedence.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut builder = Config::builder()
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str().to_lowercase()))
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        for (variable, key) in LEGACY_VARIABLES {
            let value = std::env::var(variable).ok().filter(|v| !v.trim().is_empty());
            builder = builder.set_override_option(*key, value)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Reports every secret the selected providers need but do not have.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let mut missing = Vec::new();

        if !present(&self.twilio.account_sid) {
            missing.push("twilio.account_sid (TWILIO_ACCOUNT_SID)");
        }
        if !present(&self.twilio.auth_token) {
            missing.push("twilio.auth_token (TWILIO_AUTH_TOKEN)");
        }
        if !present(&self.weather.api_key) {
            missing.push("weather.api_key (OPENWEATHER_API_KEY)");
        }

        if !present(&self.llm.api_key) {
            missing.push("llm.api_key (WATSONX_APIKEY)");
        }
        if self.llm.provider == LlmProvider::Watsonx && !present(&self.llm.project_id) {
            missing.push("llm.project_id (WATSONX_PROJECT_ID)");
        }

        if self.speech.stub_transcript.is_none() {
            if !present(&self.speech.api_key) {
                missing.push("speech.api_key (WATSON_STT_APIKEY)");
            }
            if self.speech.provider == SpeechProvider::Watson && !present(&self.speech.service_url)
            {
                missing.push("speech.service_url (WATSON_STT_URL)");
            }
        }

        if self.work_orders.provider == WorkOrderStoreProvider::Firebase
            && !present(&self.work_orders.database_url)
        {
            missing.push("work_orders.database_url (FIREBASE_DATABASE_URL)");
        }
        if self.storage.provider == StorageProvider::Gcs && !present(&self.storage.bucket) {
            missing.push("storage.bucket (FIREBASE_STORAGE_BUCKET)");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(SettingsError::Missing(missing.join(", ")))
        }
    }
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("missing required settings: {0}")]
    Missing(String),
}
