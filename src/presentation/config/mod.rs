mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    DEFAULT_EXTRACTION_MODEL, DEFAULT_GENERATION_MODEL, DEFAULT_OPENWEATHER_URL,
    DEFAULT_SPEECH_MODEL, DEFAULT_WATSONX_URL, IamSettings, LlmProvider, LlmSettings,
    LoggingSettings, OrchestrateSettings, ServerSettings, Settings, SettingsError,
    SpeechProvider, SpeechSettings, StorageProvider, StorageSettings, TwilioSettings,
    WeatherSettings, WorkOrderStoreProvider, WorkOrderStoreSettings,
};
