use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::Bytes;

use civicbridge::application::ports::{
    FetchedMedia, GenerationOptions, LlmClient, LlmClientError, MediaFetchError, MediaFetcher,
    OrchestratorClient, OrchestratorError, ReportStore, ReportStoreError, TranscriptionEngine,
    TranscriptionError, WeatherError, WeatherProvider,
};
use civicbridge::domain::{Forecast, StoragePath};

/// Answers prompts from a queue and records every call.
#[derive(Default)]
pub struct ScriptedLlmClient {
    responses: Mutex<VecDeque<Result<String, LlmClientError>>>,
    calls: Mutex<Vec<(String, GenerationOptions)>>,
}

impl ScriptedLlmClient {
    pub fn replying(responses: &[&str]) -> Self {
        Self {
            responses: Mutex::new(responses.iter().map(|r| Ok(r.to_string())).collect()),
            calls: Mutex::default(),
        }
    }

    pub fn failing(error: LlmClientError) -> Self {
        Self {
            responses: Mutex::new(VecDeque::from([Err(error)])),
            calls: Mutex::default(),
        }
    }

    pub fn calls(&self) -> Vec<(String, GenerationOptions)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl LlmClient for ScriptedLlmClient {
    async fn complete(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, LlmClientError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), *options));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmClientError::InvalidResponse("no scripted reply".into())))
    }
}

pub enum MediaOutcome {
    Audio(&'static [u8], &'static str),
    Status(u16),
}

pub struct StubMediaFetcher {
    outcome: MediaOutcome,
    pub calls: AtomicUsize,
}

impl StubMediaFetcher {
    pub fn new(outcome: MediaOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl MediaFetcher for StubMediaFetcher {
    async fn fetch(&self, _url: &str) -> Result<FetchedMedia, MediaFetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            MediaOutcome::Audio(data, content_type) => Ok(FetchedMedia {
                data: Bytes::from_static(data),
                content_type: Some(content_type.to_string()),
            }),
            MediaOutcome::Status(status) => Err(MediaFetchError::UnexpectedStatus(*status)),
        }
    }
}

pub struct StubTranscriptionEngine {
    transcript: Option<&'static str>,
    calls: AtomicUsize,
    content_types: Mutex<Vec<String>>,
}

impl StubTranscriptionEngine {
    pub fn returning(transcript: &'static str) -> Self {
        Self {
            transcript: Some(transcript),
            calls: AtomicUsize::new(0),
            content_types: Mutex::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            transcript: None,
            calls: AtomicUsize::new(0),
            content_types: Mutex::default(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn content_types(&self) -> Vec<String> {
        self.content_types.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl TranscriptionEngine for StubTranscriptionEngine {
    async fn transcribe(
        &self,
        _audio_data: &[u8],
        content_type: &str,
    ) -> Result<String, TranscriptionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.content_types
            .lock()
            .unwrap()
            .push(content_type.to_string());
        self.transcript
            .map(str::to_string)
            .ok_or_else(|| TranscriptionError::TranscriptionFailed("status 400".into()))
    }
}

pub struct StubOrchestrator {
    reply: Option<&'static str>,
    pub received: Mutex<Vec<String>>,
}

impl StubOrchestrator {
    pub fn replying(reply: &'static str) -> Self {
        Self {
            reply: Some(reply),
            received: Mutex::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            received: Mutex::default(),
        }
    }
}

#[async_trait::async_trait]
impl OrchestratorClient for StubOrchestrator {
    async fn send_message(&self, text: &str) -> Result<String, OrchestratorError> {
        self.received.lock().unwrap().push(text.to_string());
        self.reply
            .map(str::to_string)
            .ok_or_else(|| OrchestratorError::ApiRequestFailed("HTTP 500".into()))
    }
}

/// Keeps objects in memory and remembers deletions.
#[derive(Default)]
pub struct RecordingReportStore {
    objects: Mutex<HashMap<String, Bytes>>,
    deleted: Mutex<Vec<String>>,
}

impl RecordingReportStore {
    pub fn with_object(path: &str, data: &'static [u8]) -> Self {
        let store = Self::default();
        store
            .objects
            .lock()
            .unwrap()
            .insert(path.to_string(), Bytes::from_static(data));
        store
    }

    pub fn contains(&self, path: &str) -> bool {
        self.objects.lock().unwrap().contains_key(path)
    }

    pub fn object(&self, path: &str) -> Option<Bytes> {
        self.objects.lock().unwrap().get(path).cloned()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ReportStore for RecordingReportStore {
    async fn store(
        &self,
        path: &StoragePath,
        data: Bytes,
        _content_type: &str,
    ) -> Result<u64, ReportStoreError> {
        let size = data.len() as u64;
        self.objects
            .lock()
            .unwrap()
            .insert(path.as_str().to_string(), data);
        Ok(size)
    }

    async fn create(
        &self,
        path: &StoragePath,
        data: Bytes,
        _content_type: &str,
    ) -> Result<u64, ReportStoreError> {
        let mut objects = self.objects.lock().unwrap();
        if objects.contains_key(path.as_str()) {
            return Err(ReportStoreError::AlreadyExists(path.to_string()));
        }
        let size = data.len() as u64;
        objects.insert(path.as_str().to_string(), data);
        Ok(size)
    }

    async fn fetch(&self, path: &StoragePath) -> Result<Vec<u8>, ReportStoreError> {
        self.objects
            .lock()
            .unwrap()
            .get(path.as_str())
            .map(|b| b.to_vec())
            .ok_or_else(|| ReportStoreError::NotFound(path.to_string()))
    }

    async fn delete(&self, path: &StoragePath) -> Result<(), ReportStoreError> {
        self.objects.lock().unwrap().remove(path.as_str());
        self.deleted.lock().unwrap().push(path.as_str().to_string());
        Ok(())
    }

    fn public_url(&self, path: &StoragePath) -> String {
        format!("https://reports.test/{}", path)
    }
}

/// One three-hour slot of light rain in Kochi.
pub fn sample_forecast() -> Forecast {
    Forecast::filter(&serde_json::json!({
        "cod": "200",
        "list": [{
            "dt": 1718456400,
            "weather": [{ "main": "Rain", "description": "light rain" }],
            "pop": 0.72,
            "rain": { "3h": 1.25 },
            "dt_txt": "2024-06-15 15:00:00"
        }],
        "city": { "name": "Kochi", "coord": { "lat": 9.9667, "lon": 76.2833 } }
    }))
}

pub struct StubWeatherProvider {
    forecast: Option<Forecast>,
    pub cities: Mutex<Vec<String>>,
}

impl StubWeatherProvider {
    pub fn returning(forecast: Forecast) -> Self {
        Self {
            forecast: Some(forecast),
            cities: Mutex::default(),
        }
    }

    pub fn city_not_found() -> Self {
        Self {
            forecast: None,
            cities: Mutex::default(),
        }
    }
}

#[async_trait::async_trait]
impl WeatherProvider for StubWeatherProvider {
    async fn forecast(&self, city: &str) -> Result<Forecast, WeatherError> {
        self.cities.lock().unwrap().push(city.to_string());
        self.forecast
            .clone()
            .ok_or_else(|| WeatherError::Upstream("city not found".into()))
    }
}
