use std::sync::{Arc, Mutex};

use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use bytes::Bytes;

use civicbridge::application::ports::{TranscriptionEngine, TranscriptionError};
use civicbridge::infrastructure::audio::{OpenAiWhisperEngine, TARGET_SAMPLE_RATE, encode_wav};

use crate::support::spawn_server;

#[derive(Debug, Clone)]
struct UploadCall {
    authorization: Option<String>,
    content_type: Option<String>,
    body: String,
}

type Calls = Arc<Mutex<Vec<UploadCall>>>;

fn mock_whisper(calls: Calls, status: StatusCode, response_body: &'static str) -> Router {
    Router::new().route(
        "/v1/audio/transcriptions",
        post(move |headers: HeaderMap, body: Bytes| {
            let calls = Arc::clone(&calls);
            async move {
                let header = |name: &str| {
                    headers
                        .get(name)
                        .and_then(|v| v.to_str().ok())
                        .map(String::from)
                };
                calls.lock().unwrap().push(UploadCall {
                    authorization: header("authorization"),
                    content_type: header("content-type"),
                    body: String::from_utf8_lossy(&body).into_owned(),
                });
                (status, response_body).into_response()
            }
        }),
    )
}

fn engine(base_url: &str) -> OpenAiWhisperEngine {
    OpenAiWhisperEngine::new("sk-test".to_string(), Some(format!("{}/v1/", base_url)), None)
}

#[tokio::test]
async fn given_opus_voice_note_when_transcribing_then_uploaded_as_ogg_file() {
    let calls = Calls::default();
    let (base_url, shutdown) = spawn_server(mock_whisper(
        Arc::clone(&calls),
        StatusCode::OK,
        "  streetlight broken on Park Road\n",
    ))
    .await;

    let transcript = engine(&base_url)
        .transcribe(&vec![0x4fu8; 256], "audio/ogg; codecs=opus")
        .await
        .unwrap();

    assert_eq!(transcript, "streetlight broken on Park Road");

    let calls = calls.lock().unwrap();
    assert_eq!(calls[0].authorization.as_deref(), Some("Bearer sk-test"));
    assert!(
        calls[0]
            .content_type
            .as_deref()
            .unwrap_or_default()
            .starts_with("multipart/form-data")
    );
    let body = &calls[0].body;
    assert!(body.contains("filename=\"voice.ogg\""), "{}", body);
    assert!(body.contains("Content-Type: audio/ogg"), "{}", body);
    assert!(body.contains("name=\"model\"\r\n\r\nwhisper-1"), "{}", body);
    assert!(body.contains("name=\"response_format\"\r\n\r\ntext"), "{}", body);

    shutdown.send(()).ok();
}

#[tokio::test]
async fn given_wav_voice_note_when_transcribing_then_uploaded_as_wav_file() {
    let calls = Calls::default();
    let (base_url, shutdown) =
        spawn_server(mock_whisper(Arc::clone(&calls), StatusCode::OK, "ok")).await;
    let wav = encode_wav(&vec![0.0; 1600], TARGET_SAMPLE_RATE).unwrap();

    engine(&base_url).transcribe(&wav, "audio/wav").await.unwrap();

    let calls = calls.lock().unwrap();
    assert!(calls[0].body.contains("filename=\"voice.wav\""));
    assert!(calls[0].body.contains("Content-Type: audio/wav"));

    shutdown.send(()).ok();
}

#[tokio::test]
async fn given_api_rejects_upload_when_transcribing_then_failure_carries_status() {
    let calls = Calls::default();
    let (base_url, shutdown) = spawn_server(mock_whisper(
        Arc::clone(&calls),
        StatusCode::UNAUTHORIZED,
        r#"{"error": {"message": "Incorrect API key provided"}}"#,
    ))
    .await;

    let result = engine(&base_url).transcribe(b"noise", "audio/ogg").await;

    match result {
        Err(TranscriptionError::TranscriptionFailed(message)) => {
            assert!(message.contains("401"), "{}", message);
            assert!(message.contains("Incorrect API key"), "{}", message);
        }
        other => panic!("unexpected result: {:?}", other),
    }

    shutdown.send(()).ok();
}
