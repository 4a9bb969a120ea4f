use std::sync::Arc;

use civicbridge::application::ports::OrchestratorClient;
use civicbridge::application::services::{
    GREETING, IMAGE_ACKNOWLEDGEMENT, MessageDispatcher, RELAY_FAILURE, TranscriptSource,
};
use civicbridge::domain::InboundMessage;

use crate::support::{MediaOutcome, StubMediaFetcher, StubOrchestrator, StubTranscriptionEngine};

const OGG: &[u8] = b"OggS-not-really";

fn voice_note() -> InboundMessage {
    InboundMessage {
        body: String::new(),
        num_media: 1,
        media_url: Some("https://api.twilio.test/Media/ME1".to_string()),
        media_content_type: Some("audio/ogg".to_string()),
    }
}

struct Harness {
    fetcher: Arc<StubMediaFetcher>,
    engine: Arc<StubTranscriptionEngine>,
    orchestrator: Arc<StubOrchestrator>,
}

impl Harness {
    fn new(
        outcome: MediaOutcome,
        engine: StubTranscriptionEngine,
        orchestrator: StubOrchestrator,
    ) -> Self {
        Self {
            fetcher: Arc::new(StubMediaFetcher::new(outcome)),
            engine: Arc::new(engine),
            orchestrator: Arc::new(orchestrator),
        }
    }

    fn dispatcher(&self) -> MessageDispatcher {
        let orchestrator: Arc<dyn OrchestratorClient> = self.orchestrator.clone();
        MessageDispatcher::new(
            self.fetcher.clone(),
            TranscriptSource::SpeechToText(self.engine.clone()),
            Some(orchestrator),
        )
    }
}

#[tokio::test]
async fn given_text_only_message_when_dispatching_then_greets_without_calls() {
    let harness = Harness::new(
        MediaOutcome::Audio(OGG, "audio/ogg"),
        StubTranscriptionEngine::returning("unused"),
        StubOrchestrator::replying("unused"),
    );
    let message = InboundMessage {
        body: "hi".to_string(),
        num_media: 0,
        media_url: None,
        media_content_type: None,
    };

    let reply = harness.dispatcher().dispatch(&message).await;

    assert_eq!(reply.messages(), [GREETING.to_string()]);
    assert_eq!(harness.fetcher.call_count(), 0);
    assert_eq!(harness.engine.call_count(), 0);
    assert!(harness.orchestrator.received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn given_media_fetch_404_when_dispatching_then_reports_status_and_stops() {
    let harness = Harness::new(
        MediaOutcome::Status(404),
        StubTranscriptionEngine::returning("unused"),
        StubOrchestrator::replying("unused"),
    );

    let reply = harness.dispatcher().dispatch(&voice_note()).await;

    assert_eq!(reply.messages(), ["Failed to fetch media: HTTP 404".to_string()]);
    assert_eq!(harness.engine.call_count(), 0);
    assert!(harness.orchestrator.received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn given_image_when_dispatching_then_acknowledges_without_fetching() {
    let harness = Harness::new(
        MediaOutcome::Audio(OGG, "audio/ogg"),
        StubTranscriptionEngine::returning("unused"),
        StubOrchestrator::replying("unused"),
    );
    let message = InboundMessage {
        body: String::new(),
        num_media: 1,
        media_url: Some("https://api.twilio.test/Media/ME2".to_string()),
        media_content_type: Some("image/jpeg".to_string()),
    };

    let reply = harness.dispatcher().dispatch(&message).await;

    assert_eq!(reply.messages(), [IMAGE_ACKNOWLEDGEMENT.to_string()]);
    assert_eq!(harness.fetcher.call_count(), 0);
}

#[tokio::test]
async fn given_unsupported_media_when_dispatching_then_reply_is_empty() {
    let harness = Harness::new(
        MediaOutcome::Audio(OGG, "audio/ogg"),
        StubTranscriptionEngine::returning("unused"),
        StubOrchestrator::replying("unused"),
    );
    let message = InboundMessage {
        body: String::new(),
        num_media: 1,
        media_url: Some("https://api.twilio.test/Media/ME3".to_string()),
        media_content_type: Some("application/pdf".to_string()),
    };

    let reply = harness.dispatcher().dispatch(&message).await;

    assert!(reply.messages().is_empty());
    assert_eq!(harness.fetcher.call_count(), 0);
}

#[tokio::test]
async fn given_voice_note_when_relay_succeeds_then_reply_has_transcript_and_response() {
    let harness = Harness::new(
        MediaOutcome::Audio(OGG, "audio/ogg; codecs=opus"),
        StubTranscriptionEngine::returning("pothole on main street"),
        StubOrchestrator::replying("A work order has been created."),
    );

    let reply = harness.dispatcher().dispatch(&voice_note()).await;

    assert_eq!(
        reply.messages(),
        ["Transcription: pothole on main street\n\nResponse: A work order has been created."
            .to_string()]
    );
    assert_eq!(
        *harness.orchestrator.received.lock().unwrap(),
        vec!["pothole on main street".to_string()]
    );
    assert_eq!(harness.engine.content_types(), vec!["audio/ogg".to_string()]);
}

#[tokio::test]
async fn given_generic_download_type_when_transcribing_then_webhook_type_is_used() {
    let harness = Harness::new(
        MediaOutcome::Audio(OGG, "application/octet-stream"),
        StubTranscriptionEngine::returning("streetlight out"),
        StubOrchestrator::replying("Noted."),
    );
    let message = InboundMessage {
        media_content_type: Some("audio/ogg; codecs=opus".to_string()),
        ..voice_note()
    };

    harness.dispatcher().dispatch(&message).await;

    assert_eq!(
        harness.engine.content_types(),
        vec!["audio/ogg; codecs=opus".to_string()]
    );
}

#[tokio::test]
async fn given_relay_fails_when_dispatching_then_reply_keeps_transcript() {
    let harness = Harness::new(
        MediaOutcome::Audio(OGG, "audio/ogg"),
        StubTranscriptionEngine::returning("garbage near the market"),
        StubOrchestrator::failing(),
    );

    let reply = harness.dispatcher().dispatch(&voice_note()).await;

    assert_eq!(
        reply.messages(),
        [format!(
            "Transcription: garbage near the market\n\nError: {}",
            RELAY_FAILURE
        )]
    );
}

#[tokio::test]
async fn given_transcription_fails_when_dispatching_then_relay_is_skipped() {
    let harness = Harness::new(
        MediaOutcome::Audio(OGG, "audio/ogg"),
        StubTranscriptionEngine::failing(),
        StubOrchestrator::replying("unused"),
    );

    let reply = harness.dispatcher().dispatch(&voice_note()).await;

    assert!(reply.messages()[0].starts_with("Failed to transcribe audio:"));
    assert!(harness.orchestrator.received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn given_fixed_transcript_when_dispatching_then_engine_is_not_called() {
    let fetcher = Arc::new(StubMediaFetcher::new(MediaOutcome::Audio(OGG, "audio/ogg")));
    let dispatcher = MessageDispatcher::new(
        fetcher.clone(),
        TranscriptSource::Fixed("streetlight broken".to_string()),
        None,
    );

    let reply = dispatcher.dispatch(&voice_note()).await;

    assert_eq!(fetcher.call_count(), 1);
    assert_eq!(
        reply.messages(),
        ["Transcription: streetlight broken".to_string()]
    );
}
