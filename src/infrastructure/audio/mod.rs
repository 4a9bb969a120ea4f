mod audio_decoder;
mod openai_whisper_engine;
mod transcription_engine_factory;
mod watson_speech_engine;

pub use audio_decoder::{
    PreparedAudio, TARGET_SAMPLE_RATE, WAV_CONTENT_TYPE, decode_audio_to_pcm, encode_wav,
    prepare_for_recognition,
};
pub use openai_whisper_engine::OpenAiWhisperEngine;
pub use transcription_engine_factory::TranscriptionEngineFactory;
pub use watson_speech_engine::{DEFAULT_RECOGNITION_MODEL, WatsonSpeechEngine};
