mod watson_orchestrate_client;

pub use watson_orchestrate_client::{OrchestrateCredentials, WatsonOrchestrateClient, reply_text};
