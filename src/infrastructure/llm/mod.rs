mod llm_client_factory;
mod openai_client;
mod watsonx_client;

pub use llm_client_factory::{LlmClientFactory, LlmClientFactoryError};
pub use openai_client::OpenAiClient;
pub use watsonx_client::{WATSONX_API_VERSION, WatsonxClient};

use crate::application::ports::ModelRole;

/// Model ids per role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelIds {
    pub extraction: String,
    pub generation: String,
}

impl ModelIds {
    pub fn for_role(&self, role: ModelRole) -> &str {
        match role {
            ModelRole::Extraction => &self.extraction,
            ModelRole::Generation => &self.generation,
        }
    }
}
