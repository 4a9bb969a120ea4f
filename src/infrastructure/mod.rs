pub mod audio;
pub mod auth;
pub mod llm;
pub mod messaging;
pub mod observability;
pub mod orchestrate;
pub mod pdf;
pub mod persistence;
pub mod storage;
pub mod weather;
