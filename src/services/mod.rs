pub mod chat_service;
pub mod launcher;
pub mod model_gateway;
pub mod pdf_export;
pub mod prompt_composer;
pub mod quiz_normalizer;
pub mod quiz_service;
pub mod quiz_shuffler;
