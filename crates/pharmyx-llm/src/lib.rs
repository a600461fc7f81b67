//! pharmyx-llm — LLM backend abstraction for clinical report generation.

pub mod backend;

pub use backend::{LlmBackend, LlmError, LlmRequest, LlmResponse, Message, OpenAiBackend};
