//! Gemini Client
//!
//! Implements the core `VisionService` / `ChatService` seams over the
//! Generative Language REST API (`generateContent`,
//! `streamGenerateContent` with server-sent events).

mod client;
mod error;
mod prompts;
mod sse;
mod types;

pub use client::GeminiClient;
pub use error::ServiceError;
pub use sse::SseDecoder;
pub use types::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part};
