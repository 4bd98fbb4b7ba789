//! HTTP client for the Generative Language API

use async_trait::async_trait;
use futures::StreamExt;
use inventory_core::chat::ChatTurn;
use inventory_core::domain::{ChatMessage, ChatRole, DetectedObject, ItemAnalysis};
use inventory_core::service::{ChatService, VisionService};
use inventory_core::{AppConfig, AppResult};
use serde::de::DeserializeOwned;

use crate::error::ServiceError;
use crate::prompts::{self, CHAT_THINKING_BUDGET};
use crate::sse::SseDecoder;
use crate::types::{
    strip_fence, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part, ThinkingConfig,
};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: AppConfig,
}

impl GeminiClient {
    pub fn new(config: AppConfig) -> Self {
        Self { http: reqwest::Client::new(), config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.config.api_base.trim_end_matches('/'), model, method)
    }

    fn api_key(&self) -> Result<&str, ServiceError> {
        self.config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ServiceError::MissingApiKey)
    }

    async fn post(&self, url: String, request: &GenerateContentRequest) -> Result<reqwest::Response, ServiceError> {
        let response = self
            .http
            .post(url)
            .header(API_KEY_HEADER, self.api_key()?)
            .json(request)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::from_status(status.as_u16(), &body));
        }
        Ok(response)
    }

    /// One-shot generation, returning the answer text
    pub async fn generate(&self, model: &str, request: &GenerateContentRequest) -> Result<String, ServiceError> {
        log::debug!("generateContent model={}", model);
        let response = self.post(self.endpoint(model, "generateContent"), request).await?;
        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::Decode { message: e.to_string() })?;
        body.text().ok_or(ServiceError::EmptyResponse)
    }

    /// Streamed generation; `on_chunk` receives each text delta in order
    pub async fn stream_generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
        on_chunk: &mut dyn for<'a> FnMut(&'a str),
    ) -> Result<(), ServiceError> {
        log::debug!("streamGenerateContent model={}", model);
        let url = format!("{}?alt=sse", self.endpoint(model, "streamGenerateContent"));
        let response = self.post(url, request).await?;

        let mut decoder = SseDecoder::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            for payload in decoder.push(&chunk?) {
                emit_delta(&payload, on_chunk)?;
            }
        }
        if let Some(payload) = decoder.finish() {
            emit_delta(&payload, on_chunk)?;
        }
        Ok(())
    }

    async fn generate_json<T: DeserializeOwned>(
        &self,
        image_b64: &str,
        prompt: &str,
        schema: serde_json::Value,
    ) -> Result<T, ServiceError> {
        let request = GenerateContentRequest::image_prompt(image_b64, prompt, Some(GenerationConfig::json(schema)));
        let text = self.generate(&self.config.image_model, &request).await?;
        parse_json(&text)
    }

    async fn generate_code(&self, image_b64: &str, prompt: &str) -> Result<Option<String>, ServiceError> {
        let request = GenerateContentRequest::image_prompt(image_b64, prompt, None);
        match self.generate(&self.config.image_model, &request).await {
            Ok(text) => Ok(Some(text.trim().to_string())),
            Err(ServiceError::EmptyResponse) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

fn emit_delta(payload: &str, on_chunk: &mut dyn for<'a> FnMut(&'a str)) -> Result<(), ServiceError> {
    let event: GenerateContentResponse = parse_json(payload)?;
    if let Some(text) = event.text() {
        on_chunk(&text);
    }
    Ok(())
}

fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, ServiceError> {
    serde_json::from_str(strip_fence(text)).map_err(|e| ServiceError::Decode { message: e.to_string() })
}

/// Request for one chat turn. Prior messages become alternating contents;
/// the API requires the conversation to open with a user turn, so any
/// leading model messages (the greeting) are left out.
pub(crate) fn chat_request(turn: &ChatTurn) -> GenerateContentRequest {
    let mut contents: Vec<Content> = turn
        .history
        .iter()
        .skip_while(|m| m.role == ChatRole::Model)
        .filter(|m| !m.text.is_empty())
        .map(message_content)
        .collect();
    contents.push(Content::new(Some("user"), vec![Part::text(turn.message.as_str())]));

    GenerateContentRequest {
        contents,
        system_instruction: Some(Content::new(None, vec![Part::text(turn.system_instruction.as_str())])),
        generation_config: Some(GenerationConfig {
            thinking_config: Some(ThinkingConfig { thinking_budget: CHAT_THINKING_BUDGET }),
            ..Default::default()
        }),
    }
}

fn message_content(message: &ChatMessage) -> Content {
    Content::new(Some(message.role.as_str()), vec![Part::text(message.text.as_str())])
}

#[async_trait(?Send)]
impl VisionService for GeminiClient {
    async fn analyze_item(&self, image_b64: &str) -> AppResult<ItemAnalysis> {
        let analysis = self
            .generate_json(image_b64, prompts::ANALYZE_PROMPT, prompts::analysis_schema())
            .await?;
        Ok(analysis)
    }

    async fn detect_objects(&self, image_b64: &str) -> AppResult<Vec<DetectedObject>> {
        let objects = self
            .generate_json(image_b64, prompts::DETECT_PROMPT, prompts::detection_schema())
            .await?;
        Ok(objects)
    }

    async fn extract_barcode(&self, image_b64: &str) -> AppResult<Option<String>> {
        Ok(self.generate_code(image_b64, prompts::BARCODE_PROMPT).await?)
    }

    async fn read_identifier(&self, image_b64: &str) -> AppResult<Option<String>> {
        Ok(self.generate_code(image_b64, prompts::OCR_PROMPT).await?)
    }
}

#[async_trait(?Send)]
impl ChatService for GeminiClient {
    async fn stream_reply(&self, turn: &ChatTurn, on_chunk: &mut dyn for<'a> FnMut(&'a str)) -> AppResult<()> {
        let request = chat_request(turn);
        self.stream_generate(&self.config.text_model, &request, on_chunk).await?;
        Ok(())
    }
}
