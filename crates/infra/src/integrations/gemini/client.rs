//! Gemini REST client

use agrione_core::{
    GenerativeModel, ModelReply, SpeechSynthesizer, StructuredPrompt, ToolConversation,
};
use agrione_domain::{AgriError, ApiKey, GeminiConfig, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, instrument};

use super::types::{GenerateContentRequest, GenerateContentResponse, GenerationConfig, GeminiError, Part};
use crate::http::HttpClient;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Gemini `generateContent` endpoint.
///
/// Implements both [`GenerativeModel`] (tool-calling chat and JSON generation) and
/// [`SpeechSynthesizer`] (the TTS model), sharing one credential.
pub struct GeminiClient {
    http_client: HttpClient,
    api_key: ApiKey,
    model: String,
    tts_model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig, http_client: HttpClient) -> Self {
        Self {
            http_client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            tts_model: config.tts_model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{model}:generateContent", self.base_url)
    }

    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> std::result::Result<GenerateContentResponse, GeminiError> {
        let builder = self
            .http_client
            .request(Method::POST, self.endpoint(model))
            .header(API_KEY_HEADER, self.api_key.expose())
            .json(request);

        let response = self.http_client.send_checked(builder).await?;
        let body: GenerateContentResponse =
            response.json().await.map_err(|e| GeminiError::MalformedJson(e.to_string()))?;
        Ok(body)
    }

    async fn structured(&self, prompt: &StructuredPrompt) -> std::result::Result<Value, GeminiError> {
        let mut parts = vec![Part::text(prompt.prompt.as_str())];
        if let Some(image) = &prompt.image {
            parts.push(Part::inline(image.mime_type.as_str(), image.data.as_str()));
        }
        let request = GenerateContentRequest::user(parts)
            .with_config(GenerationConfig::json(prompt.schema.clone()));

        let text = self.generate(&self.model, &request).await?.into_text()?;
        serde_json::from_str(&text).map_err(|e| GeminiError::MalformedJson(e.to_string()))
    }

    async fn speech(&self, text: &str, voice: &str) -> std::result::Result<Vec<u8>, GeminiError> {
        let request =
            GenerateContentRequest::user(vec![Part::text(text)]).with_config(GenerationConfig::audio(voice));

        let parts = self.generate(&self.tts_model, &request).await?.into_parts()?;
        let audio = parts
            .into_iter()
            .find_map(|part| part.inline_data)
            .ok_or(GeminiError::MissingAudio)?;
        debug!(mime_type = %audio.mime_type, "Received speech audio");

        STANDARD.decode(audio.data.as_bytes()).map_err(|e| GeminiError::InvalidAudio(e.to_string()))
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_configured()
    }

    #[instrument(skip_all, fields(model = %self.model, has_image = request.image.is_some()))]
    async fn generate_json(&self, request: &StructuredPrompt) -> Result<Value> {
        Ok(self.structured(request).await?)
    }

    #[instrument(skip_all, fields(model = %self.model, rounds = conversation.rounds.len()))]
    async fn converse(&self, conversation: &ToolConversation) -> Result<ModelReply> {
        let request = GenerateContentRequest::conversation(conversation);
        let reply = self.generate(&self.model, &request).await?.into_reply()?;
        if let ModelReply::ToolCalls(calls) = &reply {
            debug!(calls = calls.len(), "Model requested tool calls");
        }
        Ok(reply)
    }
}

#[async_trait]
impl SpeechSynthesizer for GeminiClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_configured()
    }

    #[instrument(skip_all, fields(model = %self.tts_model, voice = %voice))]
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>> {
        self.speech(text, voice).await.map_err(AgriError::from)
    }
}
