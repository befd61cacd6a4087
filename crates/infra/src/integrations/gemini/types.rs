//! Gemini `generateContent` wire types

use agrione_core::{ModelReply, ToolCall, ToolConversation, ToolResult};
use agrione_domain::AgriError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Gemini integration errors
#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    /// Transport failure or non-success status, already classified
    #[error(transparent)]
    Http(#[from] AgriError),

    /// The response carried no candidate content
    #[error("Gemini returned no candidates")]
    NoCandidates,

    /// Generation stopped for a safety or policy reason
    #[error("Gemini blocked the response: {0}")]
    Blocked(String),

    /// JSON mode produced text that does not parse
    #[error("Gemini returned malformed JSON: {0}")]
    MalformedJson(String),

    /// The speech response had no inline audio part
    #[error("No media was returned from the text-to-speech model.")]
    MissingAudio,

    /// The inline audio was not valid base64
    #[error("Audio payload is not valid base64: {0}")]
    InvalidAudio(String),
}

impl From<GeminiError> for AgriError {
    fn from(value: GeminiError) -> Self {
        match value {
            GeminiError::Http(err) => err,
            other => AgriError::invalid_response(other.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    pub fn user(parts: Vec<Part>) -> Self {
        Self { contents: vec![Content::user(parts)], tools: Vec::new(), generation_config: None }
    }

    /// Replay a tool conversation: the prompt, then for each round the
    /// model's calls followed by the tool answers.
    pub fn conversation(conversation: &ToolConversation) -> Self {
        let mut contents = vec![Content::user(vec![Part::text(conversation.prompt.as_str())])];
        for round in &conversation.rounds {
            contents.push(Content {
                role: Some("model".into()),
                parts: round.calls.iter().map(Part::function_call).collect(),
            });
            contents.push(Content::user(round.results.iter().map(Part::function_response).collect()));
        }

        let declarations: Vec<FunctionDeclaration> = conversation
            .tools
            .iter()
            .map(|tool| FunctionDeclaration {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters: tool.parameters.clone(),
            })
            .collect();
        let tools = if declarations.is_empty() {
            Vec::new()
        } else {
            vec![Tool { function_declarations: declarations }]
        };

        Self { contents, tools, generation_config: None }
    }

    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Tool {
    pub function_declarations: Vec<FunctionDeclaration>,
}

#[derive(Debug, Serialize)]
pub(crate) struct FunctionDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    fn user(parts: Vec<Part>) -> Self {
        Self { role: Some("user".into()), parts }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_response: Option<FunctionResponse>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), ..Self::default() }
    }

    pub fn inline(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            inline_data: Some(InlineData { mime_type: mime_type.into(), data: data.into() }),
            ..Self::default()
        }
    }

    fn function_call(call: &ToolCall) -> Self {
        Self {
            function_call: Some(FunctionCall { name: call.name.clone(), args: call.args.clone() }),
            ..Self::default()
        }
    }

    fn function_response(result: &ToolResult) -> Self {
        Self {
            function_response: Some(FunctionResponse {
                name: result.name.clone(),
                response: result.response.clone(),
            }),
            ..Self::default()
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct FunctionResponse {
    pub name: String,
    pub response: Value,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_config: Option<SpeechConfig>,
}

impl GenerationConfig {
    pub fn json(schema: Value) -> Self {
        Self {
            response_mime_type: Some("application/json".into()),
            response_schema: Some(schema),
            ..Self::default()
        }
    }

    pub fn audio(voice: &str) -> Self {
        Self {
            response_modalities: Some(vec!["AUDIO".into()]),
            speech_config: Some(SpeechConfig {
                voice_config: VoiceConfig {
                    prebuilt_voice_config: PrebuiltVoiceConfig { voice_name: voice.to_string() },
                },
            }),
            ..Self::default()
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SpeechConfig {
    pub voice_config: VoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VoiceConfig {
    pub prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PrebuiltVoiceConfig {
    pub voice_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Parts of the first candidate.
    pub fn into_parts(self) -> Result<Vec<Part>, GeminiError> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(GeminiError::Blocked(reason));
        }
        let candidate = self.candidates.into_iter().next().ok_or(GeminiError::NoCandidates)?;
        match (candidate.content, candidate.finish_reason) {
            (Some(content), _) if !content.parts.is_empty() => Ok(content.parts),
            (_, Some(reason)) if reason != "STOP" => Err(GeminiError::Blocked(reason)),
            _ => Err(GeminiError::NoCandidates),
        }
    }

    /// Concatenated text of the first candidate.
    pub fn into_text(self) -> Result<String, GeminiError> {
        let text: String = self.into_parts()?.into_iter().filter_map(|p| p.text).collect();
        Ok(text)
    }

    /// Function calls of the first candidate if it made any, its text
    /// otherwise.
    pub fn into_reply(self) -> Result<ModelReply, GeminiError> {
        let parts = self.into_parts()?;
        let calls: Vec<ToolCall> = parts
            .iter()
            .filter_map(|part| part.function_call.as_ref())
            .map(|call| {
                let args = if call.args.is_null() { json!({}) } else { call.args.clone() };
                ToolCall { name: call.name.clone(), args }
            })
            .collect();
        if !calls.is_empty() {
            return Ok(ModelReply::ToolCalls(calls));
        }
        Ok(ModelReply::Text(parts.into_iter().filter_map(|p| p.text).collect()))
    }
}
