//! Text-to-speech requests

use serde::{Deserialize, Serialize};

use super::required;
use crate::constants::DEFAULT_VOICE;
use crate::errors::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechRequest {
    #[serde(default)]
    pub text: String,
    /// Prebuilt voice name; defaults to "Algenib".
    #[serde(default)]
    pub voice: Option<String>,
}

impl SpeechRequest {
    /// Returns the trimmed text and the voice to use.
    pub fn validate(&self) -> Result<(&str, &str)> {
        let text = required(&self.text, "Text is missing.")?;
        let voice = self
            .voice
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_VOICE);
        Ok((text, voice))
    }
}

/// Playable audio, as a `data:audio/wav;base64,...` URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioClip {
    pub audio_data_uri: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_defaults_to_algenib() {
        let request = SpeechRequest { text: "hello".into(), voice: None };
        assert_eq!(request.validate().unwrap(), ("hello", "Algenib"));

        let request = SpeechRequest { text: "hello".into(), voice: Some(" ".into()) };
        assert_eq!(request.validate().unwrap().1, "Algenib");

        let request = SpeechRequest { text: "hello".into(), voice: Some("Kore".into()) };
        assert_eq!(request.validate().unwrap().1, "Kore");
    }

    #[test]
    fn test_text_required() {
        let request = SpeechRequest { text: String::new(), voice: None };
        assert_eq!(request.validate().unwrap_err().to_string(), "Text is missing.");
    }
}
