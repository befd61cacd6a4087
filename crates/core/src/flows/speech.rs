//! Text-to-speech with WAV packaging

use std::sync::Arc;

use agrione_common::{execute_with_fallback, Fallback, FallbackMode, Precondition, RetryExecutor};
use agrione_domain::constants::{TTS_BITS_PER_SAMPLE, TTS_CHANNELS, TTS_SAMPLE_RATE};
use agrione_domain::{AgriError, AudioClip, Result, SpeechRequest};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::instrument;

use super::surface;
use crate::ports::SpeechSynthesizer;

/// Returned as a configuration error when no speech credential is set.
pub const AUDIO_DISABLED_MESSAGE: &str =
    "Audio generation is disabled. Please set your Gemini API key.";

pub struct SpeechService {
    speech: Arc<dyn SpeechSynthesizer>,
    executor: RetryExecutor,
}

impl SpeechService {
    pub fn new(speech: Arc<dyn SpeechSynthesizer>, executor: RetryExecutor) -> Self {
        Self { speech, executor }
    }

    /// Synthesize speech and return it as a WAV data URI.
    #[instrument(skip_all, fields(text_len = request.text.len()))]
    pub async fn synthesize(&self, request: &SpeechRequest) -> Result<AudioClip> {
        let (text, voice) = request.validate()?;
        let speech = self.speech.as_ref();

        let resolved = execute_with_fallback(
            Precondition::require(speech.is_configured(), "GEMINI_API_KEY is not set, audio disabled"),
            move || async move {
                let pcm = speech.synthesize(text, voice).await?;
                if pcm.is_empty() {
                    return Err(AgriError::invalid_response(
                        "No media was returned from the text-to-speech model.",
                    ));
                }
                Ok(Some(pcm))
            },
            Fallback::value(None),
            FallbackMode::SurfaceAll,
            &self.executor,
        )
        .await
        .map_err(surface)?;

        let pcm = resolved.value.ok_or_else(|| AgriError::Config(AUDIO_DISABLED_MESSAGE.into()))?;
        Ok(AudioClip { audio_data_uri: wav_data_uri(&pcm) })
    }
}

/// Wrap PCM samples in a canonical 44-byte-header WAV container.
pub fn pcm_to_wav(pcm: &[u8], sample_rate: u32, channels: u16, bits_per_sample: u16) -> Vec<u8> {
    let block_align = channels * (bits_per_sample / 8);
    let byte_rate = sample_rate * u32::from(block_align);
    let data_len = u32::try_from(pcm.len()).unwrap_or(u32::MAX - 36);

    let mut wav = Vec::with_capacity(44 + pcm.len());
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    // PCM
    wav.extend_from_slice(&1u16.to_le_bytes());
    wav.extend_from_slice(&channels.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&bits_per_sample.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    wav.extend_from_slice(pcm);
    wav
}

/// `data:audio/wav;base64,...` for model PCM output.
pub fn wav_data_uri(pcm: &[u8]) -> String {
    let wav = pcm_to_wav(pcm, TTS_SAMPLE_RATE, TTS_CHANNELS, TTS_BITS_PER_SAMPLE);
    format!("data:audio/wav;base64,{}", STANDARD.encode(wav))
}
