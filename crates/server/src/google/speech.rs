//! Cloud Speech-to-Text v1 synchronous recognition.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{GoogleCloudClient, GoogleError, SpeechRecognizer};

const RECOGNIZE_URL: &str = "https://speech.googleapis.com/v1/speech:recognize";

/// Sample rate of browser-recorded WEBM/Opus audio.
pub const SPEECH_SAMPLE_RATE_HERTZ: u32 = 48_000;

#[derive(Serialize)]
struct RecognizeRequest<'a> {
    config: RecognitionConfig<'a>,
    audio: RecognitionAudio<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig<'a> {
    encoding: &'static str,
    sample_rate_hertz: u32,
    language_code: &'a str,
    enable_automatic_punctuation: bool,
    enable_word_time_offsets: bool,
}

#[derive(Serialize)]
struct RecognitionAudio<'a> {
    content: &'a str,
}

#[derive(Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognitionResult>,
}

#[derive(Deserialize)]
struct RecognitionResult {
    #[serde(default)]
    alternatives: Vec<Alternative>,
}

#[derive(Deserialize)]
struct Alternative {
    #[serde(default)]
    transcript: String,
}

impl RecognizeResponse {
    /// Top alternative of every result, one per line.
    fn transcription(self) -> String {
        self.results
            .into_iter()
            .map(|r| {
                r.alternatives
                    .into_iter()
                    .next()
                    .map(|a| a.transcript)
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl SpeechRecognizer for GoogleCloudClient {
    #[instrument(skip(self, audio_base64), fields(audio_len = audio_base64.len()))]
    async fn transcribe(
        &self,
        audio_base64: &str,
        language_code: &str,
    ) -> Result<String, GoogleError> {
        let request = RecognizeRequest {
            config: RecognitionConfig {
                encoding: "WEBM_OPUS",
                sample_rate_hertz: SPEECH_SAMPLE_RATE_HERTZ,
                language_code,
                enable_automatic_punctuation: true,
                enable_word_time_offsets: true,
            },
            audio: RecognitionAudio {
                content: audio_base64,
            },
        };

        let response: RecognizeResponse = self
            .post_json("Cloud Speech-to-Text", RECOGNIZE_URL, &request)
            .await?;
        Ok(response.transcription())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = RecognizeRequest {
            config: RecognitionConfig {
                encoding: "WEBM_OPUS",
                sample_rate_hertz: SPEECH_SAMPLE_RATE_HERTZ,
                language_code: "hi-IN",
                enable_automatic_punctuation: true,
                enable_word_time_offsets: true,
            },
            audio: RecognitionAudio { content: "AAAA" },
        };
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["config"]["sampleRateHertz"], 48_000);
        assert_eq!(json["config"]["languageCode"], "hi-IN");
        assert_eq!(json["config"]["enableAutomaticPunctuation"], true);
        assert_eq!(json["audio"]["content"], "AAAA");
    }

    #[test]
    fn test_transcripts_join_with_newlines() {
        let json = r#"{
            "results": [
                { "alternatives": [{ "transcript": "I make pottery." }, { "transcript": "ignored" }] },
                { "alternatives": [{ "transcript": "In Jaipur." }] }
            ]
        }"#;
        let response: RecognizeResponse = serde_json::from_str(json).expect("deserialize");
        assert_eq!(response.transcription(), "I make pottery.\nIn Jaipur.");
    }

    #[test]
    fn test_no_results_is_empty_transcript() {
        let response: RecognizeResponse = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(response.transcription(), "");
    }
}
