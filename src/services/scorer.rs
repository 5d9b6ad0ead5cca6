//! Relevance scorer - business capability layer
//!
//! Only the "rate this posting" capability; knows nothing about run
//! order, ledgers or apply drivers.
//!
//! ## Stack
//! - `async-openai` against an OpenAI-compatible endpoint (Groq)
//! - primary model with one retry against a lighter fallback model
//!
//! Hard requirement: an unparseable or failed model response must never
//! fault the pipeline. It degrades to score 0 (reserved for "could not
//! be scored"), which fails the relevance gate downstream.

use anyhow::Result;
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error, warn};

use crate::config::Config;
use crate::models::ScoreResult;

const SYSTEM_MESSAGE: &str = "You are a precise AI/ML relevance evaluator.";

/// Scoring capability, infallible by contract.
#[async_trait]
pub trait Scorer: Send + Sync {
    async fn score(&self, description: &str) -> ScoreResult;
}

/// One chat-completion round against a named model.
///
/// Seam between the retry policy and the HTTP client, so the
/// primary-to-fallback path is testable without a live endpoint.
#[async_trait]
trait CompletionApi: Send + Sync {
    async fn complete(&self, model: &str, user_message: &str) -> Result<String>;
}

/// LLM-backed relevance scorer
///
/// Responsibilities:
/// - call the chat API for a single posting description
/// - retry once against the fallback model on any fault
/// - degrade gracefully instead of erroring
pub struct RelevanceScorer {
    client: Client<OpenAIConfig>,
    primary_model: String,
    fallback_model: String,
}

/// Expected structured shape of the model response.
#[derive(Debug, Deserialize)]
struct ScoreResponse {
    score: i64,
    #[serde(default)]
    summary: String,
}

impl RelevanceScorer {
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.groq_api_key)
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            primary_model: config.primary_model.clone(),
            fallback_model: config.fallback_model.clone(),
        }
    }

    fn build_prompt(description: &str) -> String {
        format!(
            r#"You are an AI internship analyzer. Rate this job description from 1 to 10 for AI/ML relevance.
Return JSON only:
{{
  "score": <number>,
  "summary": "<short reasoning>"
}}
Job Description:
{description}"#
        )
    }
}

#[async_trait]
impl CompletionApi for RelevanceScorer {
    async fn complete(&self, model: &str, user_message: &str) -> Result<String> {
        debug!("Calling LLM, model: {}", model);

        let system_msg = ChatCompletionRequestSystemMessageArgs::default()
            .content(SYSTEM_MESSAGE)
            .build()?;
        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()?;
        let messages = vec![
            ChatCompletionRequestMessage::System(system_msg),
            ChatCompletionRequestMessage::User(user_msg),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(messages)
            .temperature(0.2)
            .max_tokens(256u32)
            .build()?;

        let response = self.client.chat().create(request).await?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| anyhow::anyhow!("LLM returned empty content (model: {})", model))?;

        Ok(content.trim().to_string())
    }
}

#[async_trait]
impl Scorer for RelevanceScorer {
    async fn score(&self, description: &str) -> ScoreResult {
        let prompt = Self::build_prompt(description);

        match complete_with_fallback(self, &self.primary_model, &self.fallback_model, &prompt)
            .await
        {
            Some(text) => parse_score_response(&text),
            None => ScoreResult::unscored("Analysis failed"),
        }
    }
}

/// Retry policy: one round against the primary model, one retry against
/// the fallback on any fault. `None` means both rounds failed.
async fn complete_with_fallback(
    api: &dyn CompletionApi,
    primary_model: &str,
    fallback_model: &str,
    prompt: &str,
) -> Option<String> {
    match api.complete(primary_model, prompt).await {
        Ok(text) => Some(text),
        Err(e1) => {
            warn!(
                "Primary model {} failed, retrying with {}: {}",
                primary_model, fallback_model, e1
            );
            match api.complete(fallback_model, prompt).await {
                Ok(text) => Some(text),
                Err(e2) => {
                    error!("Both models failed: {}", e2);
                    None
                }
            }
        }
    }
}

/// Parse the model output into a [`ScoreResult`].
///
/// Models wrap the JSON in prose or code fences often enough that the
/// outermost object is extracted first. Anything still unparseable
/// degrades to score 0 with the raw text as summary.
fn parse_score_response(text: &str) -> ScoreResult {
    let Some(json) = extract_json_object(text) else {
        warn!("Unparseable LLM response, degrading to score 0");
        return ScoreResult::unscored(text);
    };

    match serde_json::from_str::<ScoreResponse>(json) {
        Ok(parsed) => {
            let score = parsed.score.clamp(0, 10) as u8;
            if parsed.score != i64::from(score) {
                warn!("LLM score {} out of range, clamped to {}", parsed.score, score);
            }
            ScoreResult::scored(score, parsed.summary)
        }
        Err(e) => {
            warn!("LLM response not in expected shape ({}), degrading to score 0", e);
            ScoreResult::unscored(text)
        }
    }
}

/// Slice out the outermost `{ ... }` of a response, if present.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Backend that rejects one model and answers for every other.
    struct DegradedBackend {
        down_model: &'static str,
        answer: &'static str,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl CompletionApi for DegradedBackend {
        async fn complete(&self, model: &str, _user_message: &str) -> Result<String> {
            self.calls.lock().unwrap().push(model.to_string());
            if model == self.down_model {
                anyhow::bail!("model {} over capacity", model);
            }
            Ok(self.answer.to_string())
        }
    }

    struct DownBackend;

    #[async_trait]
    impl CompletionApi for DownBackend {
        async fn complete(&self, _model: &str, _user_message: &str) -> Result<String> {
            anyhow::bail!("connection refused")
        }
    }

    #[tokio::test]
    async fn fallback_answer_is_used_when_primary_fails() {
        let backend = DegradedBackend {
            down_model: "llama-3.3-70b-versatile",
            answer: r#"{"score": 7, "summary": "Strong applied ML fit"}"#,
            calls: Mutex::new(Vec::new()),
        };

        let text = complete_with_fallback(
            &backend,
            "llama-3.3-70b-versatile",
            "llama-3.1-8b-instant",
            "prompt",
        )
        .await;

        // exactly one retry, against the fallback model
        assert_eq!(
            backend.calls.lock().unwrap().as_slice(),
            ["llama-3.3-70b-versatile", "llama-3.1-8b-instant"]
        );
        let result = parse_score_response(&text.unwrap());
        assert_eq!(result, ScoreResult::scored(7, "Strong applied ML fit"));
        // a fallback-scored 7 still clears the default gate of 6
        assert!(result.score >= Config::default().relevance_threshold);
    }

    #[tokio::test]
    async fn healthy_primary_is_never_retried() {
        let backend = DegradedBackend {
            down_model: "never-used",
            answer: r#"{"score": 9, "summary": "Core ML role"}"#,
            calls: Mutex::new(Vec::new()),
        };

        let text = complete_with_fallback(
            &backend,
            "llama-3.3-70b-versatile",
            "llama-3.1-8b-instant",
            "prompt",
        )
        .await;

        assert_eq!(
            backend.calls.lock().unwrap().as_slice(),
            ["llama-3.3-70b-versatile"]
        );
        assert!(text.unwrap().contains("Core ML role"));
    }

    #[tokio::test]
    async fn both_models_down_yields_no_answer() {
        let text = complete_with_fallback(
            &DownBackend,
            "llama-3.3-70b-versatile",
            "llama-3.1-8b-instant",
            "prompt",
        )
        .await;
        assert!(text.is_none());
    }

    #[test]
    fn parses_strict_json() {
        let result = parse_score_response(r#"{"score": 8, "summary": "Core ML role"}"#);
        assert_eq!(result.score, 8);
        assert_eq!(result.summary, "Core ML role");
    }

    #[test]
    fn parses_json_inside_code_fence() {
        let text = "```json\n{\"score\": 7, \"summary\": \"Applied NLP\"}\n```";
        let result = parse_score_response(text);
        assert_eq!(result.score, 7);
        assert_eq!(result.summary, "Applied NLP");
    }

    #[test]
    fn unparseable_response_degrades_to_zero_with_raw_text() {
        let text = "I'd rate this a solid eight out of ten.";
        let result = parse_score_response(text);
        assert_eq!(result.score, 0);
        assert_eq!(result.summary, text);
    }

    #[test]
    fn wrong_shape_degrades_to_zero() {
        let text = r#"{"rating": "high"}"#;
        let result = parse_score_response(text);
        assert_eq!(result.score, 0);
        assert_eq!(result.summary, text);
    }

    #[test]
    fn out_of_range_scores_are_clamped() {
        assert_eq!(parse_score_response(r#"{"score": 42, "summary": ""}"#).score, 10);
        assert_eq!(parse_score_response(r#"{"score": -3, "summary": ""}"#).score, 0);
    }

    #[test]
    fn missing_summary_defaults_to_empty() {
        let result = parse_score_response(r#"{"score": 5}"#);
        assert_eq!(result.score, 5);
        assert_eq!(result.summary, "");
    }

    /// Live scorer round trip, including the fallback path when the
    /// primary model is rejected by the endpoint.
    ///
    /// Run manually: `cargo test scorer_live -- --ignored --nocapture`
    /// (requires GROQ_API_KEY).
    #[tokio::test]
    #[ignore]
    async fn scorer_live_round_trip() {
        crate::logging::init();

        let config = Config::from_env();
        let scorer = RelevanceScorer::new(&config);

        let result = scorer
            .score("Machine Learning Intern at Acme Robotics (Internshala)")
            .await;

        println!("score: {} summary: {}", result.score, result.summary);
        assert!(result.score <= 10);
    }
}
