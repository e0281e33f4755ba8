//! Boundary around the external model call.
//!
//! [`InferenceGateway::infer`] returns a tagged result so callers can branch
//! on the failure kind. [`InferenceError::display_text`] is the only place a
//! failure becomes display text.

use crate::models::ImagePayload;
use crate::services::prompts::PromptTask;
use crate::services::providers::{GenerationParams, ProviderError, TextProvider};
use metrics::{counter, histogram};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

/// Prefix of every failure rendered as display text.
pub const ERROR_MARKER: &str = "Error generating response: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferenceErrorKind {
    Configuration,
    Network,
    Authentication,
    RateLimited,
    /// The model refused the input or its own output.
    Rejected,
    EmptyResponse,
    Upstream,
}

impl InferenceErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InferenceErrorKind::Configuration => "configuration",
            InferenceErrorKind::Network => "network",
            InferenceErrorKind::Authentication => "authentication",
            InferenceErrorKind::RateLimited => "rate_limited",
            InferenceErrorKind::Rejected => "rejected",
            InferenceErrorKind::EmptyResponse => "empty_response",
            InferenceErrorKind::Upstream => "upstream",
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{detail}")]
pub struct InferenceError {
    pub kind: InferenceErrorKind,
    pub detail: String,
}

impl InferenceError {
    /// Text shown to the user in place of a model answer.
    pub fn display_text(&self) -> String {
        format!("{}{}", ERROR_MARKER, self.detail)
    }
}

impl From<ProviderError> for InferenceError {
    fn from(err: ProviderError) -> Self {
        let kind = match &err {
            ProviderError::NotConfigured(_) => InferenceErrorKind::Configuration,
            ProviderError::NetworkError(_) => InferenceErrorKind::Network,
            ProviderError::Unauthorized(_) => InferenceErrorKind::Authentication,
            ProviderError::RateLimited => InferenceErrorKind::RateLimited,
            ProviderError::InvalidRequest(_) | ProviderError::ContentFiltered => {
                InferenceErrorKind::Rejected
            }
            ProviderError::EmptyResponse => InferenceErrorKind::EmptyResponse,
            ProviderError::ApiError(_) => InferenceErrorKind::Upstream,
        };

        Self {
            kind,
            detail: err.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct InferenceGateway {
    provider: Arc<dyn TextProvider>,
    params: GenerationParams,
}

impl InferenceGateway {
    pub fn new(provider: Arc<dyn TextProvider>, params: GenerationParams) -> Self {
        Self { provider, params }
    }

    /// One round trip to the model.
    pub async fn infer(
        &self,
        task: PromptTask,
        prompt: &str,
        image: Option<&ImagePayload>,
    ) -> Result<String, InferenceError> {
        let start = Instant::now();
        let images = image.map(std::slice::from_ref).unwrap_or_default();

        let result = self
            .provider
            .generate(prompt, images, &self.params)
            .await
            .map_err(InferenceError::from);

        let elapsed = start.elapsed();
        histogram!("inference_duration_seconds", "task" => task.as_str())
            .record(elapsed.as_secs_f64());

        match &result {
            Ok(response) => {
                counter!("inference_requests_total", "task" => task.as_str(), "outcome" => "ok")
                    .increment(1);
                tracing::info!(
                    task = task.as_str(),
                    model = %self.provider.model(),
                    prompt_len = prompt.len(),
                    has_image = image.is_some(),
                    input_tokens = response.input_tokens,
                    output_tokens = response.output_tokens,
                    finish_reason = ?response.finish_reason,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Inference completed"
                );
            }
            Err(err) => {
                counter!(
                    "inference_requests_total",
                    "task" => task.as_str(),
                    "outcome" => err.kind.as_str()
                )
                .increment(1);
                tracing::warn!(
                    task = task.as_str(),
                    model = %self.provider.model(),
                    kind = err.kind.as_str(),
                    error = %err.detail,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Inference failed"
                );
            }
        }

        result.map(|response| response.text)
    }

    pub async fn health_check(&self) -> Result<(), InferenceError> {
        self.provider
            .health_check()
            .await
            .map_err(InferenceError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::mock::MockTextProvider;
    use crate::models::ImageMime;

    fn gateway(provider: Arc<MockTextProvider>) -> InferenceGateway {
        InferenceGateway::new(provider, GenerationParams::default())
    }

    #[tokio::test]
    async fn returns_model_text() {
        let provider = Arc::new(MockTextProvider::new());
        let text = gateway(provider.clone())
            .infer(PromptTask::HealthInsight, "hello", None)
            .await
            .unwrap();

        assert_eq!(text, "Mock response for: hello");
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn forwards_image() {
        let provider = Arc::new(MockTextProvider::new());
        let image = ImagePayload::adapt(vec![9, 9], "image/jpeg").unwrap();

        gateway(provider.clone())
            .infer(PromptTask::FoodAnalysis, "analyze", Some(&image))
            .await
            .unwrap();

        let recorded = provider.last_request().unwrap();
        assert_eq!(recorded.image_types, vec![ImageMime::Jpeg]);
    }

    #[tokio::test]
    async fn failure_is_tagged() {
        let provider = Arc::new(MockTextProvider::failing(ProviderError::RateLimited));
        let err = gateway(provider)
            .infer(PromptTask::MealPlan, "plan", None)
            .await
            .unwrap_err();

        assert_eq!(err.kind, InferenceErrorKind::RateLimited);
        assert_eq!(err.detail, "Rate limited");
    }

    #[tokio::test]
    async fn failure_display_text_carries_marker() {
        let provider = Arc::new(MockTextProvider::failing(ProviderError::NetworkError(
            "connection refused".to_string(),
        )));
        let text = gateway(provider)
            .infer(PromptTask::MealPlan, "plan", None)
            .await
            .unwrap_err()
            .display_text();

        assert!(text.starts_with(ERROR_MARKER));
        assert!(text.contains("connection refused"));
    }

    #[test]
    fn provider_errors_map_to_kinds() {
        let cases = [
            (ProviderError::NotConfigured("x".into()), InferenceErrorKind::Configuration),
            (ProviderError::NetworkError("x".into()), InferenceErrorKind::Network),
            (ProviderError::Unauthorized("x".into()), InferenceErrorKind::Authentication),
            (ProviderError::RateLimited, InferenceErrorKind::RateLimited),
            (ProviderError::InvalidRequest("x".into()), InferenceErrorKind::Rejected),
            (ProviderError::ContentFiltered, InferenceErrorKind::Rejected),
            (ProviderError::EmptyResponse, InferenceErrorKind::EmptyResponse),
            (ProviderError::ApiError("x".into()), InferenceErrorKind::Upstream),
        ];

        for (provider_error, kind) in cases {
            assert_eq!(InferenceError::from(provider_error).kind, kind);
        }
    }
}
