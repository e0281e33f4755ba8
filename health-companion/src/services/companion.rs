//! Task orchestration: input guards, prompt building, model call.

use crate::models::{HealthProfile, ImagePayload};
use crate::services::gateway::{InferenceError, InferenceGateway};
use crate::services::prompts::{self, PromptTask};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompanionError {
    #[error("Please complete your health profile in the sidebar first.")]
    IncompleteProfile,

    #[error("Please enter a health question.")]
    EmptyQuestion,

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

impl CompanionError {
    /// Input problems the user can fix; no model call was made.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            CompanionError::IncompleteProfile | CompanionError::EmptyQuestion
        )
    }

    /// Text for the result panel.
    pub fn user_message(&self) -> String {
        match self {
            CompanionError::Inference(err) => err.display_text(),
            other => other.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct HealthCompanion {
    gateway: InferenceGateway,
}

impl HealthCompanion {
    pub fn new(gateway: InferenceGateway) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &InferenceGateway {
        &self.gateway
    }

    /// Seven-day plan for `profile`. Refused without calling the model when
    /// every profile field is empty.
    pub async fn meal_plan(
        &self,
        profile: &HealthProfile,
        extra_requirements: Option<&str>,
    ) -> Result<String, CompanionError> {
        if profile.is_empty() {
            return Err(CompanionError::IncompleteProfile);
        }

        let prompt = prompts::meal_plan_prompt(profile, extra_requirements);
        Ok(self
            .gateway
            .infer(PromptTask::MealPlan, &prompt, None)
            .await?)
    }

    pub async fn analyze_food(&self, image: &ImagePayload) -> Result<String, CompanionError> {
        Ok(self
            .gateway
            .infer(
                PromptTask::FoodAnalysis,
                prompts::food_analysis_prompt(),
                Some(image),
            )
            .await?)
    }

    /// Answer a health question. Blank questions are refused without calling
    /// the model; anything else is sent as typed.
    pub async fn health_insights(&self, question: &str) -> Result<String, CompanionError> {
        if question.trim().is_empty() {
            return Err(CompanionError::EmptyQuestion);
        }

        let prompt = prompts::health_insight_prompt(question);
        Ok(self
            .gateway
            .infer(PromptTask::HealthInsight, &prompt, None)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::gateway::{InferenceErrorKind, ERROR_MARKER};
    use crate::services::providers::mock::MockTextProvider;
    use crate::services::providers::{GenerationParams, ProviderError};
    use std::sync::Arc;

    fn companion(provider: Arc<MockTextProvider>) -> HealthCompanion {
        HealthCompanion::new(InferenceGateway::new(provider, GenerationParams::default()))
    }

    #[tokio::test]
    async fn empty_profile_skips_the_model() {
        let provider = Arc::new(MockTextProvider::new());
        let err = companion(provider.clone())
            .meal_plan(&HealthProfile::blank(), Some("quick meals"))
            .await
            .unwrap_err();

        assert_eq!(err, CompanionError::IncompleteProfile);
        assert!(err.is_warning());
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn empty_question_skips_the_model() {
        let provider = Arc::new(MockTextProvider::new());
        let companion = companion(provider.clone());

        for question in ["", "   \n"] {
            let err = companion.health_insights(question).await.unwrap_err();
            assert_eq!(err, CompanionError::EmptyQuestion);
        }
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn meal_plan_sends_profile_prompt() {
        let provider = Arc::new(MockTextProvider::new());
        let profile = HealthProfile {
            goals: "Lose weight".to_string(),
            ..HealthProfile::blank()
        };

        let plan = companion(provider.clone())
            .meal_plan(&profile, Some("quick meals"))
            .await
            .unwrap();

        assert!(plan.starts_with("Mock response for:"));
        let recorded = provider.last_request().unwrap();
        assert!(recorded.prompt.contains("Health Goals: Lose weight"));
        assert!(recorded.prompt.contains("Additional requirements: quick meals"));
        assert!(recorded.image_types.is_empty());
    }

    #[tokio::test]
    async fn food_analysis_attaches_image() {
        let provider = Arc::new(MockTextProvider::new());
        let image = ImagePayload::adapt(vec![1, 2, 3], "image/png").unwrap();

        companion(provider.clone()).analyze_food(&image).await.unwrap();

        let recorded = provider.last_request().unwrap();
        assert_eq!(recorded.prompt, prompts::food_analysis_prompt());
        assert_eq!(recorded.image_types.len(), 1);
    }

    #[tokio::test]
    async fn question_is_sent_as_typed() {
        let provider = Arc::new(MockTextProvider::new());
        companion(provider.clone())
            .health_insights("  Is fasting safe?  ")
            .await
            .unwrap();

        let recorded = provider.last_request().unwrap();
        assert!(recorded.prompt.contains("\n\n  Is fasting safe?  \n\n"));
    }

    #[tokio::test]
    async fn inference_failure_is_not_a_warning() {
        let provider = Arc::new(MockTextProvider::failing(ProviderError::Unauthorized(
            "API key not valid.".to_string(),
        )));
        let err = companion(provider)
            .health_insights("Is coffee healthy?")
            .await
            .unwrap_err();

        assert!(!err.is_warning());
        assert!(matches!(
            &err,
            CompanionError::Inference(inner) if inner.kind == InferenceErrorKind::Authentication
        ));
        assert!(err.user_message().starts_with(ERROR_MARKER));
    }
}
