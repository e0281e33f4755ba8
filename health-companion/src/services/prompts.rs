//! Prompt templates for the three companion tasks.
//!
//! All builders are pure: the same inputs always produce the same prompt.

use crate::models::HealthProfile;
use std::fmt::Write;

const NO_EXTRA_REQUIREMENTS: &str = "None provided";

const FOOD_ANALYSIS_PROMPT: &str = "\
You are an expert nutritionist. Analyze this food image.

Provide detailed information about:
- Estimated calories
- Macronutrient breakdown
- Potential health benefits
- Any concerns based on common dietary restrictions
- Suggested portion size

If multiple items are present, analyze each separately.
";

/// Which prompt a request was built from. Used for logging and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTask {
    MealPlan,
    FoodAnalysis,
    HealthInsight,
}

impl PromptTask {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptTask::MealPlan => "meal_plan",
            PromptTask::FoodAnalysis => "food_analysis",
            PromptTask::HealthInsight => "health_insight",
        }
    }
}

/// Seven-day meal plan request for `profile`.
///
/// The caller is responsible for rejecting an entirely empty profile first.
/// `extra_requirements` is embedded verbatim, whitespace included; only
/// absent or empty input reads as "None provided".
pub fn meal_plan_prompt(profile: &HealthProfile, extra_requirements: Option<&str>) -> String {
    let mut prompt =
        String::from("Create a personalized meal plan based on the following health profile:\n\n");

    for (label, value) in profile.fields() {
        let _ = writeln!(prompt, "{}: {}", label, value);
    }

    let extra = extra_requirements
        .filter(|text| !text.is_empty())
        .unwrap_or(NO_EXTRA_REQUIREMENTS);
    let _ = writeln!(prompt, "\nAdditional requirements: {}", extra);

    prompt.push_str(
        "\nProvide:\n\
         1. A 7-day meal plan with breakfast, lunch, dinner, and snacks\n\
         2. Nutritional breakdown for each day (calories, macros)\n\
         3. Explanations for why each meal was chosen\n\
         4. A categorized shopping list\n",
    );

    prompt
}

/// Fixed instructions sent alongside a food photo.
pub fn food_analysis_prompt() -> &'static str {
    FOOD_ANALYSIS_PROMPT
}

/// Expert answer to a free-form health question. The caller rejects empty
/// questions.
pub fn health_insight_prompt(question: &str) -> String {
    format!(
        "You are a certified nutritionist and health expert.\n\
         Provide detailed, science-based insights about:\n\n\
         {}\n\n\
         Include:\n\
         1. Explanation of the science\n\
         2. Practical recommendations\n\
         3. Precautions\n\
         4. References to studies (if available)\n\
         5. Suggested foods/supplements if appropriate\n\n\
         Use simple language but maintain accuracy.\n",
        question
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weight_loss_profile() -> HealthProfile {
        HealthProfile {
            goals: "Lose weight".to_string(),
            ..HealthProfile::blank()
        }
    }

    #[test]
    fn meal_plan_contains_every_profile_field() {
        let profile = HealthProfile {
            goals: "Run a marathon".to_string(),
            conditions: "Type 2 diabetes".to_string(),
            routines: "Yoga daily".to_string(),
            preferences: "Mediterranean\nSpicy food".to_string(),
            restrictions: "Gluten free".to_string(),
        };

        let prompt = meal_plan_prompt(&profile, Some("Budget friendly"));

        assert!(prompt.contains("Health Goals: Run a marathon"));
        assert!(prompt.contains("Medical Conditions: Type 2 diabetes"));
        assert!(prompt.contains("Fitness Routines: Yoga daily"));
        assert!(prompt.contains("Food Preferences: Mediterranean\nSpicy food"));
        assert!(prompt.contains("Dietary Restrictions: Gluten free"));
        assert!(prompt.contains("Additional requirements: Budget friendly"));
    }

    #[test]
    fn meal_plan_end_to_end_scenario() {
        let prompt = meal_plan_prompt(&weight_loss_profile(), Some("quick meals"));

        assert!(prompt.contains("Lose weight"));
        assert!(prompt.contains("quick meals"));
        assert!(prompt.contains("1. A 7-day meal plan with breakfast, lunch, dinner, and snacks"));
        assert!(prompt.contains("2. Nutritional breakdown for each day (calories, macros)"));
        assert!(prompt.contains("3. Explanations for why each meal was chosen"));
        assert!(prompt.contains("4. A categorized shopping list"));
    }

    #[test]
    fn missing_extra_requirements_read_as_none_provided() {
        let profile = weight_loss_profile();
        for extra in [None, Some("")] {
            let prompt = meal_plan_prompt(&profile, extra);
            assert!(prompt.contains("Additional requirements: None provided"));
        }
    }

    #[test]
    fn whitespace_requirements_are_kept() {
        let prompt = meal_plan_prompt(&weight_loss_profile(), Some("   "));
        assert!(prompt.contains("Additional requirements:    \n"));
        assert!(!prompt.contains("None provided"));
    }

    #[test]
    fn extra_requirements_are_verbatim() {
        let extra = "  No microwave; <lunch> at 12:30 & dinner late  ";
        let prompt = meal_plan_prompt(&weight_loss_profile(), Some(extra));
        assert!(prompt.contains(extra));
    }

    #[test]
    fn meal_plan_is_deterministic() {
        let profile = HealthProfile::default();
        assert_eq!(
            meal_plan_prompt(&profile, Some("x")),
            meal_plan_prompt(&profile, Some("x"))
        );
    }

    #[test]
    fn food_analysis_requests_breakdown() {
        let prompt = food_analysis_prompt();
        for needle in [
            "Estimated calories",
            "Macronutrient breakdown",
            "Potential health benefits",
            "dietary restrictions",
            "Suggested portion size",
            "analyze each separately",
        ] {
            assert!(prompt.contains(needle), "missing {needle}");
        }
    }

    #[test]
    fn health_insight_embeds_question() {
        let prompt = health_insight_prompt("How can I improve my gut health?");
        assert!(prompt.contains("How can I improve my gut health?"));
        assert!(prompt.contains("1. Explanation of the science"));
        assert!(prompt.contains("3. Precautions"));
        assert!(prompt.contains("4. References to studies (if available)"));
        assert!(prompt.contains("Use simple language but maintain accuracy."));
    }
}
