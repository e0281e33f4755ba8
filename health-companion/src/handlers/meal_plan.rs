use super::views;
use crate::services::{ProfileStore, SessionProfileStore};
use crate::AppState;
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Form,
};
use companion_core::error::AppError;
use serde::Deserialize;
use tower_sessions::Session;
use validator::Validate;

pub const MEAL_PLAN_FILE_NAME: &str = "personalized_meal_plan.txt";
const DOWNLOAD_URL: &str = "/meal-plan/download";

#[derive(Debug, Deserialize, Validate)]
pub struct MealPlanForm {
    #[serde(default)]
    #[validate(length(max = 2000, message = "Requirements are limited to 2000 characters."))]
    pub requirements: String,
}

pub async fn generate_meal_plan(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<MealPlanForm>,
) -> Result<Response, AppError> {
    if let Err(errors) = form.validate() {
        return Ok(views::validation_failure(&errors));
    }

    let store = SessionProfileStore::new(session);
    let profile = store.get().await?;

    match state
        .companion
        .meal_plan(&profile, Some(&form.requirements))
        .await
    {
        Ok(plan) => {
            store.set_last_meal_plan(&plan).await?;
            Ok(views::result(
                "🍱 Your Personalized Meal Plan",
                plan,
                Some(DOWNLOAD_URL),
            ))
        }
        Err(err) => Ok(views::failure(err)),
    }
}

/// The last generated plan as a plain-text attachment.
pub async fn download_meal_plan(session: Session) -> Result<Response, AppError> {
    let plan = SessionProfileStore::new(session)
        .last_meal_plan()
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("No meal plan generated yet")))?;

    let disposition = format!("attachment; filename=\"{}\"", MEAL_PLAN_FILE_NAME);

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        plan,
    )
        .into_response())
}
