use super::views;
use crate::AppState;
use axum::{extract::State, response::Response, Form};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct InsightForm {
    #[serde(default)]
    #[validate(length(max = 1000, message = "Questions are limited to 1000 characters."))]
    pub question: String,
}

pub async fn get_insights(State(state): State<AppState>, Form(form): Form<InsightForm>) -> Response {
    if let Err(errors) = form.validate() {
        return views::validation_failure(&errors);
    }

    match state.companion.health_insights(&form.question).await {
        Ok(text) => views::result("💡 Expert Health Insights", text, None),
        Err(err) => views::failure(err),
    }
}
