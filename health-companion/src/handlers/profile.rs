use super::views::{self, AlertLevel};
use crate::models::HealthProfile;
use crate::services::{ProfileStore, SessionProfileStore};
use askama::Template;
use axum::{
    extract::rejection::FormRejection,
    response::{IntoResponse, Response},
    Form, Json,
};
use companion_core::error::AppError;
use tower_sessions::Session;

/// Success notice plus an out-of-band refresh of the preview panel.
#[derive(Template)]
#[template(path = "fragments/profile_updated.html")]
pub struct ProfileUpdatedTemplate {
    pub level: AlertLevel,
    pub message: String,
    pub profile_json: String,
}

/// Replace the whole profile. The form must carry all five fields; contents
/// are not validated.
pub async fn update_profile(
    session: Session,
    form: Result<Form<HealthProfile>, FormRejection>,
) -> Result<Response, AppError> {
    let profile = match form {
        Ok(Form(profile)) => profile,
        Err(rejection) => {
            tracing::info!(error = %rejection, "Rejected profile form");
            return Ok(views::alert(
                rejection.status(),
                AlertLevel::Warning,
                "Please fill in every profile field before saving.",
            ));
        }
    };

    let profile_json = profile.to_pretty_json();
    SessionProfileStore::new(session).set(profile).await?;

    tracing::info!("Health profile updated");

    Ok(ProfileUpdatedTemplate {
        level: AlertLevel::Success,
        message: "Profile updated!".to_string(),
        profile_json,
    }
    .into_response())
}

pub async fn get_profile(session: Session) -> Result<Json<HealthProfile>, AppError> {
    Ok(Json(SessionProfileStore::new(session).get().await?))
}
