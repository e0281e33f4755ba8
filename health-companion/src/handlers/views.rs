//! HTMX fragments shared by the task handlers.

use crate::services::{CompanionError, InferenceErrorKind};
use askama::Template;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use validator::ValidationErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Success,
    Warning,
    Error,
}

impl AlertLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            AlertLevel::Success => "alert-success",
            AlertLevel::Warning => "alert-warning",
            AlertLevel::Error => "alert-error",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            AlertLevel::Success => "✅",
            AlertLevel::Warning => "⚠️",
            AlertLevel::Error => "❌",
        }
    }
}

#[derive(Template)]
#[template(path = "fragments/alert.html")]
pub struct AlertTemplate {
    pub level: AlertLevel,
    pub message: String,
}

#[derive(Template)]
#[template(path = "fragments/result.html")]
pub struct ResultTemplate {
    pub title: &'static str,
    pub text: String,
    pub download_url: Option<&'static str>,
}

pub fn alert(status: StatusCode, level: AlertLevel, message: impl Into<String>) -> Response {
    (
        status,
        AlertTemplate {
            level,
            message: message.into(),
        },
    )
        .into_response()
}

pub fn result(title: &'static str, text: String, download_url: Option<&'static str>) -> Response {
    ResultTemplate {
        title,
        text,
        download_url,
    }
    .into_response()
}

/// Warnings are 422; model failures get a status derived from their kind but
/// always show the marker text.
pub fn failure(err: CompanionError) -> Response {
    let status = match &err {
        CompanionError::Inference(inner) => match inner.kind {
            InferenceErrorKind::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            InferenceErrorKind::Rejected => StatusCode::UNPROCESSABLE_ENTITY,
            InferenceErrorKind::Configuration | InferenceErrorKind::Authentication => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            InferenceErrorKind::Network
            | InferenceErrorKind::EmptyResponse
            | InferenceErrorKind::Upstream => StatusCode::BAD_GATEWAY,
        },
        CompanionError::IncompleteProfile | CompanionError::EmptyQuestion => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    };
    let level = if err.is_warning() {
        AlertLevel::Warning
    } else {
        AlertLevel::Error
    };

    alert(status, level, err.user_message())
}

pub fn validation_failure(errors: &ValidationErrors) -> Response {
    let message = errors
        .field_errors()
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .collect::<Vec<_>>()
        .join(" ");

    let message = if message.is_empty() {
        "Input rejected.".to_string()
    } else {
        message
    };

    alert(StatusCode::UNPROCESSABLE_ENTITY, AlertLevel::Warning, message)
}
