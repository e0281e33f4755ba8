use super::views::{self, AlertLevel};
use crate::models::{ImageMime, ImagePayload};
use crate::AppState;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Response,
};

const IMAGE_FIELD: &str = "image";
const GENERIC_BINARY: &str = "application/octet-stream";

struct Upload {
    file_name: String,
    content_type: Option<String>,
    data: Vec<u8>,
}

impl Upload {
    /// The declared type, unless the browser sent none (or the generic
    /// binary type), in which case the file extension decides. A declared
    /// type we don't accept is passed on for the adapter to reject.
    fn mime_type(&self) -> String {
        let declared = self.content_type.as_deref().unwrap_or_default().trim();
        if !declared.is_empty() && !declared.eq_ignore_ascii_case(GENERIC_BINARY) {
            return declared.to_string();
        }

        ImageMime::from_file_name(&self.file_name)
            .map(|mime| mime.as_str().to_string())
            .unwrap_or_else(|| declared.to_string())
    }
}

pub async fn analyze_food(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let mut upload = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read upload");
                return views::alert(e.status(), AlertLevel::Error, e.body_text());
            }
        };

        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        match field.bytes().await {
            Ok(bytes) => {
                upload = Some(Upload {
                    file_name,
                    content_type,
                    data: bytes.to_vec(),
                });
                break;
            }
            Err(e) => {
                tracing::warn!(file_name = %file_name, error = %e, "Failed to read image bytes");
                return views::alert(e.status(), AlertLevel::Error, e.body_text());
            }
        }
    }

    let Some(upload) = upload else {
        return views::alert(
            StatusCode::UNPROCESSABLE_ENTITY,
            AlertLevel::Warning,
            "Please upload an image of your food.",
        );
    };

    let mime_type = upload.mime_type();
    let image = match ImagePayload::adapt(upload.data, &mime_type) {
        Ok(image) => image,
        Err(e) => {
            tracing::info!(file_name = %upload.file_name, error = %e, "Rejected upload");
            return views::alert(StatusCode::UNPROCESSABLE_ENTITY, AlertLevel::Error, e.to_string());
        }
    };

    tracing::info!(
        file_name = %upload.file_name,
        image = ?image,
        "Analyzing food image"
    );

    match state.companion.analyze_food(&image).await {
        Ok(text) => views::result("🍎 Food Analysis Result", text, None),
        Err(err) => views::failure(err),
    }
}
