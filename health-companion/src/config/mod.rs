use crate::services::providers::gemini::{GeminiConfig, GEMINI_API_BASE};
use crate::services::providers::GenerationParams;
use companion_core::config::{self as core_config, EnvSource};
use companion_core::error::AppError;
use secrecy::Secret;
use std::time::Duration;

/// Default model, matching what the prompts were tuned against.
const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";

/// Default request timeout for model calls.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default upload limit (10 MiB) for food photos.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct CompanionConfig {
    pub common: core_config::Config,
    pub google: GoogleConfig,
    pub models: ModelConfig,
    pub session: SessionConfig,
    pub uploads: UploadConfig,
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub api_key: Secret<String>,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub text_model: String,
    pub api_base: String,
    pub timeout_secs: u64,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub max_output_tokens: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Mark the session cookie `Secure`; enable behind HTTPS.
    pub secure_cookie: bool,
    pub inactivity_hours: i64,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

impl CompanionConfig {
    /// Load from `.env`, the optional `configuration` file, `APP__*` and the
    /// process environment.
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        Self::from_env(common, &EnvSource::process())
    }

    pub fn from_env<F>(common: core_config::Config, env: &EnvSource<F>) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(CompanionConfig {
            common,
            google: GoogleConfig {
                // No fallback key in any environment.
                api_key: Secret::new(env.required("GOOGLE_API_KEY")?),
            },
            models: ModelConfig {
                text_model: env.with_default("GENAI_TEXT_MODEL", DEFAULT_TEXT_MODEL)?,
                api_base: env
                    .optional("GENAI_API_BASE")
                    .unwrap_or_else(|| GEMINI_API_BASE.to_string()),
                timeout_secs: env.parsed("GENAI_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
                temperature: env.parsed_optional("GENAI_TEMPERATURE")?,
                top_p: env.parsed_optional("GENAI_TOP_P")?,
                max_output_tokens: env.parsed_optional("GENAI_MAX_OUTPUT_TOKENS")?,
            },
            session: SessionConfig {
                secure_cookie: env.parsed("SESSION_SECURE_COOKIE", false)?,
                inactivity_hours: env.parsed("SESSION_INACTIVITY_HOURS", 24)?,
            },
            uploads: UploadConfig {
                max_upload_bytes: env.parsed("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            },
            telemetry: TelemetryConfig {
                log_level: env.parsed("LOG_LEVEL", "info".to_string())?,
                otlp_endpoint: env.optional("OTLP_ENDPOINT"),
            },
        })
    }

    pub fn gemini_config(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.google.api_key.clone(),
            model: self.models.text_model.clone(),
            api_base: self.models.api_base.clone(),
            timeout: Duration::from_secs(self.models.timeout_secs),
        }
    }

    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            temperature: self.models.temperature,
            top_p: self.models.top_p,
            max_tokens: self.models.max_output_tokens,
        }
    }
}
