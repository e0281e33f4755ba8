//! Data models for the health companion.

pub mod image;
pub mod profile;

pub use image::{ImageError, ImageMime, ImagePayload};
pub use profile::HealthProfile;
