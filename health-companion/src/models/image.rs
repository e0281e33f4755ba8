//! Uploaded food photos in the shape the model call expects.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageError {
    #[error("Invalid image input: {0}")]
    InvalidInput(String),
}

/// Image types the food analysis accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMime {
    Jpeg,
    Png,
}

impl ImageMime {
    /// Parse a declared content type. Case and parameters (`; charset=...`)
    /// are ignored; `image/jpg` is a common alias for JPEG.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(ImageMime::Jpeg),
            "image/png" => Some(ImageMime::Png),
            _ => None,
        }
    }

    /// Fallback for uploads without a usable content type.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, extension) = file_name.rsplit_once('.')?;
        match extension.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageMime::Jpeg),
            "png" => Some(ImageMime::Png),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMime::Jpeg => "image/jpeg",
            ImageMime::Png => "image/png",
        }
    }
}

impl fmt::Display for ImageMime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One uploaded image, consumed by a single inference call. The bytes are
/// passed through without decoding.
#[derive(Clone, PartialEq, Eq)]
pub struct ImagePayload {
    mime_type: ImageMime,
    data: Vec<u8>,
}

impl ImagePayload {
    pub fn adapt(data: Vec<u8>, mime_type: &str) -> Result<Self, ImageError> {
        if data.is_empty() {
            return Err(ImageError::InvalidInput("image is empty".to_string()));
        }

        let mime_type = ImageMime::from_content_type(mime_type).ok_or_else(|| {
            ImageError::InvalidInput(format!(
                "unsupported image type '{}', expected JPEG or PNG",
                mime_type
            ))
        })?;

        Ok(Self { mime_type, data })
    }

    pub fn mime_type(&self) -> ImageMime {
        self.mime_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

// Bytes are elided so payloads can be logged.
impl fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImagePayload")
            .field("mime_type", &self.mime_type)
            .field("len", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_png_and_jpeg() {
        let png = ImagePayload::adapt(vec![0x89, b'P', b'N', b'G'], "image/png").unwrap();
        assert_eq!(png.mime_type(), ImageMime::Png);
        assert_eq!(png.data(), &[0x89, b'P', b'N', b'G']);

        let jpeg = ImagePayload::adapt(vec![1], "image/jpeg").unwrap();
        assert_eq!(jpeg.mime_type(), ImageMime::Jpeg);
    }

    #[test]
    fn content_is_not_inspected() {
        // Arbitrary bytes pass as long as the declared type is accepted.
        let payload = ImagePayload::adapt(b"not really a png".to_vec(), "image/png").unwrap();
        assert_eq!(payload.data().len(), 16);
    }

    #[test]
    fn rejects_empty_bytes() {
        let err = ImagePayload::adapt(Vec::new(), "image/png").unwrap_err();
        assert!(matches!(err, ImageError::InvalidInput(_)));
    }

    #[test]
    fn rejects_other_types() {
        for mime in ["image/gif", "text/plain", "application/octet-stream", ""] {
            let err = ImagePayload::adapt(vec![1, 2, 3], mime).unwrap_err();
            assert!(matches!(err, ImageError::InvalidInput(_)), "{mime}");
        }
    }

    #[test]
    fn content_type_normalisation() {
        assert_eq!(
            ImageMime::from_content_type("IMAGE/PNG; name=plate.png"),
            Some(ImageMime::Png)
        );
        assert_eq!(ImageMime::from_content_type("image/jpg"), Some(ImageMime::Jpeg));
    }

    #[test]
    fn mime_from_extension() {
        assert_eq!(ImageMime::from_file_name("lunch.JPG"), Some(ImageMime::Jpeg));
        assert_eq!(ImageMime::from_file_name("dinner.jpeg"), Some(ImageMime::Jpeg));
        assert_eq!(ImageMime::from_file_name("snack.png"), Some(ImageMime::Png));
        assert_eq!(ImageMime::from_file_name("menu.pdf"), None);
        assert_eq!(ImageMime::from_file_name("noextension"), None);
    }

    #[test]
    fn debug_omits_bytes() {
        let payload = ImagePayload::adapt(vec![42; 2048], "image/png").unwrap();
        let rendered = format!("{:?}", payload);
        assert!(rendered.contains("len: 2048"));
        assert!(!rendered.contains("42, 42"));
    }
}
