use thiserror::Error;

/// Errors reported while setting up a gallery.
///
/// Only initialization is fallible. Races during scrolling (late load completions, delayed loads
/// for items that already left the viewport) are absorbed by the engine and never surface here.
#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("container must not be missing")]
    MissingContainer,

    #[error("image {index} has invalid aspect ratio {aspect_ratio} (must be finite and > 0)")]
    InvalidAspectRatio { index: usize, aspect_ratio: f64 },

    #[error("image {index} has unparseable date {value:?}")]
    InvalidDate { index: usize, value: String },

    #[cfg(feature = "serde")]
    #[error("invalid image data: {0}")]
    Json(#[from] serde_json::Error),
}
