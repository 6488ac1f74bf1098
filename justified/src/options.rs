use std::sync::Arc;

use crate::SizeToken;

/// Resolves the URL of an image asset for a given size.
pub type UrlForSize = Arc<dyn Fn(&str, SizeToken) -> String + Send + Sync>;

/// Maps the current window width to the minimum cumulative aspect ratio of a row.
pub type MinAspectRatio = Arc<dyn Fn(u32) -> f64 + Send + Sync>;

/// Transition windows last this many times `transition_duration_ms`.
pub const TRANSITION_TIMEOUT_SCALE_FACTOR: f64 = 1.5;

/// The default breakpoint table: narrower windows use a smaller threshold, so rows hold fewer,
/// larger images.
pub fn default_min_aspect_ratio(window_width: u32) -> f64 {
    if window_width <= 640 {
        2.0
    } else if window_width <= 1280 {
        4.0
    } else if window_width <= 1920 {
        5.0
    } else {
        6.0
    }
}

pub fn default_url_for_size(id: &str, size: SizeToken) -> String {
    format!("/{id}?s={}", size.px())
}

/// Configuration for [`crate::Gallery`].
///
/// Cheap to clone: the closures are stored in `Arc`s.
pub struct GalleryOptions {
    /// Windows at most this wide request the `small` full-resolution asset instead of `medium`.
    pub mobile_breakpoint_px: u32,
    pub space_between_images: u32,
    pub transition_duration_ms: u64,
    pub url_for_size: UrlForSize,
    pub min_aspect_ratio: MinAspectRatio,

    /// Buffer kept on the side the viewport is moving away from.
    pub primary_buffer_px: u32,
    /// Buffer kept ahead of the viewport in the direction of travel.
    pub secondary_buffer_px: u32,
    /// Delay between an item being attached and its assets being requested.
    pub load_delay_ms: u64,
}

impl Clone for GalleryOptions {
    fn clone(&self) -> Self {
        Self {
            mobile_breakpoint_px: self.mobile_breakpoint_px,
            space_between_images: self.space_between_images,
            transition_duration_ms: self.transition_duration_ms,
            url_for_size: Arc::clone(&self.url_for_size),
            min_aspect_ratio: Arc::clone(&self.min_aspect_ratio),
            primary_buffer_px: self.primary_buffer_px,
            secondary_buffer_px: self.secondary_buffer_px,
            load_delay_ms: self.load_delay_ms,
        }
    }
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self {
            mobile_breakpoint_px: 640,
            space_between_images: 8,
            transition_duration_ms: 300,
            url_for_size: Arc::new(default_url_for_size),
            min_aspect_ratio: Arc::new(default_min_aspect_ratio),
            primary_buffer_px: 1500,
            secondary_buffer_px: 200,
            load_delay_ms: 100,
        }
    }
}

impl GalleryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mobile_breakpoint_px(mut self, px: u32) -> Self {
        self.mobile_breakpoint_px = px;
        self
    }

    pub fn with_space_between_images(mut self, px: u32) -> Self {
        self.space_between_images = px;
        self
    }

    pub fn with_transition_duration_ms(mut self, ms: u64) -> Self {
        self.transition_duration_ms = ms;
        self
    }

    pub fn with_url_for_size(
        mut self,
        f: impl Fn(&str, SizeToken) -> String + Send + Sync + 'static,
    ) -> Self {
        self.url_for_size = Arc::new(f);
        self
    }

    pub fn with_min_aspect_ratio(mut self, f: impl Fn(u32) -> f64 + Send + Sync + 'static) -> Self {
        self.min_aspect_ratio = Arc::new(f);
        self
    }

    pub fn with_buffers(mut self, primary_px: u32, secondary_px: u32) -> Self {
        self.primary_buffer_px = primary_px;
        self.secondary_buffer_px = secondary_px;
        self
    }

    pub fn with_load_delay_ms(mut self, ms: u64) -> Self {
        self.load_delay_ms = ms;
        self
    }

    /// Length of the window during which layout passes request animated transitions.
    pub fn transition_window_ms(&self) -> u64 {
        (self.transition_duration_ms as f64 * TRANSITION_TIMEOUT_SCALE_FACTOR) as u64
    }

    /// Merges the fields present in `overrides`; absent fields keep their current value.
    pub fn apply_overrides(&mut self, overrides: &OptionOverrides) {
        if let Some(v) = overrides.mobile_breakpoint_px {
            self.mobile_breakpoint_px = v;
        }
        if let Some(v) = overrides.space_between_images {
            self.space_between_images = v;
        }
        if let Some(v) = overrides.transition_duration_ms {
            self.transition_duration_ms = v;
        }
        if let Some(v) = overrides.primary_buffer_px {
            self.primary_buffer_px = v;
        }
        if let Some(v) = overrides.secondary_buffer_px {
            self.secondary_buffer_px = v;
        }
        if let Some(v) = overrides.load_delay_ms {
            self.load_delay_ms = v;
        }
    }
}

impl core::fmt::Debug for GalleryOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GalleryOptions")
            .field("mobile_breakpoint_px", &self.mobile_breakpoint_px)
            .field("space_between_images", &self.space_between_images)
            .field("transition_duration_ms", &self.transition_duration_ms)
            .field("primary_buffer_px", &self.primary_buffer_px)
            .field("secondary_buffer_px", &self.secondary_buffer_px)
            .field("load_delay_ms", &self.load_delay_ms)
            .finish_non_exhaustive()
    }
}

/// Partial, data-only configuration.
///
/// With `feature = "serde"` this deserializes from camelCase JSON; unknown keys are ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct OptionOverrides {
    #[cfg_attr(feature = "serde", serde(alias = "mobileWidth"))]
    pub mobile_breakpoint_px: Option<u32>,
    pub space_between_images: Option<u32>,
    #[cfg_attr(feature = "serde", serde(alias = "transitionSpeed"))]
    pub transition_duration_ms: Option<u64>,
    pub primary_buffer_px: Option<u32>,
    pub secondary_buffer_px: Option<u32>,
    pub load_delay_ms: Option<u64>,
}

#[cfg(feature = "serde")]
impl OptionOverrides {
    pub fn from_json(json: &str) -> Result<Self, crate::GalleryError> {
        Ok(serde_json::from_str(json)?)
    }
}
