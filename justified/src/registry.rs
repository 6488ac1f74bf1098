use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::{GalleryError, GalleryOptions, SizeToken};

/// One input image. Immutable once ingested; its position in the registry is its index.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageDescriptor {
    pub id: String,
    pub aspect_ratio: f64,
    pub date: Option<DateTime<Utc>>,
}

impl ImageDescriptor {
    pub fn new(id: impl Into<String>, aspect_ratio: f64) -> Self {
        Self {
            id: id.into(),
            aspect_ratio,
            date: None,
        }
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }
}

/// An ingested image: its descriptor plus the asset URL for every [`SizeToken`].
#[derive(Clone, Debug, PartialEq)]
pub struct RegisteredImage {
    pub index: usize,
    pub descriptor: ImageDescriptor,
    urls: [String; 4],
}

impl RegisteredImage {
    pub fn url(&self, size: SizeToken) -> &str {
        let slot = match size {
            SizeToken::Thumbnail => 0,
            SizeToken::Small => 1,
            SizeToken::Medium => 2,
            SizeToken::Large => 3,
        };
        &self.urls[slot]
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.descriptor.aspect_ratio
    }
}

/// The ordered, validated list of images a gallery lays out.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImageRegistry {
    images: Vec<RegisteredImage>,
}

impl ImageRegistry {
    /// Validates and ingests descriptors in order.
    ///
    /// Fails on the first descriptor whose aspect ratio is not finite and positive; a zero ratio
    /// would make row heights unbounded.
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = ImageDescriptor>,
        options: &GalleryOptions,
    ) -> Result<Self, GalleryError> {
        let mut images = Vec::new();
        for (index, descriptor) in descriptors.into_iter().enumerate() {
            let aspect_ratio = descriptor.aspect_ratio;
            if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
                return Err(GalleryError::InvalidAspectRatio {
                    index,
                    aspect_ratio,
                });
            }
            let urls = SizeToken::ALL.map(|size| (options.url_for_size)(&descriptor.id, size));
            images.push(RegisteredImage {
                index,
                descriptor,
                urls,
            });
        }
        jdebug!(count = images.len(), "ImageRegistry::from_descriptors");
        Ok(Self { images })
    }

    /// Parses the JSON image list format:
    /// `[{ "filename": "a.jpg", "aspectRatio": 1.5, "date": "2017-04-01" }, ...]`.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str, options: &GalleryOptions) -> Result<Self, GalleryError> {
        let raw: Vec<RawImage> = serde_json::from_str(json)?;
        let mut descriptors = Vec::with_capacity(raw.len());
        for (index, image) in raw.into_iter().enumerate() {
            let date = match image.date.as_deref() {
                None | Some("") => None,
                Some(value) => Some(parse_date(value).ok_or_else(|| GalleryError::InvalidDate {
                    index,
                    value: value.to_owned(),
                })?),
            };
            descriptors.push(ImageDescriptor {
                id: image.filename,
                aspect_ratio: image.aspect_ratio,
                date,
            });
        }
        Self::from_descriptors(descriptors, options)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RegisteredImage> {
        self.images.get(index)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, RegisteredImage> {
        self.images.iter()
    }

    pub fn aspect_ratios(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.images.iter().map(RegisteredImage::aspect_ratio)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawImage {
    #[serde(alias = "id")]
    filename: String,
    aspect_ratio: f64,
    #[serde(default)]
    date: Option<String>,
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` and `YYYY-MM-DD` (midnight UTC).
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
