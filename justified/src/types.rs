use core::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Up,
    #[default]
    Down,
}

/// The fixed asset sizes an image can be requested at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SizeToken {
    Thumbnail,
    Small,
    Medium,
    Large,
}

impl SizeToken {
    pub const ALL: [SizeToken; 4] = [Self::Thumbnail, Self::Small, Self::Medium, Self::Large];

    /// Target pixel size passed to the URL resolver.
    pub fn px(self) -> u32 {
        match self {
            Self::Thumbnail => 20,
            Self::Small => 100,
            Self::Medium => 250,
            Self::Large => 500,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Thumbnail => "thumbnail",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl fmt::Display for SizeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position and size of one item, produced by a layout pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutRect {
    pub width: u32,
    pub height: u32,
    pub translate_x: u32,
    pub translate_y: u32,
    /// When set, the display layer should animate position/size changes.
    pub transition: bool,
}

impl LayoutRect {
    pub fn bottom(&self) -> u64 {
        self.translate_y as u64 + self.height as u64
    }
}

/// Geometry reported by the host. All values are in CSS-like pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportMetrics {
    pub window_width: u32,
    pub window_height: u32,
    /// Content width of the gallery container.
    pub container_width: u32,
    /// Distance from the top of the scroll area to the top of the container.
    pub container_top: u32,
}

/// A contiguous run of items sharing the same attachment state.
///
/// `end` is inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttachmentRun {
    pub start: usize,
    pub end: usize,
    pub attached: bool,
}

impl AttachmentRun {
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.end + 1 - self.start
    }
}

impl fmt::Display for AttachmentRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={} {}", self.start, self.end, self.attached)
    }
}
