//! A headless justified-row image gallery.
//!
//! This crate covers the two algorithms that make large galleries hard:
//! - row packing: images with known aspect ratios are packed, in order, into rows that exactly
//!   fill the container width, against a target aspect ratio that depends on the window width;
//! - viewport virtualization: only items whose rects intersect a buffered band around the
//!   viewport are attached to the display tree, in index order, and each attached item loads a
//!   thumbnail and a full-resolution asset after a short delay.
//!
//! It is UI-agnostic. The host provides:
//! - a [`DisplayTree`] (node creation, attach/detach, styling) and an [`AssetLoader`],
//! - window/container geometry and scroll offsets,
//! - the current time, and load completions via [`LoadTicket`]s.
//!
//! Event coalescing (scroll, resize, frame scheduling) lives in the `justified-adapter` crate.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod display;
mod error;
mod gallery;
mod layout;
mod options;
mod progressive;
mod registry;
mod types;
mod viewport;


pub use display::{AssetLoader, DisplayTree, LoadTicket, NodeKind, NodeStyle, SubResource};
pub use error::GalleryError;
pub use gallery::{Gallery, VisibilityPass};
pub use layout::{Layout, TransitionWindow, pack_rows};
pub use options::{
    GalleryOptions, MinAspectRatio, OptionOverrides, TRANSITION_TIMEOUT_SCALE_FACTOR, UrlForSize,
    default_min_aspect_ratio, default_url_for_size,
};
pub use progressive::{LoadState, ResourceState};
pub use registry::{ImageDescriptor, ImageRegistry, RegisteredImage, parse_date};
pub use types::{AttachmentRun, LayoutRect, ScrollDirection, SizeToken, ViewportMetrics};
pub use viewport::{Placement, ViewportBand, VisibleSet};
