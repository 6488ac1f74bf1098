use core::fmt::Debug;

use crate::LayoutRect;

/// The kinds of node the gallery creates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The per-item container (a `<figure>` on the web).
    Figure,
    /// The low-resolution placeholder inside a figure.
    Thumbnail,
    /// The full-resolution image inside a figure.
    FullImage,
}

/// Geometry and animation applied to an item's figure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NodeStyle {
    pub width: u32,
    pub height: u32,
    pub translate_x: u32,
    pub translate_y: u32,
    /// `Some(duration)` when transform changes should animate.
    pub transition_ms: Option<u64>,
}

impl NodeStyle {
    pub fn from_rect(rect: &LayoutRect, transition_duration_ms: u64) -> Self {
        Self {
            width: rect.width,
            height: rect.height,
            translate_x: rect.translate_x,
            translate_y: rect.translate_y,
            transition_ms: rect.transition.then_some(transition_duration_ms),
        }
    }
}

/// The display tree the gallery mutates.
///
/// Nodes are opaque handles owned by the host; the gallery only stores and passes them back.
pub trait DisplayTree {
    type Node: Clone + PartialEq + Debug;

    fn create_node(&mut self, kind: NodeKind) -> Self::Node;
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node);
    fn insert_before(&mut self, parent: &Self::Node, child: &Self::Node, reference: &Self::Node);
    fn remove_child(&mut self, parent: &Self::Node, child: &Self::Node);
    fn set_style(&mut self, node: &Self::Node, style: &NodeStyle);
    /// Sets the height of the gallery container.
    fn set_height(&mut self, node: &Self::Node, height: u32);
    /// Marks a thumbnail or full image as loaded (e.g. to fade it in).
    fn mark_loaded(&mut self, node: &Self::Node);
}

/// Which visual sub-resource of an item a load belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SubResource {
    Thumbnail,
    Full,
}

/// Identifies one asset load. Hand it back to [`crate::Gallery::complete_load`] (or
/// [`crate::Gallery::fail_load`]) when the load finishes.
///
/// The generation changes every time the item is attached, so a ticket outlives neither the
/// attach cycle nor the sub-resource it was issued for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadTicket {
    pub index: usize,
    pub generation: u64,
    pub resource: SubResource,
}

/// Starts fetching an asset into a node.
///
/// There is no retry or timeout: a load that never completes leaves the item loading until it is
/// scrolled away.
pub trait AssetLoader<N> {
    fn begin_load(&mut self, node: &N, url: &str, ticket: LoadTicket);
}
