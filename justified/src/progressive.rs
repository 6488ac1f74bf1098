use crate::registry::RegisteredImage;
use crate::{
    AssetLoader, DisplayTree, LayoutRect, LoadTicket, NodeKind, NodeStyle, SizeToken, SubResource,
};

/// Aggregate loading state of one item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadState {
    #[default]
    Unattached,
    /// Attached and positioned; assets not requested yet.
    AttachedUnstyled,
    ThumbnailLoading,
    /// Thumbnail shown; the full image may still be loading.
    ThumbnailLoaded,
    /// Full image requested; the thumbnail is absent or failed.
    FullLoading,
    FullLoaded,
}

/// State of one sub-resource within the current attach cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceState {
    #[default]
    Absent,
    Loading,
    Loaded,
    Failed,
}

#[derive(Clone, Debug)]
struct Slot<N> {
    node: Option<N>,
    state: ResourceState,
}

impl<N> Default for Slot<N> {
    fn default() -> Self {
        Self {
            node: None,
            state: ResourceState::Absent,
        }
    }
}

/// Per-item attach/load bookkeeping.
///
/// The figure node is created once and reused across attach cycles; the thumbnail and full
/// image nodes live for a single cycle.
#[derive(Clone, Debug)]
pub(crate) struct ProgressiveImage<N> {
    index: usize,
    element: Option<N>,
    thumbnail: Slot<N>,
    full: Slot<N>,
    exists_on_page: bool,
    is_visible: bool,
    generation: u64,
    load_at_ms: Option<u64>,
    full_size: SizeToken,
    applied: Option<NodeStyle>,
}

impl<N: Clone + PartialEq + core::fmt::Debug> ProgressiveImage<N> {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index,
            element: None,
            thumbnail: Slot::default(),
            full: Slot::default(),
            exists_on_page: false,
            is_visible: false,
            generation: 0,
            load_at_ms: None,
            full_size: SizeToken::Medium,
            applied: None,
        }
    }

    pub(crate) fn exists_on_page(&self) -> bool {
        self.exists_on_page
    }

    pub(crate) fn is_visible(&self) -> bool {
        self.is_visible
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn load_at_ms(&self) -> Option<u64> {
        self.load_at_ms
    }

    pub(crate) fn element(&self) -> Option<&N> {
        self.element.as_ref()
    }

    pub(crate) fn resource_state(&self, resource: SubResource) -> ResourceState {
        self.slot(resource).state
    }

    pub(crate) fn state(&self) -> LoadState {
        if !self.exists_on_page {
            return LoadState::Unattached;
        }
        match (self.thumbnail.state, self.full.state) {
            (_, ResourceState::Loaded) => LoadState::FullLoaded,
            (ResourceState::Loaded, _) => LoadState::ThumbnailLoaded,
            (ResourceState::Loading, _) => LoadState::ThumbnailLoading,
            (_, ResourceState::Loading) => LoadState::FullLoading,
            _ => LoadState::AttachedUnstyled,
        }
    }

    /// Returns the figure node, creating it on first use.
    pub(crate) fn ensure_element<D>(&mut self, tree: &mut D) -> N
    where
        D: DisplayTree<Node = N>,
    {
        match &self.element {
            Some(node) => node.clone(),
            None => {
                let node = tree.create_node(NodeKind::Figure);
                self.element = Some(node.clone());
                node
            }
        }
    }

    /// Starts a new attach cycle. Assets are requested once `now_ms + delay_ms` is reached.
    pub(crate) fn attach(&mut self, now_ms: u64, delay_ms: u64, full_size: SizeToken) {
        self.generation = self.generation.wrapping_add(1);
        self.exists_on_page = true;
        self.is_visible = false;
        self.full_size = full_size;
        self.load_at_ms = Some(now_ms.saturating_add(delay_ms));
    }

    /// Applies `rect` to the figure if it differs from what was last applied.
    pub(crate) fn apply_style<D>(
        &mut self,
        tree: &mut D,
        rect: &LayoutRect,
        transition_duration_ms: u64,
    ) -> bool
    where
        D: DisplayTree<Node = N>,
    {
        let Some(element) = &self.element else {
            return false;
        };
        let style = NodeStyle::from_rect(rect, transition_duration_ms);
        if self.applied == Some(style) {
            return false;
        }
        tree.set_style(element, &style);
        self.applied = Some(style);
        true
    }

    /// Runs the delayed load if it is due. Requests each sub-resource at most once per cycle.
    ///
    /// Returns `true` if any load was started.
    pub(crate) fn fire_due_load<D, A>(
        &mut self,
        tree: &mut D,
        loader: &mut A,
        image: &RegisteredImage,
        now_ms: u64,
    ) -> bool
    where
        D: DisplayTree<Node = N>,
        A: AssetLoader<N>,
    {
        let Some(due) = self.load_at_ms else {
            return false;
        };
        if now_ms < due {
            return false;
        }
        self.load_at_ms = None;
        if !self.exists_on_page || self.is_visible {
            return false;
        }
        let Some(element) = self.element.clone() else {
            return false;
        };

        let mut started = false;
        if self.thumbnail.node.is_none() {
            let ticket = self.ticket(SubResource::Thumbnail);
            let node = tree.create_node(NodeKind::Thumbnail);
            loader.begin_load(&node, image.url(SizeToken::Thumbnail), ticket);
            tree.append_child(&element, &node);
            self.thumbnail = Slot {
                node: Some(node),
                state: ResourceState::Loading,
            };
            started = true;
        }
        if self.full.node.is_none() {
            let ticket = self.ticket(SubResource::Full);
            let node = tree.create_node(NodeKind::FullImage);
            loader.begin_load(&node, image.url(self.full_size), ticket);
            tree.append_child(&element, &node);
            self.full = Slot {
                node: Some(node),
                state: ResourceState::Loading,
            };
            started = true;
        }
        self.is_visible = true;
        jtrace!(index = self.index, size = %self.full_size, "load started");
        started
    }

    /// Marks the ticket's sub-resource as loaded. Stale tickets are ignored.
    pub(crate) fn complete<D>(&mut self, tree: &mut D, ticket: LoadTicket) -> bool
    where
        D: DisplayTree<Node = N>,
    {
        if !self.is_current(ticket) {
            jtrace!(index = ticket.index, resource = ?ticket.resource, "stale load completion");
            return false;
        }
        let slot = self.slot_mut(ticket.resource);
        let Some(node) = &slot.node else {
            return false;
        };
        if slot.state != ResourceState::Loading {
            return false;
        }
        tree.mark_loaded(node);
        slot.state = ResourceState::Loaded;
        true
    }

    /// Marks the ticket's sub-resource as failed. No retry is attempted.
    pub(crate) fn fail(&mut self, ticket: LoadTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        let slot = self.slot_mut(ticket.resource);
        if slot.node.is_none() || slot.state != ResourceState::Loading {
            return false;
        }
        slot.state = ResourceState::Failed;
        jwarn!(index = ticket.index, resource = ?ticket.resource, "asset load failed");
        true
    }

    /// Tears down both sub-resources and returns to `Unattached`. Safe to call repeatedly.
    ///
    /// Removing the figure from its container is the caller's job.
    pub(crate) fn hide<D>(&mut self, tree: &mut D)
    where
        D: DisplayTree<Node = N>,
    {
        if let Some(element) = &self.element {
            for slot in [&mut self.thumbnail, &mut self.full] {
                if let Some(node) = slot.node.take() {
                    tree.remove_child(element, &node);
                }
            }
        }
        self.thumbnail = Slot::default();
        self.full = Slot::default();
        self.exists_on_page = false;
        self.is_visible = false;
        self.load_at_ms = None;
    }

    fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.index == self.index && ticket.generation == self.generation && self.exists_on_page
    }

    fn ticket(&self, resource: SubResource) -> LoadTicket {
        LoadTicket {
            index: self.index,
            generation: self.generation,
            resource,
        }
    }

    fn slot(&self, resource: SubResource) -> &Slot<N> {
        match resource {
            SubResource::Thumbnail => &self.thumbnail,
            SubResource::Full => &self.full,
        }
    }

    fn slot_mut(&mut self, resource: SubResource) -> &mut Slot<N> {
        match resource {
            SubResource::Thumbnail => &mut self.thumbnail,
            SubResource::Full => &mut self.full,
        }
    }
}
