use core::cmp;

use crate::layout::{Layout, TransitionWindow, pack_rows};
use crate::progressive::{LoadState, ProgressiveImage, ResourceState};
use crate::viewport::{Placement, ViewportBand, VisibleSet};
use crate::{
    AssetLoader, AttachmentRun, DisplayTree, GalleryError, GalleryOptions, ImageDescriptor,
    ImageRegistry, LayoutRect, LoadTicket, ScrollDirection, SizeToken, SubResource,
    ViewportMetrics,
};

/// What a visibility pass changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VisibilityPass {
    pub attached: usize,
    pub detached: usize,
    pub restyled: usize,
}

/// A justified-row gallery that keeps only the items near the viewport attached.
///
/// The gallery owns the display tree and asset loader handles it was given, but no timers or
/// event listeners: the host reports geometry, scroll offsets and load completions, and calls
/// [`Gallery::tick`] so delayed loads can fire. See the `justified-adapter` crate for the event
/// coalescing that normally sits in front of it.
///
/// A typical frame:
/// 1. `set_metrics` / `set_scroll_offset` with what the host observed,
/// 2. `compute_layout` (only after a resize) and `update_visibility`,
/// 3. `tick` whenever the timer from `next_deadline` fires.
pub struct Gallery<D: DisplayTree, A> {
    tree: D,
    loader: A,
    container: D::Node,
    options: GalleryOptions,
    registry: ImageRegistry,
    items: Vec<ProgressiveImage<D::Node>>,

    layout: Layout,
    transition: TransitionWindow,
    container_height: Option<u32>,

    visible: VisibleSet,
    metrics: ViewportMetrics,
    scroll_offset: u64,
    scroll_direction: ScrollDirection,
    last_window_width: u32,
}

impl<D, A> Gallery<D, A>
where
    D: DisplayTree,
    A: AssetLoader<D::Node>,
{
    /// Validates the container and the image data, then builds an idle gallery.
    ///
    /// Nothing is laid out or attached until the first [`Gallery::compute_layout`] /
    /// [`Gallery::update_visibility`].
    pub fn initialize(
        tree: D,
        loader: A,
        container: Option<D::Node>,
        descriptors: impl IntoIterator<Item = ImageDescriptor>,
        options: GalleryOptions,
    ) -> Result<Self, GalleryError> {
        let container = container.ok_or(GalleryError::MissingContainer)?;
        let registry = ImageRegistry::from_descriptors(descriptors, &options)?;
        Ok(Self::with_registry(tree, loader, container, registry, options))
    }

    /// Builds a gallery from an already validated registry.
    pub fn with_registry(
        tree: D,
        loader: A,
        container: D::Node,
        registry: ImageRegistry,
        options: GalleryOptions,
    ) -> Self {
        let items = (0..registry.len()).map(ProgressiveImage::new).collect();
        jdebug!(count = registry.len(), ?options, "Gallery::with_registry");
        Self {
            tree,
            loader,
            container,
            options,
            registry,
            items,
            layout: Layout::default(),
            transition: TransitionWindow::new(),
            container_height: None,
            visible: VisibleSet::new(),
            metrics: ViewportMetrics::default(),
            scroll_offset: 0,
            scroll_direction: ScrollDirection::Down,
            last_window_width: 0,
        }
    }

    pub fn options(&self) -> &GalleryOptions {
        &self.options
    }

    pub fn registry(&self) -> &ImageRegistry {
        &self.registry
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn container(&self) -> &D::Node {
        &self.container
    }

    pub fn tree(&self) -> &D {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut D {
        &mut self.tree
    }

    pub fn loader(&self) -> &A {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut A {
        &mut self.loader
    }

    pub fn metrics(&self) -> ViewportMetrics {
        self.metrics
    }

    pub fn set_metrics(&mut self, metrics: ViewportMetrics) {
        self.metrics = metrics;
        self.last_window_width = metrics.window_width;
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn scroll_direction(&self) -> ScrollDirection {
        self.scroll_direction
    }

    /// Records a new scroll offset. An unchanged offset keeps the previous direction.
    pub fn set_scroll_offset(&mut self, offset: u64) {
        self.scroll_direction = match offset.cmp(&self.scroll_offset) {
            cmp::Ordering::Greater => ScrollDirection::Down,
            cmp::Ordering::Less => ScrollDirection::Up,
            cmp::Ordering::Equal => self.scroll_direction,
        };
        self.scroll_offset = offset;
    }

    /// Records an offset together with an explicit direction (e.g. from a coalesced burst).
    pub fn set_scroll(&mut self, offset: u64, direction: ScrollDirection) {
        self.scroll_offset = offset;
        self.scroll_direction = direction;
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn rect(&self, index: usize) -> Option<LayoutRect> {
        self.layout.rects.get(index).copied()
    }

    pub fn total_height(&self) -> u32 {
        self.layout.total_height
    }

    pub fn is_transitioning(&self, now_ms: u64) -> bool {
        self.transition.is_active(now_ms)
    }

    /// The row threshold for the current window width.
    pub fn target_aspect_ratio(&self) -> f64 {
        (self.options.min_aspect_ratio)(self.metrics.window_width)
    }

    /// Recomputes every rect from scratch.
    pub fn compute_layout(&mut self, now_ms: u64) -> &Layout {
        let target = self.target_aspect_ratio();
        let transition =
            self.transition
                .observe(target, now_ms, self.options.transition_window_ms());
        self.layout = pack_rows(
            self.registry.aspect_ratios(),
            self.metrics.container_width,
            target,
            self.options.space_between_images,
            transition,
        );
        jdebug!(
            count = self.items.len(),
            rows = self.layout.rows.len(),
            target,
            total_height = self.layout.total_height,
            transition,
            "compute_layout"
        );
        &self.layout
    }

    /// The band items must intersect to stay attached, for the current scroll state.
    pub fn band(&self) -> ViewportBand {
        ViewportBand::new(
            self.scroll_offset,
            self.scroll_direction,
            &self.metrics,
            self.options.primary_buffer_px,
            self.options.secondary_buffer_px,
        )
    }

    /// Attaches items entering the band and detaches items leaving it.
    ///
    /// Every item is checked, not just those near the previous band edges: after a resize, row
    /// heights change and the attached set need not be contiguous. Attached items keep ascending
    /// index order in the container.
    pub fn update_visibility(&mut self, now_ms: u64) -> VisibilityPass {
        let mut pass = VisibilityPass::default();
        if self.container_height != Some(self.layout.total_height) {
            self.tree
                .set_height(&self.container, self.layout.total_height);
            self.container_height = Some(self.layout.total_height);
        }

        let band = self.band();
        let full_size = self.full_size();
        let count = cmp::min(self.items.len(), self.layout.rects.len());
        for index in 0..count {
            let rect = self.layout.rects[index];
            let attached = self.items[index].exists_on_page();

            if !band.intersects(&rect) {
                if attached {
                    self.detach(index);
                    pass.detached += 1;
                }
                continue;
            }

            if attached {
                if self.items[index].apply_style(
                    &mut self.tree,
                    &rect,
                    self.options.transition_duration_ms,
                ) {
                    pass.restyled += 1;
                }
                continue;
            }

            let element = self.items[index].ensure_element(&mut self.tree);
            self.items[index].apply_style(
                &mut self.tree,
                &rect,
                self.options.transition_duration_ms,
            );
            match self.visible.placement(index) {
                Placement::Append => self.tree.append_child(&self.container, &element),
                Placement::Before(next) => {
                    if let Some(reference) = self.items[next].element().cloned() {
                        self.tree
                            .insert_before(&self.container, &element, &reference);
                    } else {
                        self.tree.append_child(&self.container, &element);
                    }
                }
            }
            self.visible.insert(index);
            self.items[index].attach(now_ms, self.options.load_delay_ms, full_size);
            pass.attached += 1;
        }

        jdebug!(
            band_min = band.min,
            band_max = band.max,
            attached = pass.attached,
            detached = pass.detached,
            restyled = pass.restyled,
            visible = self.visible.len(),
            "update_visibility"
        );
        pass
    }

    /// A full pass after the window was resized.
    pub fn relayout(&mut self, metrics: ViewportMetrics, now_ms: u64) -> VisibilityPass {
        self.set_metrics(metrics);
        self.compute_layout(now_ms);
        self.update_visibility(now_ms)
    }

    /// Removes an item from the container and tears down its sub-resources.
    ///
    /// Calling this on an item that is not attached only resets its load state.
    pub fn detach(&mut self, index: usize) {
        let Some(item) = self.items.get_mut(index) else {
            return;
        };
        if item.exists_on_page() {
            if let Some(element) = item.element() {
                self.tree.remove_child(&self.container, element);
            }
        }
        item.hide(&mut self.tree);
        self.visible.remove(index);
    }

    /// Starts the asset loads whose delay has elapsed. Returns how many items started loading.
    ///
    /// Items that were detached before their delay elapsed have no pending load, so nothing is
    /// requested for them.
    pub fn tick(&mut self, now_ms: u64) -> usize {
        let mut started = 0usize;
        for &index in self.visible.as_slice() {
            let Some(image) = self.registry.get(index) else {
                continue;
            };
            if self.items[index].fire_due_load(&mut self.tree, &mut self.loader, image, now_ms) {
                started += 1;
            }
        }
        if started > 0 {
            jtrace!(started, now_ms, "tick");
        }
        started
    }

    /// The earliest time at which [`Gallery::tick`] has work to do.
    pub fn next_deadline(&self) -> Option<u64> {
        self.visible
            .as_slice()
            .iter()
            .filter_map(|&i| self.items[i].load_at_ms())
            .min()
    }

    /// Reports a finished asset load. Returns `false` (and changes nothing) for stale tickets.
    pub fn complete_load(&mut self, ticket: LoadTicket) -> bool {
        match self.items.get_mut(ticket.index) {
            Some(item) => item.complete(&mut self.tree, ticket),
            None => false,
        }
    }

    /// Reports a failed asset load. The sub-resource stays in place, marked failed; nothing is
    /// retried.
    pub fn fail_load(&mut self, ticket: LoadTicket) -> bool {
        match self.items.get_mut(ticket.index) {
            Some(item) => item.fail(ticket),
            None => false,
        }
    }

    pub fn visible_indexes(&self) -> &[usize] {
        self.visible.as_slice()
    }

    pub fn is_attached(&self, index: usize) -> bool {
        self.items.get(index).is_some_and(|it| it.exists_on_page())
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.items.get(index).is_some_and(|it| it.is_visible())
    }

    pub fn load_state(&self, index: usize) -> LoadState {
        self.items
            .get(index)
            .map(|it| it.state())
            .unwrap_or_default()
    }

    pub fn resource_state(&self, index: usize, resource: SubResource) -> ResourceState {
        self.items
            .get(index)
            .map(|it| it.resource_state(resource))
            .unwrap_or_default()
    }

    /// The attach-cycle counter of an item; load tickets from other cycles are ignored.
    pub fn generation(&self, index: usize) -> Option<u64> {
        self.items.get(index).map(|it| it.generation())
    }

    pub fn element(&self, index: usize) -> Option<&D::Node> {
        self.items.get(index).and_then(|it| it.element())
    }

    /// Contiguous runs of attached / detached items in index order.
    pub fn attachment_runs(&self) -> Vec<AttachmentRun> {
        let mut runs: Vec<AttachmentRun> = Vec::new();
        for (index, item) in self.items.iter().enumerate() {
            let attached = item.exists_on_page();
            match runs.last_mut() {
                Some(run) if run.attached == attached => run.end = index,
                _ => runs.push(AttachmentRun {
                    start: index,
                    end: index,
                    attached,
                }),
            }
        }
        runs
    }

    fn full_size(&self) -> SizeToken {
        if self.last_window_width <= self.options.mobile_breakpoint_px {
            SizeToken::Small
        } else {
            SizeToken::Medium
        }
    }
}

impl<D, A> core::fmt::Debug for Gallery<D, A>
where
    D: DisplayTree,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Gallery")
            .field("count", &self.items.len())
            .field("options", &self.options)
            .field("metrics", &self.metrics)
            .field("scroll_offset", &self.scroll_offset)
            .field("scroll_direction", &self.scroll_direction)
            .field("total_height", &self.layout.total_height)
            .field("visible", &self.visible.len())
            .finish_non_exhaustive()
    }
}
