use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use justified::{
    AssetLoader, AttachmentRun, DisplayTree, Gallery, GalleryError, GalleryOptions,
    ImageDescriptor, LoadTicket, ViewportMetrics, VisibilityPass,
};

use crate::{
    EventSource, FrameScheduler, ResizeSubscription, ScrollCoalescer, SharedResizeRegistry,
};

/// Wires a [`Gallery`] to host events.
///
/// The host forwards:
/// - scroll events to [`Controller::on_scroll`],
/// - resize events to the shared registry's [`crate::ResizeRegistry::notify`],
/// - every fired frame or timeout to [`crate::ResizeRegistry::run_pending`] and then
///   [`Controller::on_frame`],
/// - finished asset loads to [`Controller::complete_load`] / [`Controller::fail_load`].
pub struct Controller<D: DisplayTree, A> {
    gallery: Rc<RefCell<Gallery<D, A>>>,
    resize: SharedResizeRegistry,
    subscription: Option<ResizeSubscription>,
    scroll: ScrollCoalescer,
    enabled: bool,
    armed_deadline: Option<u64>,
}

impl<D, A> Controller<D, A>
where
    D: DisplayTree + 'static,
    A: AssetLoader<D::Node> + 'static,
{
    /// Validates the container and image data. Nothing is attached until [`Controller::enable`].
    pub fn initialize(
        tree: D,
        loader: A,
        container: Option<D::Node>,
        descriptors: impl IntoIterator<Item = ImageDescriptor>,
        options: GalleryOptions,
        resize: SharedResizeRegistry,
    ) -> Result<Self, GalleryError> {
        let gallery = Gallery::initialize(tree, loader, container, descriptors, options)?;
        Ok(Self::from_gallery(gallery, resize))
    }

    pub fn from_gallery(gallery: Gallery<D, A>, resize: SharedResizeRegistry) -> Self {
        Self {
            gallery: Rc::new(RefCell::new(gallery)),
            resize,
            subscription: None,
            scroll: ScrollCoalescer::new(),
            enabled: false,
            armed_deadline: None,
        }
    }

    pub fn gallery(&self) -> Ref<'_, Gallery<D, A>> {
        self.gallery.borrow()
    }

    pub fn gallery_mut(&self) -> RefMut<'_, Gallery<D, A>> {
        self.gallery.borrow_mut()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Attaches the listeners and runs the first layout and visibility pass.
    ///
    /// Returns `None` if the controller was already enabled.
    pub fn enable<H>(
        &mut self,
        host: &mut H,
        metrics: ViewportMetrics,
        scroll_offset: u64,
        now_ms: u64,
    ) -> Option<VisibilityPass>
    where
        H: EventSource + FrameScheduler,
    {
        if self.enabled {
            return None;
        }
        host.add_scroll_listener();
        self.enabled = true;

        self.scroll.record(scroll_offset);
        let pass = {
            let mut g = self.gallery.borrow_mut();
            if let Some((offset, direction)) = self.scroll.take() {
                g.set_scroll(offset, direction);
            }
            g.relayout(metrics, now_ms)
        };

        let gallery = Rc::clone(&self.gallery);
        let subscription = self
            .resize
            .borrow_mut()
            .subscribe(host, move |metrics, now_ms| {
                gallery.borrow_mut().relayout(metrics, now_ms);
            });
        self.subscription = Some(subscription);
        jdebug!(scroll_offset, visible = pass.attached, "controller enabled");

        self.arm_load_timer(host, now_ms);
        Some(pass)
    }

    /// Detaches the scroll listener and this gallery's resize subscription.
    ///
    /// Loads already in flight may still complete; their tickets are accepted or ignored as usual.
    pub fn disable(&mut self, host: &mut (impl EventSource + ?Sized)) {
        if !self.enabled {
            return;
        }
        host.remove_scroll_listener();
        if let Some(subscription) = self.subscription.take() {
            self.resize.borrow_mut().unsubscribe(host, subscription);
        }
        self.scroll = ScrollCoalescer::new();
        self.armed_deadline = None;
        self.enabled = false;
        jdebug!("controller disabled");
    }

    /// Records a scroll event. Schedules a frame for the first event since the last pass.
    pub fn on_scroll(&mut self, offset: u64, scheduler: &mut (impl FrameScheduler + ?Sized)) -> bool {
        if !self.enabled {
            return false;
        }
        if self.scroll.record(offset) {
            crate::schedule_frame(scheduler);
            return true;
        }
        false
    }

    /// Runs the coalesced scroll pass (if one is pending), fires due loads, and arms a timer for
    /// the next delayed load.
    pub fn on_frame(
        &mut self,
        now_ms: u64,
        scheduler: &mut (impl FrameScheduler + ?Sized),
    ) -> Option<VisibilityPass> {
        if !self.enabled {
            return None;
        }
        let pass = {
            let mut g = self.gallery.borrow_mut();
            let pass = self.scroll.take().map(|(offset, direction)| {
                g.set_scroll(offset, direction);
                g.update_visibility(now_ms)
            });
            g.tick(now_ms);
            pass
        };
        self.arm_load_timer(scheduler, now_ms);
        pass
    }

    pub fn complete_load(&self, ticket: LoadTicket) -> bool {
        self.gallery.borrow_mut().complete_load(ticket)
    }

    pub fn fail_load(&self, ticket: LoadTicket) -> bool {
        self.gallery.borrow_mut().fail_load(ticket)
    }

    pub fn attachment_runs(&self) -> Vec<AttachmentRun> {
        self.gallery.borrow().attachment_runs()
    }

    fn arm_load_timer(&mut self, scheduler: &mut (impl FrameScheduler + ?Sized), now_ms: u64) {
        let Some(deadline) = self.gallery.borrow().next_deadline() else {
            return;
        };
        let stale = self
            .armed_deadline
            .is_none_or(|armed| armed <= now_ms || deadline < armed);
        if stale {
            scheduler.set_timeout(deadline.saturating_sub(now_ms));
            self.armed_deadline = Some(deadline);
        }
    }
}

impl<D: DisplayTree, A> core::fmt::Debug for Controller<D, A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Controller")
            .field("enabled", &self.enabled)
            .field("scroll", &self.scroll)
            .field("subscription", &self.subscription)
            .field("armed_deadline", &self.armed_deadline)
            .finish_non_exhaustive()
    }
}
