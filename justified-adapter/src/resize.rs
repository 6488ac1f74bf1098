use std::cell::RefCell;
use std::rc::Rc;

use justified::ViewportMetrics;

use crate::{EventSource, FrameScheduler, schedule_frame};

/// A resize callback: receives the latest metrics and the time of the batch.
pub type ResizeCallback = Box<dyn FnMut(ViewportMetrics, u64)>;

/// A registry shared by every gallery on the page.
pub type SharedResizeRegistry = Rc<RefCell<ResizeRegistry>>;

/// Handle returned by [`ResizeRegistry::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResizeSubscription(u64);

/// Broadcasts resize events to many subscribers through a single host listener.
///
/// A burst of resize events becomes one batch: the first event schedules a frame, and when it
/// runs every callback is called once with the latest metrics. The host listener is attached
/// with the first subscriber and removed with the last.
#[derive(Default)]
pub struct ResizeRegistry {
    callbacks: Vec<(ResizeSubscription, ResizeCallback)>,
    next_id: u64,
    listening: bool,
    pending: Option<ViewportMetrics>,
}

impl ResizeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedResizeRegistry {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn subscribe(
        &mut self,
        events: &mut (impl EventSource + ?Sized),
        callback: impl FnMut(ViewportMetrics, u64) + 'static,
    ) -> ResizeSubscription {
        if self.callbacks.is_empty() && !self.listening {
            events.add_resize_listener();
            self.listening = true;
            jdebug!("resize listener attached");
        }
        let id = ResizeSubscription(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Returns `false` if `subscription` was not registered.
    pub fn unsubscribe(
        &mut self,
        events: &mut (impl EventSource + ?Sized),
        subscription: ResizeSubscription,
    ) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(id, _)| *id != subscription);
        let removed = self.callbacks.len() != before;
        if self.callbacks.is_empty() {
            self.pending = None;
            if self.listening {
                events.remove_resize_listener();
                self.listening = false;
                jdebug!("resize listener detached");
            }
        }
        removed
    }

    /// Handles one host resize event. Returns `true` if it started a new batch.
    pub fn notify(
        &mut self,
        metrics: ViewportMetrics,
        scheduler: &mut (impl FrameScheduler + ?Sized),
    ) -> bool {
        if !self.listening {
            return false;
        }
        let started = self.pending.is_none();
        self.pending = Some(metrics);
        if started {
            schedule_frame(scheduler);
        }
        started
    }

    /// Runs every callback once for the pending batch. Returns `false` if nothing was pending.
    pub fn run_pending(&mut self, now_ms: u64) -> bool {
        let Some(metrics) = self.pending.take() else {
            return false;
        };
        jdebug!(
            subscribers = self.callbacks.len(),
            window_width = metrics.window_width,
            "running resize batch"
        );
        for (_, callback) in &mut self.callbacks {
            callback(metrics, now_ms);
        }
        true
    }

    /// Detaches the host listener without dropping subscribers.
    pub fn disable(&mut self, events: &mut (impl EventSource + ?Sized)) {
        if self.listening {
            events.remove_resize_listener();
            self.listening = false;
        }
        self.pending = None;
    }

    /// Reattaches the host listener after [`ResizeRegistry::disable`].
    pub fn re_enable(&mut self, events: &mut (impl EventSource + ?Sized)) {
        if !self.listening && !self.callbacks.is_empty() {
            events.add_resize_listener();
            self.listening = true;
        }
    }
}

impl core::fmt::Debug for ResizeRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResizeRegistry")
            .field("subscribers", &self.callbacks.len())
            .field("listening", &self.listening)
            .field("pending", &self.pending)
            .finish()
    }
}
