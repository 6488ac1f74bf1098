/// Delay used when the platform has no display-refresh callback (~15 fps).
pub const FALLBACK_FRAME_DELAY_MS: u64 = 66;

/// Schedules work on the host's event loop.
///
/// When a requested frame or timeout fires, the host calls
/// [`crate::ResizeRegistry::run_pending`] and [`crate::Controller::on_frame`].
pub trait FrameScheduler {
    /// Requests a callback on the next display refresh. Returns `false` if unsupported.
    fn request_animation_frame(&mut self) -> bool;

    fn set_timeout(&mut self, delay_ms: u64);
}

/// Requests the next frame, falling back to a [`FALLBACK_FRAME_DELAY_MS`] timeout.
pub fn schedule_frame(scheduler: &mut (impl FrameScheduler + ?Sized)) {
    if !scheduler.request_animation_frame() {
        scheduler.set_timeout(FALLBACK_FRAME_DELAY_MS);
    }
}

/// Attaches and detaches the host's scroll and resize listeners.
pub trait EventSource {
    fn add_scroll_listener(&mut self);
    fn remove_scroll_listener(&mut self);
    fn add_resize_listener(&mut self);
    fn remove_resize_listener(&mut self);
}
