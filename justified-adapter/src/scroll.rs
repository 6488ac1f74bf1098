use core::cmp;

use justified::ScrollDirection;

/// Coalesces scroll events so at most one visibility pass runs per frame.
///
/// The first event after a pass asks for a frame; later events only update the recorded offset
/// and direction until [`ScrollCoalescer::take`] consumes them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollCoalescer {
    latest: Option<u64>,
    direction: ScrollDirection,
    pending: bool,
}

impl ScrollCoalescer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an offset. Returns `true` if a frame must be scheduled.
    pub fn record(&mut self, offset: u64) -> bool {
        let previous = self.latest.unwrap_or(offset);
        self.direction = match offset.cmp(&previous) {
            cmp::Ordering::Greater => ScrollDirection::Down,
            cmp::Ordering::Less => ScrollDirection::Up,
            cmp::Ordering::Equal => self.direction,
        };
        self.latest = Some(offset);
        if self.pending {
            return false;
        }
        self.pending = true;
        jtrace!(offset, "scroll pass scheduled");
        true
    }

    /// Consumes the pending pass, if any.
    pub fn take(&mut self) -> Option<(u64, ScrollDirection)> {
        if !self.pending {
            return None;
        }
        self.pending = false;
        self.latest.map(|offset| (offset, self.direction))
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn latest(&self) -> Option<u64> {
        self.latest
    }

    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }
}
