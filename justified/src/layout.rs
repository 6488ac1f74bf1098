use core::ops::Range;

use crate::LayoutRect;

/// The result of one layout pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    /// One rect per item, by index.
    pub rects: Vec<LayoutRect>,
    /// Index ranges of each row, in order.
    pub rows: Vec<Range<usize>>,
    /// Content height, without a trailing gap below the last row.
    pub total_height: u32,
    /// The threshold the rows were packed against.
    pub target_aspect_ratio: f64,
}

/// Packs items into justified rows.
///
/// Items are accumulated in order until the row's summed aspect ratio reaches
/// `target_aspect_ratio`, or the last item is reached. Each closed row is scaled so that its
/// widths plus `gap` between neighbours fill `container_width`.
///
/// Every aspect ratio must be finite and positive (see [`crate::ImageRegistry`]).
pub fn pack_rows(
    aspect_ratios: impl ExactSizeIterator<Item = f64>,
    container_width: u32,
    target_aspect_ratio: f64,
    gap: u32,
    transition: bool,
) -> Layout {
    let count = aspect_ratios.len();
    let mut rects = Vec::with_capacity(count);
    let mut rows = Vec::new();
    let mut pending: Vec<f64> = Vec::new();
    let mut row_start = 0usize;
    let mut row_aspect_ratio = 0.0f64;
    let mut translate_y = 0u32;

    for (index, aspect_ratio) in aspect_ratios.enumerate() {
        row_aspect_ratio += aspect_ratio;
        pending.push(aspect_ratio);

        if row_aspect_ratio < target_aspect_ratio && index + 1 != count {
            continue;
        }

        let gaps = gap as f64 * (pending.len() - 1) as f64;
        let content_width = (container_width as f64 - gaps).max(0.0);
        let row_height = content_width / row_aspect_ratio;
        let height = row_height.round() as u32;

        let mut translate_x = 0u32;
        for &ar in &pending {
            let width = (row_height * ar).round() as u32;
            rects.push(LayoutRect {
                width,
                height,
                translate_x,
                translate_y,
                transition,
            });
            translate_x = translate_x.saturating_add(width).saturating_add(gap);
        }

        rows.push(row_start..index + 1);
        row_start = index + 1;
        pending.clear();
        row_aspect_ratio = 0.0;
        translate_y = translate_y.saturating_add(height).saturating_add(gap);
    }

    Layout {
        rects,
        rows,
        total_height: translate_y.saturating_sub(gap),
        target_aspect_ratio,
    }
}

/// Tracks whether layout passes should request animated transitions.
///
/// A window opens when the target aspect ratio differs from the one seen by the previous pass,
/// and closes `window_ms` later. Changes observed while a window is open are not recorded, so
/// the comparison after it closes is against the ratio that opened it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransitionWindow {
    latest: Option<f64>,
    until_ms: Option<u64>,
}

impl TransitionWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the target of a pass at `now_ms` and returns whether that pass transitions.
    pub fn observe(&mut self, target_aspect_ratio: f64, now_ms: u64, window_ms: u64) -> bool {
        if !self.is_active(now_ms) {
            self.until_ms = None;
            let previous = self.latest.replace(target_aspect_ratio);
            if previous.is_some_and(|prev| prev != target_aspect_ratio) {
                jdebug!(
                    target_aspect_ratio,
                    now_ms,
                    window_ms,
                    "TransitionWindow: threshold changed"
                );
                self.until_ms = Some(now_ms.saturating_add(window_ms));
            }
        }
        self.is_active(now_ms)
    }

    pub fn is_active(&self, now_ms: u64) -> bool {
        self.until_ms.is_some_and(|until| now_ms < until)
    }

    pub fn latest_target(&self) -> Option<f64> {
        self.latest
    }
}
