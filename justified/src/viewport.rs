use crate::{LayoutRect, ScrollDirection, ViewportMetrics};

/// The vertical band, in container coordinates, within which items stay attached.
///
/// The primary buffer sits above the viewport when scrolling up and below it when scrolling
/// down; the secondary buffer takes the other side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewportBand {
    /// Items whose bottom edge is above this are outside.
    pub min: i64,
    /// Items whose top edge is below this are outside.
    pub max: i64,
}

impl ViewportBand {
    pub fn new(
        scroll_offset: u64,
        direction: ScrollDirection,
        metrics: &ViewportMetrics,
        primary_buffer_px: u32,
        secondary_buffer_px: u32,
    ) -> Self {
        let (above, below) = match direction {
            ScrollDirection::Up => (primary_buffer_px, secondary_buffer_px),
            ScrollDirection::Down => (secondary_buffer_px, primary_buffer_px),
        };
        let scroll = scroll_offset as i64;
        Self {
            min: scroll - metrics.container_top as i64 - above as i64,
            max: scroll + metrics.window_height as i64 + below as i64,
        }
    }

    pub fn intersects(&self, rect: &LayoutRect) -> bool {
        let top = rect.translate_y as i64;
        let bottom = rect.bottom() as i64;
        bottom >= self.min && top <= self.max
    }
}

/// Where a newly attached item goes relative to the items already attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    Append,
    /// Insert before the attached item with this index.
    Before(usize),
}

/// Indexes of the attached items, kept in ascending order.
///
/// Indexes never change, so the display order of attached items only changes by insertion and
/// removal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibleSet {
    indexes: Vec<usize>,
}

impl VisibleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indexes.binary_search(&index).is_ok()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.indexes
    }

    pub fn first(&self) -> Option<usize> {
        self.indexes.first().copied()
    }

    pub fn last(&self) -> Option<usize> {
        self.indexes.last().copied()
    }

    /// Finds where `index` belongs among the attached items.
    pub fn placement(&self, index: usize) -> Placement {
        match self.last() {
            None => Placement::Append,
            Some(last) if index > last => Placement::Append,
            Some(_) => {
                let at = self.indexes.partition_point(|&i| i < index);
                Placement::Before(self.indexes[at])
            }
        }
    }

    /// Returns `false` if `index` was already present.
    pub fn insert(&mut self, index: usize) -> bool {
        match self.indexes.binary_search(&index) {
            Ok(_) => false,
            Err(at) => {
                self.indexes.insert(at, index);
                true
            }
        }
    }

    /// Returns `false` if `index` was not present.
    pub fn remove(&mut self, index: usize) -> bool {
        match self.indexes.binary_search(&index) {
            Ok(at) => {
                self.indexes.remove(at);
                true
            }
            Err(_) => false,
        }
    }

    pub fn clear(&mut self) {
        self.indexes.clear();
    }
}
