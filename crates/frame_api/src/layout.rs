//! Pagination of a catalog into frame buttons.
//!
//! A page never shows more than [`PAGE_SIZE`] buttons. Navigation controls
//! take their slots first and catalog entries fill the rest, so entries per
//! page shrink when both "previous" and "next" are visible. Page boundaries
//! follow from that reservation: every entry lands on exactly one page.

use shared::{
    domain::{FrameData, FrameState},
    protocol::MAX_FRAME_BUTTONS,
};

use crate::codec;

pub const PAGE_SIZE: usize = MAX_FRAME_BUTTONS;
pub const PREV_LABEL: &str = "← Prev";
pub const NEXT_LABEL: &str = "Next →";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Previous,
    Next,
    /// Index into the catalog.
    Entry(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutButton {
    pub kind: SlotKind,
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u32,
    pub has_prev: bool,
    pub has_next: bool,
    pub start: usize,
    pub len: usize,
}

/// Number of pages needed to show every entry exactly once.
///
/// Page starts are not `page * slots`: the first page holds `PAGE_SIZE - 1`
/// entries, middle pages `PAGE_SIZE - 2`, and the last page takes whatever is
/// left after its Prev button. A fixed stride either repeats entries across
/// pages or leaves the tail of the catalog unreachable.
pub fn page_count(catalog_len: usize) -> usize {
    if catalog_len == 0 {
        return 0;
    }
    if catalog_len <= PAGE_SIZE {
        return 1;
    }
    // first page: entries + next; last page: prev + entries; middle: prev + entries + next
    let edge = PAGE_SIZE - 1;
    let middle = PAGE_SIZE - 2;
    let rest = catalog_len - edge;
    if rest <= edge {
        2
    } else {
        2 + (rest - edge).div_ceil(middle)
    }
}

pub fn page_window(catalog_len: usize, page: u32) -> Option<PageWindow> {
    let index = page as usize;
    if index >= page_count(catalog_len) {
        return None;
    }
    let start = if index == 0 {
        0
    } else {
        (PAGE_SIZE - 1) + (PAGE_SIZE - 2) * (index - 1)
    };
    let has_prev = index > 0;
    let remaining = catalog_len - start;
    let has_next = remaining > PAGE_SIZE - usize::from(has_prev);
    let slots = PAGE_SIZE - usize::from(has_prev) - usize::from(has_next);
    Some(PageWindow {
        page,
        has_prev,
        has_next,
        start,
        len: slots.min(remaining),
    })
}

/// Lays out `catalog` for `page`. An out-of-range page is laid out as page 0.
pub fn layout_buttons(data: &FrameData, page: u32, catalog: &[&str]) -> Vec<LayoutButton> {
    let Some(window) = page_window(catalog.len(), page).or_else(|| page_window(catalog.len(), 0))
    else {
        return Vec::new();
    };
    let page = window.page;
    let mut buttons = Vec::with_capacity(PAGE_SIZE);

    if window.has_prev {
        buttons.push(LayoutButton {
            kind: SlotKind::Previous,
            label: PREV_LABEL.to_string(),
            value: codec::encode(&FrameData {
                state: FrameState::ElementSelection,
                page: Some(page - 1),
                ..data.clone()
            }),
        });
    }

    for (offset, entry) in catalog[window.start..window.start + window.len]
        .iter()
        .enumerate()
    {
        buttons.push(LayoutButton {
            kind: SlotKind::Entry(window.start + offset),
            label: (*entry).to_string(),
            value: codec::encode(&FrameData {
                state: FrameState::ElementSelection,
                element: Some((*entry).to_string()),
                page: Some(page),
                ..data.clone()
            }),
        });
    }

    if window.has_next {
        buttons.push(LayoutButton {
            kind: SlotKind::Next,
            label: NEXT_LABEL.to_string(),
            value: codec::encode(&FrameData {
                state: FrameState::ElementSelection,
                page: Some(page + 1),
                ..data.clone()
            }),
        });
    }

    buttons
}

/// Maps a 1-based button index back onto the layout that was rendered for `page`.
pub fn resolve_press(catalog: &[&str], page: u32, button_index: u32) -> Option<SlotKind> {
    let slot = usize::try_from(button_index).ok()?.checked_sub(1)?;
    let window = page_window(catalog.len(), page)?;
    let prev = usize::from(window.has_prev);
    if window.has_prev && slot == 0 {
        return Some(SlotKind::Previous);
    }
    if slot < prev + window.len {
        return Some(SlotKind::Entry(window.start + slot - prev));
    }
    if window.has_next && slot == prev + window.len {
        return Some(SlotKind::Next);
    }
    None
}

#[cfg(test)]
#[path = "tests/layout_tests.rs"]
mod tests;
