//! Page Fill Analysis: how well each printed page is used.
//!
//! Every page except the last is full by construction. The last page is
//! usually partial, and paper on a photo sheet is wasted unless the user adds
//! more copies. This module reports per-page utilisation and recommends how
//! many copies would complete the last page.

use serde::{Deserialize, Serialize};

use crate::layout::engine::PageLayout;
use crate::layout::guides::rows_on_page;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageFillVerdict {
    /// Every slot on the page holds a copy.
    Full,
    /// Some slots are empty (only ever the last page).
    Partial,
}

/// Utilisation of a single page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageFill {
    pub page: usize,
    pub items: usize,
    pub capacity: usize,
    pub rows_used: usize,
    /// items / capacity, in 0.0 to 1.0.
    pub fill_fraction: f64,
    pub verdict: PageFillVerdict,
}

/// What the user could do to stop wasting paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FillAction {
    /// The last page is full (or nothing was laid out).
    NoAction,
    /// Adding `count` more copies would fill the last page exactly.
    AddCopies { count: usize },
}

// ────────────────────────────────────────────────────────────────────────────
// Core functions
// ────────────────────────────────────────────────────────────────────────────

/// Reports utilisation for every page of a computed layout, in page order.
pub fn analyze_page_fill<R>(layout: &PageLayout<R>) -> Vec<PageFill> {
    let capacity = layout.capacity_per_page();

    (0..layout.page_count)
        .map(|page| {
            let items = layout.items_on_page(page);
            let verdict = if items == capacity {
                PageFillVerdict::Full
            } else {
                PageFillVerdict::Partial
            };
            PageFill {
                page,
                items,
                capacity,
                rows_used: rows_on_page(items, layout.columns_per_page),
                fill_fraction: items as f64 / capacity as f64,
                verdict,
            }
        })
        .collect()
}

/// Recommends a single action based on the last page's fill.
pub fn recommend_fill_action(pages: &[PageFill]) -> FillAction {
    match pages.last() {
        Some(last) if last.verdict == PageFillVerdict::Partial => FillAction::AddCopies {
            count: last.capacity - last.items,
        },
        _ => FillAction::NoAction,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
