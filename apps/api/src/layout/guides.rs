//! Cut guides: dashed separator lines printed between adjacent cells.
//!
//! # Rules
//! - Guides are per page and never cross a page boundary.
//! - Horizontal guides sit at every internal row boundary and span the full grid width.
//! - Vertical guides sit at every internal column boundary and span the occupied rows.
//! - The row count is derived from the page's *actual* item count, so a
//!   partially filled last page gets fewer horizontal guides and shorter
//!   vertical ones. The column count is always the nominal one.
//!
//! Colour, dash pattern and stroke width are the renderer's choice.

use serde::{Deserialize, Serialize};

use crate::layout::geometry::{PageGeometry, Size};

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// One guide segment in page-local coordinates.
///
/// For a horizontal guide `position` is its y and `start..end` runs along x;
/// for a vertical guide `position` is its x and `start..end` runs along y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutGuide {
    pub orientation: Orientation,
    pub position: f64,
    pub start: f64,
    pub end: f64,
}

#[cfg(test)]
impl CutGuide {
    pub fn length(&self) -> f64 {
        self.end - self.start
    }
}

/// All guides for a single page: horizontal top-to-bottom, then vertical left-to-right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutGuideSet {
    pub page: usize,
    pub guides: Vec<CutGuide>,
}

#[cfg(test)]
impl CutGuideSet {
    pub fn horizontal(&self) -> impl Iterator<Item = &CutGuide> {
        self.guides
            .iter()
            .filter(|g| g.orientation == Orientation::Horizontal)
    }

    pub fn vertical(&self) -> impl Iterator<Item = &CutGuide> {
        self.guides
            .iter()
            .filter(|g| g.orientation == Orientation::Vertical)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Guide computation
// ────────────────────────────────────────────────────────────────────────────

/// Number of rows a page with `items_on_page` copies occupies.
pub fn rows_on_page(items_on_page: usize, columns_per_page: usize) -> usize {
    if columns_per_page == 0 {
        return 0;
    }
    items_on_page.div_ceil(columns_per_page)
}

/// Computes the guide set for a finalized page.
///
/// Vertical guides always cover every column boundary of the nominal grid,
/// even when the page's only row is partially filled.
pub fn guides_for_page(
    page: usize,
    items_on_page: usize,
    columns_per_page: usize,
    cell: Size,
    geometry: &PageGeometry,
) -> CutGuideSet {
    let rows = rows_on_page(items_on_page, columns_per_page);
    let columns = columns_per_page;

    let margin = geometry.margin;
    let column_pitch = cell.width + geometry.column_gap;
    let row_pitch = cell.height + geometry.row_gap;

    let occupied_width = columns as f64 * column_pitch - geometry.column_gap;
    let occupied_height = rows as f64 * row_pitch - geometry.row_gap;

    let mut guides = Vec::with_capacity(rows.saturating_sub(1) + columns.saturating_sub(1));

    for i in 1..rows {
        guides.push(CutGuide {
            orientation: Orientation::Horizontal,
            position: margin + i as f64 * row_pitch,
            start: margin,
            end: margin + occupied_width,
        });
    }

    for j in 1..columns {
        guides.push(CutGuide {
            orientation: Orientation::Vertical,
            position: margin + j as f64 * column_pitch,
            start: margin,
            end: margin + occupied_height,
        });
    }

    CutGuideSet { page, guides }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
