//! Page Layout Engine: places a print queue of fixed-size cells onto pages.
//!
//! # Policies
//! - `MarginGuides`: cells start at the margin, flow left-to-right and
//!   top-to-bottom with the configured gaps, and every page gets dashed cut guides.
//! - `EvenSpacing`: a small fixed grid of large cells; leftover page space is
//!   shared evenly between and around cells and no guides are produced.
//!
//! # Boundary tolerance
//! A cell may overshoot the usable area by at most `tolerance` (in the page's
//! unit) and still count as fitting. This absorbs float rounding when cells
//! tile the page exactly. The column/row counts include the tolerance, which
//! makes them agree with a cursor that wraps when `x + cell > page - margin + tolerance`.
//!
//! `compute_layout` is pure: no I/O, no shared state, same input → same output.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::geometry::{PageGeometry, Size};
use crate::layout::guides::{guides_for_page, CutGuideSet};
use crate::layout::queue::PrintQueue;

/// Default overshoot tolerance, in the page's unit (0.1 mm for the presets).
pub const DEFAULT_TOLERANCE: f64 = 0.1;

/// Upper bound on slots per page. Denser grids are rejected rather than
/// producing millions of cut guides per page.
pub const MAX_CELLS_PER_PAGE: usize = 100_000;

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

/// Raised before any placement work begins. No partial output is ever returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error(
        "cell too large for page: {cell_width}x{cell_height} does not fit in \
         {available_width}x{available_height}"
    )]
    CellTooLarge {
        cell_width: f64,
        cell_height: f64,
        available_width: f64,
        available_height: f64,
    },

    #[error("grid too dense: {columns}x{rows} cells per page exceeds the limit of {limit}")]
    GridTooDense {
        columns: usize,
        rows: usize,
        limit: usize,
    },

    #[error("invalid dimension: {field} must be {requirement}, got {value}")]
    InvalidDimension {
        field: &'static str,
        requirement: &'static str,
        value: f64,
    },
}

// ────────────────────────────────────────────────────────────────────────────
// Configuration
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutPolicy {
    /// Margin-anchored grid with dashed cut guides (photo sheets).
    #[default]
    MarginGuides,
    /// Evenly distributed fixed grid without guides (cards).
    EvenSpacing,
}

/// Immutable input record for one layout invocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub cell: Size,
    pub geometry: PageGeometry,
    pub policy: LayoutPolicy,
    pub tolerance: f64,
}

impl LayoutConfig {
    pub fn new(cell: Size, geometry: PageGeometry) -> Self {
        Self {
            cell,
            geometry,
            policy: LayoutPolicy::default(),
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    pub fn with_policy(mut self, policy: LayoutPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Fails with the same error `compute_layout` would, without laying anything out.
    pub fn check(&self) -> Result<(), LayoutError> {
        self.grid().map(|_| ())
    }

    fn grid(&self) -> Result<Grid, LayoutError> {
        validate(self)?;
        resolve_grid(self)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// Where one copy lands: page index and the cell's top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement<R> {
    pub item_ref: R,
    pub page: usize,
    pub x: f64,
    pub y: f64,
}

/// Result of a layout run.
///
/// `placements` follow queue order. `guide_sets` has one entry per page in
/// ascending page order under `MarginGuides` and is empty under `EvenSpacing`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageLayout<R> {
    pub placements: Vec<Placement<R>>,
    pub guide_sets: Vec<CutGuideSet>,
    pub page_count: usize,
    pub columns_per_page: usize,
    pub rows_per_page: usize,
    pub policy: LayoutPolicy,
}

impl<R> PageLayout<R> {
    pub fn capacity_per_page(&self) -> usize {
        self.columns_per_page * self.rows_per_page
    }

    /// Number of copies that landed on `page`.
    pub fn items_on_page(&self, page: usize) -> usize {
        if page >= self.page_count {
            return 0;
        }
        let capacity = self.capacity_per_page();
        let before = page.saturating_mul(capacity);
        self.placements.len().saturating_sub(before).min(capacity)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Grid resolution
// ────────────────────────────────────────────────────────────────────────────

/// Resolved per-page grid: how many slots and where slot (0, 0) starts.
#[derive(Debug, Clone, Copy)]
struct Grid {
    columns: usize,
    rows: usize,
    origin_x: f64,
    origin_y: f64,
    pitch_x: f64,
    pitch_y: f64,
}

impl Grid {

    /// Top-left corner of the `slot`-th cell on a page, row-major.
    fn slot_origin(&self, slot: usize) -> (f64, f64) {
        let column = slot % self.columns;
        let row = slot / self.columns;
        (
            self.origin_x + column as f64 * self.pitch_x,
            self.origin_y + row as f64 * self.pitch_y,
        )
    }
}

/// How many cells of `cell` with `gap` between them fit in `available`.
fn fit_count(available: f64, cell: f64, gap: f64, tolerance: f64) -> usize {
    let span = available + gap + tolerance;
    if span <= 0.0 {
        return 0;
    }
    (span / (cell + gap)).floor() as usize
}

fn resolve_grid(config: &LayoutConfig) -> Result<Grid, LayoutError> {
    let LayoutConfig {
        cell,
        geometry,
        policy,
        tolerance,
    } = *config;

    let grid = match policy {
        LayoutPolicy::MarginGuides => Grid {
            columns: fit_count(
                geometry.content_width(),
                cell.width,
                geometry.column_gap,
                tolerance,
            ),
            rows: fit_count(
                geometry.content_height(),
                cell.height,
                geometry.row_gap,
                tolerance,
            ),
            origin_x: geometry.margin,
            origin_y: geometry.margin,
            pitch_x: cell.width + geometry.column_gap,
            pitch_y: cell.height + geometry.row_gap,
        },
        LayoutPolicy::EvenSpacing => {
            let columns = fit_count(geometry.page_width, cell.width, 0.0, tolerance);
            let rows = fit_count(geometry.page_height, cell.height, 0.0, tolerance);
            let gap_x = even_gap(geometry.page_width, cell.width, columns);
            let gap_y = even_gap(geometry.page_height, cell.height, rows);
            Grid {
                columns,
                rows,
                origin_x: gap_x,
                origin_y: gap_y,
                pitch_x: cell.width + gap_x,
                pitch_y: cell.height + gap_y,
            }
        }
    };

    if grid.columns == 0 || grid.rows == 0 {
        let (available_width, available_height) = match policy {
            LayoutPolicy::MarginGuides => (geometry.content_width(), geometry.content_height()),
            LayoutPolicy::EvenSpacing => (geometry.page_width, geometry.page_height),
        };
        return Err(LayoutError::CellTooLarge {
            cell_width: cell.width,
            cell_height: cell.height,
            available_width,
            available_height,
        });
    }

    match grid.columns.checked_mul(grid.rows) {
        Some(capacity) if capacity <= MAX_CELLS_PER_PAGE => Ok(grid),
        _ => Err(LayoutError::GridTooDense {
            columns: grid.columns,
            rows: grid.rows,
            limit: MAX_CELLS_PER_PAGE,
        }),
    }
}

/// Leftover space split into `count + 1` equal gaps. Never negative, so a
/// cell admitted by the tolerance just touches the page edge.
fn even_gap(page: f64, cell: f64, count: usize) -> f64 {
    ((page - count as f64 * cell) / (count as f64 + 1.0)).max(0.0)
}

fn validate(config: &LayoutConfig) -> Result<(), LayoutError> {
    let positive = [
        ("cell.width", config.cell.width),
        ("cell.height", config.cell.height),
        ("geometry.page_width", config.geometry.page_width),
        ("geometry.page_height", config.geometry.page_height),
    ];
    for (field, value) in positive {
        if !value.is_finite() || value <= 0.0 {
            return Err(LayoutError::InvalidDimension {
                field,
                requirement: "finite and > 0",
                value,
            });
        }
    }

    let non_negative = [
        ("geometry.margin", config.geometry.margin),
        ("geometry.column_gap", config.geometry.column_gap),
        ("geometry.row_gap", config.geometry.row_gap),
        ("tolerance", config.tolerance),
    ];
    for (field, value) in non_negative {
        if !value.is_finite() || value < 0.0 {
            return Err(LayoutError::InvalidDimension {
                field,
                requirement: "finite and >= 0",
                value,
            });
        }
    }

    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry point
// ────────────────────────────────────────────────────────────────────────────

/// Lays out every copy in `queue` onto as many pages as needed.
///
/// Fails only when the configuration is invalid, a single cell cannot fit on
/// a page, or the grid would exceed `MAX_CELLS_PER_PAGE`. All of these are
/// detected before any placement is produced. An empty
/// queue is valid and yields an empty layout.
pub fn compute_layout<R: Clone>(
    queue: &PrintQueue<R>,
    config: &LayoutConfig,
) -> Result<PageLayout<R>, LayoutError> {
    let grid = config.grid()?;
    if queue.is_empty() {
        return Ok(PageLayout {
            placements: Vec::new(),
            guide_sets: Vec::new(),
            page_count: 0,
            columns_per_page: grid.columns,
            rows_per_page: grid.rows,
            policy: config.policy,
        });
    }
    let per_page = grid.columns * grid.rows;

    let mut placements = Vec::with_capacity(queue.len());
    let mut guide_sets = Vec::new();
    let mut page = 0usize;
    let mut items_on_page = 0usize;

    let mut finish_page = |page: usize, items_on_page: usize| {
        if config.policy == LayoutPolicy::MarginGuides {
            guide_sets.push(guides_for_page(
                page,
                items_on_page,
                grid.columns,
                config.cell,
                &config.geometry,
            ));
        }
    };

    for item_ref in queue.iter() {
        if items_on_page == per_page {
            finish_page(page, items_on_page);
            page += 1;
            items_on_page = 0;
        }

        let (x, y) = grid.slot_origin(items_on_page);
        placements.push(Placement {
            item_ref: item_ref.clone(),
            page,
            x,
            y,
        });
        items_on_page += 1;
    }

    let page_count = if items_on_page > 0 {
        finish_page(page, items_on_page);
        page + 1
    } else {
        0
    };

    Ok(PageLayout {
        placements,
        guide_sets,
        page_count,
        columns_per_page: grid.columns,
        rows_per_page: grid.rows,
        policy: config.policy,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::geometry::{default_page_geometry, CellPreset, PaperSize};
    use crate::layout::guides::rows_on_page;
    use crate::layout::queue::LayoutItem;

    const EPS: f64 = 1e-9;

    fn photo_config() -> LayoutConfig {
        LayoutConfig::new(Size::new(30.0, 40.0), default_page_geometry())
    }

    fn queue_of(quantity: u32) -> PrintQueue<&'static str> {
        PrintQueue::from_items(&[LayoutItem::new("photo", quantity)])
    }

    /// Checks the invariants every margin-mode layout must satisfy.
    fn assert_layout_invariants<R>(layout: &PageLayout<R>, config: &LayoutConfig, expected: usize) {
        let LayoutConfig {
            cell,
            geometry,
            tolerance,
            ..
        } = *config;
        assert_eq!(layout.placements.len(), expected);

        for p in &layout.placements {
            assert!(p.page < layout.page_count);
            assert!(p.x >= geometry.margin - tolerance);
            assert!(p.y >= geometry.margin - tolerance);
            assert!(p.x + cell.width <= geometry.page_width - geometry.margin + tolerance);
            assert!(p.y + cell.height <= geometry.page_height - geometry.margin + tolerance);
        }

        for (i, a) in layout.placements.iter().enumerate() {
            for b in layout.placements.iter().skip(i + 1) {
                if a.page != b.page {
                    continue;
                }
                let apart_x = a.x + cell.width <= b.x + EPS || b.x + cell.width <= a.x + EPS;
                let apart_y = a.y + cell.height <= b.y + EPS || b.y + cell.height <= a.y + EPS;
                assert!(apart_x || apart_y, "cells overlap on page {}", a.page);
            }
        }

        let cols = layout.columns_per_page;
        for page in 0..layout.page_count {
            let items = layout.items_on_page(page);
            let rows = rows_on_page(items, cols);
            assert!(items <= cols * rows);
            assert!(items > cols * (rows - 1));
            assert_eq!(
                layout
                    .placements
                    .iter()
                    .filter(|p| p.page == page)
                    .count(),
                items
            );
        }

        if config.policy == LayoutPolicy::MarginGuides {
            assert_eq!(layout.guide_sets.len(), layout.page_count);
            for (page, set) in layout.guide_sets.iter().enumerate() {
                assert_eq!(set.page, page);
            }
        }
    }

    // ── Reference scenarios ─────────────────────────────────────────────────

    #[test]
    fn test_twelve_photos_fit_on_one_page() {
        let config = photo_config();
        let layout = compute_layout(&queue_of(12), &config).unwrap();

        assert_eq!(layout.columns_per_page, 6);
        assert_eq!(layout.rows_per_page, 7);
        assert_eq!(layout.page_count, 1);
        assert!(layout.placements.iter().all(|p| p.page == 0));

        // Two rows of six.
        assert!((layout.placements[5].x - 155.0).abs() < EPS);
        assert!((layout.placements[5].y - 5.0).abs() < EPS);
        assert!((layout.placements[6].x - 5.0).abs() < EPS);
        assert!((layout.placements[6].y - 45.0).abs() < EPS);

        let guides = &layout.guide_sets[0];
        let horizontal: Vec<_> = guides.horizontal().collect();
        let vertical: Vec<_> = guides.vertical().collect();
        assert_eq!(horizontal.len(), 1);
        assert!((horizontal[0].length() - 180.0).abs() < EPS);
        assert_eq!(vertical.len(), 5);
        assert!(vertical.iter().all(|g| (g.length() - 80.0).abs() < EPS));

        assert_layout_invariants(&layout, &config, 12);
    }

    #[test]
    fn test_hundred_photos_span_three_pages() {
        let config = photo_config();
        let layout = compute_layout(&queue_of(100), &config).unwrap();

        assert_eq!(layout.capacity_per_page(), 42);
        assert_eq!(layout.page_count, 3);
        assert_eq!(layout.items_on_page(0), 42);
        assert_eq!(layout.items_on_page(1), 42);
        assert_eq!(layout.items_on_page(2), 16);

        // Copy 43 (index 42) is the first one on page 1, back at the margin.
        assert_eq!(layout.placements[41].page, 0);
        assert!((layout.placements[41].y - 245.0).abs() < EPS);
        assert_eq!(layout.placements[42].page, 1);
        assert!((layout.placements[42].x - 5.0).abs() < EPS);
        assert!((layout.placements[42].y - 5.0).abs() < EPS);

        // Full pages: 6 horizontal guides, verticals span 7 rows.
        let full = &layout.guide_sets[0];
        assert_eq!(full.horizontal().count(), 6);
        assert!(full.vertical().all(|g| (g.length() - 280.0).abs() < EPS));

        // Last page: 16 copies → 3 rows.
        let last = &layout.guide_sets[2];
        assert_eq!(last.horizontal().count(), 2);
        assert_eq!(last.vertical().count(), 5);
        assert!(last.vertical().all(|g| (g.length() - 120.0).abs() < EPS));

        assert_layout_invariants(&layout, &config, 100);
    }

    #[test]
    fn test_oversized_cell_is_rejected() {
        let config = LayoutConfig::new(Size::new(300.0, 300.0), default_page_geometry());
        let err = compute_layout(&queue_of(4), &config).unwrap_err();
        assert!(matches!(err, LayoutError::CellTooLarge { .. }));
        assert!(err.to_string().starts_with("cell too large for page"));
    }

    #[test]
    fn test_empty_queue_is_valid() {
        let queue: PrintQueue<&str> = PrintQueue::from_items(&[]);
        let layout = compute_layout(&queue, &photo_config()).unwrap();
        assert!(layout.placements.is_empty());
        assert!(layout.guide_sets.is_empty());
        assert_eq!(layout.page_count, 0);
        assert_eq!(layout.items_on_page(0), 0);
    }

    // ── Ordering and determinism ────────────────────────────────────────────

    #[test]
    fn test_placements_preserve_queue_order() {
        let items = vec![
            LayoutItem::new("a".to_string(), 5),
            LayoutItem::new("b".to_string(), 40),
            LayoutItem::new("c".to_string(), 3),
        ];
        let queue = PrintQueue::from_items(&items);
        let layout = compute_layout(&queue, &photo_config()).unwrap();

        let refs: Vec<&str> = layout.placements.iter().map(|p| p.item_ref.as_str()).collect();
        let expected: Vec<&str> = queue.iter().map(String::as_str).collect();
        assert_eq!(refs, expected);

        // 48 copies: "c" copies are at indices 45..48, page 1 slots 3..6.
        assert_eq!(layout.placements[45].item_ref, "c");
        assert_eq!(layout.placements[45].page, 1);
        assert!((layout.placements[45].x - 95.0).abs() < EPS);
    }

    #[test]
    fn test_identical_inputs_serialize_identically() {
        let config = photo_config();
        let first = serde_json::to_vec(&compute_layout(&queue_of(77), &config).unwrap()).unwrap();
        let second = serde_json::to_vec(&compute_layout(&queue_of(77), &config).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    // ── Invariants over a range of geometries ───────────────────────────────

    #[test]
    fn test_invariants_hold_across_presets_and_papers() {
        for paper in PaperSize::ALL {
            for preset in CellPreset::ALL {
                for (column_gap, row_gap) in [(0.0, 0.0), (2.0, 3.0), (5.5, 0.0)] {
                    let mut geometry = PageGeometry::for_paper(paper, 5.0);
                    geometry.column_gap = column_gap;
                    geometry.row_gap = row_gap;
                    let config = LayoutConfig::new(preset.size(), geometry);
                    for quantity in [1, 7, 42, 43, 130] {
                        let layout = compute_layout(&queue_of(quantity), &config).unwrap();
                        assert_layout_invariants(&layout, &config, quantity as usize);
                        let capacity = layout.capacity_per_page();
                        assert_eq!(layout.page_count, (quantity as usize).div_ceil(capacity));
                    }
                }
            }
        }
    }

    #[test]
    fn test_large_queue_needs_dozens_of_pages() {
        let config = photo_config();
        let layout = compute_layout(&queue_of(5_000), &config).unwrap();
        assert_eq!(layout.page_count, 5_000_usize.div_ceil(42));
        assert_eq!(layout.guide_sets.len(), layout.page_count);
        assert_eq!(layout.placements.last().unwrap().page, layout.page_count - 1);
    }

    // ── Tolerance ───────────────────────────────────────────────────────────

    #[test]
    fn test_tolerance_admits_cells_that_overshoot_by_rounding() {
        let geometry = PageGeometry {
            page_width: 209.95,
            page_height: 297.0,
            margin: 5.0,
            column_gap: 0.0,
            row_gap: 0.0,
        };
        let cell = Size::new(40.0, 40.0);

        let lenient = compute_layout(&queue_of(5), &LayoutConfig::new(cell, geometry)).unwrap();
        assert_eq!(lenient.columns_per_page, 5);
        assert!(lenient.placements.iter().all(|p| (p.y - 5.0).abs() < EPS));

        let strict = LayoutConfig::new(cell, geometry).with_tolerance(0.0);
        let layout = compute_layout(&queue_of(5), &strict).unwrap();
        assert_eq!(layout.columns_per_page, 4);
        assert!((layout.placements[4].y - 45.0).abs() < EPS);
    }

    #[test]
    fn test_cell_exactly_filling_content_area() {
        let config = LayoutConfig::new(Size::new(200.0, 287.0), default_page_geometry());
        let layout = compute_layout(&queue_of(3), &config).unwrap();
        assert_eq!(layout.capacity_per_page(), 1);
        assert_eq!(layout.page_count, 3);
        assert!(layout.guide_sets.iter().all(|set| set.guides.is_empty()));
    }

    // ── Invalid input ───────────────────────────────────────────────────────

    #[test]
    fn test_margins_consuming_the_page_are_rejected() {
        let geometry = PageGeometry::for_paper(PaperSize::A4, 105.0);
        let config = LayoutConfig::new(Size::new(1.0, 1.0), geometry).with_tolerance(0.0);
        assert!(matches!(
            compute_layout(&queue_of(1), &config),
            Err(LayoutError::CellTooLarge { .. })
        ));
    }

    #[test]
    fn test_non_positive_cell_is_rejected() {
        let config = LayoutConfig::new(Size::new(0.0, 40.0), default_page_geometry());
        let err = compute_layout(&queue_of(1), &config).unwrap_err();
        assert_eq!(
            err,
            LayoutError::InvalidDimension {
                field: "cell.width",
                requirement: "finite and > 0",
                value: 0.0,
            }
        );
    }

    #[test]
    fn test_negative_gap_and_nan_tolerance_are_rejected() {
        let mut geometry = default_page_geometry();
        geometry.row_gap = -1.0;
        let config = LayoutConfig::new(Size::new(30.0, 40.0), geometry);
        assert!(matches!(
            compute_layout(&queue_of(1), &config),
            Err(LayoutError::InvalidDimension { field: "geometry.row_gap", .. })
        ));

        let config = photo_config().with_tolerance(f64::NAN);
        assert!(matches!(
            compute_layout(&queue_of(1), &config),
            Err(LayoutError::InvalidDimension { field: "tolerance", .. })
        ));
    }

    #[test]
    fn test_microscopic_cell_is_rejected_instead_of_overflowing() {
        let config = LayoutConfig::new(Size::new(1e-9, 1e-9), default_page_geometry());
        let err = compute_layout(&queue_of(2), &config).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::GridTooDense { limit: MAX_CELLS_PER_PAGE, .. }
        ));
        assert!(err.to_string().starts_with("grid too dense"));
        assert_eq!(config.check(), Err(err));
    }

    #[test]
    fn test_dense_grid_within_limit_is_accepted() {
        // 200 x 287 one-millimetre cells = 57 400 slots.
        let config = LayoutConfig::new(Size::new(1.0, 1.0), default_page_geometry());
        let layout = compute_layout(&queue_of(3), &config).unwrap();
        assert_eq!(layout.capacity_per_page(), 200 * 287);
        assert_eq!(layout.items_on_page(0), 3);

        let too_dense = LayoutConfig::new(Size::new(0.5, 0.5), default_page_geometry());
        assert!(matches!(
            too_dense.check(),
            Err(LayoutError::GridTooDense { columns: 400, rows: 574, .. })
        ));
    }

    #[test]
    fn test_check_matches_compute_layout() {
        assert_eq!(photo_config().check(), Ok(()));
        let oversized = LayoutConfig::new(Size::new(300.0, 300.0), default_page_geometry());
        assert!(matches!(
            oversized.check(),
            Err(LayoutError::CellTooLarge { .. })
        ));
        let negative = photo_config().with_tolerance(-1.0);
        assert!(matches!(
            negative.check(),
            Err(LayoutError::InvalidDimension { field: "tolerance", .. })
        ));
    }

    #[test]
    fn test_errors_are_raised_even_for_empty_queue() {
        let config = LayoutConfig::new(Size::new(300.0, 300.0), default_page_geometry());
        let queue: PrintQueue<&str> = PrintQueue::from_items(&[]);
        assert!(compute_layout(&queue, &config).is_err());
    }

    // ── Even spacing ────────────────────────────────────────────────────────

    #[test]
    fn test_even_spacing_distributes_leftover_space() {
        let config = LayoutConfig::new(Size::new(100.0, 140.0), default_page_geometry())
            .with_policy(LayoutPolicy::EvenSpacing);
        let layout = compute_layout(&queue_of(5), &config).unwrap();

        assert_eq!(layout.columns_per_page, 2);
        assert_eq!(layout.rows_per_page, 2);
        assert_eq!(layout.page_count, 2);
        assert!(layout.guide_sets.is_empty());

        let gap_x = 10.0 / 3.0;
        let gap_y = 17.0 / 3.0;
        let p = &layout.placements;
        assert!((p[0].x - gap_x).abs() < EPS);
        assert!((p[0].y - gap_y).abs() < EPS);
        assert!((p[1].x - (2.0 * gap_x + 100.0)).abs() < EPS);
        assert!((p[3].y - (2.0 * gap_y + 140.0)).abs() < EPS);
        // Right-hand gap equals the inner gaps.
        assert!((210.0 - (p[1].x + 100.0) - gap_x).abs() < EPS);

        assert_eq!(p[4].page, 1);
        assert!((p[4].x - gap_x).abs() < EPS);
    }

    #[test]
    fn test_even_spacing_ignores_margin_and_gaps() {
        let mut geometry = default_page_geometry();
        geometry.margin = 50.0;
        geometry.column_gap = 20.0;
        let config = LayoutConfig::new(Size::new(100.0, 140.0), geometry)
            .with_policy(LayoutPolicy::EvenSpacing);
        let layout = compute_layout(&queue_of(4), &config).unwrap();
        assert_eq!(layout.capacity_per_page(), 4);
        assert_eq!(layout.page_count, 1);
    }

    #[test]
    fn test_even_spacing_rejects_oversized_card() {
        let config = LayoutConfig::new(Size::new(220.0, 100.0), default_page_geometry())
            .with_policy(LayoutPolicy::EvenSpacing);
        assert!(matches!(
            compute_layout(&queue_of(1), &config),
            Err(LayoutError::CellTooLarge { .. })
        ));
    }
}
