// Page layout: places a print queue of fixed-size photo cells onto pages and
// computes the dashed cut guides between them.
// The engine is pure and synchronous; handlers run it on the blocking pool.

pub mod engine;
pub mod geometry;
pub mod guides;
pub mod handlers;
pub mod page_fill;
pub mod queue;

// Re-export the public API consumed by other modules (errors, config, state, main).
pub use engine::{LayoutError, DEFAULT_TOLERANCE};
pub use geometry::{default_page_geometry, PageGeometry, DEFAULT_MARGIN_MM};
