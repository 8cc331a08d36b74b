//! Page geometry, cell sizes and the print presets offered to users.
//!
//! All lengths are in a single linear unit chosen by the caller. Every preset
//! here is expressed in millimetres, which is what the PDF exporter draws in.
//! Unit conversion (mm ↔ px ↔ pt) is the caller's job before calling the engine.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Core value types
// ────────────────────────────────────────────────────────────────────────────

/// Width × height of a cell or a page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width / height. Used by the cropping widget to lock the crop box.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

/// Page size plus spacing rules for one layout invocation.
///
/// `margin` applies uniformly to all four sides. Gaps are the blank space
/// between adjacent cells and are only honoured by the margin/guides policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub page_width: f64,
    pub page_height: f64,
    pub margin: f64,
    #[serde(default)]
    pub column_gap: f64,
    #[serde(default)]
    pub row_gap: f64,
}

impl PageGeometry {
    /// Builds a gapless geometry for the given paper with a uniform margin.
    pub fn for_paper(paper: PaperSize, margin: f64) -> Self {
        let size = paper.size();
        Self {
            page_width: size.width,
            page_height: size.height,
            margin,
            column_gap: 0.0,
            row_gap: 0.0,
        }
    }

    /// Usable width between the left and right margins.
    pub fn content_width(&self) -> f64 {
        self.page_width - 2.0 * self.margin
    }

    /// Usable height between the top and bottom margins.
    pub fn content_height(&self) -> f64 {
        self.page_height - 2.0 * self.margin
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Paper sizes
// ────────────────────────────────────────────────────────────────────────────

/// Supported paper formats, portrait orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaperSize {
    /// ISO 216 A4, 210 × 297 mm.
    A4,
    /// US letter, 8.5" × 11".
    Letter,
}

impl PaperSize {
    pub const ALL: [PaperSize; 2] = [PaperSize::A4, PaperSize::Letter];

    pub fn size(&self) -> Size {
        match self {
            PaperSize::A4 => Size::new(210.0, 297.0),
            PaperSize::Letter => Size::new(215.9, 279.4),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Photo cell presets
// ────────────────────────────────────────────────────────────────────────────

/// The keychain / ID photo sizes the print tool offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellPreset {
    /// 3 × 4 cm, the default keychain photo.
    #[default]
    #[serde(rename = "3x4")]
    ThreeByFour,
    #[serde(rename = "3.5x4.5")]
    ThreeHalfByFourHalf,
    #[serde(rename = "2.5x3.5")]
    TwoHalfByThreeHalf,
}

impl CellPreset {
    pub const ALL: [CellPreset; 3] = [
        CellPreset::ThreeByFour,
        CellPreset::ThreeHalfByFourHalf,
        CellPreset::TwoHalfByThreeHalf,
    ];

    /// Cell size in millimetres.
    pub fn size(&self) -> Size {
        match self {
            CellPreset::ThreeByFour => Size::new(30.0, 40.0),
            CellPreset::ThreeHalfByFourHalf => Size::new(35.0, 45.0),
            CellPreset::TwoHalfByThreeHalf => Size::new(25.0, 35.0),
        }
    }

    /// Human-readable label shown in the size picker.
    pub fn label(&self) -> &'static str {
        match self {
            CellPreset::ThreeByFour => "3x4 cm",
            CellPreset::ThreeHalfByFourHalf => "3,5x4,5 cm",
            CellPreset::TwoHalfByThreeHalf => "2,5x3,5 cm",
        }
    }
}

/// Default margin on every side, in millimetres.
pub const DEFAULT_MARGIN_MM: f64 = 5.0;

/// Returns the geometry the photo grid exporter uses out of the box.
///
/// A4 portrait, 5 mm margin on all sides, cells butted together (no gaps) so
/// a single dashed guide separates neighbours.
pub fn default_page_geometry() -> PageGeometry {
    PageGeometry::for_paper(PaperSize::A4, DEFAULT_MARGIN_MM)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
