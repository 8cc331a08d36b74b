//! Axum route handlers for the Layout API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::filter::apply_or_keep;
use crate::layout::engine::{compute_layout, LayoutConfig, LayoutPolicy, PageLayout};
use crate::layout::geometry::{CellPreset, PageGeometry, PaperSize, Size};
use crate::layout::page_fill::{analyze_page_fill, recommend_fill_action, FillAction, PageFill};
use crate::layout::queue::{LayoutItem, PrintQueue};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LayoutItemRequest {
    pub image_ref: String,
    pub quantity: u32,
    /// Optional style description ("sepia", "watercolor") applied before layout.
    pub filter: Option<String>,
}

/// Body of `POST /api/v1/layout`.
///
/// The cell comes from `cell` or `preset` (not both); with neither, the
/// default 3x4 preset is used. `page` falls back to the server's default geometry.
#[derive(Debug, Deserialize)]
pub struct LayoutRequest {
    pub items: Vec<LayoutItemRequest>,
    pub cell: Option<Size>,
    pub preset: Option<CellPreset>,
    pub page: Option<PageGeometry>,
    #[serde(default)]
    pub policy: LayoutPolicy,
    pub tolerance: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct LayoutResponse {
    #[serde(flatten)]
    pub layout: PageLayout<String>,
    pub page_fill: Vec<PageFill>,
    pub fill_action: FillAction,
    /// Filter failures and other user-facing messages. The layout is still valid.
    pub notices: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CellPresetInfo {
    pub id: CellPreset,
    pub label: &'static str,
    pub size: Size,
    pub aspect_ratio: f64,
}

#[derive(Debug, Serialize)]
pub struct PaperInfo {
    pub id: PaperSize,
    pub size: Size,
}

#[derive(Debug, Serialize)]
pub struct PresetsResponse {
    pub cell_presets: Vec<CellPresetInfo>,
    pub papers: Vec<PaperInfo>,
    pub default_geometry: PageGeometry,
    pub default_policy: LayoutPolicy,
    pub tolerance: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/layout
///
/// Validates the request, runs optional filters (keeping originals on failure),
/// then computes placements and cut guides for every copy.
pub async fn handle_compute_layout(
    State(state): State<AppState>,
    Json(request): Json<LayoutRequest>,
) -> Result<Json<LayoutResponse>, AppError> {
    validate_items(&request.items, state.config.max_copies_per_request)?;
    let config = resolve_config(&request, &state)?;

    // Reject an impossible geometry before spending any filter calls.
    config.check()?;

    let (items, notices) = run_filters(&state, request.items).await;
    let queue = PrintQueue::from_items(&items);
    let copies = queue.len();

    // Large queues produce thousands of placements; keep it off the async executor.
    let layout = tokio::task::spawn_blocking(move || compute_layout(&queue, &config))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in layout: {e}")))??;

    info!(
        copies,
        pages = layout.page_count,
        columns = layout.columns_per_page,
        rows = layout.rows_per_page,
        policy = ?layout.policy,
        "Layout computed"
    );

    let page_fill = analyze_page_fill(&layout);
    let fill_action = recommend_fill_action(&page_fill);

    Ok(Json(LayoutResponse {
        layout,
        page_fill,
        fill_action,
        notices,
    }))
}

/// GET /api/v1/presets
///
/// Lists the cell sizes and papers the front-end can offer, plus server defaults.
pub async fn handle_presets(State(state): State<AppState>) -> Json<PresetsResponse> {
    let cell_presets = CellPreset::ALL
        .iter()
        .map(|preset| CellPresetInfo {
            id: *preset,
            label: preset.label(),
            size: preset.size(),
            aspect_ratio: preset.size().aspect_ratio(),
        })
        .collect();

    let papers = PaperSize::ALL
        .iter()
        .map(|paper| PaperInfo {
            id: *paper,
            size: paper.size(),
        })
        .collect();

    Json(PresetsResponse {
        cell_presets,
        papers,
        default_geometry: state.default_geometry,
        default_policy: LayoutPolicy::default(),
        tolerance: state.config.layout_tolerance,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

fn validate_items(items: &[LayoutItemRequest], max_copies: u64) -> Result<(), AppError> {
    let mut total: u64 = 0;
    for (index, item) in items.iter().enumerate() {
        if item.image_ref.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "items[{index}].image_ref cannot be empty"
            )));
        }
        if item.quantity == 0 {
            return Err(AppError::Validation(format!(
                "items[{index}].quantity must be at least 1"
            )));
        }
        total = total.saturating_add(u64::from(item.quantity));
        if total > max_copies {
            return Err(AppError::Validation(format!(
                "too many copies: at most {max_copies} per request"
            )));
        }
    }
    Ok(())
}

fn resolve_config(request: &LayoutRequest, state: &AppState) -> Result<LayoutConfig, AppError> {
    let cell = match (request.cell, request.preset) {
        (Some(_), Some(_)) => {
            return Err(AppError::Validation(
                "specify either cell or preset, not both".to_string(),
            ))
        }
        (Some(cell), None) => cell,
        (None, Some(preset)) => preset.size(),
        (None, None) => CellPreset::default().size(),
    };

    let geometry = request.page.unwrap_or(state.default_geometry);
    let tolerance = request.tolerance.unwrap_or(state.config.layout_tolerance);

    Ok(LayoutConfig::new(cell, geometry)
        .with_policy(request.policy)
        .with_tolerance(tolerance))
}

/// Applies each item's filter, if any. Failures keep the original image and
/// add a notice; they never fail the request.
async fn run_filters(
    state: &AppState,
    items: Vec<LayoutItemRequest>,
) -> (Vec<LayoutItem<String>>, Vec<String>) {
    let timeout = state.filter_timeout();
    let mut resolved = Vec::with_capacity(items.len());
    let mut notices = Vec::new();

    for item in items {
        let image_ref = match item.filter.as_deref() {
            Some(style) => {
                let filtered =
                    apply_or_keep(state.filter.as_ref(), &item.image_ref, style, timeout).await;
                notices.extend(filtered.notice);
                filtered.image_ref
            }
            None => item.image_ref,
        };
        resolved.push(LayoutItem::new(image_ref, item.quantity));
    }

    (resolved, notices)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
