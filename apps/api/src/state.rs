use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::filter::ImageFilter;
use crate::layout::PageGeometry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable filter backend. Default: DisabledFilter.
    pub filter: Arc<dyn ImageFilter>,
    /// Geometry used when a layout request omits `page` (A4 with the configured margin).
    pub default_geometry: PageGeometry,
}

impl AppState {
    pub fn filter_timeout(&self) -> Duration {
        Duration::from_secs(self.config.filter_timeout_secs)
    }
}

#[cfg(test)]
impl AppState {
    /// State with default config values and the given filter backend.
    pub fn for_tests(filter: Arc<dyn ImageFilter>) -> Self {
        Self {
            config: Config {
                port: 0,
                rust_log: "debug".to_string(),
                layout_tolerance: crate::layout::DEFAULT_TOLERANCE,
                page_margin_mm: crate::layout::DEFAULT_MARGIN_MM,
                filter_timeout_secs: 5,
                max_copies_per_request: crate::config::DEFAULT_MAX_COPIES,
            },
            filter,
            default_geometry: crate::layout::default_page_geometry(),
        }
    }
}
