//! Build summary metrics.
//!
//! These are presentation constants stored next to each bundle, not values
//! computed from component specs.

use serde::Serialize;

/// Headline metrics for a bundle, split by use-case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PerformanceSummary {
    #[serde(rename_all = "camelCase")]
    Gaming {
        fps_1440p: &'static str,
        ray_tracing: &'static str,
    },
    #[serde(rename_all = "camelCase")]
    Workstation {
        render_score: &'static str,
        workload: &'static str,
    },
}

impl PerformanceSummary {
    /// Two (label, value) pairs for display
    pub fn metrics(&self) -> [(&'static str, &'static str); 2] {
        match *self {
            Self::Gaming {
                fps_1440p,
                ray_tracing,
            } => [("FPS 1440p", fps_1440p), ("Ray Tracing", ray_tracing)],
            Self::Workstation {
                render_score,
                workload,
            } => [("Render Score", render_score), ("Workload", workload)],
        }
    }
}

/// Compatibility checklist shown with every build
pub const COMPATIBILITY_NOTES: &[&str] = &[
    "All components verified compatible",
    "Power supply is sufficient",
    "Cooling solution is adequate",
    "Case fits all components",
];
