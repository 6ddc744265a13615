//! Fit-to-viewport scaling.

use crate::constants::NEUTRAL_SCALE;
use crate::types::PanelSize;

/// Size of the drawable area in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// Width in pixels
    pub width: f64,
    /// Height in pixels
    pub height: f64,
}

impl Viewport {
    /// Creates a viewport of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Builds a viewport from an egui rectangle.
    pub fn from_rect(rect: egui::Rect) -> Self {
        Self::new(rect.width() as f64, rect.height() as f64)
    }

    /// Whether the viewport has no usable area.
    pub fn is_degenerate(&self) -> bool {
        let usable = |side: f64| side.is_finite() && side > 0.0;
        !(usable(self.width) && usable(self.height))
    }
}

/// Computes the uniform zoom that fits a panel inside the viewport.
///
/// The smaller of the two axis ratios wins so the whole panel stays visible.
/// A missing panel, a missing viewport or a zero-sized side on either yields
/// the neutral scale of 1.0.
pub fn compute_fit_scale(panel: Option<PanelSize>, viewport: Option<Viewport>) -> f64 {
    let (Some(panel), Some(viewport)) = (panel, viewport) else {
        return NEUTRAL_SCALE;
    };
    if panel.is_empty() || viewport.is_degenerate() {
        return NEUTRAL_SCALE;
    }

    let zoom_width = viewport.width / panel.width as f64;
    let zoom_height = viewport.height / panel.height as f64;
    zoom_width.min(zoom_height)
}

/// [`compute_fit_scale`] for the common case where both sides are known.
pub fn fit_scale(panel: PanelSize, viewport: Viewport) -> f64 {
    compute_fit_scale(Some(panel), Some(viewport))
}
