// src/pagination.rs
//! Advisory page count for the preview, derived from the measured content size.
//! Only sizes the preview container; exports never read it.

/// A4 width in millimetres
pub const A4_WIDTH_MM: f64 = 210.0;
/// A4 height in millimetres
pub const A4_HEIGHT_MM: f64 = 297.0;

/// Pixel height of one page for content rendered `width` pixels wide
pub fn page_height_px(width: f64) -> f64 {
    (width / A4_WIDTH_MM) * A4_HEIGHT_MM
}

/// Pages spanned by content of the given pixel size, never less than one.
/// `None` when the width cannot be used yet.
pub fn estimate_pages(height: f64, width: f64) -> Option<u32> {
    if !width.is_finite() || width <= 0.0 {
        return None;
    }

    let one_page = page_height_px(width);
    let height = if height.is_finite() { height.max(0.0) } else { 0.0 };
    let pages = (height / one_page).ceil();

    Some((pages as u32).max(1))
}

/// Remembers the last usable estimate across layout changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageEstimator {
    pages: u32,
}

impl Default for PageEstimator {
    fn default() -> Self {
        Self { pages: 1 }
    }
}

impl PageEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages(&self) -> u32 {
        self.pages
    }

    /// Feed one measurement; unmeasurable layouts keep the previous value
    pub fn observe(&mut self, height: f64, width: f64) -> u32 {
        if let Some(pages) = estimate_pages(height, width) {
            self.pages = pages;
        }
        self.pages
    }
}

/// Container geometry derived from the page count and the display scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewLayout {
    pub pages: u32,
    pub scale: f64,
}

impl PreviewLayout {
    pub fn new(pages: u32, scale: f64) -> Self {
        Self {
            pages: pages.max(1),
            scale,
        }
    }

    /// Container snaps to whole pages
    pub fn min_height_mm(&self) -> f64 {
        f64::from(self.pages) * A4_HEIGHT_MM
    }

    /// Compensates the space a scaled-down container leaves behind
    pub fn margin_bottom_mm(&self) -> f64 {
        (self.scale - 1.0) * A4_HEIGHT_MM * f64::from(self.pages)
    }

    /// Background drawing a thin rule at each page boundary
    pub fn guideline_css(&self) -> String {
        format!(
            "height: {}mm; background-image: linear-gradient(to bottom, transparent 296.5mm, #94a3b8 296.5mm, #94a3b8 297mm); background-size: 100% 297mm;",
            self.min_height_mm()
        )
    }
}
