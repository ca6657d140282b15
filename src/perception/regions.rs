/// Candidate-rectangle detectors. Both are stateless and never fail: an
/// image with nothing interesting in it simply yields no rectangles.
use image::RgbImage;

use crate::config::{ColorConfig, DetectionConfig};
use crate::perception::traits::{ContourFinder, HsvBand};
use crate::perception::types::Rect;

/// Button-shaped rectangles from the edge map. No ordering guarantee and no
/// de-duplication.
pub fn detect_button_regions(
    frame: &RgbImage,
    finder: &dyn ContourFinder,
    cfg: &DetectionConfig,
) -> Vec<Rect> {
    let contours = finder.edge_contours(frame, cfg.canny_low, cfg.canny_high, cfg.dilate_iterations);
    let rects: Vec<Rect> = contours
        .into_iter()
        .filter_map(Rect::bounding)
        .filter(|r| looks_like_button(r, cfg))
        .collect();
    tracing::debug!(count = rects.len(), "button-like regions");
    rects
}

pub fn looks_like_button(r: &Rect, cfg: &DetectionConfig) -> bool {
    (cfg.min_width..=cfg.max_width).contains(&r.width)
        && (cfg.min_height..=cfg.max_height).contains(&r.height)
        && r.width > r.height
}

/// Regions whose hue lies within `hue ± tolerance` on vivid pixels.
pub fn detect_color_regions(
    frame: &RgbImage,
    finder: &dyn ContourFinder,
    cfg: &ColorConfig,
) -> Vec<Rect> {
    let band = HsvBand::around(cfg.hue, cfg.tolerance, cfg.min_saturation, cfg.min_value);
    let rects: Vec<Rect> = finder
        .hue_contours(frame, &band)
        .into_iter()
        .filter_map(Rect::bounding)
        .filter(|r| r.width >= cfg.min_side && r.height >= cfg.min_side)
        .collect();
    tracing::debug!(count = rects.len(), hue = cfg.hue, "colour regions");
    rects
}
