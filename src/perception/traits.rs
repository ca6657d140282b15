use image::RgbImage;

use crate::errors::SeeMouseResult;
use crate::perception::types::Rect;

/// Produces one immutable colour frame per call.
pub trait FrameSource {
    fn capture(&mut self) -> SeeMouseResult<RgbImage>;
}

/// One word reported by the OCR engine. `text` may be empty; the extractor
/// skips those.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrWord {
    pub text: String,
    /// Engine-native 0–100 scale.
    pub confidence: f32,
    pub bounds: Rect,
}

/// Text recognition backend.
pub trait TextRecognizer: Send + Sync {
    /// Word-level pass over a whole image, in engine emission order.
    fn words(&self, image: &RgbImage) -> SeeMouseResult<Vec<OcrWord>>;

    /// Read a sub-image as a single block. Empty string when nothing was read.
    fn region_text(&self, image: &RgbImage) -> SeeMouseResult<String>;
}

/// A traced outline, in frame-pixel coordinates.
pub type Contour = Vec<(i32, i32)>;

/// Saturation/value floors plus an inclusive hue window. Hue bounds are not
/// wrapped around 0/180; values outside 0..=179 simply widen or narrow the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HsvBand {
    pub hue_low: i32,
    pub hue_high: i32,
    pub min_saturation: u8,
    pub min_value: u8,
}

impl HsvBand {
    pub fn around(hue: i32, tolerance: i32, min_saturation: u8, min_value: u8) -> Self {
        Self {
            hue_low: hue - tolerance,
            hue_high: hue + tolerance,
            min_saturation,
            min_value,
        }
    }

    pub fn contains(&self, h: u8, s: u8, v: u8) -> bool {
        let h = h as i32;
        h >= self.hue_low && h <= self.hue_high && s >= self.min_saturation && v >= self.min_value
    }
}

/// Edge, morphology and contour primitives. Contours come back in no
/// particular order.
pub trait ContourFinder: Send + Sync {
    /// Luma → edge map → dilation → external contours.
    fn edge_contours(
        &self,
        frame: &RgbImage,
        canny_low: f32,
        canny_high: f32,
        dilate_iterations: u8,
    ) -> Vec<Contour>;

    /// HSV threshold → external contours of the mask.
    fn hue_contours(&self, frame: &RgbImage, band: &HsvBand) -> Vec<Contour>;
}
