/// Turns OCR output into typed elements.
///
/// OCR trouble mid-refresh never aborts the analysis: a failed pass counts as
/// "no words" and a failed region read as "no label".
use image::RgbImage;

use crate::perception::traits::TextRecognizer;
use crate::perception::types::{ElementOrigin, ElementType, Rect, UIElement};

/// One `Text` element per recognized word, in engine order. Words with empty
/// text are skipped.
pub fn extract_words(frame: &RgbImage, recognizer: &dyn TextRecognizer) -> Vec<UIElement> {
    let words = match recognizer.words(frame) {
        Ok(words) => words,
        Err(e) => {
            tracing::warn!(error = %e, "word-level OCR failed; continuing without text elements");
            return Vec::new();
        }
    };

    let total = words.len();
    let elements: Vec<UIElement> = words
        .into_iter()
        .filter(|w| !w.text.trim().is_empty())
        .map(|w| UIElement {
            bounds: w.bounds,
            text: w.text.trim().to_string(),
            node_type: ElementType::Text,
            origin: ElementOrigin::Word,
            confidence: w.confidence,
        })
        .collect();

    tracing::debug!(words = elements.len(), skipped = total - elements.len(), "OCR words");
    elements
}

/// Best-effort label for a detected region. Returns an empty string when the
/// region is off-frame, OCR fails, or nothing is read.
pub fn read_region_label(
    frame: &RgbImage,
    region: &Rect,
    recognizer: &dyn TextRecognizer,
    min_height: u32,
) -> String {
    let Some(crop) = crop_region(frame, region, min_height) else {
        return String::new();
    };
    match recognizer.region_text(&crop) {
        Ok(raw) => normalize_label(&raw),
        Err(e) => {
            tracing::warn!(error = %e, x = region.x, y = region.y, "region OCR failed");
            String::new()
        }
    }
}

/// Crop `region` out of `frame`, upscaling so the crop is at least
/// `min_height` pixels tall (0 disables upscaling).
pub fn crop_region(frame: &RgbImage, region: &Rect, min_height: u32) -> Option<RgbImage> {
    let (w, h) = frame.dimensions();
    let r = region.clamp_to(w, h)?;
    let cropped = image::imageops::crop_imm(frame, r.x as u32, r.y as u32, r.width, r.height).to_image();

    if min_height == 0 || r.height >= min_height {
        return Some(cropped);
    }
    let scale = min_height as f32 / r.height as f32;
    let out_w = (r.width as f32 * scale).round() as u32;
    Some(image::imageops::resize(
        &cropped,
        out_w.max(1),
        min_height,
        image::imageops::FilterType::Lanczos3,
    ))
}

/// Collapse whitespace runs (OCR output is often multi-line with a trailing
/// newline) into single spaces.
pub fn normalize_label(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
