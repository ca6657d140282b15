/// Per-frame analysis: run every detector, then fuse.
///
/// 1. Whole-frame OCR word pass (on its own thread when `detection.parallel`).
/// 2. Button-like regions from the edge map.
/// 3. Colour regions, if enabled.
/// 4. Fuse, asking OCR for a label per region.
///
/// The word pass and the region detectors only read the frame, so running
/// them side by side cannot change the fused order.
use image::RgbImage;

use crate::config::{AppConfig, ColorConfig, DetectionConfig, OcrConfig};
use crate::perception::fusion::{fuse, DetectorOutputs};
use crate::perception::regions::{detect_button_regions, detect_color_regions};
use crate::perception::text::{extract_words, read_region_label};
use crate::perception::traits::{ContourFinder, TextRecognizer};
use crate::perception::types::{Rect, UIElement};

pub struct Analyzer {
    recognizer: Box<dyn TextRecognizer>,
    contours: Box<dyn ContourFinder>,
    detection: DetectionConfig,
    color: ColorConfig,
    ocr: OcrConfig,
}

impl Analyzer {
    pub fn new(
        recognizer: Box<dyn TextRecognizer>,
        contours: Box<dyn ContourFinder>,
        cfg: &AppConfig,
    ) -> Self {
        Self {
            recognizer,
            contours,
            detection: cfg.detection.clone(),
            color: cfg.color.clone(),
            ocr: cfg.ocr.clone(),
        }
    }

    pub fn detect(&self, frame: &RgbImage) -> DetectorOutputs {
        if !self.detection.parallel {
            return DetectorOutputs {
                words: extract_words(frame, self.recognizer.as_ref()),
                buttons: self.button_regions(frame),
                colors: self.color_regions(frame),
            };
        }

        std::thread::scope(|s| {
            let words = s.spawn(|| extract_words(frame, self.recognizer.as_ref()));
            let buttons = self.button_regions(frame);
            let colors = self.color_regions(frame);
            let words = words.join().unwrap_or_else(|_| {
                tracing::error!("OCR word pass panicked; continuing without text elements");
                Vec::new()
            });
            DetectorOutputs {
                words,
                buttons,
                colors,
            }
        })
    }

    pub fn analyze(&self, frame: &RgbImage) -> Vec<UIElement> {
        let outputs = self.detect(frame);
        tracing::debug!(
            words = outputs.words.len(),
            buttons = outputs.buttons.len(),
            colors = outputs.colors.len(),
            "detector outputs"
        );
        fuse(outputs, self.detection.synthetic_confidence, |r| self.label(frame, r))
    }

    fn button_regions(&self, frame: &RgbImage) -> Vec<Rect> {
        detect_button_regions(frame, self.contours.as_ref(), &self.detection)
    }

    fn color_regions(&self, frame: &RgbImage) -> Vec<Rect> {
        if !self.color.enabled {
            return Vec::new();
        }
        detect_color_regions(frame, self.contours.as_ref(), &self.color)
    }

    fn label(&self, frame: &RgbImage, region: &Rect) -> String {
        if !self.ocr.label_regions {
            return String::new();
        }
        read_region_label(frame, region, self.recognizer.as_ref(), self.ocr.region_min_height)
    }
}
