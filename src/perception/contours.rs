/// Contour extraction backed by `imageproc`.
///
/// Mirrors the usual OpenCV recipe: Canny on luma, square dilation to close
/// small gaps, then only the outermost borders of each connected component.
use image::{GrayImage, Luma, RgbImage};
use imageproc::contours::{find_contours, BorderType};
use imageproc::distance_transform::Norm;
use imageproc::edges::canny;
use imageproc::morphology::dilate;

use crate::perception::traits::{Contour, ContourFinder, HsvBand};

#[derive(Debug, Default, Clone, Copy)]
pub struct ImageprocContourFinder;

impl ImageprocContourFinder {
    pub fn new() -> Self {
        Self
    }
}

impl ContourFinder for ImageprocContourFinder {
    fn edge_contours(
        &self,
        frame: &RgbImage,
        canny_low: f32,
        canny_high: f32,
        dilate_iterations: u8,
    ) -> Vec<Contour> {
        let gray = image::imageops::grayscale(frame);
        let edges = canny(&gray, canny_low, canny_high);
        // k iterations of a 3×3 square kernel == one pass with L∞ radius k.
        let closed = if dilate_iterations > 0 {
            dilate(&edges, Norm::LInf, dilate_iterations)
        } else {
            edges
        };
        let contours = external_contours(&closed);
        tracing::trace!(count = contours.len(), "edge contours");
        contours
    }

    fn hue_contours(&self, frame: &RgbImage, band: &HsvBand) -> Vec<Contour> {
        let mask = hsv_mask(frame, band);
        let contours = external_contours(&mask);
        tracing::trace!(count = contours.len(), "hue contours");
        contours
    }
}

fn external_contours(binary: &GrayImage) -> Vec<Contour> {
    find_contours::<i32>(binary)
        .into_iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
        .map(|c| c.points.into_iter().map(|p| (p.x, p.y)).collect())
        .collect()
}

/// 255 where the pixel falls inside `band`, 0 elsewhere.
pub fn hsv_mask(frame: &RgbImage, band: &HsvBand) -> GrayImage {
    let (w, h) = frame.dimensions();
    let mut mask = GrayImage::new(w, h);
    for (x, y, px) in frame.enumerate_pixels() {
        let (hue, sat, val) = rgb_to_hsv(px[0], px[1], px[2]);
        if band.contains(hue, sat, val) {
            mask.put_pixel(x, y, Luma([255]));
        }
    }
    mask
}

/// 8-bit HSV: hue in 0..180 (half degrees), saturation and value in 0..=255.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let (rf, gf, bf) = (r as f32, g as f32, b as f32);
    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let sat = if max > 0.0 { delta / max * 255.0 } else { 0.0 };

    let mut hue = if delta == 0.0 {
        0.0
    } else if max == rf {
        60.0 * (gf - bf) / delta
    } else if max == gf {
        120.0 + 60.0 * (bf - rf) / delta
    } else {
        240.0 + 60.0 * (rf - gf) / delta
    };
    if hue < 0.0 {
        hue += 360.0;
    }

    let hue = ((hue / 2.0).round() as u32 % 180) as u8;
    (hue, sat.round() as u8, max as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DetectionConfig;
    use crate::perception::regions::detect_button_regions;
    use image::Rgb;

    fn frame_with_box(w: u32, h: u32, rect: (u32, u32, u32, u32), fill: [u8; 3]) -> RgbImage {
        let mut img = RgbImage::from_pixel(w, h, Rgb([255, 255, 255]));
        let (x0, y0, bw, bh) = rect;
        for y in y0..y0 + bh {
            for x in x0..x0 + bw {
                img.put_pixel(x, y, Rgb(fill));
            }
        }
        img
    }

    #[test]
    fn primary_colours_map_to_expected_hues() {
        assert_eq!(rgb_to_hsv(255, 0, 0), (0, 255, 255));
        assert_eq!(rgb_to_hsv(0, 255, 0), (60, 255, 255));
        assert_eq!(rgb_to_hsv(0, 0, 255), (120, 255, 255));
        assert_eq!(rgb_to_hsv(128, 128, 128), (0, 0, 128));
    }

    #[test]
    fn mask_selects_only_band_pixels() {
        let img = frame_with_box(20, 20, (5, 5, 4, 3), [0, 0, 255]);
        let band = HsvBand::around(120, 10, 100, 100);
        let mask = hsv_mask(&img, &band);
        let lit = mask.pixels().filter(|p| p[0] == 255).count();
        assert_eq!(lit, 12);
        assert_eq!(mask.get_pixel(5, 5)[0], 255);
        assert_eq!(mask.get_pixel(0, 0)[0], 0);
    }

    #[test]
    fn blue_block_yields_one_external_contour() {
        let img = frame_with_box(100, 80, (10, 10, 50, 30), [0, 0, 255]);
        let band = HsvBand::around(120, 10, 100, 100);
        let contours = ImageprocContourFinder::new().hue_contours(&img, &band);
        assert_eq!(contours.len(), 1);
        let xs: Vec<i32> = contours[0].iter().map(|p| p.0).collect();
        assert_eq!(*xs.iter().min().unwrap(), 10);
        assert_eq!(*xs.iter().max().unwrap(), 59);
    }

    #[test]
    fn drawn_button_survives_edge_pipeline_and_square_does_not() {
        let mut img = frame_with_box(640, 480, (100, 100, 120, 32), [60, 60, 60]);
        for y in 300..360 {
            for x in 400..460 {
                img.put_pixel(x, y, Rgb([60, 60, 60]));
            }
        }

        let rects = detect_button_regions(&img, &ImageprocContourFinder::new(), &DetectionConfig::default());

        assert_eq!(rects.len(), 1, "{rects:?}");
        let r = rects[0];
        assert!(r.x <= 100 && r.y <= 100);
        assert!(r.right() >= 220 && r.bottom() >= 132);
        assert!(r.width <= 140 && r.height <= 50);
    }

    #[test]
    fn blank_frame_has_no_edge_contours() {
        let img = RgbImage::from_pixel(64, 64, Rgb([200, 200, 200]));
        let contours = ImageprocContourFinder::new().edge_contours(&img, 50.0, 150.0, 2);
        assert!(contours.is_empty());
    }
}
