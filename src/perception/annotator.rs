/// Detection overlay for the `show` command.
///
/// Each element gets a colour-coded rectangle and its list index drawn in a
/// small bitmap font, so the printed table and the image line up.
use std::path::Path;

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;

use crate::errors::SeeMouseResult;
use crate::perception::types::{ElementType, UIElement};

fn element_colour(et: ElementType) -> Rgb<u8> {
    match et {
        ElementType::Button => Rgb([255, 68, 68]),
        ElementType::Text => Rgb([0, 200, 0]),
        ElementType::Icon => Rgb([255, 170, 0]),
        ElementType::Input => Rgb([68, 68, 255]),
    }
}

pub fn annotate(frame: &RgbImage, elements: &[UIElement]) -> RgbImage {
    let mut canvas = frame.clone();
    let scale: u32 = if canvas.width() > 1600 { 2 } else { 1 };

    for (idx, elem) in elements.iter().enumerate() {
        let col = element_colour(elem.node_type);
        let b = elem.bounds;
        let outer = imageproc::rect::Rect::at(b.x, b.y).of_size(b.width, b.height);
        draw_hollow_rect_mut(&mut canvas, outer, col);
        if b.width > 2 && b.height > 2 {
            let inner = imageproc::rect::Rect::at(b.x + 1, b.y + 1).of_size(b.width - 2, b.height - 2);
            draw_hollow_rect_mut(&mut canvas, inner, col);
        }

        let label_h = (5 * scale + 2) as i32;
        draw_index(&mut canvas, idx, b.x, (b.y - label_h).max(0), col, scale);
    }
    canvas
}

pub fn save_annotated(frame: &RgbImage, elements: &[UIElement], path: &Path) -> SeeMouseResult<()> {
    annotate(frame, elements).save(path)?;
    tracing::info!(path = %path.display(), count = elements.len(), "annotated screenshot written");
    Ok(())
}

/// One line per element, index first, for terminals.
pub fn element_table(elements: &[UIElement]) -> String {
    if elements.is_empty() {
        return "No UI elements detected.".to_string();
    }
    let mut lines = vec![format!("Detected {} UI elements:", elements.len())];
    for (idx, e) in elements.iter().enumerate() {
        let (cx, cy) = e.center();
        let text = if e.text.is_empty() {
            String::new()
        } else {
            format!(" \"{}\"", e.text)
        };
        lines.push(format!(
            "  [{idx}] {:<6} ({:>3.0}%) at ({cx},{cy}) {}x{}{text}",
            e.node_type.as_str(),
            e.confidence,
            e.bounds.width,
            e.bounds.height,
        ));
    }
    lines.join("\n")
}

/// Index label on a darkened backing box.
fn draw_index(canvas: &mut RgbImage, idx: usize, x: i32, y: i32, col: Rgb<u8>, scale: u32) {
    let digits = idx.to_string();
    let (w, h) = canvas.dimensions();
    let step = 5 * scale + 1;
    let box_w = digits.len() as u32 * step + 2;
    let box_h = 5 * scale + 2;
    let (x, y) = (x.max(0) as u32, y.max(0) as u32);

    for dy in 0..box_h {
        for dx in 0..box_w {
            let (px, py) = (x + dx, y + dy);
            if px < w && py < h {
                let p = canvas.get_pixel_mut(px, py);
                p.0 = p.0.map(|c| c / 5);
            }
        }
    }

    for (i, c) in digits.bytes().enumerate() {
        let glyph = DIGITS[(c - b'0') as usize];
        let gx = x + 1 + i as u32 * step;
        let gy = y + 1;
        for (row, bits) in glyph.iter().enumerate() {
            for bit in 0..5u32 {
                if (bits >> (4 - bit)) & 1 == 0 {
                    continue;
                }
                for sy in 0..scale {
                    for sx in 0..scale {
                        let (px, py) = (gx + bit * scale + sx, gy + row as u32 * scale + sy);
                        if px < w && py < h {
                            canvas.put_pixel(px, py, col);
                        }
                    }
                }
            }
        }
    }
}

/// 5×5 digit glyphs.
const DIGITS: [[u8; 5]; 10] = [
    [0b01110, 0b10001, 0b10001, 0b10001, 0b01110],
    [0b00100, 0b01100, 0b00100, 0b00100, 0b01110],
    [0b01110, 0b10001, 0b00110, 0b01000, 0b11111],
    [0b11110, 0b00001, 0b00110, 0b00001, 0b11110],
    [0b00110, 0b01010, 0b10010, 0b11111, 0b00010],
    [0b11111, 0b10000, 0b11110, 0b00001, 0b11110],
    [0b01110, 0b10000, 0b11110, 0b10001, 0b01110],
    [0b11111, 0b00001, 0b00010, 0b00100, 0b00100],
    [0b01110, 0b10001, 0b01110, 0b10001, 0b01110],
    [0b01110, 0b10001, 0b01111, 0b00001, 0b01110],
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perception::types::{ElementOrigin, Rect};

    fn button(x: i32, y: i32, text: &str) -> UIElement {
        UIElement {
            bounds: Rect::new(x, y, 60, 24).unwrap(),
            text: text.into(),
            node_type: ElementType::Button,
            origin: ElementOrigin::Geometric,
            confidence: 70.0,
        }
    }

    #[test]
    fn outlines_are_drawn_in_type_colour() {
        let frame = RgbImage::from_pixel(200, 120, Rgb([255, 255, 255]));
        let out = annotate(&frame, &[button(40, 40, "OK")]);
        assert_eq!(out.dimensions(), frame.dimensions());
        assert_eq!(out.get_pixel(40, 50), &Rgb([255, 68, 68]));
        assert_eq!(out.get_pixel(70, 52), &Rgb([255, 255, 255]));
    }

    #[test]
    fn elements_near_the_edge_do_not_panic() {
        let frame = RgbImage::new(50, 30);
        let _ = annotate(&frame, &[button(-10, -10, ""), button(45, 25, "")]);
    }

    #[test]
    fn table_lists_index_type_and_text() {
        let table = element_table(&[button(0, 0, "OK"), button(100, 0, "")]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("[0] button"));
        assert!(lines[1].contains("\"OK\""));
        assert!(lines[2].contains("at (130,12)"));
        assert_eq!(element_table(&[]), "No UI elements detected.");
    }
}
