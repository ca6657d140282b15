use serde::{Deserialize, Serialize};

/// Axis-aligned box in frame-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Returns `None` for zero-sized boxes.
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self { x, y, width, height })
    }

    /// Integer centre, rounding toward the origin.
    pub fn center(&self) -> (i32, i32) {
        (
            self.x + (self.width / 2) as i32,
            self.y + (self.height / 2) as i32,
        )
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Smallest box holding every point, matching the inclusive-pixel
    /// convention of contour tracers (a single point is 1×1).
    pub fn bounding<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        let mut iter = points.into_iter();
        let (fx, fy) = iter.next()?;
        let (mut x1, mut y1, mut x2, mut y2) = (fx, fy, fx, fy);
        for (x, y) in iter {
            x1 = x1.min(x);
            y1 = y1.min(y);
            x2 = x2.max(x);
            y2 = y2.max(y);
        }
        Self::new(x1, y1, (x2 - x1 + 1) as u32, (y2 - y1 + 1) as u32)
    }

    /// Clip to a `width × height` frame. `None` if nothing remains.
    pub fn clamp_to(&self, width: u32, height: u32) -> Option<Self> {
        let x1 = self.x.max(0);
        let y1 = self.y.max(0);
        let x2 = self.right().min(width as i32);
        let y2 = self.bottom().min(height as i32);
        if x2 <= x1 || y2 <= y1 {
            return None;
        }
        Self::new(x1, y1, (x2 - x1) as u32, (y2 - y1) as u32)
    }

    pub fn iou(&self, other: &Rect) -> f32 {
        let ix1 = self.x.max(other.x);
        let iy1 = self.y.max(other.y);
        let ix2 = self.right().min(other.right());
        let iy2 = self.bottom().min(other.bottom());
        let inter = (ix2 - ix1).max(0) as u64 * (iy2 - iy1).max(0) as u64;
        let union = self.area() + other.area() - inter;
        if union == 0 {
            0.0
        } else {
            inter as f32 / union as f32
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    Button,
    Text,
    Icon,
    Input,
}

impl ElementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Button => "button",
            ElementType::Text => "text",
            ElementType::Icon => "icon",
            ElementType::Input => "input",
        }
    }
}

/// Which detector produced an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementOrigin {
    /// Word-level hit from the whole-frame OCR pass.
    Word,
    /// Edge/contour button detector.
    Geometric,
    /// Hue-range detector.
    Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UIElement {
    pub bounds: Rect,
    /// Empty for regions whose label could not be read.
    pub text: String,
    pub node_type: ElementType,
    pub origin: ElementOrigin,
    /// OCR-native 0–100 scale.
    pub confidence: f32,
}

impl UIElement {
    pub fn center(&self) -> (i32, i32) {
        self.bounds.center()
    }
}
