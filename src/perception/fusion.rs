/// Concatenates detector outputs into one ordered element list.
///
/// Order: OCR words (engine order), then button-like regions, then colour
/// regions. Overlaps between families are kept; the matcher sorts them out.
use crate::perception::types::{ElementOrigin, ElementType, Rect, UIElement};

/// Everything the detectors produced for a single frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectorOutputs {
    pub words: Vec<UIElement>,
    pub buttons: Vec<Rect>,
    pub colors: Vec<Rect>,
}

/// `label` is asked once per region, buttons first, and may return an empty
/// string.
pub fn fuse<F>(outputs: DetectorOutputs, synthetic_confidence: f32, mut label: F) -> Vec<UIElement>
where
    F: FnMut(&Rect) -> String,
{
    let DetectorOutputs {
        words,
        buttons,
        colors,
    } = outputs;

    let mut elements = Vec::with_capacity(words.len() + buttons.len() + colors.len());
    elements.extend(words);

    let regions = buttons
        .into_iter()
        .map(|r| (r, ElementOrigin::Geometric))
        .chain(colors.into_iter().map(|r| (r, ElementOrigin::Color)));

    for (bounds, origin) in regions {
        let text = label(&bounds);
        elements.push(UIElement {
            bounds,
            text,
            node_type: ElementType::Button,
            origin,
            confidence: synthetic_confidence,
        });
    }

    tracing::debug!(total = elements.len(), "elements fused");
    elements
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_elem(text: &str, x: i32) -> UIElement {
        UIElement {
            bounds: Rect::new(x, 0, 30, 12).unwrap(),
            text: text.into(),
            node_type: ElementType::Text,
            origin: ElementOrigin::Word,
            confidence: 90.0,
        }
    }

    fn sample() -> DetectorOutputs {
        DetectorOutputs {
            words: vec![text_elem("Open", 0), text_elem("Close", 40)],
            buttons: vec![Rect::new(0, 50, 100, 30).unwrap(), Rect::new(0, 90, 80, 30).unwrap()],
            colors: vec![Rect::new(200, 200, 40, 40).unwrap()],
        }
    }

    fn label_by_row(r: &Rect) -> String {
        match r.y {
            50 => "OK".into(),
            200 => "Go".into(),
            _ => String::new(),
        }
    }

    #[test]
    fn words_then_buttons_then_colours() {
        let fused = fuse(sample(), 70.0, label_by_row);
        let order: Vec<(ElementOrigin, &str)> = fused.iter().map(|e| (e.origin, e.text.as_str())).collect();
        assert_eq!(
            order,
            vec![
                (ElementOrigin::Word, "Open"),
                (ElementOrigin::Word, "Close"),
                (ElementOrigin::Geometric, "OK"),
                (ElementOrigin::Geometric, ""),
                (ElementOrigin::Color, "Go"),
            ]
        );
    }

    #[test]
    fn regions_are_buttons_with_synthetic_confidence() {
        let fused = fuse(sample(), 70.0, label_by_row);
        for e in &fused[2..] {
            assert_eq!(e.node_type, ElementType::Button);
            assert_eq!(e.confidence, 70.0);
        }
    }

    #[test]
    fn fusion_is_deterministic() {
        let a = fuse(sample(), 70.0, label_by_row);
        let b = fuse(sample(), 70.0, label_by_row);
        assert_eq!(a, b);
    }

    #[test]
    fn overlapping_families_are_not_merged() {
        let outputs = DetectorOutputs {
            words: vec![text_elem("OK", 0)],
            buttons: vec![Rect::new(0, 0, 30, 12).unwrap()],
            colors: vec![],
        };
        let fused = fuse(outputs, 70.0, |_| "OK".into());
        assert_eq!(fused.len(), 2);
        assert_eq!(fused[0].bounds, fused[1].bounds);
    }

    #[test]
    fn empty_outputs_fuse_to_empty_list() {
        assert!(fuse(DetectorOutputs::default(), 70.0, |_| String::new()).is_empty());
    }
}
