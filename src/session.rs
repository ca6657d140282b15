/// One analysis session: owns the frame source, the last frame and the
/// element list built from it.
///
/// `refresh` replaces both wholesale; queries only read them.
use image::RgbImage;

use crate::errors::SeeMouseResult;
use crate::perception::matcher::{Matcher, Scored};
use crate::perception::pipeline::Analyzer;
use crate::perception::traits::FrameSource;
use crate::perception::types::UIElement;

pub struct Session {
    source: Box<dyn FrameSource>,
    analyzer: Analyzer,
    matcher: Matcher,
    last_frame: Option<RgbImage>,
    elements: Vec<UIElement>,
}

impl Session {
    pub fn new(source: Box<dyn FrameSource>, analyzer: Analyzer, matcher: Matcher) -> Self {
        Self {
            source,
            analyzer,
            matcher,
            last_frame: None,
            elements: Vec::new(),
        }
    }

    /// Capture a new frame and rebuild the element list from scratch. On a
    /// capture error the previous state is left untouched.
    pub fn refresh(&mut self) -> SeeMouseResult<&[UIElement]> {
        let frame = self.source.capture()?;
        let elements = self.analyzer.analyze(&frame);
        tracing::info!(count = elements.len(), "Detected {} UI elements", elements.len());
        self.last_frame = Some(frame);
        self.elements = elements;
        Ok(&self.elements)
    }

    pub fn elements(&self) -> &[UIElement] {
        &self.elements
    }

    pub fn last_frame(&self) -> Option<&RgbImage> {
        self.last_frame.as_ref()
    }

    pub fn find(&self, query: &str) -> Option<&UIElement> {
        self.matcher.find_best_match(&self.elements, query)
    }

    /// Candidates ordered by descending score (stable for equal scores).
    pub fn candidates(&self, query: &str) -> Vec<(&UIElement, f32)> {
        let mut ranked: Vec<Scored> = self.matcher.rank(&self.elements, query);
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
            .into_iter()
            .map(|s| (&self.elements[s.index], s.score))
            .collect()
    }
}
