/// Turns a selected element into pointer requests at its centre.
///
/// A click is move → settle → press → hold → release. A double-click is two
/// such clicks with a gap in between, not a native double-click event, so an
/// input queue that coalesces identical events may merge them.
use std::thread;
use std::time::Duration;

use clap::ValueEnum;

use crate::config::PacingConfig;
use crate::errors::SeeMouseResult;
use crate::executor::input::{InputInjector, MouseButton};
use crate::perception::types::UIElement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MouseAction {
    Move,
    Click,
    #[value(alias = "right-click")]
    Right,
    #[value(alias = "double-click")]
    Double,
}

impl MouseAction {
    pub fn verb(&self) -> &'static str {
        match self {
            MouseAction::Move => "Moving to",
            MouseAction::Click => "Clicking on",
            MouseAction::Right => "Right-clicking on",
            MouseAction::Double => "Double-clicking on",
        }
    }
}

pub struct ActionResolver {
    injector: Box<dyn InputInjector>,
    pacing: PacingConfig,
}

impl ActionResolver {
    pub fn new(injector: Box<dyn InputInjector>, pacing: PacingConfig) -> Self {
        Self { injector, pacing }
    }

    /// Perform `action` at the element's centre and return that point.
    pub fn perform(&mut self, element: &UIElement, action: MouseAction) -> SeeMouseResult<(i32, i32)> {
        let (x, y) = element.center();
        tracing::info!(?action, x, y, text = %element.text, "resolving action");
        match action {
            MouseAction::Move => self.injector.move_to(x, y)?,
            MouseAction::Click => self.click(x, y, MouseButton::Left)?,
            MouseAction::Right => self.click(x, y, MouseButton::Right)?,
            MouseAction::Double => {
                self.click(x, y, MouseButton::Left)?;
                pause(self.pacing.double_click_gap());
                self.click(x, y, MouseButton::Left)?;
            }
        }
        Ok((x, y))
    }

    fn click(&mut self, x: i32, y: i32, button: MouseButton) -> SeeMouseResult<()> {
        self.injector.move_to(x, y)?;
        pause(self.pacing.settle());
        self.injector.button_down(button, x, y)?;
        pause(self.pacing.press());
        self.injector.button_up(button, x, y)
    }
}

fn pause(d: Duration) {
    if !d.is_zero() {
        thread::sleep(d);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perception::types::{ElementOrigin, ElementType, Rect};
    use std::sync::{Arc, Mutex};
    use std::time::Instant;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Move(i32, i32),
        Down(MouseButton, i32, i32),
        Up(MouseButton, i32, i32),
    }

    #[derive(Clone, Default)]
    struct Recorder {
        calls: Arc<Mutex<Vec<(Call, Instant)>>>,
    }

    impl Recorder {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().iter().map(|(c, _)| *c).collect()
        }

        fn push(&self, c: Call) -> SeeMouseResult<()> {
            self.calls.lock().unwrap().push((c, Instant::now()));
            Ok(())
        }
    }

    impl InputInjector for Recorder {
        fn move_to(&mut self, x: i32, y: i32) -> SeeMouseResult<()> {
            self.push(Call::Move(x, y))
        }
        fn button_down(&mut self, b: MouseButton, x: i32, y: i32) -> SeeMouseResult<()> {
            self.push(Call::Down(b, x, y))
        }
        fn button_up(&mut self, b: MouseButton, x: i32, y: i32) -> SeeMouseResult<()> {
            self.push(Call::Up(b, x, y))
        }
    }

    fn instant_pacing() -> PacingConfig {
        PacingConfig {
            settle_ms: 0,
            press_ms: 0,
            double_click_gap_ms: 0,
        }
    }

    fn target() -> UIElement {
        UIElement {
            bounds: Rect::new(100, 200, 80, 30).unwrap(),
            text: "OK".into(),
            node_type: ElementType::Button,
            origin: ElementOrigin::Geometric,
            confidence: 70.0,
        }
    }

    #[test]
    fn move_only_moves() {
        let rec = Recorder::default();
        let mut resolver = ActionResolver::new(Box::new(rec.clone()), instant_pacing());
        assert_eq!(resolver.perform(&target(), MouseAction::Move).unwrap(), (140, 215));
        assert_eq!(rec.calls(), vec![Call::Move(140, 215)]);
    }

    #[test]
    fn click_is_move_press_release() {
        let rec = Recorder::default();
        let mut resolver = ActionResolver::new(Box::new(rec.clone()), instant_pacing());
        resolver.perform(&target(), MouseAction::Click).unwrap();
        assert_eq!(
            rec.calls(),
            vec![
                Call::Move(140, 215),
                Call::Down(MouseButton::Left, 140, 215),
                Call::Up(MouseButton::Left, 140, 215),
            ]
        );
    }

    #[test]
    fn right_click_uses_right_button() {
        let rec = Recorder::default();
        let mut resolver = ActionResolver::new(Box::new(rec.clone()), instant_pacing());
        resolver.perform(&target(), MouseAction::Right).unwrap();
        assert!(rec.calls().contains(&Call::Down(MouseButton::Right, 140, 215)));
        assert!(rec.calls().contains(&Call::Up(MouseButton::Right, 140, 215)));
    }

    #[test]
    fn double_click_is_two_discrete_clicks_with_a_gap() {
        let rec = Recorder::default();
        let pacing = PacingConfig {
            settle_ms: 0,
            press_ms: 0,
            double_click_gap_ms: 30,
        };
        let mut resolver = ActionResolver::new(Box::new(rec.clone()), pacing);
        resolver.perform(&target(), MouseAction::Double).unwrap();

        let one_click = [
            Call::Move(140, 215),
            Call::Down(MouseButton::Left, 140, 215),
            Call::Up(MouseButton::Left, 140, 215),
        ];
        let expected: Vec<Call> = one_click.iter().chain(one_click.iter()).copied().collect();
        assert_eq!(rec.calls(), expected);

        let stamps = rec.calls.lock().unwrap();
        let gap = stamps[3].1.duration_since(stamps[2].1);
        assert!(gap >= Duration::from_millis(30));
    }
}
