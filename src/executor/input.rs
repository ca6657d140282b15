//! Input injection. The resolver only needs to move the pointer and press or
//! release a button, so that is all the trait exposes.

use enigo::{Button, Coordinate, Direction, Enigo, Mouse, Settings};

use crate::errors::{SeeMouseError, SeeMouseResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
}

impl From<MouseButton> for Button {
    fn from(btn: MouseButton) -> Self {
        match btn {
            MouseButton::Left => Button::Left,
            MouseButton::Right => Button::Right,
        }
    }
}

pub trait InputInjector {
    fn move_to(&mut self, x: i32, y: i32) -> SeeMouseResult<()>;
    fn button_down(&mut self, button: MouseButton, x: i32, y: i32) -> SeeMouseResult<()>;
    fn button_up(&mut self, button: MouseButton, x: i32, y: i32) -> SeeMouseResult<()>;
}

/// Real pointer events via `enigo`.
pub struct EnigoInjector {
    enigo: Enigo,
}

impl EnigoInjector {
    pub fn new() -> SeeMouseResult<Self> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| SeeMouseError::Input(format!("failed to initialize input backend: {e}")))?;
        Ok(Self { enigo })
    }

    fn press(&mut self, button: MouseButton, direction: Direction) -> SeeMouseResult<()> {
        self.enigo
            .button(button.into(), direction)
            .map_err(|e| SeeMouseError::Input(e.to_string()))
    }
}

impl InputInjector for EnigoInjector {
    fn move_to(&mut self, x: i32, y: i32) -> SeeMouseResult<()> {
        self.enigo
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(|e| SeeMouseError::Input(e.to_string()))
    }

    // enigo presses at the current pointer position; the resolver has already
    // moved there.
    fn button_down(&mut self, button: MouseButton, _x: i32, _y: i32) -> SeeMouseResult<()> {
        self.press(button, Direction::Press)
    }

    fn button_up(&mut self, button: MouseButton, _x: i32, _y: i32) -> SeeMouseResult<()> {
        self.press(button, Direction::Release)
    }
}

/// Logs every request instead of touching the pointer.
#[derive(Debug, Default)]
pub struct DryRunInjector;

impl InputInjector for DryRunInjector {
    fn move_to(&mut self, x: i32, y: i32) -> SeeMouseResult<()> {
        tracing::info!(x, y, "dry-run: move");
        Ok(())
    }

    fn button_down(&mut self, button: MouseButton, x: i32, y: i32) -> SeeMouseResult<()> {
        tracing::info!(?button, x, y, "dry-run: button down");
        Ok(())
    }

    fn button_up(&mut self, button: MouseButton, x: i32, y: i32) -> SeeMouseResult<()> {
        tracing::info!(?button, x, y, "dry-run: button up");
        Ok(())
    }
}
