//! Keyboard input captured once per repaint.

use crate::types::Direction;
use eframe::egui;

/// Which arrow keys are held down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldDirections {
    /// Up arrow
    pub up: bool,
    /// Down arrow
    pub down: bool,
    /// Left arrow
    pub left: bool,
    /// Right arrow
    pub right: bool,
}

impl HeldDirections {
    /// Only `direction` held.
    pub fn only(direction: Direction) -> Self {
        let mut held = Self::default();
        held.set(direction, true);
        held
    }

    /// Whether the key for `direction` is down.
    pub fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Marks `direction` as held or released.
    pub fn set(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Up => self.up = held,
            Direction::Down => self.down = held,
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }

    /// The direction acted on this frame.
    ///
    /// When several keys are held, right beats left beats up beats down.
    pub fn preferred(&self) -> Option<Direction> {
        [Direction::Right, Direction::Left, Direction::Up, Direction::Down]
            .into_iter()
            .find(|dir| self.is_held(*dir))
    }
}

/// Everything the viewer reads from the keyboard and window in one repaint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Arrow keys currently held
    pub held: HeldDirections,
    /// Escape was pressed
    pub quit: bool,
    /// The window is being closed by the platform
    pub close_requested: bool,
    /// `F` was pressed this repaint
    pub toggle_fullscreen: bool,
}

impl FrameInput {
    /// Reads the current input state from egui.
    pub fn capture(ctx: &egui::Context) -> Self {
        ctx.input(|i| Self {
            held: HeldDirections {
                up: i.key_down(egui::Key::ArrowUp),
                down: i.key_down(egui::Key::ArrowDown),
                left: i.key_down(egui::Key::ArrowLeft),
                right: i.key_down(egui::Key::ArrowRight),
            },
            quit: i.key_pressed(egui::Key::Escape),
            close_requested: i.viewport().close_requested(),
            toggle_fullscreen: i.key_pressed(egui::Key::F),
        })
    }
}
