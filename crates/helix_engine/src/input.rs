//! Input collaborator interface
//!
//! The runtime never polls devices; it consults a logical-action
//! interface the host application implements over its real input stack.

use crate::foundation::math::Vec2;

/// Logical input actions the runtime's systems may consult
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Primary fire
    Fire,
    /// Toggle the pause menu
    Pause,
    /// Menu confirm
    Confirm,
    /// Menu cancel / back
    Cancel,
}

/// Polling interface over the host's input devices
pub trait InputSource {
    /// Whether the logical action is currently pressed
    fn is_action_pressed(&self, action: Action) -> bool;

    /// Current movement direction; zero when idle, unit-ish when moving
    fn movement_axis(&self) -> Vec2;
}

/// Input source that reports nothing pressed (headless runs and tests)
#[derive(Debug, Default)]
pub struct NullInput;

impl InputSource for NullInput {
    fn is_action_pressed(&self, _action: Action) -> bool {
        false
    }

    fn movement_axis(&self) -> Vec2 {
        Vec2::zeros()
    }
}
