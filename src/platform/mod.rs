//! Platform abstraction layer
//!
//! Input reaches the game as abstract actions. Continuous actions are polled
//! with [`InputSource::is_held`]; one-shot actions are consumed once per press
//! with [`InputSource::consume_edge`].

use std::collections::HashSet;

use crate::sim::TickInput;

/// Abstract game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Thrust,
    Shoot,
    Pause,
    Start,
    Mute,
}

impl Action {
    /// Map a DOM-style key code to an action
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Action::Left),
            "ArrowRight" | "KeyD" => Some(Action::Right),
            "ArrowUp" | "KeyW" => Some(Action::Thrust),
            "Space" => Some(Action::Shoot),
            "Escape" => Some(Action::Pause),
            "Enter" => Some(Action::Start),
            "KeyM" => Some(Action::Mute),
            _ => None,
        }
    }

    /// One-shot actions fire once per press and ignore key repeat
    pub fn is_edge(&self) -> bool {
        matches!(self, Action::Pause | Action::Start | Action::Mute)
    }
}

/// Source of player input, polled once per frame
pub trait InputSource {
    /// Whether a continuous action is currently held
    fn is_held(&self, action: Action) -> bool;

    /// Returns true once per press of a one-shot action
    fn consume_edge(&mut self, action: Action) -> bool;

    /// Snapshot the held actions into a tick input
    fn tick_input(&self) -> TickInput {
        TickInput {
            left: self.is_held(Action::Left),
            right: self.is_held(Action::Right),
            thrust: self.is_held(Action::Thrust),
            shoot: self.is_held(Action::Shoot),
        }
    }
}

/// Keyboard state fed by key-down/key-up events
#[derive(Debug, Clone, Default)]
pub struct KeyboardInput {
    down: HashSet<Action>,
    pressed: HashSet<Action>,
}

impl KeyboardInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press; returns the mapped action, if any
    pub fn key_down(&mut self, code: &str, repeat: bool) -> Option<Action> {
        let action = Action::from_key_code(code)?;
        if repeat && action.is_edge() {
            return Some(action);
        }
        self.down.insert(action);
        self.pressed.insert(action);
        Some(action)
    }

    /// Handle a key release
    pub fn key_up(&mut self, code: &str) -> Option<Action> {
        let action = Action::from_key_code(code)?;
        self.down.remove(&action);
        Some(action)
    }

    /// Drop unconsumed one-shot presses at the end of a frame
    pub fn next_frame(&mut self) {
        self.pressed.retain(|a| !a.is_edge());
    }

    /// Release everything (e.g. on focus loss)
    pub fn clear(&mut self) {
        self.down.clear();
        self.pressed.clear();
    }
}

impl InputSource for KeyboardInput {
    fn is_held(&self, action: Action) -> bool {
        self.down.contains(&action)
    }

    fn consume_edge(&mut self, action: Action) -> bool {
        self.pressed.remove(&action)
    }
}
