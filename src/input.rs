//! Input state and adapters
//!
//! Keyboard and touch/mouse handlers only ever set or clear flags here. The
//! simulation copies the whole table at the start of each step.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Logical player actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Kick,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::Kick,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Up => "up",
            Action::Down => "down",
            Action::Left => "left",
            Action::Right => "right",
            Action::Kick => "kick",
        }
    }

    /// Keyboard binding: W/A/S/D move, X kicks (case-insensitive)
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "w" => Some(Action::Up),
            "a" => Some(Action::Left),
            "s" => Some(Action::Down),
            "d" => Some(Action::Right),
            "x" => Some(Action::Kick),
            _ => None,
        }
    }

    /// Touch control binding, from a button's `data-key` attribute.
    /// Accepts canonical names as well as the keyboard letters.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "up" => Some(Action::Up),
            "down" => Some(Action::Down),
            "left" => Some(Action::Left),
            "right" => Some(Action::Right),
            "kick" => Some(Action::Kick),
            other => Self::from_key(other),
        }
    }
}

/// Pressed/released table for every action (absent = released)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pressed: u8,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_pressed(&mut self, action: Action, pressed: bool) {
        if pressed {
            self.pressed |= action.bit();
        } else {
            self.pressed &= !action.bit();
        }
    }

    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed & action.bit() != 0
    }

    /// Release everything (window blur, lost touch)
    pub fn clear(&mut self) {
        self.pressed = 0;
    }

    /// Copy taken by the physics step; later writes don't affect it
    pub fn snapshot(&self) -> InputState {
        *self
    }

    /// Raw move direction: each axis in {-1, 0, 1}, not normalized
    pub fn move_axes(&self) -> Vec2 {
        let mut axes = Vec2::ZERO;
        if self.is_pressed(Action::Left) {
            axes.x -= 1.0;
        }
        if self.is_pressed(Action::Right) {
            axes.x += 1.0;
        }
        if self.is_pressed(Action::Up) {
            axes.y -= 1.0;
        }
        if self.is_pressed(Action::Down) {
            axes.y += 1.0;
        }
        axes
    }

    pub fn kick(&self) -> bool {
        self.is_pressed(Action::Kick)
    }

    /// Keyboard adapter. Returns true if the key is bound to an action.
    pub fn handle_key(&mut self, key: &str, pressed: bool) -> bool {
        match Action::from_key(key) {
            Some(action) => {
                self.set_pressed(action, pressed);
                true
            }
            None => false,
        }
    }

    /// Touch/mouse adapter for a control button tagged with `tag`.
    /// Press-start passes `true`; end, cancel and pointer-leave pass `false`.
    pub fn handle_control(&mut self, tag: &str, pressed: bool) -> bool {
        match Action::from_tag(tag) {
            Some(action) => {
                self.set_pressed(action, pressed);
                true
            }
            None => {
                log::trace!("Ignoring control with unknown tag {tag:?}");
                false
            }
        }
    }
}
