//! Keyboard mapping
//!
//! Platforms deliver key-down/key-up edges by key name; the game only sees
//! logical actions.

use crate::sim::Direction;

/// Logical actions the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Pause,
    Quit,
}

impl Action {
    /// Map a key name (DOM `KeyboardEvent.key` spelling) to an action
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "a" | "A" | "ArrowLeft" => Some(Action::MoveLeft),
            "d" | "D" | "ArrowRight" => Some(Action::MoveRight),
            "p" | "P" => Some(Action::Pause),
            "Escape" => Some(Action::Quit),
            _ => None,
        }
    }

    /// Paddle direction for movement actions
    pub fn direction(self) -> Option<Direction> {
        match self {
            Action::MoveLeft => Some(Direction::Left),
            Action::MoveRight => Some(Direction::Right),
            Action::Pause | Action::Quit => None,
        }
    }
}

/// A single key edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub action: Action,
    /// true on key-down, false on key-up
    pub pressed: bool,
    /// Auto-repeat key-down generated by the OS
    pub repeat: bool,
}

impl KeyEvent {
    pub fn down(action: Action) -> Self {
        Self {
            action,
            pressed: true,
            repeat: false,
        }
    }

    pub fn up(action: Action) -> Self {
        Self {
            action,
            pressed: false,
            repeat: false,
        }
    }

    /// Build from a raw key name; unmapped keys yield `None`
    pub fn from_key(key: &str, pressed: bool, repeat: bool) -> Option<Self> {
        Action::from_key(key).map(|action| Self {
            action,
            pressed,
            repeat,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Action::from_key("a"), Some(Action::MoveLeft));
        assert_eq!(Action::from_key("ArrowRight"), Some(Action::MoveRight));
        assert_eq!(Action::from_key("Escape"), Some(Action::Quit));
        assert_eq!(Action::from_key("P"), Some(Action::Pause));
        assert_eq!(Action::from_key("x"), None);
    }

    #[test]
    fn test_directions() {
        assert_eq!(Action::MoveLeft.direction(), Some(Direction::Left));
        assert_eq!(Action::MoveRight.direction(), Some(Direction::Right));
        assert_eq!(Action::Quit.direction(), None);
    }

    #[test]
    fn test_event_from_key() {
        let event = KeyEvent::from_key("d", true, true).unwrap();
        assert_eq!(event.action, Action::MoveRight);
        assert!(event.pressed && event.repeat);
        assert!(KeyEvent::from_key("Shift", true, false).is_none());
    }
}
