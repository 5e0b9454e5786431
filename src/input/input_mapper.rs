//! Input mapping from raw key events to semantic actions

use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Actions triggered by keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Exit application (Escape)
    Exit,
    /// Unmount or remount the splash effect (Space)
    ToggleEffect,
    /// Toggle fullscreen mode (F key)
    ToggleFullscreen,
}

/// Maps raw key events to actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Only presses are mapped; held-key repeats are ignored so a held Space
    /// does not flap the effect.
    pub fn map_keyboard(key: KeyCode, state: ElementState, repeat: bool) -> Option<InputAction> {
        if state != ElementState::Pressed || repeat {
            return None;
        }

        match key {
            KeyCode::Escape => Some(InputAction::Exit),
            KeyCode::Space => Some(InputAction::ToggleEffect),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_exits() {
        let action = InputMapper::map_keyboard(KeyCode::Escape, ElementState::Pressed, false);
        assert_eq!(action, Some(InputAction::Exit));
    }

    #[test]
    fn test_special_keys() {
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::Space, ElementState::Pressed, false),
            Some(InputAction::ToggleEffect)
        );
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::KeyF, ElementState::Pressed, false),
            Some(InputAction::ToggleFullscreen)
        );
    }

    #[test]
    fn test_key_release_ignored() {
        let action = InputMapper::map_keyboard(KeyCode::Escape, ElementState::Released, false);
        assert_eq!(action, None);
    }

    #[test]
    fn test_repeat_ignored() {
        let action = InputMapper::map_keyboard(KeyCode::Space, ElementState::Pressed, true);
        assert_eq!(action, None);
    }

    #[test]
    fn test_other_keys_not_mapped() {
        for key in [KeyCode::KeyW, KeyCode::KeyA, KeyCode::Enter] {
            let action = InputMapper::map_keyboard(key, ElementState::Pressed, false);
            assert_eq!(action, None, "Key {:?} should not be mapped", key);
        }
    }
}
