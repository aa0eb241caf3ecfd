use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::input::InputAction;

#[rustfmt::skip]
/// Translates a key press into a selector action.
pub fn key_to_action(key_event: KeyEvent) -> Option<InputAction> {
    match key_event.code {
        KeyCode::Esc => Some(InputAction::Quit),
        KeyCode::Char('c') | KeyCode::Char('C') if key_event.modifiers == KeyModifiers::CONTROL => {
            Some(InputAction::Quit)
        }
        KeyCode::Enter => Some(InputAction::Confirm),
        KeyCode::Down => Some(InputAction::Down),
        KeyCode::Up => Some(InputAction::Up),
        KeyCode::Left => Some(InputAction::Left),
        KeyCode::Right => Some(InputAction::Right),
        KeyCode::PageDown => Some(InputAction::PageDown),
        KeyCode::PageUp => Some(InputAction::PageUp),
        KeyCode::Home => Some(InputAction::Home),
        KeyCode::End => Some(InputAction::End),
        KeyCode::Tab => Some(InputAction::CategorySelection),
        KeyCode::Backspace => Some(InputAction::Erase),
        KeyCode::Char(' ') => Some(InputAction::ToggleEntry),
        KeyCode::Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputAction::Invlet(c))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn keys_map_to_actions() {
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);

        assert_eq!(key_to_action(key(KeyCode::Esc)), Some(InputAction::Quit));
        assert_eq!(key_to_action(key(KeyCode::Tab)), Some(InputAction::CategorySelection));
        assert_eq!(key_to_action(key(KeyCode::Char(' '))), Some(InputAction::ToggleEntry));
        assert_eq!(key_to_action(key(KeyCode::Char('7'))), Some(InputAction::Invlet('7')));
        assert_eq!(key_to_action(key(KeyCode::F(1))), None);
        assert_eq!(
            key_to_action(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(InputAction::Quit)
        );
        assert_eq!(
            key_to_action(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            None
        );
    }
}
