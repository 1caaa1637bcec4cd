use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press means to the shell, before any state is consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Insert(char),
    Backspace,
    /// Enter: newline in the input box, or press on a focused button.
    Submit,
    FocusNext,
    FocusPrev,
    Stop,
    Reset,
    Quit,
    Ignore,
}

pub fn command_for_key(key: KeyEvent) -> Command {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Command::Quit,
            KeyCode::Char('s') => Command::Stop,
            KeyCode::Char('r') => Command::Reset,
            _ => Command::Ignore,
        };
    }

    match key.code {
        KeyCode::Esc => Command::Quit,
        KeyCode::Char(c) => Command::Insert(c),
        KeyCode::Backspace => Command::Backspace,
        KeyCode::Enter => Command::Submit,
        KeyCode::Tab => Command::FocusNext,
        KeyCode::BackTab => Command::FocusPrev,
        _ => Command::Ignore,
    }
}

/// The text-field edit a command performs, if any. Returns the full new
/// contents, the way a text area reports its value on change.
pub fn edit_input(current: &str, command: Command) -> Option<String> {
    match command {
        Command::Insert(c) => {
            let mut next = current.to_owned();
            next.push(c);
            Some(next)
        }
        Command::Submit => Some(format!("{current}\n")),
        Command::Backspace => {
            let mut next = current.to_owned();
            next.pop()?;
            Some(next)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_printable_keys_insert() {
        assert_eq!(command_for_key(key(KeyCode::Char('a'))), Command::Insert('a'));
        assert_eq!(
            command_for_key(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Command::Insert('A')
        );
        assert_eq!(command_for_key(key(KeyCode::Char(' '))), Command::Insert(' '));
    }

    #[test]
    fn test_control_chords() {
        assert_eq!(command_for_key(ctrl('c')), Command::Quit);
        assert_eq!(command_for_key(ctrl('s')), Command::Stop);
        assert_eq!(command_for_key(ctrl('r')), Command::Reset);
        assert_eq!(command_for_key(ctrl('x')), Command::Ignore);
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(command_for_key(key(KeyCode::Esc)), Command::Quit);
        assert_eq!(command_for_key(key(KeyCode::Tab)), Command::FocusNext);
        assert_eq!(command_for_key(key(KeyCode::BackTab)), Command::FocusPrev);
        assert_eq!(command_for_key(key(KeyCode::Enter)), Command::Submit);
        assert_eq!(command_for_key(key(KeyCode::Left)), Command::Ignore);
    }

    #[test]
    fn test_edit_input() {
        assert_eq!(edit_input("ab", Command::Insert('c')), Some("abc".into()));
        assert_eq!(edit_input("ab", Command::Backspace), Some("a".into()));
        assert_eq!(edit_input("ab", Command::Submit), Some("ab\n".into()));
        assert_eq!(edit_input("ab", Command::Stop), None);
    }

    #[test]
    fn test_backspace_on_empty_is_not_an_edit() {
        assert_eq!(edit_input("", Command::Backspace), None);
    }

    #[test]
    fn test_backspace_removes_whole_char() {
        assert_eq!(edit_input("café", Command::Backspace), Some("caf".into()));
    }
}
