//! Key-event predicates shared by global shortcuts, mode hotkey tables, and
//! the action registry.
//!
//! Keyboard input arrives as `crossterm` key events from the host surface.
//! These helpers keep the exact modifier+key comparisons in one place so the
//! routing tables read declaratively.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Exact match on a bare key with no modifiers.
#[must_use]
pub fn plain(key: &KeyEvent, code: KeyCode) -> bool {
    key.code == code && key.modifiers == KeyModifiers::NONE
}

/// Exact match on Ctrl + a character key.
#[must_use]
pub fn ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers == KeyModifiers::CONTROL
        && matches!(key.code, KeyCode::Char(k) if k.eq_ignore_ascii_case(&c))
}

/// Exact match on Ctrl + Shift + a character key.
///
/// Shifted characters may arrive upper-cased depending on the host, so the
/// comparison ignores case.
#[must_use]
pub fn ctrl_shift(key: &KeyEvent, c: char) -> bool {
    key.modifiers == KeyModifiers::CONTROL | KeyModifiers::SHIFT
        && matches!(key.code, KeyCode::Char(k) if k.eq_ignore_ascii_case(&c))
}

/// Exact match on Ctrl + a non-character key.
#[must_use]
pub fn ctrl_code(key: &KeyEvent, code: KeyCode) -> bool {
    key.code == code && key.modifiers == KeyModifiers::CONTROL
}

/// The printable character of a key event, if it carries one.
///
/// Ctrl/Alt chords are never printable; Shift is allowed (it produces the
/// shifted character).
#[must_use]
pub fn printable(key: &KeyEvent) -> Option<char> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
    {
        return None;
    }
    match key.code {
        KeyCode::Char(c) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn ctrl_matches_exactly() {
        assert!(ctrl(&key(KeyCode::Char('k'), KeyModifiers::CONTROL), 'k'));
        assert!(!ctrl(&key(KeyCode::Char('k'), KeyModifiers::NONE), 'k'));
        assert!(!ctrl(
            &key(KeyCode::Char('k'), KeyModifiers::CONTROL | KeyModifiers::SHIFT),
            'k'
        ));
    }

    #[test]
    fn ctrl_shift_ignores_character_case() {
        let upper = key(
            KeyCode::Char('O'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
        );
        assert!(ctrl_shift(&upper, 'o'));
    }

    #[test]
    fn printable_excludes_chords() {
        assert_eq!(printable(&key(KeyCode::Char('a'), KeyModifiers::NONE)), Some('a'));
        assert_eq!(printable(&key(KeyCode::Char('A'), KeyModifiers::SHIFT)), Some('A'));
        assert_eq!(printable(&key(KeyCode::Char('a'), KeyModifiers::CONTROL)), None);
        assert_eq!(printable(&key(KeyCode::Enter, KeyModifiers::NONE)), None);
    }
}
