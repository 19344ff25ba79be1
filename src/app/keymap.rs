//! Keybinding configuration: parse `keybinds.conf`, provide defaults, and map keys to actions.
//!
//! Only the users list in normal mode goes through the keymap; text entry in
//! the search prompt and the form reads keys directly.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;
use std::path::Path;

/// Semantic keyboard actions that can be bound to key combinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Show the help modal.
    OpenHelp,
    /// Focus the search prompt.
    StartSearch,
    /// Drop the current search query.
    ClearSearch,
    /// Open a blank form for a new user.
    NewUser,
    /// Open the form pre-filled with the selected user.
    EditSelection,
    /// Ask to delete the selected user.
    DeleteSelection,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    MoveTop,
    MoveBottom,
    /// Bound but does nothing.
    Ignore,
}

const ACTION_NAMES: [(KeyAction, &str); 14] = [
    (KeyAction::Quit, "Quit"),
    (KeyAction::OpenHelp, "OpenHelp"),
    (KeyAction::StartSearch, "StartSearch"),
    (KeyAction::ClearSearch, "ClearSearch"),
    (KeyAction::NewUser, "NewUser"),
    (KeyAction::EditSelection, "EditSelection"),
    (KeyAction::DeleteSelection, "DeleteSelection"),
    (KeyAction::MoveUp, "MoveUp"),
    (KeyAction::MoveDown, "MoveDown"),
    (KeyAction::PageUp, "PageUp"),
    (KeyAction::PageDown, "PageDown"),
    (KeyAction::MoveTop, "MoveTop"),
    (KeyAction::MoveBottom, "MoveBottom"),
    (KeyAction::Ignore, "Ignore"),
];

/// Mapping from `(KeyModifiers, KeyCode)` to [`KeyAction`].
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    /// Arrow keys plus vim-style j/k, and single letters for the CRUD actions.
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = HashMap::new();
        bindings.insert((M::NONE, Char('q')), KeyAction::Quit);
        bindings.insert((M::CONTROL, Char('c')), KeyAction::Quit);
        bindings.insert((M::NONE, Char('?')), KeyAction::OpenHelp);
        bindings.insert((M::NONE, Char('/')), KeyAction::StartSearch);
        bindings.insert((M::NONE, Esc), KeyAction::ClearSearch);
        bindings.insert((M::NONE, Char('n')), KeyAction::NewUser);
        bindings.insert((M::NONE, Char('e')), KeyAction::EditSelection);
        bindings.insert((M::NONE, Enter), KeyAction::EditSelection);
        bindings.insert((M::NONE, Char('d')), KeyAction::DeleteSelection);
        bindings.insert((M::NONE, Delete), KeyAction::DeleteSelection);

        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        bindings.insert((M::NONE, Char('k')), KeyAction::MoveUp);
        bindings.insert((M::NONE, Char('j')), KeyAction::MoveDown);
        bindings.insert((M::NONE, PageUp), KeyAction::PageUp);
        bindings.insert((M::NONE, PageDown), KeyAction::PageDown);
        bindings.insert((M::NONE, Home), KeyAction::MoveTop);
        bindings.insert((M::NONE, End), KeyAction::MoveBottom);
        bindings.insert((M::NONE, Char('g')), KeyAction::MoveTop);
        bindings.insert((M::NONE, Char('G')), KeyAction::MoveBottom);

        Self { bindings }
    }

    /// Load from `path`, or write the defaults there and return them.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        let km = Self::default();
        if let Err(e) = km.write_file(path) {
            tracing::warn!(path = %path.display(), error = %e, "could not write default keybindings");
        }
        km
    }

    /// Read `Action = KeySpec` lines on top of the defaults.
    ///
    /// Returns `None` only when the file cannot be read; unparseable lines are skipped.
    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut map = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((lhs, rhs)) = line.split_once('=') else {
                continue;
            };
            match (parse_action(lhs), parse_key(rhs)) {
                (Some(action), Some(key)) => {
                    map.bindings.insert(key, action);
                }
                _ => tracing::debug!(line, "skipping unparseable keybinding"),
            }
        }
        Some(map)
    }

    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# userdeck keybindings\n");
        buf.push_str("# Format: <Action> = <KeySpec>\n");
        buf.push_str("# KeySpec examples: q, Ctrl+c, Enter, Esc, Up, Down, PageUp, PageDown, Home, End, Delete, /\n");
        let names: Vec<&str> = ACTION_NAMES.iter().map(|(_, n)| *n).collect();
        let _ = writeln!(&mut buf, "# Actions: {}\n", names.join(", "));

        let mut lines: Vec<String> = self
            .bindings
            .iter()
            .map(|((mods, code), action)| format!("{} = {}", format_action(*action), Self::format_key(*mods, *code)))
            .collect();
        lines.sort();
        for l in lines {
            let _ = writeln!(&mut buf, "{}", l);
        }
        std::fs::write(path, buf)
    }

    /// Resolve a key event. Shifted characters also match their unmodified binding
    /// since terminals disagree on whether to report SHIFT for `G` or `?`.
    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        if let Some(a) = self.bindings.get(&(key.modifiers, key.code)) {
            return Some(*a);
        }
        if matches!(key.code, KeyCode::Char(_)) && key.modifiers == KeyModifiers::SHIFT {
            return self.bindings.get(&(KeyModifiers::NONE, key.code)).copied();
        }
        None
    }

    /// Keys bound to `action`, formatted and sorted.
    pub fn keys_for(&self, action: KeyAction) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|((m, c), _)| Self::format_key(*m, *c))
            .collect();
        keys.sort();
        keys
    }

    /// Human-readable spec like "Ctrl+c" or "PageDown".
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Enter => "Enter".to_string(),
            Delete => "Delete".to_string(),
            Esc => "Esc".to_string(),
            Tab => "Tab".to_string(),
            BackTab => "BackTab".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            Left => "Left".to_string(),
            Right => "Right".to_string(),
            PageUp => "PageUp".to_string(),
            PageDown => "PageDown".to_string(),
            Home => "Home".to_string(),
            End => "End".to_string(),
            Char(c) => c.to_string(),
            _ => format!("{:?}", code),
        };
        if mods.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", base)
        } else {
            base
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    use KeyCode::*;
    let s = spec.trim();
    let (mods, rest) = match s.strip_prefix("Ctrl+") {
        Some(after) => (KeyModifiers::CONTROL, after),
        None => (KeyModifiers::NONE, s),
    };
    let code = match rest {
        "Enter" => Enter,
        "Delete" => Delete,
        "Esc" | "Escape" => Esc,
        "Tab" => Tab,
        "BackTab" => BackTab,
        "Up" => Up,
        "Down" => Down,
        "Left" => Left,
        "Right" => Right,
        "PageUp" => PageUp,
        "PageDown" => PageDown,
        "Home" => Home,
        "End" => End,
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Char(c),
                _ => return None,
            }
        }
    };
    Some((mods, code))
}

fn parse_action(s: &str) -> Option<KeyAction> {
    let s = s.trim();
    ACTION_NAMES.iter().find(|(_, n)| *n == s).map(|(a, _)| *a)
}

pub fn format_action(a: KeyAction) -> &'static str {
    ACTION_NAMES
        .iter()
        .find(|(x, _)| *x == a)
        .map(|(_, n)| *n)
        .unwrap_or("Ignore")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new_with_kind(code, modifiers, KeyEventKind::Press)
    }

    #[test]
    fn defaults_resolve() {
        let km = Keymap::default();
        assert_eq!(km.resolve(&key(KeyCode::Char('n'), KeyModifiers::NONE)), Some(KeyAction::NewUser));
        assert_eq!(km.resolve(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)), Some(KeyAction::Quit));
        assert_eq!(km.resolve(&key(KeyCode::Char('G'), KeyModifiers::SHIFT)), Some(KeyAction::MoveBottom));
        assert_eq!(km.resolve(&key(KeyCode::F(5), KeyModifiers::NONE)), None);
    }

    #[test]
    fn parse_specs() {
        assert_eq!(parse_key("Ctrl+x"), Some((KeyModifiers::CONTROL, KeyCode::Char('x'))));
        assert_eq!(parse_key(" PageDown "), Some((KeyModifiers::NONE, KeyCode::PageDown)));
        assert_eq!(parse_key("nope"), None);
        assert_eq!(parse_action("DeleteSelection"), Some(KeyAction::DeleteSelection));
        assert_eq!(parse_action("Frobnicate"), None);
        for (a, n) in ACTION_NAMES {
            assert_eq!(format_action(a), n);
        }
    }
}
