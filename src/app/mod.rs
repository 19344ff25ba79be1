//! Application state types and entry glue.
//!
//! Defines enums and structs that model the TUI state, as well as helpers
//! to construct defaults and to run the application loop (re-exported as `run`).
//!
pub mod form;
pub mod keymap;
pub mod landing;
pub mod update;

use ratatui::style::Color;
use std::path::Path;
use std::time::Instant;

use crate::model::{User, UserId};
use crate::session::Session;
use form::FormState;
use keymap::Keymap;
use landing::Landing;

/// Which screen is showing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Landing,
    Users,
}

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Form,
    Modal,
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub accent: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub error: Color,
}

impl Theme {
    /// Plain terminal colors.
    pub fn dark() -> Self {
        Self {
            text: Color::Gray,
            muted: Color::DarkGray,
            title: Color::Magenta,
            accent: Color::LightMagenta,
            border: Color::Gray,
            header_bg: Color::Black,
            header_fg: Color::LightMagenta,
            status_bg: Color::DarkGray,
            status_fg: Color::Black,
            highlight_fg: Color::Yellow,
            highlight_bg: Color::Reset,
            error: Color::LightRed,
        }
    }

    /// Fuchsia on near-black, the default look.
    pub fn fuchsia() -> Self {
        Self {
            text: Color::Rgb(0xf5, 0xf3, 0xff),
            muted: Color::Rgb(0x9c, 0xa3, 0xaf),
            title: Color::Rgb(0xe8, 0x79, 0xf9),
            accent: Color::Rgb(0xc0, 0x26, 0xd3),
            border: Color::Rgb(0xa2, 0x1c, 0xaf),
            header_bg: Color::Rgb(0x1e, 0x1b, 0x4b),
            header_fg: Color::Rgb(0xf5, 0xd0, 0xfe),
            status_bg: Color::Rgb(0x3b, 0x07, 0x64),
            status_fg: Color::Rgb(0xf5, 0xf3, 0xff),
            highlight_fg: Color::Rgb(0xfd, 0xe6, 0x8a),
            highlight_bg: Color::Rgb(0x4a, 0x04, 0x4e),
            error: Color::Rgb(0xf8, 0x71, 0x71),
        }
    }

    fn entries(&self) -> [(&'static str, Color); 12] {
        [
            ("text", self.text),
            ("muted", self.muted),
            ("title", self.title),
            ("accent", self.accent),
            ("border", self.border),
            ("header_bg", self.header_bg),
            ("header_fg", self.header_fg),
            ("status_bg", self.status_bg),
            ("status_fg", self.status_fg),
            ("highlight_fg", self.highlight_fg),
            ("highlight_bg", self.highlight_bg),
            ("error", self.error),
        ]
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut Color> {
        Some(match key {
            "text" => &mut self.text,
            "muted" => &mut self.muted,
            "title" => &mut self.title,
            "accent" => &mut self.accent,
            "border" => &mut self.border,
            "header_bg" => &mut self.header_bg,
            "header_fg" => &mut self.header_fg,
            "status_bg" => &mut self.status_bg,
            "status_fg" => &mut self.status_fg,
            "highlight_fg" => &mut self.highlight_fg,
            "highlight_bg" => &mut self.highlight_bg,
            "error" => &mut self.error,
            _ => return None,
        })
    }

    /// Load theme from a simple key=value file. Unknown or missing keys fall back to `fuchsia`.
    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut theme = Self::fuchsia();

        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else {
                continue;
            };
            if let (Some(slot), Some(color)) = (theme.slot_mut(key.trim()), Self::parse_color(val)) {
                *slot = color;
            }
        }

        Some(theme)
    }

    /// Parse a color from hex ("#RRGGBB" or "RRGGBB") or "reset".
    fn parse_color(s: &str) -> Option<Color> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "reset" {
            return Some(Color::Reset);
        }
        let hex = lower.strip_prefix('#').unwrap_or(&lower);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    fn color_to_str(c: Color) -> String {
        match c {
            Color::Rgb(r, g, b) => format!("#{:02X}{:02X}{:02X}", r, g, b),
            Color::Reset => "reset".to_string(),
            // named colors get a rough hex equivalent
            Color::Black => "#000000".to_string(),
            Color::Red => "#FF0000".to_string(),
            Color::Green => "#00FF00".to_string(),
            Color::Yellow => "#FFFF00".to_string(),
            Color::Blue => "#0000FF".to_string(),
            Color::Magenta => "#FF00FF".to_string(),
            Color::Cyan => "#00FFFF".to_string(),
            Color::Gray => "#B3B3B3".to_string(),
            Color::DarkGray => "#4D4D4D".to_string(),
            Color::LightRed => "#FF6666".to_string(),
            Color::LightGreen => "#66FF66".to_string(),
            Color::LightYellow => "#FFFF66".to_string(),
            Color::LightBlue => "#6666FF".to_string(),
            Color::LightMagenta => "#FF66FF".to_string(),
            Color::LightCyan => "#66FFFF".to_string(),
            Color::White => "#FFFFFF".to_string(),
            Color::Indexed(i) => format!("index:{}", i),
        }
    }

    /// Persist the theme to a config file in key=value format.
    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# userdeck theme configuration\n");
        buf.push_str("# Colors: hex as #RRGGBB or RRGGBB, or 'reset'\n\n");
        for (key, color) in self.entries() {
            let _ = writeln!(&mut buf, "{} = {}", key, Self::color_to_str(color));
        }
        std::fs::write(path, buf)
    }

    /// Load from `path`, or write the default theme there and return it.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_else(Self::fuchsia);
        }
        let t = Self::fuchsia();
        if let Err(e) = t.write_file(path) {
            tracing::warn!(path = %path.display(), error = %e, "could not write default theme");
        }
        t
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::fuchsia()
    }
}

/// Modal dialogs drawn over the users screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalState {
    DeleteConfirm {
        id: UserId,
        name: String,
        /// 0 = Yes, 1 = No
        selected: usize,
    },
    Info {
        message: String,
    },
    Help {
        scroll: u16,
    },
}

pub struct AppState {
    pub started_at: Instant,
    pub session: Session,
    pub screen: Screen,
    pub landing: Landing,
    pub selected_index: usize,
    pub rows_per_page: usize,
    pub input_mode: InputMode,
    pub search_query: String,
    pub theme: Theme,
    pub keymap: Keymap,
    pub modal: Option<ModalState>,
    pub form: Option<FormState>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(session: Session, theme: Theme, keymap: Keymap) -> Self {
        Self {
            started_at: Instant::now(),
            session,
            screen: Screen::Landing,
            landing: Landing::new(),
            selected_index: 0,
            rows_per_page: 10,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            theme,
            keymap,
            modal: None,
            form: None,
            should_quit: false,
        }
    }

    /// Number of rows in the current filtered view.
    pub fn visible_len(&self) -> usize {
        self.session.visible().count()
    }

    pub fn selected_user(&self) -> Option<&User> {
        self.session.visible().nth(self.selected_index)
    }

    /// Keep the selection inside the filtered view.
    pub fn clamp_selection(&mut self) {
        let len = self.visible_len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    /// Move the selection onto `id` if it is visible.
    pub fn select_id(&mut self, id: &UserId) {
        if let Some(idx) = self.session.visible().position(|u| &u.id == id) {
            self.selected_index = idx;
        } else {
            self.clamp_selection();
        }
    }

    pub fn open_modal(&mut self, modal: ModalState) {
        self.modal = Some(modal);
        self.input_mode = InputMode::Modal;
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
        self.input_mode = InputMode::Normal;
    }

    /// Switch to the users screen.
    pub fn enter_users(&mut self) {
        self.screen = Screen::Users;
        self.input_mode = InputMode::Normal;
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
