//! Shared UI components (status bar, modal helpers).
//!
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::keymap::KeyAction;
use crate::app::{AppState, InputMode, ModalState};
use crate::fetch::LoadState;

/// Render the bottom status bar with mode, counts and load state.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Search => "SEARCH",
        InputMode::Form => "FORM",
        InputMode::Modal => "MODAL",
    };
    let load = match app.session.load_state() {
        LoadState::NotStarted => "idle",
        LoadState::InFlight => "loading",
        LoadState::Loaded => "loaded",
        LoadState::Failed(_) => "failed",
    };
    let msg = format!(
        "mode: {mode}  showing:{}/{}  data:{load}  (in-memory only)",
        app.visible_len(),
        app.session.store().len(),
    );
    let p = Paragraph::new(msg).style(Style::default().fg(app.theme.status_fg).bg(app.theme.status_bg));
    f.render_widget(p, area);
}

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render a generic informational modal dialog.
pub fn render_info_modal(f: &mut Frame, area: Rect, app: &AppState, state: &ModalState) {
    if let ModalState::Info { message } = state {
        // wrap long text inside a box at most the screen size
        let max_w = area.width.saturating_sub(6).max(30);
        let min_w = 40u16.min(max_w);
        let approx_lines = (message.len() as u16 / (min_w.saturating_sub(4).max(10))).max(1);
        let max_h = area.height.saturating_sub(6).max(5);
        let height = (approx_lines + 4).min(max_h).max(5);
        let rect = centered_rect(min_w, height, area);
        let p = Paragraph::new(message.clone()).wrap(Wrap { trim: false }).block(
            Block::default()
                .title("Info")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
        f.render_widget(Clear, rect);
        f.render_widget(p, rect);
    }
}

/// Help modal listing the current keybindings.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState, scroll: u16) {
    let width = 70u16.min(area.width.saturating_sub(4)).max(40);
    let height = 22u16.min(area.height.saturating_sub(4)).max(10);
    let rect = centered_rect(width, height, area);

    let rows = [
        ("Search", KeyAction::StartSearch),
        ("Clear search", KeyAction::ClearSearch),
        ("New user", KeyAction::NewUser),
        ("Edit user", KeyAction::EditSelection),
        ("Delete user", KeyAction::DeleteSelection),
        ("Move up", KeyAction::MoveUp),
        ("Move down", KeyAction::MoveDown),
        ("Page up", KeyAction::PageUp),
        ("Page down", KeyAction::PageDown),
        ("First row", KeyAction::MoveTop),
        ("Last row", KeyAction::MoveBottom),
        ("Help", KeyAction::OpenHelp),
        ("Quit", KeyAction::Quit),
    ];
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![Line::styled("Users list:", bold)];
    for (label, action) in rows {
        lines.push(Line::from(vec![
            Span::raw(format!("  {:>14} │ ", label)),
            Span::styled(app.keymap.keys_for(action).join(", "), Style::default().add_modifier(Modifier::ITALIC)),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled("Form:", bold));
    lines.push(Line::raw("  Tab/Up/Down switch field, Enter next or save, Ctrl+S save, Esc cancel"));
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "Edits live in memory only and are lost on exit.",
        Style::default().fg(app.theme.muted),
    ));

    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .title("Help (Esc to close)")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
