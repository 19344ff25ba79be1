//! Landing screen: star field with a typewriter greeting.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::app::AppState;

pub fn render_landing(f: &mut Frame, area: Rect, app: &AppState) {
    let theme = app.theme;
    let buf = f.buffer_mut();
    for star in &app.landing.stars {
        let x = area.x + (star.x * area.width as f32) as u16;
        let y = area.y + (star.y * area.height as f32) as u16;
        if let Some(cell) = buf.cell_mut((x.min(area.right().saturating_sub(1)), y.min(area.bottom().saturating_sub(1)))) {
            let (symbol, color) = if star.bright { ("*", theme.text) } else { ("·", theme.muted) };
            cell.set_symbol(symbol).set_style(Style::default().fg(color));
        }
    }

    let (title, subtitle, done) = app.landing.current();
    let mut lines = vec![
        Line::styled(title, Style::default().fg(theme.title).add_modifier(Modifier::BOLD)),
        Line::raw(""),
        Line::styled(subtitle, Style::default().fg(theme.text)),
        Line::raw(""),
    ];
    if done {
        lines.push(Line::styled(
            "[ Enter: open users ]   q: quit",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ));
    }

    let height = lines.len() as u16;
    let rect = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(height) / 2,
        width: area.width,
        height: height.min(area.height),
    };
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), rect);
}
