use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};

use crate::app::form::{FormField, FormState};
use crate::app::{AppState, ModalState};
use crate::fetch::LoadState;

fn bordered(title: &str, app: &AppState) -> Block<'static> {
    Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border))
}

/// Loading, error, empty and populated states of the users list.
pub fn render_users_table(f: &mut Frame, area: Rect, app: &mut AppState) {
    let body_height = area.height.saturating_sub(3) as usize;
    if body_height > 0 {
        app.rows_per_page = body_height;
    }

    let placeholder = match app.session.load_state() {
        LoadState::NotStarted | LoadState::InFlight => Some(("Loading users...".to_string(), app.theme.muted)),
        LoadState::Failed(reason) => Some((format!("Error: {}", reason), app.theme.error)),
        LoadState::Loaded if app.visible_len() == 0 => Some(("No users found.".to_string(), app.theme.muted)),
        LoadState::Loaded => None,
    };
    if let Some((msg, color)) = placeholder {
        let p = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: true })
            .block(bordered("Users", app));
        f.render_widget(p, area);
        return;
    }

    let rows: Vec<Row> = app
        .session
        .visible()
        .map(|u| {
            Row::new(vec![
                Cell::from(u.initials()).style(Style::default().fg(app.theme.accent).add_modifier(Modifier::BOLD)),
                Cell::from(u.name.clone()),
                Cell::from(u.email.clone()),
                Cell::from(u.city.clone()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Percentage(30),
        Constraint::Percentage(45),
        Constraint::Percentage(25),
    ];
    let header = Row::new(vec!["", "NAME", "EMAIL", "CITY"])
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD));

    let table = Table::new(rows, widths)
        .header(header)
        .block(bordered("Users", app))
        .style(Style::default().fg(app.theme.text))
        .row_highlight_style(
            Style::default()
                .fg(app.theme.highlight_fg)
                .bg(app.theme.highlight_bg)
                .add_modifier(Modifier::BOLD),
        )
        .column_spacing(1);

    let mut state = TableState::default();
    state.select(Some(app.selected_index));
    f.render_stateful_widget(table, area, &mut state);
}

pub fn render_user_details(f: &mut Frame, area: Rect, app: &AppState) {
    let label = Style::default().fg(app.theme.muted);
    let lines = match app.selected_user() {
        Some(u) => vec![
            Line::from(Span::styled(u.name.clone(), Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))),
            Line::raw(""),
            Line::from(vec![Span::styled("Email: ", label), Span::raw(u.email.clone())]),
            Line::from(vec![Span::styled("City:  ", label), Span::raw(u.city.clone())]),
            Line::from(vec![Span::styled("ID:    ", label), Span::raw(u.id.to_string())]),
        ],
        None => vec![Line::styled("Nothing selected", label)],
    };
    let p = Paragraph::new(lines)
        .style(Style::default().fg(app.theme.text))
        .wrap(Wrap { trim: false })
        .block(bordered("Details", app));
    f.render_widget(p, area);
}

pub fn render_user_form(f: &mut Frame, area: Rect, app: &AppState, form: &FormState) {
    let width = area.width.saturating_sub(10).clamp(40, 64);
    let rect = crate::ui::components::centered_rect(width, 14, area);

    let mut lines: Vec<Line> = Vec::new();
    for field in FormField::ALL {
        let focused = form.focus == field;
        let marker = if focused { "▶ " } else { "  " };
        let label_style = if focused {
            Style::default().fg(app.theme.highlight_fg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{}{:<8}", marker, field.label()), label_style),
            Span::raw(form.value(field).to_string()),
            Span::styled(if focused { "_" } else { "" }, label_style),
        ]));
        match form.error(field) {
            Some(msg) => lines.push(Line::styled(format!("    {}", msg), Style::default().fg(app.theme.error))),
            None => lines.push(Line::raw("")),
        }
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "Tab/Up/Down: field  Enter: next/save  Ctrl+S: save  Esc: cancel",
        Style::default().fg(app.theme.muted),
    ));

    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(bordered(form.title(), app));
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

pub fn render_delete_confirm(f: &mut Frame, area: Rect, app: &AppState, state: &ModalState) {
    if let ModalState::DeleteConfirm { name, selected, .. } = state {
        let rect = crate::ui::components::centered_rect(50, 7, area);
        let yes = if *selected == 0 { "[Yes]" } else { " Yes " };
        let no = if *selected == 1 { "[No]" } else { " No " };
        let body = format!("Delete user '{}'?\n\n  {}    {}", name, yes, no);
        let p = Paragraph::new(body)
            .wrap(Wrap { trim: false })
            .block(bordered("Confirm delete", app));
        f.render_widget(Clear, rect);
        f.render_widget(p, rect);
    }
}
