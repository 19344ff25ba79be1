pub mod components;
pub mod landing;
pub mod users;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, InputMode, ModalState, Screen};

pub fn render(f: &mut Frame, app: &mut AppState) {
    let area = f.area();
    match app.screen {
        Screen::Landing => landing::render_landing(f, area, app),
        Screen::Users => render_users_screen(f, app),
    }
}

fn render_users_screen(f: &mut Frame, app: &mut AppState) {
    let area = f.area();
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)])
        .split(area);
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(root[1]);

    let prompt = match app.input_mode {
        InputMode::Search => format!("Search by name: {}_", app.search_query),
        _ if !app.session.query().is_empty() => format!("Search by name: {}", app.session.query()),
        _ => "/: search  n: new  e: edit  d: delete  ?: help  q: quit".to_string(),
    };
    let header = Paragraph::new(prompt)
        .block(
            Block::default()
                .title("Users")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(header, root[0]);

    users::render_users_table(f, body[0], app);
    users::render_user_details(f, body[1], app);
    components::render_status_bar(f, root[2], app);

    if let Some(form) = app.form.clone() {
        users::render_user_form(f, area, app, &form);
    }
    if let Some(state) = app.modal.clone() {
        match state {
            ModalState::DeleteConfirm { .. } => users::render_delete_confirm(f, area, app, &state),
            ModalState::Info { .. } => components::render_info_modal(f, area, app, &state),
            ModalState::Help { scroll } => components::render_help_modal(f, area, app, scroll),
        }
    }
}
