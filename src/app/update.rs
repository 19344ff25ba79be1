use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::Backend;
use std::time::Duration;
use tracing::info;

use crate::app::form::FormState;
use crate::app::keymap::KeyAction;
use crate::app::{AppState, InputMode, ModalState, Screen};
use crate::model::UserId;
use crate::search::{apply_search, clear_search};
use crate::ui;

/// Draw, poll for input, repeat until the user quits.
pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut AppState, tick: Duration) -> Result<()> {
    loop {
        if app.session.poll() {
            app.clamp_selection();
        }

        terminal.draw(|f| ui::render(f, app))?;

        // users screen has been drawn at least once: safe to start loading
        if app.screen == Screen::Users {
            app.session.ready();
        }

        if event::poll(tick)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }
    info!(uptime_secs = app.started_at.elapsed().as_secs(), "exiting");
    Ok(())
}

/// Route one key press according to the current screen and input mode.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }
    match app.screen {
        Screen::Landing => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => app.enter_users(),
            KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
            _ => {}
        },
        Screen::Users => match app.input_mode {
            InputMode::Normal => handle_normal_key(app, key),
            InputMode::Search => handle_search_key(app, key),
            InputMode::Form => handle_form_key(app, key),
            InputMode::Modal => handle_modal_key(app, key.code),
        },
    }
}

fn handle_normal_key(app: &mut AppState, key: KeyEvent) {
    let Some(action) = app.keymap.resolve(&key) else {
        return;
    };
    let len = app.visible_len();
    let rpp = app.rows_per_page.max(1);
    match action {
        KeyAction::Quit => app.should_quit = true,
        KeyAction::OpenHelp => app.open_modal(ModalState::Help { scroll: 0 }),
        KeyAction::StartSearch => {
            app.search_query = app.session.query().to_string();
            app.input_mode = InputMode::Search;
        }
        KeyAction::ClearSearch => clear_search(app),
        KeyAction::NewUser => {
            app.form = Some(FormState::blank());
            app.input_mode = InputMode::Form;
        }
        KeyAction::EditSelection => match app.selected_user().map(FormState::editing) {
            Some(form) => {
                app.form = Some(form);
                app.input_mode = InputMode::Form;
            }
            None => app.open_modal(ModalState::Info { message: "No user selected.".to_string() }),
        },
        KeyAction::DeleteSelection => {
            let target = app.selected_user().map(|u| (u.id.clone(), u.name.clone()));
            match target {
                Some((id, name)) => app.open_modal(ModalState::DeleteConfirm { id, name, selected: 1 }),
                None => app.open_modal(ModalState::Info { message: "No user selected.".to_string() }),
            }
        }
        KeyAction::MoveUp => app.selected_index = app.selected_index.saturating_sub(1),
        KeyAction::MoveDown => {
            if app.selected_index + 1 < len {
                app.selected_index += 1;
            }
        }
        KeyAction::PageUp => app.selected_index = app.selected_index.saturating_sub(rpp),
        KeyAction::PageDown => {
            app.selected_index = app.selected_index.saturating_add(rpp).min(len.saturating_sub(1));
        }
        KeyAction::MoveTop => app.selected_index = 0,
        KeyAction::MoveBottom => app.selected_index = len.saturating_sub(1),
        KeyAction::Ignore => {}
    }
}

fn handle_search_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.input_mode = InputMode::Normal,
        KeyCode::Esc => {
            clear_search(app);
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            app.search_query.pop();
            apply_search(app);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.search_query.push(c);
            apply_search(app);
        }
        _ => {}
    }
}

fn handle_form_key(app: &mut AppState, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let mut submit = false;
    let mut cancel = false;
    match app.form.as_mut() {
        Some(form) => match key.code {
            KeyCode::Esc => cancel = true,
            KeyCode::Tab | KeyCode::Down => form.focus = form.focus.next(),
            KeyCode::BackTab | KeyCode::Up => form.focus = form.focus.prev(),
            KeyCode::Backspace => form.pop_char(),
            KeyCode::Enter if form.focus.is_last() => submit = true,
            KeyCode::Enter => form.focus = form.focus.next(),
            KeyCode::Char('s') if ctrl => submit = true,
            KeyCode::Char(c) if !ctrl => form.push_char(c),
            _ => {}
        },
        None => cancel = true,
    }
    if cancel {
        app.form = None;
        app.input_mode = InputMode::Normal;
    } else if submit {
        submit_form(app);
    }
}

/// Validate the open form and hand it to the session. On rejection the form
/// stays open with the typed values and per-field messages.
pub fn submit_form(app: &mut AppState) {
    let Some(form) = app.form.as_mut() else {
        return;
    };
    match app.session.submit(&form.values, form.target.as_ref()) {
        Ok(id) => {
            info!(%id, edited = form.target.is_some(), "user saved");
            app.form = None;
            app.input_mode = InputMode::Normal;
            app.select_id(&id);
        }
        Err(errors) => {
            form.errors = errors;
        }
    }
}

fn handle_modal_key(app: &mut AppState, code: KeyCode) {
    match app.modal.clone() {
        Some(ModalState::DeleteConfirm { id, name, selected }) => match code {
            KeyCode::Esc | KeyCode::Char('n') => app.close_modal(),
            KeyCode::Char('y') => confirm_delete(app, &id),
            KeyCode::Enter => {
                if selected == 0 {
                    confirm_delete(app, &id);
                } else {
                    app.close_modal();
                }
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char('h') | KeyCode::Char('l') => {
                app.modal = Some(ModalState::DeleteConfirm { id, name, selected: 1 - selected.min(1) });
            }
            _ => {}
        },
        Some(ModalState::Info { .. }) => {
            if matches!(code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                app.close_modal();
            }
        }
        Some(ModalState::Help { scroll }) => match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?') => app.close_modal(),
            KeyCode::Down | KeyCode::Char('j') => app.modal = Some(ModalState::Help { scroll: scroll.saturating_add(1) }),
            KeyCode::Up | KeyCode::Char('k') => app.modal = Some(ModalState::Help { scroll: scroll.saturating_sub(1) }),
            _ => {}
        },
        None => app.input_mode = InputMode::Normal,
    }
}

fn confirm_delete(app: &mut AppState, id: &UserId) {
    if app.session.delete(id) {
        info!(%id, "user deleted");
    }
    app.close_modal();
    app.clamp_selection();
}
