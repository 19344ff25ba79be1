// Integration tests for userdeck

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use userdeck::fetch::{HttpUserSource, UserSource};
use userdeck::{FetchError, Session};

const USERS_JSON: &str = r#"[
  {"id": 1, "name": "Leanne Graham", "username": "Bret", "email": "Sincere@april.biz",
   "address": {"street": "Kulas Light", "city": "Gwenborough"}},
  {"id": 2, "name": "Ervin Howell", "username": "Antonette", "email": "Shanna@melissa.tv",
   "address": {"street": "Victor Plains", "city": "Wisokyburgh"}}
]"#;

/// Serve exactly one HTTP response on a local port and return the URL.
fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let resp = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = stream.write_all(resp.as_bytes());
        }
    });
    format!("http://{}/users", addr)
}

fn source(url: String) -> HttpUserSource {
    HttpUserSource::new(url, Duration::from_secs(5)).expect("client")
}

// 1) HTTP source against a local server
#[test]
fn http_source_parses_users() {
    let users = source(serve_once("200 OK", USERS_JSON)).fetch_users().expect("fetch");
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].id.as_str(), "1");
    assert_eq!(users[0].city, "Gwenborough");
    assert_eq!(users[1].email, "Shanna@melissa.tv");
}

#[test]
fn http_source_rejects_non_success_status() {
    let err = source(serve_once("500 Internal Server Error", "{}")).fetch_users().unwrap_err();
    assert!(matches!(err, FetchError::Status(500)), "got {err:?}");
}

#[test]
fn http_source_rejects_bad_body() {
    let err = source(serve_once("200 OK", r#"{"not": "a list"}"#)).fetch_users().unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)), "got {err:?}");
}

#[test]
fn http_source_reports_transport_failure() {
    let addr = {
        let l = TcpListener::bind("127.0.0.1:0").unwrap();
        l.local_addr().unwrap()
    };
    let err = source(format!("http://{}/users", addr)).fetch_users().unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)), "got {err:?}");
}

// 2) Session end to end over HTTP
#[test]
fn session_loads_once_over_http() {
    let mut session = Session::new(source(serve_once("200 OK", USERS_JSON)));
    assert!(!session.is_loading());
    session.ready();
    session.ready();
    assert!(session.is_loading());
    assert!(session.wait_loaded());
    assert_eq!(session.store().len(), 2);
    assert!(session.error().is_none());

    session.set_query("ervin");
    let names: Vec<&str> = session.visible().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["Ervin Howell"]);
}

#[test]
fn session_surfaces_http_error() {
    let mut session = Session::new(source(serve_once("404 Not Found", "[]")));
    session.ready();
    assert!(!session.wait_loaded());
    assert_eq!(session.error(), Some("server responded with status 404"));
    assert!(session.store().is_empty());
}

// 3) Theme and keymap config files
#[test]
fn theme_roundtrip_and_init() {
    use userdeck::app::Theme;

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("theme.conf");

    let mut t = Theme::fuchsia();
    t.error = ratatui::style::Color::Rgb(1, 2, 3);
    t.write_file(&path).expect("write theme");
    let t2 = Theme::from_file(&path).expect("read theme");
    assert_eq!(t, t2);

    let fresh = dir.path().join("fresh.conf");
    let created = Theme::load_or_init(&fresh);
    assert!(fresh.exists());
    assert_eq!(created, Theme::fuchsia());
}

#[test]
fn theme_ignores_bad_lines() {
    use userdeck::app::Theme;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("theme.conf");
    std::fs::write(&path, "# comment\ntitle = #102030\nborder = nothex\nunknown = #FFFFFF\nnoequals\n").unwrap();
    let t = Theme::from_file(&path).unwrap();
    assert_eq!(t.title, ratatui::style::Color::Rgb(0x10, 0x20, 0x30));
    assert_eq!(t.border, Theme::fuchsia().border);
}

#[test]
fn keymap_roundtrip_and_override() {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use userdeck::app::keymap::{KeyAction, Keymap};

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keybinds.conf");
    let km = Keymap::load_or_init(&path);
    assert!(path.exists());
    let reread = Keymap::from_file(&path).unwrap();
    for action in [KeyAction::Quit, KeyAction::NewUser, KeyAction::MoveBottom, KeyAction::DeleteSelection] {
        assert_eq!(km.keys_for(action), reread.keys_for(action));
    }

    std::fs::write(&path, "NewUser = a\nQuit = Ctrl+x\ngarbage line\n").unwrap();
    let custom = Keymap::from_file(&path).unwrap();
    assert_eq!(
        custom.resolve(&KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE)),
        Some(KeyAction::NewUser)
    );
    assert_eq!(
        custom.resolve(&KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL)),
        Some(KeyAction::Quit)
    );
    // defaults survive
    assert_eq!(
        custom.resolve(&KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE)),
        Some(KeyAction::NewUser)
    );
}

// 4) Rendering through a test backend
mod render {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use userdeck::User;
    use userdeck::app::keymap::Keymap;
    use userdeck::app::{AppState, Theme};

    struct Fixed(Result<Vec<User>, &'static str>);

    impl UserSource for Fixed {
        fn fetch_users(&self) -> Result<Vec<User>, FetchError> {
            self.0.clone().map_err(|e| FetchError::Transport(e.to_string()))
        }
    }

    fn screen_text(app: &mut AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| userdeck::ui::render(f, app)).unwrap();
        terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect()
    }

    fn app_with(result: Result<Vec<User>, &'static str>) -> AppState {
        let mut app = AppState::new(Session::new(Fixed(result)), Theme::dark(), Keymap::default());
        app.enter_users();
        app
    }

    fn ana() -> User {
        User { id: "1".into(), name: "Ana Silva".into(), email: "ana@x.com".into(), city: "Natal".into() }
    }

    #[test]
    fn shows_loading_then_rows() {
        let mut app = app_with(Ok(vec![ana()]));
        assert!(screen_text(&mut app).contains("Loading users..."));

        app.session.ready();
        app.session.wait_loaded();
        let text = screen_text(&mut app);
        assert!(text.contains("Ana Silva"));
        assert!(text.contains("ana@x.com"));
        assert!(text.contains("AS"));
    }

    #[test]
    fn shows_error_message() {
        let mut app = app_with(Err("offline"));
        app.session.ready();
        app.session.wait_loaded();
        assert!(screen_text(&mut app).contains("Error: request failed: offline"));
    }

    #[test]
    fn shows_empty_result() {
        let mut app = app_with(Ok(vec![ana()]));
        app.session.ready();
        app.session.wait_loaded();
        app.session.set_query("zz");
        assert!(screen_text(&mut app).contains("No users found."));
    }

    #[test]
    fn landing_renders_without_users() {
        let mut app = AppState::new(Session::new(Fixed(Ok(vec![]))), Theme::dark(), Keymap::default());
        let _ = screen_text(&mut app);
        assert!(app.session.store().is_empty());
        assert!(!app.session.is_loading());
    }
}
