//! userdeck binary entry point.
//!
//! Parses the command line, sets up logging, initializes the terminal in raw
//! mode, runs the TUI event loop, and restores the terminal state on exit.
//!
use anyhow::Context as _;
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use userdeck::app::keymap::Keymap;
use userdeck::app::{self, AppState, Theme};
use userdeck::config::Cli;
use userdeck::fetch::HttpUserSource;
use userdeck::session::Session;

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> userdeck::Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = userdeck::logging::init(&cli.log_file) {
        eprintln!("logging disabled: {e}");
    }
    info!(endpoint = %cli.endpoint, "starting userdeck v{}", env!("CARGO_PKG_VERSION"));

    let source = HttpUserSource::new(cli.endpoint.clone(), cli.timeout()).context("build HTTP client")?;
    let theme = Theme::load_or_init(&cli.theme);
    let keymap = Keymap::load_or_init(&cli.keybinds);
    let mut state = AppState::new(Session::new(source), theme, keymap);
    if cli.skip_landing {
        state.enter_users();
    }

    let mut terminal = init_terminal().map_err(|e| anyhow::anyhow!("init terminal: {e}"))?;

    let res = app::run(&mut terminal, &mut state, cli.tick());

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        eprintln!("application error: {err}");
        return Err(err);
    }
    Ok(())
}
