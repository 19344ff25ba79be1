//! Command-line configuration.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::fetch::DEFAULT_ENDPOINT;

/// Browse, search and edit a cached list of users from a mock REST endpoint.
///
/// Changes live only in memory and are gone when the program exits.
#[derive(Parser, Debug, Clone)]
#[command(name = "userdeck", version, about)]
pub struct Cli {
    /// URL returning a JSON array of users
    #[arg(long, env = "USERDECK_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// HTTP timeout for the initial fetch, in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Theme file (created with defaults when missing)
    #[arg(long, default_value = "theme.conf")]
    pub theme: PathBuf,

    /// Keybindings file (created with defaults when missing)
    #[arg(long, default_value = "keybinds.conf")]
    pub keybinds: PathBuf,

    /// Where log lines are written; the terminal itself is busy drawing
    #[arg(long, env = "USERDECK_LOG_FILE", default_value = "userdeck.log")]
    pub log_file: PathBuf,

    /// Event poll interval in milliseconds
    #[arg(long, default_value_t = 50)]
    pub tick_ms: u64,

    /// Start directly on the users screen
    #[arg(long)]
    pub skip_landing: bool,
}

impl Cli {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.clamp(10, 1000))
    }
}
