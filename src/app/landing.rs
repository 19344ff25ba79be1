//! Landing screen animation state: a random star field and a typewriter title.

use rand::Rng;
use std::time::{Duration, Instant};

pub const TITLE: &str = "Hello, visitor!";
pub const SUBTITLE: &str = "userdeck: a tiny user directory demo";
/// Delay between two typed characters.
pub const TYPING_SPEED: Duration = Duration::from_millis(40);
/// Pause after the title and again after the subtitle.
pub const PAUSE: Duration = Duration::from_millis(300);
const STAR_COUNT: usize = 50;

/// Star position as a fraction of the screen, in `[0, 1)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub bright: bool,
}

pub struct Landing {
    pub stars: Vec<Star>,
    pub started_at: Instant,
}

impl Landing {
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                x: rng.gen_range(0.0..1.0),
                y: rng.gen_range(0.0..1.0),
                bright: rng.gen_bool(0.3),
            })
            .collect();
        Self {
            stars,
            started_at: Instant::now(),
        }
    }

    /// Title and subtitle as far as they have been typed after `elapsed`.
    /// The subtitle starts a [`PAUSE`] after the title is complete, and the
    /// screen counts as done one more pause after the subtitle.
    pub fn typed(elapsed: Duration) -> (String, String, bool) {
        let chars_in = |d: Duration| (d.as_millis() / TYPING_SPEED.as_millis()) as usize;
        let title_len = TITLE.chars().count() as u32;
        let subtitle_len = SUBTITLE.chars().count() as u32;

        let subtitle_at = TYPING_SPEED * title_len + PAUSE;
        let done_at = subtitle_at + TYPING_SPEED * subtitle_len + PAUSE;

        let title: String = TITLE.chars().take(chars_in(elapsed)).collect();
        let subtitle: String = SUBTITLE
            .chars()
            .take(chars_in(elapsed.saturating_sub(subtitle_at)))
            .collect();
        (title, subtitle, elapsed >= done_at)
    }

    pub fn current(&self) -> (String, String, bool) {
        Self::typed(self.started_at.elapsed())
    }
}

impl Default for Landing {
    fn default() -> Self {
        Self::new()
    }
}
