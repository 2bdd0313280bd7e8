//! Capabilities the game loop drives but does not implement: reading
//! commands, drawing frames, and keeping the high-score table.

use std::io;

use crate::entities::{Command, Snapshot};
use crate::error::Result;
use crate::highscores::ScoreEntry;

/// Non-blocking command source.
pub trait InputSource {
    /// At most one recognised command; `None` when nothing is pending.
    fn poll(&mut self) -> Option<Command>;
}

/// Frame sink. Called at the render cadence, never from the update pipeline.
pub trait OutputSink {
    fn render(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()>;

    /// Drawn on top of the current frame while the level-up timer runs.
    fn render_level_up_banner(&mut self, level: u32) -> io::Result<()>;

    fn render_game_over(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()>;

    fn render_high_scores(&mut self, scores: &[ScoreEntry], latest: Option<usize>) -> io::Result<()>;
}

/// Ranked high-score table.
pub trait ScoreStore {
    /// Entries sorted by descending score.
    fn load(&mut self) -> Result<Vec<ScoreEntry>>;

    /// Insert the score if it makes the table and return the table along with
    /// the 1-based rank achieved, if any.
    fn record_if_qualifies(&mut self, entry: ScoreEntry) -> Result<(Vec<ScoreEntry>, Option<usize>)>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn load(&mut self) -> Result<Vec<ScoreEntry>> {
        (**self).load()
    }

    fn record_if_qualifies(&mut self, entry: ScoreEntry) -> Result<(Vec<ScoreEntry>, Option<usize>)> {
        (**self).record_if_qualifies(entry)
    }
}
