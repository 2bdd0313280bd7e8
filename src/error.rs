use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] io::Error),

    #[error("terminal is {cols}x{rows}, need at least {need_cols}x{need_rows}")]
    TerminalTooSmall {
        cols: u16,
        rows: u16,
        need_cols: u16,
        need_rows: u16,
    },

    #[error("cannot access {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed data: {0}")]
    Format(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
