use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid team: {0}")]
    UnknownTeam(String),
    #[error("unexpected end of input, expected {expected}")]
    MissingToken { expected: &'static str },
    #[error("expected {expected}, found {token:?}")]
    InvalidNumber {
        token: String,
        expected: &'static str,
    },
    #[error("{count} unexpected tokens after the last team")]
    TrailingInput { count: usize },
    #[error("team {0} is listed more than once")]
    DuplicateTeam(String),
    #[error("{first} has {forward} games left against {second}, but {second} has {backward} against {first}")]
    AsymmetricSchedule {
        first: String,
        second: String,
        forward: u32,
        backward: u32,
    },
    #[error("team {0} has games left against itself")]
    SelfSchedule(String),
    #[error("{teams} teams but {rows} schedule rows")]
    LengthMismatch { teams: usize, rows: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
