use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to open document: {0}")]
    Load(String),
    #[error("failed to rasterize page {page}: {reason}")]
    Render { page: usize, reason: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Lifecycle of a reading session, from mount to published sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStatus {
    #[default]
    Loading,
    Ready,
    Failed,
}
