use dot_pattern::DotPatternError;

/// Errors surfaced by studio services.
#[derive(Debug, thiserror::Error)]
pub enum StudioError {
    #[error("No source image loaded")]
    NoSourceImage,

    #[error("Render {generation} was superseded by render {latest}")]
    Superseded { generation: u64, latest: u64 },

    #[error(transparent)]
    Render(#[from] DotPatternError),

    #[error("Render worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
