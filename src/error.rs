//! Error types for the raycaster

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Raycaster error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error (config file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file could not be parsed
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// Config parsed but holds unusable values
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Grid with a zero dimension
    #[error("Invalid grid size {width}x{height}")]
    InvalidGrid { width: usize, height: usize },

    /// Event loop could not be created or run
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// Window creation failed
    #[error("Window error: {0}")]
    Os(#[from] winit::error::OsError),

    /// Presentation surface failure
    #[error("Surface error: {0}")]
    Surface(#[from] softbuffer::SoftBufferError),
}
