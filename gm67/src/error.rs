//! High-level error types

use std::time::Duration;

use gm67_core::Frame;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Core protocol error: {0}")]
    Core(#[from] gm67_core::Error),
    
    #[error("Transport error: {0}")]
    Transport(#[from] gm67_transport::Error),
    
    #[error("Type error: {0}")]
    Types(#[from] gm67_types::Error),
    
    #[error("Unexpected frame: expected {expected}, received {received}")]
    UnexpectedFrame {
        expected: &'static str,
        received: Frame,
    },
    
    /// Scan window cannot be expressed in the one-byte duration parameter
    #[error("Scan duration {duration:?} exceeds {max:?}")]
    ScanDurationTooLong {
        duration: Duration,
        max: Duration,
    },
}

impl Error {
    /// Check if this is a read timeout
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Core(e) => e.is_timeout(),
            Self::Transport(e) => matches!(e, gm67_transport::Error::ReadTimeout),
            _ => false,
        }
    }
    
    /// Check if error is recoverable (next scan might succeed)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Core(e) => e.is_recoverable(),
            Self::Transport(e) => matches!(e, gm67_transport::Error::ReadTimeout),
            Self::Types(_) | Self::UnexpectedFrame { .. } => true,
            Self::ScanDurationTooLong { .. } => false,
        }
    }
}
