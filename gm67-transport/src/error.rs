//! Transport errors

use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Not connected")]
    NotConnected,
    
    #[error("Already connected")]
    AlreadyConnected,
    
    #[error("Read timeout")]
    ReadTimeout,
    
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),
}

impl Error {
    /// Convert into a frame decoding error for a read of `expected` bytes
    pub fn into_core(self, expected: usize) -> gm67_core::Error {
        match self {
            Self::ReadTimeout => gm67_core::Error::ReadTimeout { expected },
            Self::Io(e) => gm67_core::Error::Io(e),
            Self::Serial(e) => gm67_core::Error::Io(e.into()),
            Self::NotConnected | Self::AlreadyConnected => {
                gm67_core::Error::Io(io::Error::new(io::ErrorKind::NotConnected, self.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_timeout_maps_to_core_timeout() {
        let err = Error::ReadTimeout.into_core(3);
        assert!(matches!(err, gm67_core::Error::ReadTimeout { expected: 3 }));
    }
    
    #[test]
    fn test_io_maps_to_core_io() {
        let err = Error::Io(io::ErrorKind::BrokenPipe.into()).into_core(1);
        assert!(!err.is_timeout());
        assert!(matches!(err, gm67_core::Error::Io(_)));
    }
}
