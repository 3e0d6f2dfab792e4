//! Error types for gm67-core



/// Result type alias for gm67 protocol operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core protocol errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Byte source did not deliver the requested number of bytes in time
    #[error("Read timeout: expected {expected} bytes")]
    ReadTimeout {
        expected: usize,
    },
    
    /// Extended-length frame repeated a different opcode
    #[error("Framing mismatch: opcode 0x{opcode:02X}, repeated 0x{repeated:02X}")]
    FramingMismatch {
        opcode: u8,
        repeated: u8,
    },
    
    /// Checksum verification failed
    #[error("Checksum mismatch: computed 0x{computed:04X}, received 0x{received:04X}")]
    ChecksumMismatch {
        computed: u16,
        received: u16,
    },
    
    /// Length field too small to describe a frame
    #[error("Malformed frame length: {length}")]
    MalformedLength {
        length: usize,
    },
    
    /// Command has no opcode
    #[error("Command is empty")]
    EmptyCommand,
    
    /// Command does not fit a standard frame
    #[error("Command too long: {size} bytes (max: {max} bytes)")]
    CommandTooLong {
        size: usize,
        max: usize,
    },
    
    /// Command would be read back as an extended frame
    #[error("Command with opcode 0x{opcode:02X} and {size} bytes collides with extended framing")]
    ExtendedLengthCollision {
        opcode: u8,
        size: usize,
    },
    
    /// Unknown opcode
    #[error("Unknown opcode: 0x{0:02X}")]
    UnknownOpcode(u8),
    
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this is a read timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::ReadTimeout { .. })
    }
    
    /// Check if error is recoverable (next frame might succeed)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ReadTimeout { .. }
                | Self::ChecksumMismatch { .. }
                | Self::FramingMismatch { .. }
                | Self::MalformedLength { .. }
        )
    }
}
