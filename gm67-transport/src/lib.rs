//! Transport layer for the GM67 protocol
//!
//! Provides blocking byte streams to the scanner.

pub mod error;
pub mod memory;
pub mod serial;

pub use error::{Error, Result};
pub use memory::MemoryTransport;
pub use serial::SerialTransport;

use std::time::Duration;

use gm67_core::ByteSource;

/// Transport trait for different communication methods
///
/// Reads are exact: they fill the whole buffer within the read timeout or
/// fail with [`Error::ReadTimeout`].
pub trait Transport: Send {
    /// Write all bytes
    fn write_all(&mut self, data: &[u8]) -> Result<()>;
    
    /// Fill `buf` completely
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()>;
    
    /// Current read timeout
    fn timeout(&self) -> Duration;
    
    /// Change the read timeout
    fn set_timeout(&mut self, timeout: Duration) -> Result<()>;
    
    /// Human-readable endpoint name
    fn name(&self) -> String;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        (**self).write_all(data)
    }
    
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        (**self).read_exact(buf)
    }
    
    fn timeout(&self) -> Duration {
        (**self).timeout()
    }
    
    fn set_timeout(&mut self, timeout: Duration) -> Result<()> {
        (**self).set_timeout(timeout)
    }
    
    fn name(&self) -> String {
        (**self).name()
    }
}

/// Adapter feeding a transport to the frame decoder
pub struct FrameSource<'a, T: ?Sized> {
    transport: &'a mut T,
}

impl<'a, T: Transport + ?Sized> FrameSource<'a, T> {
    /// Borrow `transport` for the duration of one decode
    ///
    /// Transport timeouts surface as [`gm67_core::Error::ReadTimeout`].
    pub fn new(transport: &'a mut T) -> Self {
        Self { transport }
    }
}

impl<T: Transport + ?Sized> ByteSource for FrameSource<'_, T> {
    fn read_bytes(&mut self, buf: &mut [u8]) -> gm67_core::Result<()> {
        self.transport
            .read_exact(buf)
            .map_err(|e| e.into_core(buf.len()))
    }
}
