//! In-memory transport
//!
//! Replays scripted scanner output and records everything written, for
//! tests and for running the driver without hardware.

use std::collections::VecDeque;
use std::time::Duration;

use gm67_core::constants::DEFAULT_READ_TIMEOUT;
use tracing::trace;

use crate::{error::*, Transport};

/// Scripted transport
///
/// Incoming bytes are queued with [`push_incoming`](Self::push_incoming).
/// [`push_timeout`](Self::push_timeout) queues a point where the scanner goes
/// quiet: the read that reaches it fails with [`Error::ReadTimeout`]. Running
/// out of queued bytes also times out.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    incoming: VecDeque<Option<u8>>,
    written: Vec<u8>,
    timeout: Duration,
    timeout_history: Vec<Duration>,
}

impl MemoryTransport {
    /// Create an empty transport
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_READ_TIMEOUT,
            ..Self::default()
        }
    }
    
    /// Set the initial read timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
    
    /// Queue bytes for the driver to read
    pub fn push_incoming(&mut self, data: &[u8]) {
        self.incoming.extend(data.iter().copied().map(Some));
    }
    
    /// Queue a read timeout
    pub fn push_timeout(&mut self) {
        self.incoming.push_back(None);
    }
    
    /// Number of queued entries not yet read (bytes and timeouts)
    pub fn pending(&self) -> usize {
        self.incoming.len()
    }
    
    /// Everything written so far
    pub fn written(&self) -> &[u8] {
        &self.written
    }
    
    /// Take and clear the write log
    pub fn take_written(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.written)
    }
    
    /// Every timeout passed to `set_timeout`, in order
    pub fn timeout_history(&self) -> &[Duration] {
        &self.timeout_history
    }
}

impl Transport for MemoryTransport {
    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        trace!("Sending {} bytes: {:02X?}", data.len(), data);
        self.written.extend_from_slice(data);
        Ok(())
    }
    
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        for slot in buf.iter_mut() {
            match self.incoming.pop_front() {
                Some(Some(byte)) => *slot = byte,
                Some(None) | None => return Err(Error::ReadTimeout),
            }
        }
        
        trace!("Received {} bytes: {:02X?}", buf.len(), buf);
        Ok(())
    }
    
    fn timeout(&self) -> Duration {
        self.timeout
    }
    
    fn set_timeout(&mut self, timeout: Duration) -> Result<()> {
        self.timeout_history.push(timeout);
        self.timeout = timeout;
        Ok(())
    }
    
    fn name(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    
    #[test]
    fn test_read_queued_bytes() {
        let mut transport = MemoryTransport::new();
        transport.push_incoming(&[1, 2, 3]);
        
        let mut buf = [0u8; 2];
        transport.read_exact(&mut buf).unwrap();
        
        assert_eq!(buf, [1, 2]);
        assert_eq!(transport.pending(), 1);
    }
    
    #[test]
    fn test_read_past_end_times_out() {
        let mut transport = MemoryTransport::new();
        transport.push_incoming(&[1]);
        
        let result = transport.read_exact(&mut [0u8; 2]);
        assert!(matches!(result, Err(Error::ReadTimeout)));
    }
    
    #[test]
    fn test_timeout_marker_is_consumed() {
        let mut transport = MemoryTransport::new();
        transport.push_timeout();
        transport.push_incoming(&[7]);
        
        assert!(transport.read_exact(&mut [0u8; 1]).is_err());
        
        let mut buf = [0u8; 1];
        transport.read_exact(&mut buf).unwrap();
        assert_eq!(buf, [7]);
    }
    
    #[test]
    fn test_write_log() {
        let mut transport = MemoryTransport::new();
        transport.write_all(&[0x00]).unwrap();
        transport.write_all(&[0x04, 0xE4]).unwrap();
        
        assert_eq!(transport.written(), &[0x00, 0x04, 0xE4]);
        assert_eq!(transport.take_written(), vec![0x00, 0x04, 0xE4]);
        assert!(transport.written().is_empty());
    }
    
    #[test]
    fn test_timeout_history() {
        let mut transport = MemoryTransport::new().with_timeout(Duration::from_millis(200));
        transport.set_timeout(Duration::from_secs(3)).unwrap();
        transport.set_timeout(Duration::from_millis(200)).unwrap();
        
        assert_eq!(
            transport.timeout_history(),
            &[Duration::from_secs(3), Duration::from_millis(200)]
        );
        assert_eq!(transport.timeout(), Duration::from_millis(200));
    }
}
