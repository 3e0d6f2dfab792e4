//! Serial port transport
//!
//! The GM67 talks 8N1 at 115200 baud by default.

use std::io::{self, Read, Write};
use std::time::Duration;

use gm67_core::constants::{DEFAULT_BAUD_RATE, DEFAULT_READ_TIMEOUT};
use serialport::SerialPort;
use tracing::{debug, trace, warn};

use crate::{error::*, Transport};

/// Serial transport for GM67 scanners
pub struct SerialTransport {
    path: String,
    baud_rate: u32,
    timeout: Duration,
    port: Option<Box<dyn SerialPort>>,
}

impl SerialTransport {
    /// Create new serial transport (not yet opened)
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            baud_rate: DEFAULT_BAUD_RATE,
            timeout: DEFAULT_READ_TIMEOUT,
            port: None,
        }
    }
    
    /// Set baud rate
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }
    
    /// Set read timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
    
    /// Open the serial port
    pub fn open(&mut self) -> Result<()> {
        if self.is_open() {
            return Err(Error::AlreadyConnected);
        }
        
        debug!("Opening {} at {} baud...", self.path, self.baud_rate);
        
        let port = serialport::new(&self.path, self.baud_rate)
            .data_bits(serialport::DataBits::Eight)
            .parity(serialport::Parity::None)
            .stop_bits(serialport::StopBits::One)
            .timeout(self.timeout)
            .open()?;
        
        debug!("Opened {}", self.path);
        
        self.port = Some(port);
        Ok(())
    }
    
    /// Close the serial port
    pub fn close(&mut self) {
        if self.port.take().is_some() {
            debug!("Closed {}", self.path);
        }
    }
    
    /// Check if the port is open
    pub fn is_open(&self) -> bool {
        self.port.is_some()
    }
}

impl Transport for SerialTransport {
    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;
        
        trace!("Sending {} bytes: {:02X?}", data.len(), &data[..data.len().min(32)]);
        
        port.write_all(data)?;
        port.flush()?;
        
        Ok(())
    }
    
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;
        
        match port.read_exact(buf) {
            Ok(()) => {
                trace!("Received {} bytes: {:02X?}", buf.len(), &buf[..buf.len().min(32)]);
                Ok(())
            }
            Err(e) if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::UnexpectedEof) => {
                trace!("Read timeout waiting for {} bytes", buf.len());
                Err(Error::ReadTimeout)
            }
            Err(e) => {
                warn!("Read error: {}", e);
                Err(Error::Io(e))
            }
        }
    }
    
    fn timeout(&self) -> Duration {
        self.timeout
    }
    
    fn set_timeout(&mut self, timeout: Duration) -> Result<()> {
        if let Some(port) = self.port.as_mut() {
            port.set_timeout(timeout)?;
        }
        
        self.timeout = timeout;
        Ok(())
    }
    
    fn name(&self) -> String {
        self.path.clone()
    }
}
