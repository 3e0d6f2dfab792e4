//! High-level scanner interface

use std::thread;
use std::time::Duration;

use tracing::{debug, info, trace, warn};

use gm67_core::{
    constants::{SCAN_TIMEOUT_MARGIN, WAKE_BYTE, WAKE_DELAY},
    Command, Frame, FrameDecoder,
};
use gm67_transport::{FrameSource, Transport};
use gm67_types::{DataFormat, ScannedBarcode, TriggerMode};

use crate::{
    config::ScannerConfig,
    error::{Error, Result},
};

/// Progress of a scan request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// No scan requested yet
    Idle,
    
    /// Sending the wake pulse
    Waking,
    
    /// Programming and starting a timed scan window
    Arming,
    
    /// Waiting for one frame from the scanner
    AwaitingFrame,
    
    /// A code was read
    Scanned,
    
    /// No code within the window
    TimedOut,
    
    /// The scan failed
    ProtocolError,
}

impl ScanState {
    /// Check if the scan has finished
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Scanned | Self::TimedOut | Self::ProtocolError)
    }
}

/// GM67 scanner
///
/// Owns the transport for its lifetime. All I/O is blocking.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
///
/// use gm67::Scanner;
/// use gm67_transport::SerialTransport;
///
/// fn main() -> gm67::Result<()> {
///     let mut transport = SerialTransport::new("/dev/ttyUSB0");
///     transport.open()?;
///
///     let mut scanner = Scanner::new(transport);
///     scanner.initialize()?;
///
///     if let Some(barcode) = scanner.scan(Duration::from_secs(4))? {
///         println!("{}", barcode);
///     }
///     Ok(())
/// }
/// ```
pub struct Scanner<T: Transport> {
    transport: T,
    decoder: FrameDecoder,
    config: ScannerConfig,
    wake_delay: Duration,
    state: ScanState,
}

impl<T: Transport> Scanner<T> {
    /// Create a scanner on an open transport
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            decoder: FrameDecoder::default(),
            config: ScannerConfig::default(),
            wake_delay: WAKE_DELAY,
            state: ScanState::Idle,
        }
    }
    
    /// Set the configuration applied by [`initialize`](Self::initialize)
    pub fn with_config(mut self, config: ScannerConfig) -> Self {
        self.config = config;
        self
    }
    
    /// Set the pause after the wake pulse
    pub fn with_wake_delay(mut self, wake_delay: Duration) -> Self {
        self.wake_delay = wake_delay;
        self
    }
    
    /// Set the frame decoder
    pub fn with_decoder(mut self, decoder: FrameDecoder) -> Self {
        self.decoder = decoder;
        self
    }
    
    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }
    
    /// State reached by the last scan
    pub fn scan_state(&self) -> ScanState {
        self.state
    }
    
    pub fn transport(&self) -> &T {
        &self.transport
    }
    
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
    
    /// Release the transport
    pub fn into_inner(self) -> T {
        self.transport
    }
    
    /// Wake the scanner and apply the configuration
    ///
    /// # Errors
    ///
    /// Stops at the first command the scanner does not ACK.
    pub fn initialize(&mut self) -> Result<()> {
        info!("Initializing scanner on {}...", self.transport.name());
        
        let config = self.config;
        
        self.wake()?;
        self.set_trigger_mode(config.trigger_mode)?;
        self.set_packetize_data(config.packetize_data)?;
        self.set_data_format(config.data_format)?;
        self.set_scan_enabled(config.scan_enabled)?;
        
        info!(
            "Scanner initialized (trigger={}, format={})",
            config.trigger_mode, config.data_format
        );
        
        Ok(())
    }
    
    /// Send the wake pulse and give the scanner time to leave low-power mode
    pub fn wake(&mut self) -> Result<()> {
        trace!("Waking scanner");
        
        self.transport.write_all(&[WAKE_BYTE])?;
        
        if !self.wake_delay.is_zero() {
            thread::sleep(self.wake_delay);
        }
        
        Ok(())
    }
    
    /// Frame and send a command, optionally waiting for the scanner's ACK
    pub fn send_command(&mut self, command: &Command, expect_ack: bool) -> Result<()> {
        trace!("Sending: {}", command);
        
        let data = command.encode()?;
        self.transport.write_all(&data)?;
        
        if expect_ack {
            self.expect_ack()?;
        }
        
        Ok(())
    }
    
    /// Read one frame and ACK it
    ///
    /// Returns `None` when nothing arrives before the read timeout. Other
    /// failures (bad checksum, framing) are returned as errors and are not
    /// acknowledged.
    pub fn poll(&mut self) -> Result<Option<Frame>> {
        match self.read_frame() {
            Ok(frame) => {
                self.send_ack()?;
                Ok(Some(frame))
            }
            Err(e) if e.is_timeout() => {
                trace!("No frame available");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
    
    /// Scan for one code
    ///
    /// A zero `duration` waits passively, within the current read timeout,
    /// for a scan started with the scanner's button. Otherwise the scanner is
    /// told to scan for `duration` and the read timeout is raised to cover the
    /// window; the previous timeout is restored before returning.
    ///
    /// Returns `None` when no code was read.
    ///
    /// # Errors
    ///
    /// A `duration` longer than the scanner can be programmed for (255
    /// tenths of a second) is rejected before anything is written.
    pub fn scan(&mut self, duration: Duration) -> Result<Option<ScannedBarcode>> {
        self.enter(ScanState::Waking);
        
        let result = self.run_scan(duration);
        
        self.enter(match &result {
            Ok(Some(_)) => ScanState::Scanned,
            Ok(None) => ScanState::TimedOut,
            Err(_) => ScanState::ProtocolError,
        });
        
        result
    }
    
    /// ACK a frame received from the scanner
    pub fn send_ack(&mut self) -> Result<()> {
        self.send_command(&Command::ack_to_device(), false)
    }
    
    /// Ask the scanner to resend its last frame
    pub fn send_nack_resend(&mut self) -> Result<()> {
        self.send_command(&Command::nack_resend(), false)
    }
    
    pub fn set_trigger_mode(&mut self, mode: TriggerMode) -> Result<()> {
        debug!("Setting trigger mode: {}", mode);
        self.send_command(&Command::set_trigger_mode(mode.into()), true)
    }
    
    pub fn set_packetize_data(&mut self, enabled: bool) -> Result<()> {
        debug!("Setting packetized data: {}", enabled);
        self.send_command(&Command::set_packetize_data(enabled), true)
    }
    
    pub fn set_data_format(&mut self, format: DataFormat) -> Result<()> {
        debug!("Setting data format: {}", format);
        self.send_command(&Command::set_data_format(format.into()), true)
    }
    
    /// Set the scan window in tenths of a second
    pub fn set_scanning_duration(&mut self, deciseconds: u8) -> Result<()> {
        debug!("Setting scanning duration: {}ds", deciseconds);
        self.send_command(&Command::set_scanning_duration(deciseconds), true)
    }
    
    pub fn set_scan_enabled(&mut self, enabled: bool) -> Result<()> {
        debug!("Setting scan enabled: {}", enabled);
        self.send_command(&Command::scan_enable(enabled), true)
    }
    
    pub fn set_scanner_active(&mut self, active: bool) -> Result<()> {
        debug!("Setting scanner active: {}", active);
        self.send_command(&Command::scanner_active(active), true)
    }
    
    // Helper methods
    
    fn enter(&mut self, state: ScanState) {
        debug!(from = ?self.state, to = ?state, "Scan state");
        self.state = state;
    }
    
    fn run_scan(&mut self, duration: Duration) -> Result<Option<ScannedBarcode>> {
        let window = if duration.is_zero() {
            None
        } else {
            Some(ScanWindow::new(duration)?)
        };
        
        self.wake()?;
        
        let previous_timeout = match window {
            Some(window) => {
                self.enter(ScanState::Arming);
                Some(self.arm(window)?)
            }
            None => None,
        };
        
        self.enter(ScanState::AwaitingFrame);
        let polled = self.poll();
        
        if let Some(previous) = previous_timeout {
            if let Err(e) = self.transport.set_timeout(previous) {
                if polled.is_ok() {
                    return Err(e.into());
                }
                warn!("Failed to restore read timeout: {}", e);
            }
        }
        
        match polled? {
            Some(frame) => self.classify(frame).map(Some),
            None => {
                debug!("No code scanned");
                Ok(None)
            }
        }
    }
    
    /// Start a timed scan window, returning the read timeout to restore
    fn arm(&mut self, window: ScanWindow) -> Result<Duration> {
        self.set_scanning_duration(window.deciseconds)?;
        self.set_scanner_active(true)?;
        
        let previous = self.transport.timeout();
        self.transport.set_timeout(window.read_timeout)?;
        
        Ok(previous)
    }
    
    fn classify(&self, frame: Frame) -> Result<ScannedBarcode> {
        if !frame.is_scanned_code() {
            warn!("Unexpected frame while scanning: {}", frame);
            return Err(Error::UnexpectedFrame {
                expected: "scanned code",
                received: frame,
            });
        }
        
        let barcode = ScannedBarcode::parse(&frame.payload)?;
        
        debug!("Scanned: {}", barcode);
        
        Ok(barcode)
    }
    
    fn expect_ack(&mut self) -> Result<()> {
        let frame = self.read_frame()?;
        
        if frame.is_ack() {
            Ok(())
        } else {
            warn!("Expected ACK, received {}", frame);
            Err(Error::UnexpectedFrame {
                expected: "ACK",
                received: frame,
            })
        }
    }
    
    fn read_frame(&mut self) -> Result<Frame> {
        let frame = self
            .decoder
            .decode(&mut FrameSource::new(&mut self.transport))?;
        
        trace!("Received: {}", frame);
        
        Ok(frame)
    }
}

/// Longest scan window the duration parameter can hold
const MAX_SCAN_DURATION: Duration = Duration::from_millis(u8::MAX as u64 * 100);

/// Timed scan window, validated before any byte is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScanWindow {
    /// Window in tenths of a second, truncated
    deciseconds: u8,
    
    /// Read timeout covering the window
    read_timeout: Duration,
}

impl ScanWindow {
    fn new(duration: Duration) -> Result<Self> {
        let too_long = || Error::ScanDurationTooLong {
            duration,
            max: MAX_SCAN_DURATION,
        };
        
        let deciseconds = u8::try_from(duration.as_millis() / 100).map_err(|_| too_long())?;
        let read_timeout = duration
            .checked_add(SCAN_TIMEOUT_MARGIN)
            .ok_or_else(too_long)?;
        
        Ok(Self {
            deciseconds,
            read_timeout,
        })
    }
}
