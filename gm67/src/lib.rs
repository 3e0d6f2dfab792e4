//! # gm67
//!
//! Rust host driver for GM67 barcode scanner modules.
//!
//! ## Features
//!
//! - Checksummed framing, including extended-length frames
//! - ACK handshake for every configuration command
//! - Timed and button-triggered scans returning typed barcodes
//! - Blocking I/O over any [`Transport`], serial ports included
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use gm67::{Scanner, SerialTransport};
//!
//! fn main() -> gm67::Result<()> {
//!     let mut transport = SerialTransport::new("/dev/ttyUSB0");
//!     transport.open()?;
//!
//!     let mut scanner = Scanner::new(transport);
//!     scanner.initialize()?;
//!
//!     match scanner.scan(Duration::from_secs(4))? {
//!         Some(barcode) => println!("{}", barcode),
//!         None => println!("No code scanned"),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod scanner;

// Re-exports
pub use config::ScannerConfig;
pub use error::{Error, Result};
pub use scanner::{ScanState, Scanner};

// Re-export types
pub use gm67_core::{Command, Frame, FrameDecoder, Opcode};
pub use gm67_transport::{MemoryTransport, SerialTransport, Transport};
pub use gm67_types::{BarcodeType, DataFormat, ScannedBarcode, TriggerMode};
