//! Continuous scanning example
//!
//! Set SCANNER_PORT to the scanner's serial device and RUST_LOG to adjust
//! logging (e.g. `RUST_LOG=gm67=debug`).

use std::time::Duration;

use anyhow::Context;
use gm67::{Scanner, SerialTransport};
use gm67_core::constants::{DEFAULT_BAUD_RATE, DEFAULT_SCAN_DURATION};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    
    // Change to your scanner's serial port
    let port = std::env::var("SCANNER_PORT").unwrap_or_else(|_| "/dev/ttyUSB0".to_string());
    
    let mut transport = SerialTransport::new(&port)
        .with_baud_rate(DEFAULT_BAUD_RATE)
        .with_timeout(Duration::from_millis(200));
    transport
        .open()
        .with_context(|| format!("failed to open {}", port))?;
    
    let mut scanner = Scanner::new(transport);
    scanner.initialize().context("scanner did not accept configuration")?;
    println!("✓ Scanner ready on {}", port);
    
    std::thread::sleep(Duration::from_secs(1));
    
    loop {
        info!("Scanning...");
        
        match scanner.scan(DEFAULT_SCAN_DURATION) {
            Ok(Some(barcode)) => println!("✓ {}", barcode),
            Ok(None) => {}
            Err(e) if e.is_recoverable() => warn!("Scan failed: {}", e),
            Err(e) => return Err(e.into()),
        }
    }
}
