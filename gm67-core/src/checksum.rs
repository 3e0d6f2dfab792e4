//! GM67 checksum algorithm
//!
//! The checksum is the two's complement of the 16-bit sum of every byte in
//! the frame before the checksum itself, sent big-endian:
//!
//! ```text
//! checksum = (0x10000 - sum(bytes)) mod 0x10000
//! ```
//!
//! Outbound frames are checksummed eagerly with [`calculate`]. Inbound frames
//! are checksummed while they are read, one byte at a time, with
//! [`Checksum`]. Both must agree for the same bytes.

use tracing::trace;

/// Running checksum over bytes as they are consumed
///
/// # Examples
///
/// ```
/// use gm67_core::checksum::{self, Checksum};
///
/// let mut running = Checksum::new();
/// for byte in [0x04, 0xD0, 0x00, 0x00] {
///     running.consume(byte);
/// }
/// assert_eq!(running.finish(), checksum::calculate(&[0x04, 0xD0, 0x00, 0x00]));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Checksum {
    state: u16,
}

impl Checksum {
    /// Create a zeroed accumulator
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Reset to zero at the start of a frame
    pub fn start(&mut self) {
        self.state = 0;
    }
    
    /// Subtract a byte from the running state and pass it through unchanged
    pub fn consume(&mut self, byte: u8) -> u8 {
        self.state = self.state.wrapping_sub(u16::from(byte));
        byte
    }
    
    /// Consume every byte of a slice
    pub fn consume_slice(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.consume(byte);
        }
    }
    
    /// Current checksum value
    pub fn finish(&self) -> u16 {
        self.state
    }
}

/// Calculate the checksum of a complete byte sequence
///
/// # Examples
///
/// ```
/// use gm67_core::checksum;
///
/// // ACK frame sent by the scanner: 04 D0 00 00 FF 2C
/// assert_eq!(checksum::calculate(&[0x04, 0xD0, 0x00, 0x00]), 0xFF2C);
/// ```
pub fn calculate(bytes: &[u8]) -> u16 {
    let sum = bytes
        .iter()
        .fold(0u32, |acc, &byte| acc.wrapping_add(u32::from(byte)));
    
    let checksum = (0x10000u32.wrapping_sub(sum) & 0xFFFF) as u16;
    
    trace!(
        len = bytes.len(),
        checksum = format!("0x{:04X}", checksum),
        "Calculated checksum"
    );
    
    checksum
}

/// Verify checksum
pub fn verify(bytes: &[u8], expected: u16) -> bool {
    calculate(bytes) == expected
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    
    #[test]
    fn test_checksum_empty() {
        assert_eq!(calculate(&[]), 0);
        assert_eq!(Checksum::new().finish(), 0);
    }
    
    #[test]
    fn test_checksum_ack_frame() {
        assert_eq!(calculate(&[0x04, 0xD0, 0x00, 0x00]), 0xFF2C);
    }
    
    #[test]
    fn test_checksum_activate_scanner() {
        assert_eq!(calculate(&[0x04, 0xE4, 0x04, 0x00]), 0xFF14);
    }
    
    #[test]
    fn test_checksum_verify() {
        let bytes = [0x07, 0xC6, 0x04, 0x08, 0x00, 0x8A, 0x08];
        let checksum = calculate(&bytes);
        
        assert!(verify(&bytes, checksum));
        assert!(!verify(&bytes, checksum.wrapping_add(1)));
    }
    
    #[test]
    fn test_checksum_wraps_past_16_bits() {
        // 300 * 0xFF = 0x12AD4, only the low 16 bits of the sum matter
        let bytes = vec![0xFF; 300];
        assert_eq!(calculate(&bytes), 0x10000u32.wrapping_sub(0x2AD4) as u16);
    }
    
    #[test]
    fn test_consume_passes_byte_through() {
        let mut running = Checksum::new();
        assert_eq!(running.consume(0xAB), 0xAB);
        assert_eq!(running.finish(), 0x10000u32.wrapping_sub(0xAB) as u16);
    }
    
    #[test]
    fn test_start_resets_state() {
        let mut running = Checksum::new();
        running.consume_slice(&[1, 2, 3]);
        running.start();
        assert_eq!(running.finish(), 0);
    }
    
    proptest! {
        #[test]
        fn running_and_pure_checksums_agree(bytes in proptest::collection::vec(any::<u8>(), 0..1024)) {
            let mut running = Checksum::new();
            running.start();
            for &byte in &bytes {
                running.consume(byte);
            }
            prop_assert_eq!(running.finish(), calculate(&bytes));
        }
        
        #[test]
        fn frame_with_checksum_sums_to_zero(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
            // Checksum cancels the 16-bit byte sum
            let checksum = calculate(&bytes);
            let sum = bytes.iter().fold(0u16, |acc, &b| acc.wrapping_add(u16::from(b)));
            prop_assert_eq!(sum.wrapping_add(checksum), 0);
        }
    }
}
