//! Protocol constants

use std::time::Duration;

/// Length byte that announces an extended-length frame
pub const EXTENDED_LENGTH_MARKER: u8 = 0xFF;

/// Opcodes allowed to use extended-length framing
pub const EXTENDED_OPCODES: &[u8] = &[0xF4];

/// Opcodes that carry a scanned code
pub const SCANNED_CODE_OPCODES: &[u8] = &[0xF3, 0xF4];

/// Bytes of a standard frame counted by the length byte before the payload
/// (the length byte and the opcode)
pub const STANDARD_HEADER_SIZE: usize = 2;

/// Bytes of an extended frame counted by the 2-byte length before the payload
/// and after it (length, repeated opcode, checksum)
pub const EXTENDED_OVERHEAD: usize = 5;

/// Checksum size in bytes
pub const CHECKSUM_SIZE: usize = 2;

/// Largest command (opcode + arguments) that fits a standard frame
pub const MAX_COMMAND_SIZE: usize = 0xFF - 1;

/// Byte written to wake the scanner
pub const WAKE_BYTE: u8 = 0x00;

/// Time the scanner needs to leave low-power mode after the wake byte
pub const WAKE_DELAY: Duration = Duration::from_millis(50);

/// Slack added to the scan window when waiting for a result
pub const SCAN_TIMEOUT_MARGIN: Duration = Duration::from_millis(100);

/// Default serial baud rate
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Default read timeout between bytes
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(200);

/// Default scan window
pub const DEFAULT_SCAN_DURATION: Duration = Duration::from_secs(4);

/// Reserved frames (opcode + 2-byte payload)
pub mod reserved {
    /// ACK sent by the scanner after a command
    pub const ACK_FROM_DEVICE: [u8; 3] = [0xD0, 0x00, 0x00];
    
    /// ACK sent to the scanner after a received frame
    pub const ACK_TO_DEVICE: [u8; 3] = [0xD0, 0x04, 0x00];
    
    /// NACK asking the scanner to resend its last frame
    pub const NACK_TO_DEVICE_RESEND: [u8; 3] = [0xD1, 0x04, 0x00];
}

/// Parameter keys for the configure command
pub mod config_keys {
    /// Scan window, in tenths of a second
    pub const SCANNING_DURATION: u8 = 0x88;
    
    /// Trigger mode
    pub const TRIGGER_MODE: u8 = 0x8A;
    
    /// Data send format
    pub const DATA_FORMAT: u8 = 0xEB;
    
    /// Packetized data output
    pub const PACKETIZE_DATA: u8 = 0xEE;
}
