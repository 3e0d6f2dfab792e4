//! GM67 opcodes and command definitions

use std::fmt;

use bytes::{Bytes, BytesMut};

use crate::{
    constants::{config_keys, reserved, SCANNED_CODE_OPCODES},
    error::{Error, Result},
    frame,
};

/// Protocol opcodes
///
/// The first content byte of every frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    // Handshake
    Ack = 0xD0,
    Nack = 0xD1,
    
    // Configuration
    Configure = 0xC6,
    
    // Scanner control
    ScannerActivate = 0xE4,
    ScannerDeactivate = 0xE5,
    ScanEnable = 0xE9,
    ScanDisable = 0xEA,
    
    // Scan results (from device)
    ScanShort = 0xF3,
    ScanLong = 0xF4,
}

impl Opcode {
    /// Check if frames with this opcode carry a scanned code
    pub fn is_scanned_code(self) -> bool {
        SCANNED_CODE_OPCODES.contains(&(self as u8))
    }
    
    /// Get opcode name
    pub fn name(self) -> &'static str {
        match self {
            Self::Ack => "ACK",
            Self::Nack => "NACK",
            Self::Configure => "CONFIGURE",
            Self::ScannerActivate => "SCANNER_ACTIVATE",
            Self::ScannerDeactivate => "SCANNER_DEACTIVATE",
            Self::ScanEnable => "SCAN_ENABLE",
            Self::ScanDisable => "SCAN_DISABLE",
            Self::ScanShort => "SCAN_SHORT",
            Self::ScanLong => "SCAN_LONG",
        }
    }
}

impl From<Opcode> for u8 {
    fn from(opcode: Opcode) -> u8 {
        opcode as u8
    }
}

impl TryFrom<u8> for Opcode {
    type Error = Error;
    
    fn try_from(value: u8) -> Result<Self> {
        match value {
            0xD0 => Ok(Self::Ack),
            0xD1 => Ok(Self::Nack),
            0xC6 => Ok(Self::Configure),
            0xE4 => Ok(Self::ScannerActivate),
            0xE5 => Ok(Self::ScannerDeactivate),
            0xE9 => Ok(Self::ScanEnable),
            0xEA => Ok(Self::ScanDisable),
            0xF3 => Ok(Self::ScanShort),
            0xF4 => Ok(Self::ScanLong),
            _ => Err(Error::UnknownOpcode(value)),
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:02X})", self.name(), *self as u8)
    }
}

/// Command sent to the scanner: opcode followed by argument bytes
///
/// # Examples
///
/// ```
/// use gm67_core::Command;
///
/// let command = Command::scanner_active(true);
/// assert_eq!(command.as_bytes(), &[0xE4, 0x04, 0x00]);
///
/// let encoded = command.encode().unwrap();
/// assert_eq!(&encoded[..], &[0x04, 0xE4, 0x04, 0x00, 0xFF, 0x14]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    bytes: Bytes,
}

impl Command {
    /// Fixed argument bytes preceding the key of a configure command
    const CONFIGURE_ARGS: [u8; 3] = [0x04, 0x08, 0x00];
    
    /// Fixed argument bytes of scanner control commands
    const CONTROL_ARGS: [u8; 2] = [0x04, 0x00];
    
    /// Wrap raw command bytes (opcode + arguments)
    pub fn raw(bytes: impl Into<Bytes>) -> Self {
        Self { bytes: bytes.into() }
    }
    
    /// Build a configure command setting `key` to `value`
    pub fn configure(key: u8, value: u8) -> Self {
        let [a, b, c] = Self::CONFIGURE_ARGS;
        Self::raw(vec![Opcode::Configure.into(), a, b, c, key, value])
    }
    
    /// Set scan window in tenths of a second
    pub fn set_scanning_duration(deciseconds: u8) -> Self {
        Self::configure(config_keys::SCANNING_DURATION, deciseconds)
    }
    
    /// Set trigger mode (raw wire value)
    pub fn set_trigger_mode(mode: u8) -> Self {
        Self::configure(config_keys::TRIGGER_MODE, mode)
    }
    
    /// Set data send format (raw wire value)
    pub fn set_data_format(format: u8) -> Self {
        Self::configure(config_keys::DATA_FORMAT, format)
    }
    
    /// Enable or disable packetized output
    pub fn set_packetize_data(enabled: bool) -> Self {
        Self::configure(config_keys::PACKETIZE_DATA, u8::from(enabled))
    }
    
    /// Enable or disable continuous scanning
    pub fn scan_enable(enabled: bool) -> Self {
        let opcode = if enabled { Opcode::ScanEnable } else { Opcode::ScanDisable };
        Self::control(opcode)
    }
    
    /// Activate or deactivate the scanner
    pub fn scanner_active(active: bool) -> Self {
        let opcode = if active { Opcode::ScannerActivate } else { Opcode::ScannerDeactivate };
        Self::control(opcode)
    }
    
    /// ACK sent to the scanner after receiving a frame
    pub fn ack_to_device() -> Self {
        Self::raw(Bytes::from_static(&reserved::ACK_TO_DEVICE))
    }
    
    /// NACK asking the scanner to resend
    pub fn nack_resend() -> Self {
        Self::raw(Bytes::from_static(&reserved::NACK_TO_DEVICE_RESEND))
    }
    
    fn control(opcode: Opcode) -> Self {
        let [a, b] = Self::CONTROL_ARGS;
        Self::raw(vec![opcode.into(), a, b])
    }
    
    /// Opcode byte, if the command is not empty
    pub fn opcode(&self) -> Option<u8> {
        self.bytes.first().copied()
    }
    
    /// Raw command bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
    
    /// Encode into a standard frame
    pub fn encode(&self) -> Result<BytesMut> {
        frame::encode(&self.bytes)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.opcode().map(Opcode::try_from) {
            Some(Ok(opcode)) => write!(f, "{}[{}]", opcode, hex::encode(&self.bytes[1..])),
            _ => write!(f, "Command[{}]", hex::encode(&self.bytes)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    
    #[test]
    fn test_opcode_conversion() {
        assert_eq!(u8::from(Opcode::Ack), 0xD0);
        assert_eq!(Opcode::try_from(0xF3).unwrap(), Opcode::ScanShort);
    }
    
    #[test]
    fn test_unknown_opcode() {
        assert!(matches!(Opcode::try_from(0x42), Err(Error::UnknownOpcode(0x42))));
    }
    
    #[test]
    fn test_opcode_is_scanned_code() {
        assert!(Opcode::ScanShort.is_scanned_code());
        assert!(Opcode::ScanLong.is_scanned_code());
        assert!(!Opcode::Ack.is_scanned_code());
    }
    
    #[test]
    fn test_configure_commands() {
        assert_eq!(
            Command::set_trigger_mode(0x08).as_bytes(),
            &[0xC6, 0x04, 0x08, 0x00, 0x8A, 0x08]
        );
        assert_eq!(
            Command::set_scanning_duration(25).as_bytes(),
            &[0xC6, 0x04, 0x08, 0x00, 0x88, 25]
        );
        assert_eq!(
            Command::set_data_format(0x00).as_bytes(),
            &[0xC6, 0x04, 0x08, 0x00, 0xEB, 0x00]
        );
        assert_eq!(
            Command::set_packetize_data(true).as_bytes(),
            &[0xC6, 0x04, 0x08, 0x00, 0xEE, 0x01]
        );
    }
    
    #[test]
    fn test_control_commands() {
        assert_eq!(Command::scan_enable(true).as_bytes(), &[0xE9, 0x04, 0x00]);
        assert_eq!(Command::scan_enable(false).as_bytes(), &[0xEA, 0x04, 0x00]);
        assert_eq!(Command::scanner_active(true).as_bytes(), &[0xE4, 0x04, 0x00]);
        assert_eq!(Command::scanner_active(false).as_bytes(), &[0xE5, 0x04, 0x00]);
    }
    
    #[test]
    fn test_reserved_commands() {
        assert_eq!(Command::ack_to_device().as_bytes(), &[0xD0, 0x04, 0x00]);
        assert_eq!(Command::nack_resend().as_bytes(), &[0xD1, 0x04, 0x00]);
    }
    
    #[test]
    fn test_command_display() {
        assert_eq!(
            Command::scanner_active(true).to_string(),
            "SCANNER_ACTIVATE(0xE4)[0400]"
        );
        assert_eq!(Command::raw(vec![0x42, 0x01]).to_string(), "Command[4201]");
    }
}
