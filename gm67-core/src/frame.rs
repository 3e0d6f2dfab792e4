//! GM67 frame structure and encoding/decoding

use std::fmt;

use byteorder::{BigEndian, ByteOrder};
use bytes::{BufMut, Bytes, BytesMut};
use tracing::{trace, warn};

use crate::{
    checksum,
    command::Opcode,
    constants::{
        reserved, CHECKSUM_SIZE, EXTENDED_LENGTH_MARKER, EXTENDED_OPCODES, EXTENDED_OVERHEAD,
        MAX_COMMAND_SIZE, SCANNED_CODE_OPCODES, STANDARD_HEADER_SIZE,
    },
    error::{Error, Result},
    source::{ByteSource, ChecksumReader},
};

/// GM67 protocol frame
///
/// # Frame Structure
///
/// Standard framing:
///
/// ```text
/// ┌──────────┬──────────┬──────────────────┬──────────┐
/// │  Length  │  Opcode  │     Payload      │ Checksum │
/// │  1 byte  │  1 byte  │ Length - 2 bytes │ 2 bytes  │
/// └──────────┴──────────┴──────────────────┴──────────┘
/// ```
///
/// Extended framing, for opcodes allowed to use it:
///
/// ```text
/// ┌──────┬──────────┬──────────────┬──────────┬──────────────────────┬──────────┐
/// │ 0xFF │  Opcode  │    Length    │  Opcode  │       Payload        │ Checksum │
/// │      │  1 byte  │ 2 bytes (BE) │  1 byte  │   Length - 5 bytes   │ 2 bytes  │
/// └──────┴──────────┴──────────────┴──────────┴──────────────────────┴──────────┘
/// ```
///
/// The checksum (big-endian) is `(0x10000 - sum(preceding bytes)) mod 0x10000`.
///
/// # Examples
///
/// ```
/// use gm67_core::frame::{self, Frame};
///
/// let ack = Frame::ack_from_device();
/// let encoded = ack.encode().unwrap();
/// assert_eq!(&encoded[..], &[0x04, 0xD0, 0x00, 0x00, 0xFF, 0x2C]);
///
/// let decoded = frame::decode(&mut &encoded[..]).unwrap();
/// assert_eq!(decoded, ack);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    /// Opcode byte
    pub opcode: u8,
    
    /// Bytes between the opcode header and the checksum
    pub payload: Bytes,
}

impl Frame {
    /// Create a frame
    pub fn new(opcode: u8, payload: impl Into<Bytes>) -> Self {
        Self {
            opcode,
            payload: payload.into(),
        }
    }
    
    /// ACK the scanner sends after accepting a command
    pub fn ack_from_device() -> Self {
        let [opcode, payload @ ..] = reserved::ACK_FROM_DEVICE;
        Self::new(opcode, Bytes::copy_from_slice(&payload))
    }
    
    /// Check if this is the scanner's ACK
    pub fn is_ack(&self) -> bool {
        *self == Self::ack_from_device()
    }
    
    /// Check if this frame carries a scanned code
    pub fn is_scanned_code(&self) -> bool {
        SCANNED_CODE_OPCODES.contains(&self.opcode)
    }
    
    /// Encode with standard framing
    pub fn encode(&self) -> Result<BytesMut> {
        let mut command = BytesMut::with_capacity(1 + self.payload.len());
        command.put_u8(self.opcode);
        command.put_slice(&self.payload);
        encode(&command)
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("opcode", &format!("0x{:02X}", self.opcode))
            .field("payload", &hex::encode(&self.payload))
            .finish()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Opcode::try_from(self.opcode) {
            Ok(opcode) => write!(f, "Frame[{}]({})", opcode, hex::encode(&self.payload)),
            Err(_) => write!(
                f,
                "Frame[0x{:02X}]({})",
                self.opcode,
                hex::encode(&self.payload)
            ),
        }
    }
}

/// Encode a command (opcode + arguments) into a standard frame
///
/// Output is `[len] + command + [checksum_hi, checksum_lo]` where
/// `len = command.len() + 1`.
///
/// # Errors
///
/// Returns an error if the command is empty or longer than
/// [`MAX_COMMAND_SIZE`]. A maximum-size command whose opcode is in
/// [`EXTENDED_OPCODES`] is also rejected: its length byte would be the
/// extended-length marker and the frame would not decode as sent.
///
/// # Examples
///
/// ```
/// use gm67_core::frame;
///
/// let encoded = frame::encode(&[0xE4, 0x04, 0x00]).unwrap();
/// assert_eq!(&encoded[..], &[0x04, 0xE4, 0x04, 0x00, 0xFF, 0x14]);
/// ```
pub fn encode(command: &[u8]) -> Result<BytesMut> {
    if command.is_empty() {
        return Err(Error::EmptyCommand);
    }
    
    if command.len() > MAX_COMMAND_SIZE {
        return Err(Error::CommandTooLong {
            size: command.len(),
            max: MAX_COMMAND_SIZE,
        });
    }
    
    if command.len() + 1 == EXTENDED_LENGTH_MARKER as usize && EXTENDED_OPCODES.contains(&command[0]) {
        return Err(Error::ExtendedLengthCollision {
            opcode: command[0],
            size: command.len(),
        });
    }
    
    let mut buf = BytesMut::with_capacity(1 + command.len() + CHECKSUM_SIZE);
    
    buf.put_u8((command.len() + 1) as u8);
    buf.put_slice(command);
    
    let checksum = checksum::calculate(&buf);
    buf.put_u16(checksum);
    
    Ok(buf)
}

/// Decode one frame with the default extended-opcode set
pub fn decode<S: ByteSource + ?Sized>(source: &mut S) -> Result<Frame> {
    FrameDecoder::default().decode(source)
}

/// Frame decoder
///
/// Holds the set of opcodes allowed to use extended framing. Every other
/// opcode is decoded with standard framing, even when its length byte is
/// `0xFF`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameDecoder {
    extended_opcodes: Vec<u8>,
}

impl FrameDecoder {
    /// Create a decoder with the default extended-opcode set
    pub fn new() -> Self {
        Self {
            extended_opcodes: EXTENDED_OPCODES.to_vec(),
        }
    }
    
    /// Replace the set of opcodes allowed to use extended framing
    pub fn with_extended_opcodes(mut self, opcodes: impl IntoIterator<Item = u8>) -> Self {
        self.extended_opcodes = opcodes.into_iter().collect();
        self
    }
    
    /// Opcodes allowed to use extended framing
    pub fn extended_opcodes(&self) -> &[u8] {
        &self.extended_opcodes
    }
    
    fn is_extended(&self, length: u8, opcode: u8) -> bool {
        length == EXTENDED_LENGTH_MARKER && self.extended_opcodes.contains(&opcode)
    }
    
    /// Read and verify one frame
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The source times out before the frame is complete
    /// - The length field cannot describe a frame
    /// - An extended frame repeats a different opcode
    /// - Checksum verification fails
    pub fn decode<S: ByteSource + ?Sized>(&self, source: &mut S) -> Result<Frame> {
        let mut reader = ChecksumReader::new(source);
        
        let mut header = [0u8; 2];
        reader.read_bytes(&mut header)?;
        let [length, opcode] = header;
        
        let payload_len = if self.is_extended(length, opcode) {
            let mut extended = [0u8; 3];
            reader.read_bytes(&mut extended)?;
            
            let repeated = extended[2];
            if repeated != opcode {
                warn!(opcode, repeated, "Extended frame opcode mismatch");
                return Err(Error::FramingMismatch { opcode, repeated });
            }
            
            let extended_len = BigEndian::read_u16(&extended[..2]) as usize;
            extended_len
                .checked_sub(EXTENDED_OVERHEAD)
                .ok_or(Error::MalformedLength { length: extended_len })?
        } else {
            (length as usize)
                .checked_sub(STANDARD_HEADER_SIZE)
                .ok_or(Error::MalformedLength { length: length as usize })?
        };
        
        let mut payload = BytesMut::zeroed(payload_len);
        reader.read_bytes(&mut payload)?;
        
        // Snapshot before the checksum bytes pass through the reader
        let computed = reader.checksum();
        
        let mut trailer = [0u8; CHECKSUM_SIZE];
        reader.read_bytes(&mut trailer)?;
        let received = BigEndian::read_u16(&trailer);
        
        if computed != received {
            warn!(
                computed = format!("0x{:04X}", computed),
                received = format!("0x{:04X}", received),
                "Frame checksum mismatch"
            );
            return Err(Error::ChecksumMismatch { computed, received });
        }
        
        let frame = Frame::new(opcode, payload.freeze());
        
        trace!("Decoded: {:?}", frame);
        
        Ok(frame)
    }
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}
