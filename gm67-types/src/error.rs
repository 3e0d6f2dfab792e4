pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown trigger mode: 0x{0:02X}")]
    UnknownTriggerMode(u8),
    
    #[error("Unknown data format: 0x{0:02X}")]
    UnknownDataFormat(u8),
    
    #[error("Unknown barcode type: 0x{0:02X}")]
    UnknownBarcodeType(u8),
    
    #[error("Scan payload too short: {len} bytes")]
    ShortPayload {
        len: usize,
    },
}
