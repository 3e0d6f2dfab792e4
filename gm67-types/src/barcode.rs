//! Barcode symbologies and scan results

use std::fmt;

use bytes::Bytes;

use crate::error::{Error, Result};

/// Barcode symbology reported by the scanner
///
/// The table covers the symbologies documented for the GM67. Firmware
/// revisions may report others; those fail with
/// [`Error::UnknownBarcodeType`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BarcodeType {
    // Linear symbologies
    Code39 = 0x01,
    Codabar = 0x02,
    Code128 = 0x03,
    Discrete2Of5 = 0x04,
    Iata2Of5 = 0x05,
    Interleaved2Of5 = 0x06,
    Code93 = 0x07,
    
    // UPC / EAN with add-ons
    UpcA = 0x08,
    UpcAAddon2 = 0x48,
    UpcAAddon5 = 0x88,
    UpcE0 = 0x09,
    UpcE0Addon2 = 0x49,
    UpcE0Addon5 = 0x89,
    Ean8 = 0x0A,
    Ean8Addon2 = 0x4A,
    Ean8Addon5 = 0x8A,
    Ean13 = 0x0B,
    Ean13Addon2 = 0x4B,
    Ean13Addon5 = 0x8B,
    
    // Other linear symbologies
    Code11 = 0x0C,
    Msi = 0x0E,
    Gs1Code128 = 0x0F,
    UpcE1 = 0x10,
    UpcE1Addon2 = 0x50,
    UpcE1Addon5 = 0x90,
    TriopticCode39 = 0x15,
    BooklandEan = 0x16,
    CouponCode = 0x17,
    
    // GS1 DataBar
    Gs1Databar14 = 0x30,
    Gs1DatabarLimited = 0x31,
    Gs1DatabarExpanded = 0x32,
    
    Aim128 = 0xA2,
    Issn = 0xA3,
    Plessey = 0xA4,
    
    // 2D symbologies
    Pdf417 = 0xF0,
    Qr = 0xF1,
    DataMatrix = 0xF2,
    AztecCode = 0xF3,
    MaxiCode = 0xF4,
    VeriCode = 0xF5,
    HanXin = 0xF7,
}

impl BarcodeType {
    /// Check if this is a 2D symbology
    pub fn is_2d(self) -> bool {
        matches!(
            self,
            Self::Pdf417
                | Self::Qr
                | Self::DataMatrix
                | Self::AztecCode
                | Self::MaxiCode
                | Self::VeriCode
                | Self::HanXin
        )
    }
    
    /// Get symbology name
    pub fn name(self) -> &'static str {
        match self {
            Self::Code39 => "CODE_39",
            Self::Codabar => "CODEBAR",
            Self::Code128 => "CODE_128",
            Self::Discrete2Of5 => "DISCRETE_2_OF_5",
            Self::Iata2Of5 => "IATA_2_OF_5",
            Self::Interleaved2Of5 => "INTERLEAVED_2_OF_5",
            Self::Code93 => "CODE_93",
            Self::UpcA => "UPC_A",
            Self::UpcAAddon2 => "UPC_A_ADDON_2",
            Self::UpcAAddon5 => "UPC_A_ADDON_5",
            Self::UpcE0 => "UPC_E0",
            Self::UpcE0Addon2 => "UPC_E0_ADDON_2",
            Self::UpcE0Addon5 => "UPC_E0_ADDON_5",
            Self::Ean8 => "EAN_8",
            Self::Ean8Addon2 => "EAN_8_ADDON_2",
            Self::Ean8Addon5 => "EAN_8_ADDON_5",
            Self::Ean13 => "EAN_13",
            Self::Ean13Addon2 => "EAN_13_ADDON_2",
            Self::Ean13Addon5 => "EAN_13_ADDON_5",
            Self::Code11 => "CODE_11",
            Self::Msi => "MSI",
            Self::Gs1Code128 => "GS1_128",
            Self::UpcE1 => "UPC_E1",
            Self::UpcE1Addon2 => "UPC_E1_ADDON_2",
            Self::UpcE1Addon5 => "UPC_E1_ADDON_5",
            Self::TriopticCode39 => "TRIOPTIC_CODE_39",
            Self::BooklandEan => "BOOKLAND_EAN",
            Self::CouponCode => "COUPON_CODE",
            Self::Gs1Databar14 => "GS1_DATABAR_14",
            Self::Gs1DatabarLimited => "GS1_DATABAR_LIMITED",
            Self::Gs1DatabarExpanded => "GS1_DATABAR_EXPANDED",
            Self::Aim128 => "AIM_128",
            Self::Issn => "ISSN",
            Self::Plessey => "PLESSEY",
            Self::Pdf417 => "PDF417",
            Self::Qr => "QR",
            Self::DataMatrix => "DATA_MATRIX",
            Self::AztecCode => "AZTEC_CODE",
            Self::MaxiCode => "MAXI_CODE",
            Self::VeriCode => "VERI_CODE",
            Self::HanXin => "HAN_XIN",
        }
    }
}

impl From<BarcodeType> for u8 {
    fn from(barcode_type: BarcodeType) -> u8 {
        barcode_type as u8
    }
}

impl TryFrom<u8> for BarcodeType {
    type Error = Error;
    
    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x01 => Ok(Self::Code39),
            0x02 => Ok(Self::Codabar),
            0x03 => Ok(Self::Code128),
            0x04 => Ok(Self::Discrete2Of5),
            0x05 => Ok(Self::Iata2Of5),
            0x06 => Ok(Self::Interleaved2Of5),
            0x07 => Ok(Self::Code93),
            0x08 => Ok(Self::UpcA),
            0x48 => Ok(Self::UpcAAddon2),
            0x88 => Ok(Self::UpcAAddon5),
            0x09 => Ok(Self::UpcE0),
            0x49 => Ok(Self::UpcE0Addon2),
            0x89 => Ok(Self::UpcE0Addon5),
            0x0A => Ok(Self::Ean8),
            0x4A => Ok(Self::Ean8Addon2),
            0x8A => Ok(Self::Ean8Addon5),
            0x0B => Ok(Self::Ean13),
            0x4B => Ok(Self::Ean13Addon2),
            0x8B => Ok(Self::Ean13Addon5),
            0x0C => Ok(Self::Code11),
            0x0E => Ok(Self::Msi),
            0x0F => Ok(Self::Gs1Code128),
            0x10 => Ok(Self::UpcE1),
            0x50 => Ok(Self::UpcE1Addon2),
            0x90 => Ok(Self::UpcE1Addon5),
            0x15 => Ok(Self::TriopticCode39),
            0x16 => Ok(Self::BooklandEan),
            0x17 => Ok(Self::CouponCode),
            0x30 => Ok(Self::Gs1Databar14),
            0x31 => Ok(Self::Gs1DatabarLimited),
            0x32 => Ok(Self::Gs1DatabarExpanded),
            0xA2 => Ok(Self::Aim128),
            0xA3 => Ok(Self::Issn),
            0xA4 => Ok(Self::Plessey),
            0xF0 => Ok(Self::Pdf417),
            0xF1 => Ok(Self::Qr),
            0xF2 => Ok(Self::DataMatrix),
            0xF3 => Ok(Self::AztecCode),
            0xF4 => Ok(Self::MaxiCode),
            0xF5 => Ok(Self::VeriCode),
            0xF7 => Ok(Self::HanXin),
            _ => Err(Error::UnknownBarcodeType(value)),
        }
    }
}

impl fmt::Display for BarcodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:02X})", self.name(), *self as u8)
    }
}

/// Code read by the scanner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedBarcode {
    /// Symbology
    pub barcode_type: BarcodeType,
    
    /// Decoded content
    pub data: Bytes,
}

impl ScannedBarcode {
    /// Offset of the symbology byte in a scan payload
    pub const TYPE_OFFSET: usize = 1;
    
    /// Offset of the code data in a scan payload
    pub const DATA_OFFSET: usize = 2;
    
    pub fn new(barcode_type: BarcodeType, data: impl Into<Bytes>) -> Self {
        Self {
            barcode_type,
            data: data.into(),
        }
    }
    
    /// Parse the payload of a scanned-code frame
    ///
    /// The payload is a reserved byte, the symbology byte, then the code data.
    ///
    /// # Examples
    ///
    /// ```
    /// use bytes::Bytes;
    /// use gm67_types::{BarcodeType, ScannedBarcode};
    ///
    /// let payload = Bytes::from_static(&[0x00, 0x01, b'A', b'B', b'C']);
    /// let barcode = ScannedBarcode::parse(&payload).unwrap();
    ///
    /// assert_eq!(barcode.barcode_type, BarcodeType::Code39);
    /// assert_eq!(barcode.data.as_ref(), b"ABC");
    /// ```
    pub fn parse(payload: &Bytes) -> Result<Self> {
        if payload.len() < Self::DATA_OFFSET {
            return Err(Error::ShortPayload { len: payload.len() });
        }
        
        let barcode_type = BarcodeType::try_from(payload[Self::TYPE_OFFSET])?;
        
        Ok(Self {
            barcode_type,
            data: payload.slice(Self::DATA_OFFSET..),
        })
    }
    
    /// Code data as text, if it is valid UTF-8
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.data).ok()
    }
}

impl fmt::Display for ScannedBarcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.text() {
            Some(text) => write!(f, "{}: {}", self.barcode_type, text),
            None => write!(f, "{}: {:02X?}", self.barcode_type, self.data.as_ref()),
        }
    }
}
