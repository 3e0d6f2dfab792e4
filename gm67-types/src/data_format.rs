//! Data send formats

use std::fmt;

use crate::error::{Error, Result};

/// Fields sent alongside the decoded code
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DataFormat {
    Code = 0x00,
    CodeSuffix1 = 0x01,
    CodeSuffix2 = 0x02,
    CodeSuffix1Suffix2 = 0x03,
    PrefixCode = 0x04,
    PrefixCodeSuffix1 = 0x05,
    PrefixCodeSuffix2 = 0x06,
    PrefixCodeSuffix1Suffix2 = 0x07,
}

impl DataFormat {
    /// Check if the prefix is sent
    pub fn has_prefix(self) -> bool {
        (self as u8) & 0x04 != 0
    }
    
    /// Check if suffix 1 is sent
    pub fn has_suffix1(self) -> bool {
        (self as u8) & 0x01 != 0
    }
    
    /// Check if suffix 2 is sent
    pub fn has_suffix2(self) -> bool {
        (self as u8) & 0x02 != 0
    }
    
    /// Get format name
    pub fn name(self) -> &'static str {
        match self {
            Self::Code => "CODE",
            Self::CodeSuffix1 => "CODE_SUFFIX1",
            Self::CodeSuffix2 => "CODE_SUFFIX2",
            Self::CodeSuffix1Suffix2 => "CODE_SUFFIX1_SUFFIX2",
            Self::PrefixCode => "PREFIX_CODE",
            Self::PrefixCodeSuffix1 => "PREFIX_CODE_SUFFIX1",
            Self::PrefixCodeSuffix2 => "PREFIX_CODE_SUFFIX2",
            Self::PrefixCodeSuffix1Suffix2 => "PREFIX_CODE_SUFFIX1_SUFFIX2",
        }
    }
}

impl From<DataFormat> for u8 {
    fn from(format: DataFormat) -> u8 {
        format as u8
    }
}

impl TryFrom<u8> for DataFormat {
    type Error = Error;
    
    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x00 => Ok(Self::Code),
            0x01 => Ok(Self::CodeSuffix1),
            0x02 => Ok(Self::CodeSuffix2),
            0x03 => Ok(Self::CodeSuffix1Suffix2),
            0x04 => Ok(Self::PrefixCode),
            0x05 => Ok(Self::PrefixCodeSuffix1),
            0x06 => Ok(Self::PrefixCodeSuffix2),
            0x07 => Ok(Self::PrefixCodeSuffix1Suffix2),
            _ => Err(Error::UnknownDataFormat(value)),
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_data_format_fields() {
        assert!(!DataFormat::Code.has_prefix());
        assert!(DataFormat::PrefixCodeSuffix2.has_prefix());
        assert!(DataFormat::PrefixCodeSuffix2.has_suffix2());
        assert!(!DataFormat::PrefixCodeSuffix2.has_suffix1());
    }
    
    #[test]
    fn test_data_format_conversion() {
        for value in 0x00..=0x07u8 {
            assert_eq!(u8::from(DataFormat::try_from(value).unwrap()), value);
        }
        assert!(DataFormat::try_from(0x08).is_err());
    }
}
