//! Scan trigger modes

use std::fmt;

use crate::error::{Error, Result};

/// How the scanner decides when to scan
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TriggerMode {
    /// Scan while the button is held
    ButtonHolding = 0x00,
    
    /// Scan once per button press
    ButtonTrigger = 0x02,
    
    /// Scan continuously
    ContinuousScanning = 0x04,
    
    /// Scan when commanded by the host
    Host = 0x08,
    
    /// Scan when an object is detected
    AutomaticInduction = 0x09,
}

impl TriggerMode {
    /// Get mode name
    pub fn name(self) -> &'static str {
        match self {
            Self::ButtonHolding => "BUTTON_HOLDING",
            Self::ButtonTrigger => "BUTTON_TRIGGER",
            Self::ContinuousScanning => "CONTINUOUS_SCANNING",
            Self::Host => "HOST",
            Self::AutomaticInduction => "AUTOMATIC_INDUCTION",
        }
    }
}

impl From<TriggerMode> for u8 {
    fn from(mode: TriggerMode) -> u8 {
        mode as u8
    }
}

impl TryFrom<u8> for TriggerMode {
    type Error = Error;
    
    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x00 => Ok(Self::ButtonHolding),
            0x02 => Ok(Self::ButtonTrigger),
            0x04 => Ok(Self::ContinuousScanning),
            0x08 => Ok(Self::Host),
            0x09 => Ok(Self::AutomaticInduction),
            _ => Err(Error::UnknownTriggerMode(value)),
        }
    }
}

impl fmt::Display for TriggerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_trigger_mode_conversion() {
        assert_eq!(u8::from(TriggerMode::Host), 0x08);
        assert_eq!(TriggerMode::try_from(0x09).unwrap(), TriggerMode::AutomaticInduction);
    }
    
    #[test]
    fn test_unknown_trigger_mode() {
        assert!(matches!(
            TriggerMode::try_from(0x01),
            Err(Error::UnknownTriggerMode(0x01))
        ));
    }
}
