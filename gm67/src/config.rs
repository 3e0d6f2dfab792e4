//! Scanner configuration applied by `Scanner::initialize`

use gm67_types::{DataFormat, TriggerMode};

/// Settings written to the scanner on initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Trigger mode
    pub trigger_mode: TriggerMode,
    
    /// Packetized output (required to receive scan frames)
    pub packetize_data: bool,
    
    /// Data send format
    pub data_format: DataFormat,
    
    /// Enable scanning
    pub scan_enabled: bool,
}

impl ScannerConfig {
    /// Set trigger mode
    pub fn with_trigger_mode(mut self, trigger_mode: TriggerMode) -> Self {
        self.trigger_mode = trigger_mode;
        self
    }
    
    /// Set data send format
    pub fn with_data_format(mut self, data_format: DataFormat) -> Self {
        self.data_format = data_format;
        self
    }
    
    /// Enable or disable scanning after initialization
    pub fn with_scan_enabled(mut self, scan_enabled: bool) -> Self {
        self.scan_enabled = scan_enabled;
        self
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            trigger_mode: TriggerMode::Host,
            packetize_data: true,
            data_format: DataFormat::Code,
            scan_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_default_config() {
        let config = ScannerConfig::default();
        
        assert_eq!(config.trigger_mode, TriggerMode::Host);
        assert!(config.packetize_data);
        assert_eq!(config.data_format, DataFormat::Code);
        assert!(config.scan_enabled);
    }
    
    #[test]
    fn test_config_builder() {
        let config = ScannerConfig::default()
            .with_trigger_mode(TriggerMode::ButtonTrigger)
            .with_data_format(DataFormat::PrefixCode)
            .with_scan_enabled(false);
        
        assert_eq!(config.trigger_mode, TriggerMode::ButtonTrigger);
        assert_eq!(config.data_format, DataFormat::PrefixCode);
        assert!(!config.scan_enabled);
    }
}
