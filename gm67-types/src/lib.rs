//! Type definitions for gm67

pub mod barcode;
pub mod data_format;
pub mod error;
pub mod trigger_mode;

pub use barcode::{BarcodeType, ScannedBarcode};
pub use data_format::DataFormat;
pub use error::{Error, Result};
pub use trigger_mode::TriggerMode;
