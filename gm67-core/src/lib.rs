//! # gm67-core
//!
//! Core protocol implementation for GM67 barcode scanner modules.
//!
//! This crate provides the low-level protocol primitives:
//! - Frame structure and encoding/decoding
//! - Checksum calculation
//! - Opcode and command definitions
//! - Protocol constants

pub mod checksum;
pub mod command;
pub mod constants;
pub mod error;
pub mod frame;
pub mod source;

pub use checksum::Checksum;
pub use command::{Command, Opcode};
pub use error::{Error, Result};
pub use frame::{Frame, FrameDecoder};
pub use source::ByteSource;
