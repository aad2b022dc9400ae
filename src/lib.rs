//! lastpass2keepass: LastPass CSV to KeePass XML
//!
//! A library for reading a LastPass CSV export, grouping its entries by
//! folder and writing a KeePass 2.x XML document that KeePass, KeePassXC
//! and MacPass can import.

pub mod cli;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod utils;

pub use error::{ConvertError, ConvertResult};
