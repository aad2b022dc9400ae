//! Export module - KeePass XML output

pub mod identifier;
pub mod keepass_xml;

pub use identifier::*;
pub use keepass_xml::*;
