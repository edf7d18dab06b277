//! Parsers for host-exported documents.

pub mod netlist;

pub use netlist::PinNetIndex;
