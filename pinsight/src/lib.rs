//! Pinsight - IC pinout report generation for schematic designs
//!
//! This library queries a schematic design session (components, pins, net
//! list) through the [`host::DesignHost`] interface and renders a Markdown
//! report of chip pinouts: one section per IC, largest pin count first, every
//! pin resolved to its net through the exported net list.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use pinsight::{ExportOptions, PinoutExporter};
//! use pinsight::host::snapshot::SnapshotHost;
//!
//! # async fn run() {
//! let raw = std::fs::read_to_string("design.json").unwrap();
//! let host = Arc::new(SnapshotHost::from_json(&raw, None).unwrap());
//! let outcome = PinoutExporter::run(host, ExportOptions::default()).await;
//! println!("{:?}", outcome);
//! # }
//! ```
//!
//! # Features
//!
//! - **Net-list indexing**: exported net-list JSON to a pin-to-net lookup
//! - **Component filtering**: real parts matching a designator allow-list
//! - **Report assembly**: Markdown sections with metadata and pin tables
//! - **Host abstraction**: live sessions and JSON snapshots behind one trait

pub mod core;
pub mod filter;
pub mod host;
pub mod parser;
pub mod report;

// Re-export main types
pub use core::{ExportOptions, ExportOutcome, PinoutExporter, PinsightError};
pub use filter::DesignatorFilter;
pub use host::{
    ComponentClass, ComponentId, ComponentRecord, DesignHost, Notice, PinRecord, PinType,
};
pub use parser::netlist::PinNetIndex;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        ComponentClass, ComponentRecord, DesignHost, ExportOptions, ExportOutcome, Notice,
        PinNetIndex, PinRecord, PinType, PinoutExporter, PinsightError,
    };
}
