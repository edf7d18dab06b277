//! Host design-session interface
//!
//! The exporter never touches the schematic document directly; everything it
//! needs arrives through the [`DesignHost`] trait as read-only record values.
//! The hosting application implements the trait against its live in-memory
//! design model; the CLI and the tests implement it against a JSON snapshot
//! (see [`snapshot`]).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::core::PinsightError;

pub mod snapshot;

/// Opaque component identity used to fetch a component's pins from the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentId(String);

impl ComponentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Host classification of a placed element. Only [`ComponentClass::Part`]
/// entries are real parts; the rest are drawing or annotation primitives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentClass {
    /// A real part with a footprint and (usually) pins.
    #[default]
    Part,
    /// Graphical primitive: frame, drawing, free text.
    Graphic,
    /// Annotation helper: net flag, label, no-connect marker.
    Annotation,
    /// Classification added by a newer host than this build knows.
    #[serde(untagged)]
    Other(String),
}

/// Read-only view of one placed component.
///
/// The live host owns the underlying object; this record is a copy of the
/// fields the report needs, valid for the duration of one export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    /// Identity used for the pin query; never interpreted.
    #[serde(default)]
    pub id: ComponentId,
    pub designator: String,
    /// Primary display name; may still be the host's unresolved placeholder.
    #[serde(default)]
    pub name: String,
    /// Secondary sub-part name, e.g. "ATMEGA328P.1" for unit 1.
    #[serde(default)]
    pub device_name: Option<String>,
    #[serde(default)]
    pub class: ComponentClass,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub manufacturer_id: Option<String>,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub supplier_id: Option<String>,
    /// Free-text property bag; the report reads `Description` when present.
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

/// Electrical pin type as tagged by the host.
///
/// Tags the host added after this build still round-trip: they land in
/// [`PinType::Other`] and render verbatim in the report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinType {
    Input,
    Output,
    Bidirectional,
    Passive,
    OpenCollector,
    OpenEmitter,
    Power,
    Ground,
    HighImpedance,
    Terminator,
    #[default]
    Undefined,
    #[serde(untagged)]
    Other(String),
}

impl PinType {
    /// Human-readable label for the report's Type column.
    pub fn label(&self) -> &str {
        match self {
            PinType::Input => "Input",
            PinType::Output => "Output",
            PinType::Bidirectional => "Bidirectional",
            PinType::Passive => "Passive",
            PinType::OpenCollector => "Open Collector",
            PinType::OpenEmitter => "Open Emitter",
            PinType::Power => "Power",
            PinType::Ground => "Ground",
            PinType::HighImpedance => "High Impedance",
            PinType::Terminator => "Terminator",
            PinType::Undefined => "Undefined",
            PinType::Other(tag) => tag,
        }
    }
}

/// Read-only view of one pin of a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinRecord {
    pub number: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: PinType,
}

/// Terminal user-facing outcomes, surfaced through the host's dialog channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    NetlistUnavailable,
    NothingToExport,
    Saved {
        component_count: usize,
        file_name: String,
    },
    Failed(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NetlistUnavailable => write!(
                f,
                "No net list is available for this design. Export the net list first, then run the report again."
            ),
            Notice::NothingToExport => {
                write!(f, "No matching components found. Nothing to export.")
            }
            Notice::Saved {
                component_count,
                file_name,
            } => write!(
                f,
                "Exported pinout report for {} component(s) to {}.",
                component_count, file_name
            ),
            Notice::Failed(message) => write!(f, "Pinout export failed: {}", message),
        }
    }
}

/// Read-only query surface of the hosting design session.
///
/// Implementations must tolerate being called from spawned tasks: the
/// exporter dispatches one [`DesignHost::pins`] call per retained component
/// concurrently and awaits them as a batch.
#[async_trait]
pub trait DesignHost: Send + Sync {
    /// Raw serialized net list for the active design, if one was exported.
    async fn netlist_source(&self) -> Result<Option<String>, PinsightError>;

    /// Every component placed on any page of the active design.
    async fn components(&self) -> Result<Vec<ComponentRecord>, PinsightError>;

    /// Pins of one component. An absent pin list is an empty vec, not an error.
    async fn pins(&self, id: &ComponentId) -> Result<Vec<PinRecord>, PinsightError>;

    /// Persist the finished report through the host's file-save facility.
    async fn save_report(&self, file_name: &str, contents: &str) -> Result<(), PinsightError>;

    /// Show a terminal outcome to the user.
    async fn notify(&self, notice: Notice);
}
