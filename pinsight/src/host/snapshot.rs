//! JSON design snapshot host
//!
//! File-backed stand-in for a live design session: the CLI loads one of these
//! from disk, and the tests build them inline. Saved reports and notices are
//! captured in memory so the caller can persist or print them afterwards.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::core::PinsightError;
use crate::host::{ComponentId, ComponentRecord, DesignHost, Notice, PinRecord};

/// Serialized design snapshot: every placed component with its pins inline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DesignSnapshot {
    #[serde(default)]
    pub components: Vec<SnapshotComponent>,
}

/// One snapshot entry: the component record plus the pin list a live host
/// would return from a pin query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotComponent {
    #[serde(flatten)]
    pub record: ComponentRecord,
    #[serde(default)]
    pub pins: Vec<PinRecord>,
}

impl DesignSnapshot {
    /// Parse a snapshot document. Entries without an explicit id get their
    /// designator as identity.
    pub fn from_json(raw: &str) -> Result<Self, PinsightError> {
        let mut snapshot: DesignSnapshot =
            serde_json::from_str(raw).map_err(|e| PinsightError::Snapshot(e.to_string()))?;
        for entry in &mut snapshot.components {
            if entry.record.id.as_str().is_empty() {
                entry.record.id = ComponentId::new(entry.record.designator.clone());
            }
        }
        Ok(snapshot)
    }
}

/// In-memory [`DesignHost`] over a [`DesignSnapshot`].
pub struct SnapshotHost {
    components: Vec<ComponentRecord>,
    pins: HashMap<ComponentId, Vec<PinRecord>>,
    netlist: Option<String>,
    saved: Mutex<Vec<(String, String)>>,
    notices: Mutex<Vec<Notice>>,
}

impl SnapshotHost {
    pub fn new(snapshot: DesignSnapshot, netlist: Option<String>) -> Self {
        let mut components = Vec::with_capacity(snapshot.components.len());
        let mut pins = HashMap::new();
        for entry in snapshot.components {
            pins.insert(entry.record.id.clone(), entry.pins);
            components.push(entry.record);
        }
        Self {
            components,
            pins,
            netlist,
            saved: Mutex::new(Vec::new()),
            notices: Mutex::new(Vec::new()),
        }
    }

    pub fn from_json(raw: &str, netlist: Option<String>) -> Result<Self, PinsightError> {
        Ok(Self::new(DesignSnapshot::from_json(raw)?, netlist))
    }

    /// Reports captured by `save_report`, as `(file_name, contents)` pairs.
    pub fn saved_reports(&self) -> Vec<(String, String)> {
        self.saved.lock().unwrap().clone()
    }

    /// Notices shown so far, in order.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

#[async_trait]
impl DesignHost for SnapshotHost {
    async fn netlist_source(&self) -> Result<Option<String>, PinsightError> {
        Ok(self.netlist.clone())
    }

    async fn components(&self) -> Result<Vec<ComponentRecord>, PinsightError> {
        Ok(self.components.clone())
    }

    async fn pins(&self, id: &ComponentId) -> Result<Vec<PinRecord>, PinsightError> {
        Ok(self.pins.get(id).cloned().unwrap_or_default())
    }

    async fn save_report(&self, file_name: &str, contents: &str) -> Result<(), PinsightError> {
        self.saved
            .lock()
            .unwrap()
            .push((file_name.to_string(), contents.to_string()));
        Ok(())
    }

    async fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_defaults_id_to_designator() {
        let raw = r#"{
            "components": [
                { "designator": "U1", "name": "NE555", "pins": [
                    { "number": "1", "name": "GND", "type": "ground" }
                ] }
            ]
        }"#;
        let snapshot = DesignSnapshot::from_json(raw).unwrap();
        assert_eq!(snapshot.components[0].record.id.as_str(), "U1");
        assert_eq!(snapshot.components[0].pins.len(), 1);
    }

    #[test]
    fn test_snapshot_rejects_malformed_json() {
        assert!(matches!(
            DesignSnapshot::from_json("{ nope"),
            Err(PinsightError::Snapshot(_))
        ));
    }

    #[tokio::test]
    async fn test_pins_for_unknown_component_is_empty() {
        let host = SnapshotHost::new(DesignSnapshot::default(), None);
        let pins = host.pins(&ComponentId::new("nope")).await.unwrap();
        assert!(pins.is_empty());
    }
}
