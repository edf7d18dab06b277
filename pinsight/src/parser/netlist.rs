//! Net-list indexer
//!
//! Parses the serialized net-list document exported by the design session
//! into a flat `"<designator>-<pin>"` -> net-name lookup. Net names are
//! best-effort: a malformed document degrades to an empty index so the export
//! still runs, with the net column rendered as placeholders.

use serde::Deserialize;
use std::collections::HashMap;

/// Raw shape of the exported net-list JSON: a version tag and a components
/// map keyed by opaque unique id. Unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawNetlist {
    version: String,
    components: HashMap<String, RawComponent>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawComponent {
    properties: HashMap<String, String>,
    pins: HashMap<String, RawPin>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPin {
    number: String,
    net: String,
}

/// Read-only map from `"<designator>-<pin>"` to net name.
///
/// Built once per export, before the concurrent pin fetch starts; only
/// lookups happen afterward. An empty net name in the document means
/// "unconnected or unknown" and produces no entry. Duplicate keys (the same
/// designator reused across net-list entries) resolve last-write-wins.
#[derive(Debug, Clone, Default)]
pub struct PinNetIndex {
    map: HashMap<String, String>,
}

impl PinNetIndex {
    /// Build the index from raw net-list text. Never fails: unparsable input
    /// yields an empty index.
    pub fn parse(raw: &str) -> Self {
        let doc: RawNetlist = match serde_json::from_str(raw) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!("net list unparsable, continuing without net names: {}", e);
                return Self::default();
            }
        };
        if !doc.version.is_empty() {
            tracing::debug!("net list document version {}", doc.version);
        }

        let mut map = HashMap::new();
        for component in doc.components.values() {
            let designator = component
                .properties
                .get("Designator")
                .map(String::as_str)
                .unwrap_or("");
            if designator.is_empty() {
                continue;
            }
            for (map_key, pin) in &component.pins {
                if pin.net.is_empty() {
                    continue;
                }
                let number = if pin.number.is_empty() {
                    map_key
                } else {
                    &pin.number
                };
                map.insert(Self::key(designator, number), pin.net.clone());
            }
        }
        tracing::debug!("net index holds {} pin(s)", map.len());
        Self { map }
    }

    /// Net name recorded for a designator/pin pair, if any.
    pub fn net_for(&self, designator: &str, pin_number: &str) -> Option<&str> {
        self.map
            .get(&Self::key(designator, pin_number))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate `(join key, net name)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn key(designator: &str, pin_number: &str) -> String {
        format!("{}-{}", designator, pin_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "version": "1.2",
        "components": {
            "c9f2a": {
                "properties": { "Designator": "U1" },
                "pins": {
                    "1": { "name": "VCC", "number": "1", "net": "VCC_3V3" },
                    "2": { "name": "GND", "number": "2", "net": "GND" },
                    "3": { "name": "NC", "number": "3", "net": "" }
                }
            },
            "b41d7": {
                "properties": { "Value": "100n" },
                "pins": {
                    "1": { "name": "1", "number": "1", "net": "VCC_3V3" }
                }
            }
        }
    }"#;

    #[test]
    fn test_index_keys_from_well_formed_document() {
        let index = PinNetIndex::parse(SAMPLE);
        assert_eq!(index.net_for("U1", "1"), Some("VCC_3V3"));
        assert_eq!(index.net_for("U1", "2"), Some("GND"));
    }

    #[test]
    fn test_empty_net_name_is_omitted() {
        let index = PinNetIndex::parse(SAMPLE);
        assert_eq!(index.net_for("U1", "3"), None);
    }

    #[test]
    fn test_component_without_designator_is_skipped() {
        let index = PinNetIndex::parse(SAMPLE);
        // The capacitor entry has no Designator property at all.
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_malformed_text_yields_empty_index() {
        assert!(PinNetIndex::parse("not json at all").is_empty());
        assert!(PinNetIndex::parse("{\"components\": 42}").is_empty());
        assert!(PinNetIndex::parse("").is_empty());
    }

    #[test]
    fn test_pin_map_key_used_when_number_field_empty() {
        let raw = r#"{
            "components": {
                "x": {
                    "properties": { "Designator": "U7" },
                    "pins": { "12": { "net": "SPI_CLK" } }
                }
            }
        }"#;
        let index = PinNetIndex::parse(raw);
        assert_eq!(index.net_for("U7", "12"), Some("SPI_CLK"));
    }

    #[test]
    fn test_duplicate_designator_keeps_single_entry() {
        let raw = r#"{
            "components": {
                "a": {
                    "properties": { "Designator": "U1" },
                    "pins": { "1": { "number": "1", "net": "NET_A" } }
                },
                "b": {
                    "properties": { "Designator": "U1" },
                    "pins": { "1": { "number": "1", "net": "NET_B" } }
                }
            }
        }"#;
        let index = PinNetIndex::parse(raw);
        // Last write wins; either entry is acceptable, but only one survives.
        assert_eq!(index.len(), 1);
        let net = index.net_for("U1", "1").unwrap();
        assert!(net == "NET_A" || net == "NET_B");
    }
}
