//! End-to-end exporter tests over the snapshot host

use std::path::PathBuf;
use std::sync::Arc;

use pinsight::host::snapshot::SnapshotHost;
use pinsight::prelude::*;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).expect("fixture should exist")
}

fn blinky_host() -> Arc<SnapshotHost> {
    let design = fixture("blinky.design.json");
    let netlist = fixture("blinky.netlist.json");
    Arc::new(SnapshotHost::from_json(&design, Some(netlist)).expect("fixture should parse"))
}

#[tokio::test]
async fn test_single_component_scenario() {
    let design = r#"{
        "components": [
            { "designator": "U1", "name": "LDO", "pins": [
                { "number": "1", "name": "VCC", "type": "power" },
                { "number": "2", "name": "GND", "type": "ground" }
            ] }
        ]
    }"#;
    let netlist = r#"{
        "components": {
            "x": {
                "properties": { "Designator": "U1" },
                "pins": {
                    "1": { "number": "1", "net": "VCC_3V3" },
                    "2": { "number": "2", "net": "GND" }
                }
            }
        }
    }"#;
    let host = Arc::new(SnapshotHost::from_json(design, Some(netlist.to_string())).unwrap());

    let outcome = PinoutExporter::run(host.clone(), ExportOptions::default()).await;
    match outcome {
        ExportOutcome::Saved {
            component_count, ..
        } => assert_eq!(component_count, 1),
        other => panic!("expected Saved, got {:?}", other),
    }

    let saved = host.saved_reports();
    assert_eq!(saved.len(), 1);
    let (file_name, contents) = &saved[0];
    assert!(file_name.starts_with("pinout-report-"));
    assert!(file_name.ends_with(".md"));
    assert!(contents.contains("## U1"));
    assert!(contents.contains("| 1 | VCC | Power | VCC_3V3 |"));
    assert!(contents.contains("| 2 | GND | Ground | GND |"));

    let notices = host.notices();
    assert_eq!(notices.len(), 1);
    assert!(matches!(
        notices[0],
        Notice::Saved {
            component_count: 1,
            ..
        }
    ));
}

#[tokio::test]
async fn test_blinky_fixture_report() {
    let host = blinky_host();
    let outcome = PinoutExporter::run(host.clone(), ExportOptions::default()).await;
    assert!(matches!(
        outcome,
        ExportOutcome::Saved {
            component_count: 3,
            ..
        }
    ));

    let saved = host.saved_reports();
    let contents = &saved[0].1;

    // Name resolution: placeholder primary name falls back to the sub-part
    // name with the ".1" unit suffix stripped.
    assert!(contents.contains("## U1 - ATMEGA328P-AU"));
    assert!(contents.contains("## U2 - AMS1117-3.3"));
    assert!(contents.contains("Manufacturer: Microchip (ATMEGA328P-AU)"));
    assert!(contents.contains("Supplier: LCSC (C14877)"));
    assert!(contents.contains("Supplier: C6186"));
    assert!(contents.contains("Description: 8-bit AVR microcontroller, 32KB flash"));

    // Components ordered by descending pin count: U1 (6), U2 (3), U3 (0).
    let u1 = contents.find("## U1").unwrap();
    let u2 = contents.find("## U2").unwrap();
    let u3 = contents.find("## U3").unwrap();
    assert!(u1 < u2 && u2 < u3);

    // R1 matches nothing; the frame is not a part.
    assert!(!contents.contains("## R1"));
    assert!(!contents.contains("FRAME1"));

    // Pin 10 sorts after pin 5 and has no net recorded.
    let p5 = contents.find("| 5 | GND | Ground | GND |").unwrap();
    let p10 = contents.find("| 10 | PB7/XTAL2 | Bidirectional | - |").unwrap();
    assert!(p5 < p10);

    // Unknown pin-type tag renders verbatim.
    assert!(contents.contains("| 1 | PD3 | analog_mux | LED_CTRL |"));

    // Zero-pin component renders the placeholder, never an empty table.
    let u3_section = &contents[u3..];
    assert!(u3_section.contains("_No pin information available._"));

    assert!(contents.contains("Components: 3"));
}

#[tokio::test]
async fn test_missing_netlist_aborts_without_saving() {
    let design = fixture("blinky.design.json");
    let host = Arc::new(SnapshotHost::from_json(&design, None).unwrap());

    let outcome = PinoutExporter::run(host.clone(), ExportOptions::default()).await;
    assert_eq!(outcome, ExportOutcome::NoNetlist);
    assert!(host.saved_reports().is_empty());
    assert_eq!(host.notices(), vec![Notice::NetlistUnavailable]);
}

#[tokio::test]
async fn test_malformed_netlist_degrades_to_placeholders() {
    let design = fixture("blinky.design.json");
    let host = Arc::new(SnapshotHost::from_json(&design, Some("%%garbage%%".to_string())).unwrap());

    let outcome = PinoutExporter::run(host.clone(), ExportOptions::default()).await;
    assert!(matches!(outcome, ExportOutcome::Saved { .. }));

    let saved = host.saved_reports();
    let contents = &saved[0].1;
    assert!(contents.contains("| 4 | VCC | Power | - |"));
    assert!(!contents.contains("VCC_3V3"));
}

#[tokio::test]
async fn test_no_qualifying_components_is_informational() {
    let design = fixture("passives.design.json");
    let host = Arc::new(SnapshotHost::from_json(&design, Some("{}".to_string())).unwrap());

    let outcome = PinoutExporter::run(host.clone(), ExportOptions::default()).await;
    assert_eq!(outcome, ExportOutcome::NothingToExport);
    assert!(host.saved_reports().is_empty());
    assert_eq!(host.notices(), vec![Notice::NothingToExport]);
}

#[tokio::test]
async fn test_custom_prefix_widens_the_filter() {
    let design = fixture("passives.design.json");
    let host = Arc::new(SnapshotHost::from_json(&design, Some("{}".to_string())).unwrap());

    let options = ExportOptions {
        designator_prefixes: vec!["R".to_string(), "C".to_string()],
        ..Default::default()
    };
    let outcome = PinoutExporter::run(host.clone(), options).await;
    assert!(matches!(
        outcome,
        ExportOutcome::Saved {
            component_count: 2,
            ..
        }
    ));
}

#[tokio::test]
async fn test_empty_prefix_list_fails_with_notice() {
    let design = fixture("passives.design.json");
    let host = Arc::new(SnapshotHost::from_json(&design, Some("{}".to_string())).unwrap());

    let options = ExportOptions {
        designator_prefixes: vec![],
        ..Default::default()
    };
    let outcome = PinoutExporter::run(host.clone(), options).await;
    assert!(matches!(outcome, ExportOutcome::Failed(_)));
    let notices = host.notices();
    assert_eq!(notices.len(), 1);
    assert!(matches!(notices[0], Notice::Failed(_)));
}
