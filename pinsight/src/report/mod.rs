//! Markdown report assembler
//!
//! Turns the retained components, their pins and the net index into one
//! Markdown document: a header with timestamp and component count, then one
//! section per component with its metadata lines and a sorted pin table.

use chrono::{DateTime, Local};
use std::cmp::Ordering;

use crate::host::{ComponentRecord, PinRecord};
use crate::parser::netlist::PinNetIndex;

/// Primary-name value the host leaves on components whose display name was
/// never resolved against the part library.
const UNRESOLVED_NAME: &str = "={Manufacturer Part}";
/// Rendered in the Net column where the net list has no entry for a pin.
const NO_NET: &str = "-";

/// One retained component together with its fetched pins.
#[derive(Debug, Clone)]
pub struct ComponentPinout {
    pub component: ComponentRecord,
    pub pins: Vec<PinRecord>,
}

/// Append-only line buffer, flushed to a single document at the end.
#[derive(Debug, Default)]
pub struct ReportBuffer {
    lines: Vec<String>,
}

impl ReportBuffer {
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Join all lines with newlines; the document ends with one newline.
    pub fn finish(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

/// Render the full document. `entries` must already be in output order
/// (descending pin count; the exporter sorts before calling this).
pub fn render(
    title: &str,
    entries: &[ComponentPinout],
    index: &PinNetIndex,
    generated_at: DateTime<Local>,
) -> String {
    let mut buf = ReportBuffer::default();
    buf.push(format!("# {}", title));
    buf.blank();
    buf.push(format!(
        "Generated: {}",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    buf.push(format!("Components: {}", entries.len()));

    for entry in entries {
        buf.blank();
        render_component(&mut buf, entry, index);
    }
    buf.finish()
}

fn render_component(buf: &mut ReportBuffer, entry: &ComponentPinout, index: &PinNetIndex) {
    let component = &entry.component;
    let name = resolve_display_name(component);
    if name.is_empty() {
        buf.push(format!("## {}", component.designator));
    } else {
        buf.push(format!("## {} - {}", component.designator, name));
    }

    let mut meta = Vec::new();
    if let Some(line) = pair_line(
        "Manufacturer",
        &component.manufacturer,
        &component.manufacturer_id,
    ) {
        meta.push(line);
    }
    if let Some(line) = pair_line("Supplier", &component.supplier, &component.supplier_id) {
        meta.push(line);
    }
    if let Some(description) = component
        .properties
        .get("Description")
        .map(|d| d.trim())
        .filter(|d| !d.is_empty())
    {
        meta.push(format!("Description: {}", description));
    }
    if !meta.is_empty() {
        buf.blank();
        for line in meta {
            buf.push(line);
        }
    }

    buf.blank();
    if entry.pins.is_empty() {
        buf.push("_No pin information available._");
        return;
    }

    let mut pins: Vec<&PinRecord> = entry.pins.iter().collect();
    pins.sort_by(|a, b| compare_pin_numbers(&a.number, &b.number));

    buf.push("| Pin | Name | Type | Net |");
    buf.push("| --- | --- | --- | --- |");
    for pin in pins {
        let net = index
            .net_for(&component.designator, &pin.number)
            .unwrap_or(NO_NET);
        buf.push(format!(
            "| {} | {} | {} | {} |",
            pin.number,
            pin.name,
            pin.kind.label(),
            net
        ));
    }
}

/// Resolve the section-title name: the primary name unless it is the
/// unresolved placeholder or blank, then the sub-part name with any trailing
/// ".<unit>" stripped, then the manufacturer id, then the primary name as-is.
pub fn resolve_display_name(component: &ComponentRecord) -> String {
    let primary = component.name.trim();
    if primary != UNRESOLVED_NAME && !primary.is_empty() {
        return primary.to_string();
    }
    if let Some(device) = component
        .device_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        return strip_unit_suffix(device).to_string();
    }
    if let Some(id) = component
        .manufacturer_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        return id.to_string();
    }
    primary.to_string()
}

/// "ATMEGA328P.1" -> "ATMEGA328P". Names without a numeric suffix, or where
/// stripping would leave nothing, pass through unchanged.
fn strip_unit_suffix(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, unit))
            if !stem.is_empty() && !unit.is_empty() && unit.bytes().all(|b| b.is_ascii_digit()) =>
        {
            stem
        }
        _ => name,
    }
}

/// "Label: name (id)" when both halves are present, otherwise whichever one
/// is; `None` when neither is.
fn pair_line(label: &str, name: &Option<String>, id: &Option<String>) -> Option<String> {
    let name = name.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let id = id.as_deref().map(str::trim).filter(|s| !s.is_empty());
    match (name, id) {
        (Some(n), Some(i)) => Some(format!("{}: {} ({})", label, n, i)),
        (Some(n), None) => Some(format!("{}: {}", label, n)),
        (None, Some(i)) => Some(format!("{}: {}", label, i)),
        (None, None) => None,
    }
}

/// Pin-number ordering: plain integer comparison when both sides parse as
/// integers, otherwise numeric-aware string order ("A2" before "A10").
pub fn compare_pin_numbers(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<i64>(), b.trim().parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => natural_cmp(a, b),
    }
}

/// Case-insensitive natural order: digit runs compare as numbers, everything
/// else byte-wise. Stands in for the original locale numeric collation.
fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a = a.as_bytes();
    let b = b.as_bytes();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i].is_ascii_digit() && b[j].is_ascii_digit() {
            let start_a = i;
            while i < a.len() && a[i].is_ascii_digit() {
                i += 1;
            }
            let start_b = j;
            while j < b.len() && b[j].is_ascii_digit() {
                j += 1;
            }
            let run_a = trim_leading_zeros(&a[start_a..i]);
            let run_b = trim_leading_zeros(&b[start_b..j]);
            let ord = run_a.len().cmp(&run_b.len()).then_with(|| run_a.cmp(run_b));
            if ord != Ordering::Equal {
                return ord;
            }
        } else {
            let ord = a[i].to_ascii_lowercase().cmp(&b[j].to_ascii_lowercase());
            if ord != Ordering::Equal {
                return ord;
            }
            i += 1;
            j += 1;
        }
    }
    (a.len() - i).cmp(&(b.len() - j))
}

fn trim_leading_zeros(digits: &[u8]) -> &[u8] {
    let start = digits
        .iter()
        .position(|&d| d != b'0')
        .unwrap_or(digits.len() - 1);
    &digits[start..]
}
