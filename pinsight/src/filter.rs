//! Component retention rules
//!
//! Two gates between "everything placed in the design" and "what the report
//! covers": the host classification must be a real part, and the designator
//! must match an allow-listed prefix pattern.

use regex::Regex;

use crate::core::PinsightError;
use crate::host::{ComponentClass, ComponentRecord};

/// Anchored, case-insensitive designator matcher: an allow-listed prefix,
/// digits, then at most one letter. "U1" and "u12A" match; "U", "R5" and
/// "U1B2" do not.
///
/// The allow-list is runtime configuration (default `["U"]`) so it can grow
/// without touching the matcher.
#[derive(Debug, Clone)]
pub struct DesignatorFilter {
    pattern: Regex,
}

impl DesignatorFilter {
    /// Compile a filter from designator prefixes, e.g. `["U"]`.
    pub fn new(prefixes: &[String]) -> Result<Self, PinsightError> {
        if prefixes.is_empty() {
            return Err(PinsightError::Filter(
                "designator allow-list is empty".to_string(),
            ));
        }
        let alternatives = prefixes
            .iter()
            .map(|p| regex::escape(p))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"^(?i)(?:{})\d+[A-Z]?$", alternatives))
            .map_err(|e| PinsightError::Filter(e.to_string()))?;
        Ok(Self { pattern })
    }

    pub fn matches(&self, designator: &str) -> bool {
        self.pattern.is_match(designator)
    }

    /// Keep real parts with a matching designator, preserving input order.
    pub fn retain(&self, components: Vec<ComponentRecord>) -> Vec<ComponentRecord> {
        components
            .into_iter()
            .filter(|c| c.class == ComponentClass::Part && self.matches(&c.designator))
            .collect()
    }
}
