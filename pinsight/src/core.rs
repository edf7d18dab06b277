//! Exporter orchestration shared by the embedded host and the CLI.
//! No host-application dependencies: everything arrives through `DesignHost`.

use std::sync::Arc;

use chrono::Local;

use crate::filter::DesignatorFilter;
use crate::host::{DesignHost, Notice};
use crate::parser::netlist::PinNetIndex;
use crate::report::{self, ComponentPinout};

#[derive(Debug, thiserror::Error)]
pub enum PinsightError {
    #[error("Host error: {0}")]
    Host(String),
    #[error("Invalid designator filter: {0}")]
    Filter(String),
    #[error("Invalid design snapshot: {0}")]
    Snapshot(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Other(String),
}

/// Options for an export run.
#[derive(Clone, Debug)]
pub struct ExportOptions {
    /// Designator prefixes that qualify a component for the report.
    pub designator_prefixes: Vec<String>,
    /// Title line of the generated document.
    pub report_title: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            designator_prefixes: vec!["U".to_string()],
            report_title: "IC Pinout Report".to_string(),
        }
    }
}

/// Terminal result of one export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The host has no exported net list; nothing was written.
    NoNetlist,
    /// No component passed the filter; informational, nothing was written.
    NothingToExport,
    Saved {
        component_count: usize,
        file_name: String,
    },
    Failed(String),
}

/// One-shot pinout export over a [`DesignHost`].
pub struct PinoutExporter;

impl PinoutExporter {
    /// Run one export. Every terminal branch, including failure, surfaces
    /// exactly one [`Notice`] through `host.notify`; errors never escape.
    pub async fn run(host: Arc<dyn DesignHost>, options: ExportOptions) -> ExportOutcome {
        let outcome = match Self::export(host.clone(), &options).await {
            Ok(outcome) => outcome,
            Err(e) => ExportOutcome::Failed(e.to_string()),
        };
        let notice = match &outcome {
            ExportOutcome::NoNetlist => Notice::NetlistUnavailable,
            ExportOutcome::NothingToExport => Notice::NothingToExport,
            ExportOutcome::Saved {
                component_count,
                file_name,
            } => Notice::Saved {
                component_count: *component_count,
                file_name: file_name.clone(),
            },
            ExportOutcome::Failed(message) => Notice::Failed(message.clone()),
        };
        host.notify(notice).await;
        outcome
    }

    async fn export(
        host: Arc<dyn DesignHost>,
        options: &ExportOptions,
    ) -> Result<ExportOutcome, PinsightError> {
        let raw = match host.netlist_source().await? {
            Some(raw) => raw,
            None => return Ok(ExportOutcome::NoNetlist),
        };
        let index = PinNetIndex::parse(&raw);

        let filter = DesignatorFilter::new(&options.designator_prefixes)?;
        let retained = filter.retain(host.components().await?);
        tracing::debug!("{} component(s) match the designator filter", retained.len());
        if retained.is_empty() {
            return Ok(ExportOutcome::NothingToExport);
        }

        // One pin query per retained component, dispatched as a batch and
        // awaited in dispatch order. The net index is frozen before this
        // point, so the tasks share nothing mutable.
        let mut handles = Vec::with_capacity(retained.len());
        for component in &retained {
            let host = host.clone();
            let id = component.id.clone();
            handles.push(tokio::spawn(async move { host.pins(&id).await }));
        }
        let mut entries = Vec::with_capacity(retained.len());
        for (component, handle) in retained.into_iter().zip(handles) {
            let pins = handle
                .await
                .map_err(|e| PinsightError::Other(format!("pin query task failed: {}", e)))??;
            entries.push(ComponentPinout { component, pins });
        }

        // Largest chips first; ties keep retrieval order (stable sort).
        entries.sort_by(|a, b| b.pins.len().cmp(&a.pins.len()));

        let generated_at = Local::now();
        let contents = report::render(&options.report_title, &entries, &index, generated_at);
        let file_name = format!("pinout-report-{}.md", generated_at.format("%Y-%m-%d"));
        host.save_report(&file_name, &contents).await?;
        tracing::info!("saved {} ({} component(s))", file_name, entries.len());

        Ok(ExportOutcome::Saved {
            component_count: entries.len(),
            file_name,
        })
    }
}
