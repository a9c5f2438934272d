//! Export data types.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tessera_shared::types::PartyId;

/// Selection criteria for a report export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportForm {
    /// Start of the reporting period.
    pub from_date: NaiveDate,
    /// End of the reporting period.
    pub to_date: NaiveDate,
    /// Party to restrict the report to, if any.
    pub party: Option<PartyId>,
    /// Key of the registered report to run.
    pub report: String,
}

/// Finished export, ready for download.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportPayload {
    /// Download filename, `<report-key>.csv`.
    pub filename: String,
    /// Base64-encoded CSV content.
    pub file: String,
}

/// A registered report, as shown in the selection step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Registry key.
    pub key: String,
    /// Human-readable description.
    pub description: String,
}

/// Step of the export wizard.
///
/// The wizard starts in `Init` (collect selection criteria) and moves to
/// `Done` once a report has been generated. `Done` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    /// Collecting selection criteria.
    Init,
    /// Report generated and handed out.
    Done,
}

impl WizardStep {
    /// Returns the string representation of the step.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Done => "done",
        }
    }

    /// Parses a step from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "init" => Some(Self::Init),
            "done" => Some(Self::Done),
            _ => None,
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
