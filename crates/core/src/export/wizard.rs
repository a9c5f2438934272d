//! Export wizard state machine.
//!
//! Two steps: `Init` collects the selection form, `submit` generates the
//! report and lands in `Done`. Generation spools the handler output through
//! a temporary file which is removed on every exit path, success or error.

use std::io::{Read, Seek, SeekFrom, Write};
use std::path::PathBuf;
use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tempfile::NamedTempFile;

use tessera_shared::clock::{Clock, month_start};

use super::error::{ExportError, WizardError};
use super::registry::ReportRegistry;
use super::types::{ExportForm, ExportPayload, WizardStep};

/// Two-step export flow over a report registry.
///
/// A wizard value is request-scoped: create one per export run. A failed
/// `submit` leaves the wizard in `Init`; the run is abandoned by dropping
/// the value.
pub struct ExportWizard {
    registry: Arc<ReportRegistry>,
    clock: Arc<dyn Clock>,
    spool_dir: Option<PathBuf>,
    step: WizardStep,
}

impl ExportWizard {
    /// Creates a wizard in the `Init` step.
    #[must_use]
    pub fn new(registry: Arc<ReportRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self {
            registry,
            clock,
            spool_dir: None,
            step: WizardStep::Init,
        }
    }

    /// Overrides the spool directory (system temp dir by default).
    #[must_use]
    pub fn with_spool_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.spool_dir = Some(dir.into());
        self
    }

    /// Current wizard step.
    #[must_use]
    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Selection form pre-filled with default dates.
    ///
    /// `from_date` defaults to the first day of the current month and
    /// `to_date` to today, both per the injected clock.
    #[must_use]
    pub fn default_form(&self, report: impl Into<String>) -> ExportForm {
        let today = self.clock.today();
        ExportForm {
            from_date: month_start(today),
            to_date: today,
            party: None,
            report: report.into(),
        }
    }

    /// Abandons the wizard without generating anything.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the wizard is in `Init`.
    pub fn cancel(self) -> Result<(), WizardError> {
        match self.step {
            WizardStep::Init => Ok(()),
            from => Err(WizardError::InvalidTransition {
                from,
                action: "cancel",
            }),
        }
    }

    /// Submits the selection form and generates the report.
    ///
    /// On success the wizard moves to `Done`; a wizard generates at most one
    /// payload.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` unless the wizard is in `Init`
    /// - `UnknownReport` when `form.report` is not registered
    /// - handler and spool I/O failures, propagated unmodified
    pub fn submit(&mut self, form: &ExportForm) -> Result<ExportPayload, WizardError> {
        if self.step != WizardStep::Init {
            return Err(WizardError::InvalidTransition {
                from: self.step,
                action: "submit",
            });
        }

        let payload = self.generate(form)?;
        self.step = WizardStep::Done;
        Ok(payload)
    }

    // Spool the handler output through a temp file and read it back.
    // `spool` drops on both the success and error path, removing the file.
    fn generate(&self, form: &ExportForm) -> Result<ExportPayload, ExportError> {
        let mut spool = match &self.spool_dir {
            Some(dir) => NamedTempFile::new_in(dir)?,
            None => NamedTempFile::new()?,
        };

        self.registry.invoke(&form.report, form, spool.as_file_mut())?;
        spool.as_file_mut().flush()?;

        let mut content = Vec::new();
        spool.as_file_mut().seek(SeekFrom::Start(0))?;
        spool.as_file_mut().read_to_end(&mut content)?;

        Ok(ExportPayload {
            filename: format!("{}.csv", form.report),
            file: BASE64.encode(content),
        })
    }
}
