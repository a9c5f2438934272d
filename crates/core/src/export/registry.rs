//! Report registry.
//!
//! An explicit key-to-handler mapping. Contributing modules register their
//! reports at startup; there is deliberately no reflective discovery.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;

use super::error::ExportError;
use super::types::{ExportForm, ReportMeta};

/// A single CSV report variant.
///
/// Implementations write complete CSV content for the submitted selection
/// criteria to `out` before returning. Whatever they write is trusted as-is;
/// the registry enforces no shape on the output.
pub trait ReportHandler: Send + Sync {
    /// Human-readable description, shown in the selection step.
    fn description(&self) -> &str;

    /// Writes the report as CSV to `out`.
    fn write_csv(&self, form: &ExportForm, out: &mut dyn Write) -> Result<(), ExportError>;
}

/// Adapter so plain functions can serve as report handlers.
struct FnReport<F> {
    description: String,
    write: F,
}

impl<F> ReportHandler for FnReport<F>
where
    F: Fn(&ExportForm, &mut dyn Write) -> Result<(), ExportError> + Send + Sync,
{
    fn description(&self) -> &str {
        &self.description
    }

    fn write_csv(&self, form: &ExportForm, out: &mut dyn Write) -> Result<(), ExportError> {
        (self.write)(form, out)
    }
}

/// Registry of report handlers, keyed by report name.
#[derive(Default)]
pub struct ReportRegistry {
    handlers: BTreeMap<String, Box<dyn ReportHandler>>,
}

impl ReportRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler under `key`.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::DuplicateReport` if the key is already taken.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        handler: Box<dyn ReportHandler>,
    ) -> Result<(), ExportError> {
        let key = key.into();
        if self.handlers.contains_key(&key) {
            return Err(ExportError::DuplicateReport(key));
        }
        self.handlers.insert(key, handler);
        Ok(())
    }

    /// Registers a plain function as a report handler.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::DuplicateReport` if the key is already taken.
    pub fn register_fn<F>(
        &mut self,
        key: impl Into<String>,
        description: impl Into<String>,
        write: F,
    ) -> Result<(), ExportError>
    where
        F: Fn(&ExportForm, &mut dyn Write) -> Result<(), ExportError> + Send + Sync + 'static,
    {
        self.register(
            key,
            Box::new(FnReport {
                description: description.into(),
                write,
            }),
        )
    }

    /// Lists all registered reports, ordered by key.
    #[must_use]
    pub fn list(&self) -> Vec<ReportMeta> {
        self.handlers
            .iter()
            .map(|(key, handler)| ReportMeta {
                key: key.clone(),
                description: handler.description().to_string(),
            })
            .collect()
    }

    /// Looks up a handler by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&dyn ReportHandler> {
        self.handlers.get(key).map(Box::as_ref)
    }

    /// Invokes the handler registered under `key` with `form` and `out`.
    ///
    /// The stream is untouched when the key is unknown.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::UnknownReport` for an unregistered key; handler
    /// failures propagate unmodified.
    pub fn invoke(
        &self,
        key: &str,
        form: &ExportForm,
        out: &mut dyn Write,
    ) -> Result<(), ExportError> {
        let handler = self
            .get(key)
            .ok_or_else(|| ExportError::UnknownReport(key.to_string()))?;
        handler.write_csv(form, out)
    }

    /// Number of registered reports.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true if no reports are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for ReportRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportRegistry")
            .field("keys", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}
