//! Print job executor
//!
//! Handles the actual sending of label scripts to printers.

use std::time::Duration;

use tracing::{info, instrument, warn};
use tspl_printer::{NetworkPrinter, Printer, encode_for_codepage};

use super::script::CommandScript;
use super::settings::GeometrySettings;
use crate::error::{LabelError, LabelResult};

/// Print job executor
///
/// Resolves a printer queue name to a network printer, encodes the script
/// for the printer's code page and submits it as a single raw job.
#[derive(Debug, Clone)]
pub struct PrintExecutor {
    codepage: String,
    timeout: Duration,
}

impl PrintExecutor {
    pub fn new(codepage: impl Into<String>, timeout: Duration) -> Self {
        Self {
            codepage: codepage.into(),
            timeout,
        }
    }

    /// Network printer for a queue name
    ///
    /// Configured queues map to their address; otherwise the name itself
    /// must be an address ("host" or "host:port").
    pub fn resolve_printer(
        &self,
        printer: &str,
        settings: &GeometrySettings,
    ) -> LabelResult<NetworkPrinter> {
        let addr = match settings.printer_address(printer) {
            Some(addr) => addr,
            None if printer.trim().is_empty() || printer.contains(char::is_whitespace) => {
                return Err(LabelError::UnknownPrinter(printer.to_string()));
            }
            None => printer,
        };

        Ok(NetworkPrinter::from_addr(addr)?.with_timeout(self.timeout))
    }

    /// Script bytes as sent to the printer
    pub fn encode(&self, script: &CommandScript) -> Vec<u8> {
        encode_for_codepage(&script.render(), &self.codepage)
    }

    /// Send a script to any printer adapter
    #[instrument(
        skip(self, printer, script),
        fields(labels = script.label_count(), rows = script.row_count())
    )]
    pub async fn send<P: Printer>(&self, printer: &P, script: &CommandScript) -> LabelResult<()> {
        let data = self.encode(script);
        match printer.print(&data).await {
            Ok(()) => {
                info!(bytes = data.len(), "Label job sent");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Label job failed");
                Err(e.into())
            }
        }
    }

    /// Send a script to a named printer queue
    #[instrument(skip(self, script, settings))]
    pub async fn print_to(
        &self,
        printer: &str,
        script: &CommandScript,
        settings: &GeometrySettings,
    ) -> LabelResult<()> {
        let target = self.resolve_printer(printer, settings)?;
        self.send(&target, script).await
    }

    /// Check whether a named printer queue is reachable
    pub async fn is_online(&self, printer: &str, settings: &GeometrySettings) -> LabelResult<bool> {
        let target = self.resolve_printer(printer, settings)?;
        Ok(target.is_online().await)
    }
}

impl Default for PrintExecutor {
    fn default() -> Self {
        Self::new("utf-8", Duration::from_secs(5))
    }
}
