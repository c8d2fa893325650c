//! Plugin session - owns the host for the lifetime of the add-in
//!
//! A session is created when the host activates the add-in and consumed
//! when it deactivates. It registers the export command on activation and
//! removes it on teardown.

use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info, warn};

use crate::core::config::Config;
use crate::core::error::{ExportError, HostError};
use crate::core::host::{CommandDefinition, CommandId, Host};
use crate::core::notify::{Notifier, Severity};
use crate::core::orchestrator::{ExportReport, Orchestrator};
use crate::core::scanner::scan;
use crate::entities::Document;

/// The single command the add-in contributes
pub const EXPORT_COMMAND: CommandDefinition = CommandDefinition {
    internal_name: "SheetDxfExport",
    display_name: "Save in DXF",
    description: "Save SheetMetal DXF",
    panel: "User Commands",
};

pub struct Session<H: Host> {
    host: H,
    command: CommandId,
    config: Config,
}

impl<H: Host> Session<H> {
    /// Activate the add-in: register the export command with the host
    pub fn activate(mut host: H, config: Config) -> Result<Self, HostError> {
        let command = host.add_command(&EXPORT_COMMAND)?;
        debug!(command = %command, "registered export command");
        Ok(Self {
            host,
            command,
            config,
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn command(&self) -> &CommandId {
        &self.command
    }

    /// Command handler: export the host's active document
    ///
    /// Every error is turned into a notification; nothing propagates back
    /// into the host.
    pub fn on_execute(&self, notifier: &mut dyn Notifier) -> ExportReport {
        let document = self.host.active_document();
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            self.export_flat_patterns(document, &mut *notifier)
        }));

        match result {
            Ok(Ok(report)) => report,
            Ok(Err(err)) => {
                warn!("{}", err);
                notifier.notify(Severity::Error, &err.to_string());
                ExportReport::aborted(err.to_string())
            }
            Err(_) => {
                let message = "export command failed unexpectedly";
                warn!("{}", message);
                notifier.notify(Severity::Error, message);
                ExportReport::aborted(message)
            }
        }
    }

    /// Scan `document` and export a DXF for every sheet-metal part in it
    pub fn export_flat_patterns(
        &self,
        document: Option<&Document>,
        notifier: &mut dyn Notifier,
    ) -> Result<ExportReport, ExportError> {
        let assembly = document
            .and_then(Document::as_assembly)
            .ok_or_else(|| ExportError::NotAnAssembly {
                document: document.map(|d| d.display_name().to_string()),
            })?;

        let output_dir = self
            .config
            .output_dir()
            .ok_or(ExportError::OutputDirectoryUnresolved)?;
        std::fs::create_dir_all(&output_dir).map_err(|source| ExportError::OutputDirectory {
            path: output_dir.clone(),
            source,
        })?;

        let groups = scan(assembly);
        let report = Orchestrator::new(
            &self.host,
            self.config.translator_id(),
            self.config.naming(),
            &output_dir,
        )
        .run(&groups, notifier);

        info!(
            assembly = %assembly.display_name,
            exported = report.exported().len(),
            failed = report.failure_count(),
            "export finished"
        );
        Ok(report)
    }

    /// Deactivate the add-in and hand the host back
    pub fn deactivate(mut self) -> H {
        if let Err(err) = self.host.remove_command(&self.command) {
            warn!("could not remove command {}: {}", self.command, err);
        }
        self.host
    }
}
