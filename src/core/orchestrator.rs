//! Export orchestrator - one DXF per sheet-metal part with a flat pattern
//!
//! Each group is exported independently. A failure while naming or writing
//! one part is reported and the next group is processed; only a missing
//! translator stops the run, since no part could be written without it.

use serde::Serialize;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::core::error::{ExportError, TranslatorError};
use crate::core::host::{ExportOptions, Host, Translator};
use crate::core::naming::NamingPolicy;
use crate::core::notify::{Notifier, Severity};
use crate::core::scanner::{Group, ScanResult};
use crate::entities::{FlatPattern, PartDefinition};

/// One file to write
#[derive(Debug, Clone)]
pub struct ExportJob<'a> {
    pub flat_pattern: &'a FlatPattern,
    pub path: PathBuf,
    /// Display name of the source part
    pub part: &'a str,
    pub count: u32,
    /// File name before sanitizing, if it had to be changed
    pub renamed_from: Option<String>,
}

/// What happened to one group
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    Exported { path: PathBuf },
    NotSheetMetal,
    MissingFlatPattern,
    InvalidFileName { name: String },
    /// Another part was already saved under the same file name
    NameCollision { name: String, with: String },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupOutcome {
    pub part: String,
    pub count: u32,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

/// Summary of one export run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExportReport {
    pub outcomes: Vec<GroupOutcome>,

    /// Why the run stopped early, if it did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aborted: Option<String>,
}

impl ExportReport {
    /// A report for a run that stopped before any group was processed
    pub fn aborted(reason: impl Into<String>) -> Self {
        Self {
            outcomes: Vec::new(),
            aborted: Some(reason.into()),
        }
    }

    /// Paths of all files written
    pub fn exported(&self) -> Vec<&Path> {
        self.outcomes
            .iter()
            .filter_map(|o| match &o.status {
                OutcomeStatus::Exported { path } => Some(path.as_path()),
                _ => None,
            })
            .collect()
    }

    /// Number of groups that were attempted but could not be written
    pub fn failure_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| {
                matches!(
                    o.status,
                    OutcomeStatus::Failed { .. }
                        | OutcomeStatus::InvalidFileName { .. }
                        | OutcomeStatus::NameCollision { .. }
                )
            })
            .count()
    }

    pub fn is_success(&self) -> bool {
        self.aborted.is_none() && self.failure_count() == 0
    }
}

/// Drives the translator over the groups of a scan
pub struct Orchestrator<'h> {
    host: &'h dyn Host,
    translator_id: &'h str,
    naming: NamingPolicy,
    output_dir: &'h Path,
    options: ExportOptions,
}

impl<'h> Orchestrator<'h> {
    pub fn new(
        host: &'h dyn Host,
        translator_id: &'h str,
        naming: NamingPolicy,
        output_dir: &'h Path,
    ) -> Self {
        Self {
            host,
            translator_id,
            naming,
            output_dir,
            options: ExportOptions::default(),
        }
    }

    /// Export every eligible group, reporting problems through `notifier`
    pub fn run(&self, scan: &ScanResult<'_>, notifier: &mut dyn Notifier) -> ExportReport {
        let mut report = ExportReport::default();
        let mut translator: Option<&dyn Translator> = None;
        let mut saved: HashMap<PathBuf, &str> = HashMap::new();

        for group in scan.groups() {
            let part = group.identity.display_name();
            let outcome = |status| GroupOutcome {
                part: part.to_string(),
                count: group.count,
                status,
            };

            let job = match self.build_job(group) {
                Ok(Some(job)) => job,
                Ok(None) => {
                    debug!(part, "not a sheet-metal part, skipping");
                    report.outcomes.push(outcome(OutcomeStatus::NotSheetMetal));
                    continue;
                }
                Err(err) => {
                    warn!(part, "{}", err);
                    notifier.notify(Severity::Warning, &err.to_string());
                    let status = match err {
                        ExportError::InvalidFileName { name, .. } => {
                            OutcomeStatus::InvalidFileName { name }
                        }
                        _ => OutcomeStatus::MissingFlatPattern,
                    };
                    report.outcomes.push(outcome(status));
                    continue;
                }
            };

            if let Some(original) = &job.renamed_from {
                let message = format!(
                    "file name for {} changed from '{}' to '{}'",
                    part,
                    original,
                    job.path.file_name().unwrap_or_default().to_string_lossy()
                );
                warn!(part, "{}", message);
                notifier.notify(Severity::Warning, &message);
            }

            if let Some(&other) = saved.get(&job.path) {
                let name = job.path.file_name().unwrap_or_default().to_string_lossy();
                let err = ExportError::FileNameCollision {
                    part: part.to_string(),
                    other: other.to_string(),
                    name: name.to_string(),
                };
                warn!(part, "{}", err);
                notifier.notify(Severity::Error, &err.to_string());
                report.outcomes.push(outcome(OutcomeStatus::NameCollision {
                    name: name.into_owned(),
                    with: other.to_string(),
                }));
                continue;
            }

            translator = translator.or_else(|| self.host.translator(self.translator_id));
            let Some(translator) = translator else {
                let err = ExportError::ExportCapabilityUnavailable {
                    id: self.translator_id.to_string(),
                };
                warn!("{}", err);
                notifier.notify(Severity::Error, &err.to_string());
                report.aborted = Some(err.to_string());
                return report;
            };

            match self.execute(translator, &job) {
                Ok(()) => {
                    info!(part, path = %job.path.display(), "saved flat pattern");
                    notifier.notify(
                        Severity::Info,
                        &format!(
                            "Saved {} ({} pcs) → {}",
                            part,
                            job.count,
                            job.path.display()
                        ),
                    );
                    saved.insert(job.path.clone(), part);
                    report.outcomes.push(outcome(OutcomeStatus::Exported {
                        path: job.path.clone(),
                    }));
                }
                Err(err) => {
                    warn!(part, "{}", err);
                    notifier.notify(Severity::Error, &err.to_string());
                    report.outcomes.push(outcome(OutcomeStatus::Failed {
                        error: err.to_string(),
                    }));
                }
            }
        }

        report
    }

    /// Build the job for a group; `Ok(None)` for parts that are not sheet metal
    fn build_job<'a>(&self, group: &Group<'a>) -> Result<Option<ExportJob<'a>>, ExportError> {
        let part = group.representative.part();
        let sheet_metal = match &part.definition {
            PartDefinition::SheetMetal(sm) => sm,
            PartDefinition::Generic => return Ok(None),
        };

        let flat_pattern = sheet_metal.flat_pattern.as_ref().ok_or_else(|| {
            ExportError::MissingFlatPattern {
                part: part.display_name.clone(),
            }
        })?;

        let (path, name) = self.naming.output_path(
            self.output_dir,
            &part.display_name,
            Some(sheet_metal.thickness),
            Some(group.count),
        )?;
        Ok(Some(ExportJob {
            flat_pattern,
            path,
            part: &part.display_name,
            count: group.count,
            renamed_from: name.renamed_from,
        }))
    }

    fn execute(&self, translator: &dyn Translator, job: &ExportJob<'_>) -> Result<(), ExportError> {
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            translator.save_copy_as(job.flat_pattern, &self.options, &job.path)
        }));

        let source = match result {
            Ok(Ok(())) => return Ok(()),
            Ok(Err(err)) => err,
            Err(payload) => TranslatorError::Failed(panic_message(payload.as_ref())),
        };

        Err(ExportError::ExportFailed {
            part: job.part.to_string(),
            source,
        })
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("translator panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("translator panicked: {}", s)
    } else {
        "translator panicked".to_string()
    }
}
