//! `sheetdxf export` command - save flat patterns as DXF

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::helpers::load_config;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::naming::{FileNamePolicy, NameStyle};
use crate::core::{ConsoleNotifier, ExportReport, OutcomeStatus, Session};
use crate::manifest::ManifestHost;

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Model file describing the assembly
    pub model: PathBuf,

    /// Directory to write DXF files to (default: desktop)
    #[arg(long, short = 'o')]
    pub output_dir: Option<PathBuf>,

    /// Identifier of the DXF translator to use
    #[arg(long)]
    pub translator: Option<String>,

    /// Skip parts whose names are not valid file names instead of renaming them
    #[arg(long)]
    pub reject_unsafe_names: bool,

    /// Name files after the part only, without thickness and quantity
    #[arg(long)]
    pub minimal_names: bool,
}

pub fn run(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let mut config = load_config(global)?;
    if args.output_dir.is_some() {
        config.output_dir = args.output_dir;
    }
    if args.translator.is_some() {
        config.translator_id = args.translator;
    }
    if args.reject_unsafe_names {
        config.file_names = Some(FileNamePolicy::Reject);
    }
    if args.minimal_names {
        config.name_style = Some(NameStyle::Minimal);
    }

    let host = ManifestHost::open(&args.model)?;
    let session = Session::activate(host, config)?;
    // Per-file notices would interleave with machine-readable output
    let machine = matches!(
        global.format,
        OutputFormat::Json | OutputFormat::Yaml | OutputFormat::Id
    );
    let mut notifier = ConsoleNotifier::new(global.quiet || machine);
    let report = session.on_execute(&mut notifier);
    session.deactivate();

    print_report(&report, global)?;

    if let Some(reason) = &report.aborted {
        return Err(miette::miette!("export aborted: {}", reason));
    }
    let failures = report.failure_count();
    if failures > 0 {
        return Err(miette::miette!("{} part(s) could not be exported", failures));
    }
    Ok(())
}

fn print_report(report: &ExportReport, global: &GlobalOpts) -> Result<()> {
    match global.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(report).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Id => {
            for path in report.exported() {
                println!("{}", path.display());
            }
        }
        _ => {
            if !global.quiet && report.aborted.is_none() {
                let skipped = report
                    .outcomes
                    .iter()
                    .filter(|o| {
                        matches!(
                            o.status,
                            OutcomeStatus::NotSheetMetal | OutcomeStatus::MissingFlatPattern
                        )
                    })
                    .count();
                println!(
                    "{} {} file(s) saved, {} part(s) skipped, {} failed.",
                    style("✓").green(),
                    style(report.exported().len()).cyan(),
                    style(skipped).cyan(),
                    style(report.failure_count()).cyan()
                );
            }
        }
    }
    Ok(())
}
