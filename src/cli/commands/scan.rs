//! `sheetdxf scan` command - distinct parts of an assembly with counts

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{escape_csv, load_config, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::naming::{format_thickness, NamingPolicy};
use crate::core::{scan, ExportError, Host, ScanResult};
use crate::entities::PartDefinition;
use crate::manifest::ManifestHost;

#[derive(clap::Args, Debug)]
pub struct ScanArgs {
    /// Model file describing the assembly
    pub model: PathBuf,

    /// Only list sheet-metal parts
    #[arg(long)]
    pub sheet_metal: bool,
}

/// One line of scan output
#[derive(Debug, Serialize)]
pub struct ScanRow {
    pub part: String,
    pub count: u32,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness_mm: Option<String>,
    pub flat_pattern: bool,
    /// File the part would be exported to, if it is exportable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

/// Turn scan groups into display rows
pub fn rows(result: &ScanResult<'_>, naming: &NamingPolicy) -> Vec<ScanRow> {
    result
        .groups()
        .iter()
        .map(|group| {
            let part = group.representative.part();
            let (thickness_mm, flat_pattern, file_name) = match &part.definition {
                PartDefinition::SheetMetal(sm) => {
                    let file_name = sm
                        .flat_pattern
                        .as_ref()
                        .and_then(|_| {
                            naming
                                .file_name(&part.display_name, Some(sm.thickness), Some(group.count))
                                .ok()
                        })
                        .map(|n| n.file_name);
                    (
                        Some(format_thickness(sm.thickness)),
                        sm.flat_pattern.is_some(),
                        file_name,
                    )
                }
                PartDefinition::Generic => (None, false, None),
            };
            ScanRow {
                part: part.display_name.clone(),
                count: group.count,
                kind: part.definition.kind(),
                thickness_mm,
                flat_pattern,
                file_name,
            }
        })
        .collect()
}

pub fn run(args: ScanArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let host = ManifestHost::open(&args.model)?;
    let document = host.active_document();
    let assembly = document
        .and_then(|d| d.as_assembly())
        .ok_or_else(|| ExportError::NotAnAssembly {
            document: document.map(|d| d.display_name().to_string()),
        })?;

    let result = scan(assembly);
    let mut rows = rows(&result, &config.naming());
    if args.sheet_metal {
        rows.retain(|r| r.kind == "sheet-metal");
    }

    let format = match global.format {
        OutputFormat::Auto => OutputFormat::Tsv,
        f => f,
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&rows).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&rows).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Csv => {
            println!("part,count,kind,thickness_mm,flat_pattern,file_name");
            for row in &rows {
                println!(
                    "{},{},{},{},{},{}",
                    escape_csv(&row.part),
                    row.count,
                    row.kind,
                    row.thickness_mm.as_deref().unwrap_or(""),
                    row.flat_pattern,
                    escape_csv(row.file_name.as_deref().unwrap_or(""))
                );
            }
        }
        OutputFormat::Tsv => {
            println!(
                "{:<30} {:<6} {:<12} {:<10} {:<5} {}",
                style("PART").bold(),
                style("QTY").bold(),
                style("KIND").bold(),
                style("THK (mm)").bold(),
                style("FLAT").bold(),
                style("FILE").bold()
            );
            println!("{}", "-".repeat(100));
            for row in &rows {
                println!(
                    "{:<30} {:<6} {:<12} {:<10} {:<5} {}",
                    truncate_str(&row.part, 28),
                    row.count,
                    row.kind,
                    row.thickness_mm.as_deref().unwrap_or("-"),
                    if row.flat_pattern { "yes" } else { "no" },
                    row.file_name.as_deref().unwrap_or("-")
                );
            }

            if !global.quiet {
                println!();
                println!(
                    "{} distinct part(s), {} occurrence(s) in {}.",
                    style(result.len()).cyan(),
                    style(result.total_occurrences()).cyan(),
                    assembly.display_name
                );
            }
        }
        OutputFormat::Id => {
            for row in &rows {
                println!("{}", row.part);
            }
        }
        OutputFormat::Md => {
            let mut table = Builder::default();
            table.push_record(["Part", "Qty", "Kind", "Thickness (mm)", "Flat", "File"]);
            for row in &rows {
                table.push_record([
                    row.part.clone(),
                    row.count.to_string(),
                    row.kind.to_string(),
                    row.thickness_mm.clone().unwrap_or_default(),
                    if row.flat_pattern { "yes" } else { "no" }.to_string(),
                    row.file_name.clone().unwrap_or_default(),
                ]);
            }
            println!("{}", table.build().with(Style::markdown()).to_string());
        }
        OutputFormat::Auto => unreachable!(),
    }

    Ok(())
}
