//! `sheetdxf name` command - preview an export file name

use console::style;
use miette::Result;

use crate::cli::helpers::load_config;
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct NameArgs {
    /// Part display name (e.g. "Bracket.ipt")
    pub display_name: String,

    /// Sheet thickness in model units (cm)
    #[arg(long, short = 't')]
    pub thickness: Option<f64>,

    /// Number of occurrences in the assembly
    #[arg(long, short = 'n')]
    pub count: Option<u32>,
}

pub fn run(args: NameArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let name = config
        .naming()
        .file_name(&args.display_name, args.thickness, args.count)?;

    println!("{}", name.file_name);
    if let Some(original) = name.renamed_from {
        if !global.quiet {
            eprintln!(
                "{} renamed from '{}'",
                style("!").yellow().bold(),
                original
            );
        }
    }
    Ok(())
}
