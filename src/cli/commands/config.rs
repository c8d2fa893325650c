//! `sheetdxf config` command - Configuration inspection

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::load_config;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration values
    Show,

    /// Show the path of the global configuration file
    Path,

    /// List all available configuration keys
    Keys,
}

/// Valid configuration keys
const VALID_KEYS: &[(&str, &str)] = &[
    ("output_dir", "Directory DXF files are written to (default: desktop)"),
    ("translator_id", "Identifier of the host's DXF translator"),
    ("file_names", "Unsafe part names: sanitize (default) or reject"),
    ("name_style", "File names: counted (default) or minimal"),
];

/// Run a config subcommand
pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show => run_show(global),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config).into_diagnostic()?);
            return Ok(());
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&config).into_diagnostic()?);
            return Ok(());
        }
        _ => {}
    }

    let naming = config.naming();
    println!("{}", style("Effective Configuration").bold().underlined());
    println!();
    print_value(
        "output_dir",
        config.output_dir().map(|p| p.display().to_string()).as_deref(),
    );
    print_value("translator_id", Some(config.translator_id()));
    print_value(
        "file_names",
        Some(format!("{:?}", naming.file_names).to_lowercase().as_str()),
    );
    print_value(
        "name_style",
        Some(format!("{:?}", naming.style).to_lowercase().as_str()),
    );

    println!();
    println!("{}", style("Config Sources (in priority order):").dim());
    println!("  1. Command-line options");
    println!("  2. --config file");
    match Config::global_config_path() {
        Some(path) => println!("  3. Global config ({})", path.display()),
        None => println!("  3. Global config (unavailable)"),
    }
    Ok(())
}

fn run_path() -> Result<()> {
    let path = Config::global_config_path()
        .ok_or_else(|| miette::miette!("Could not determine the config directory"))?;
    let marker = if path.exists() {
        style("(exists)").green()
    } else {
        style("(not created)").dim()
    };
    println!("{} {}", path.display(), marker);
    Ok(())
}

fn run_keys() -> Result<()> {
    for (key, description) in VALID_KEYS {
        println!("{:<16} {}", style(key).cyan(), description);
    }
    Ok(())
}

fn print_value(key: &str, value: Option<&str>) {
    match value {
        Some(v) => println!("  {:<16} {}", style(key).cyan(), v),
        None => println!("  {:<16} {}", style(key).cyan(), style("(not set)").dim()),
    }
}
