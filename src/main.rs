use clap::Parser;
use miette::Result;
use sheetdxf::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior so piping to `head` exits quietly
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    let default_filter = if global.verbose {
        "sheetdxf=debug"
    } else {
        "sheetdxf=error"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Scan(args) => sheetdxf::cli::commands::scan::run(args, &global),
        Commands::Export(args) => sheetdxf::cli::commands::export::run(args, &global),
        Commands::Name(args) => sheetdxf::cli::commands::name::run(args, &global),
        Commands::Config(cmd) => sheetdxf::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => sheetdxf::cli::commands::completions::run(args),
    }
}
