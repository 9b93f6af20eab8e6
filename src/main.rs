use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use log::{error, info};
use noritsu_cleanup::cli::Cli;
use noritsu_cleanup::component::NoritsuCleaner;
use noritsu_cleanup::tools::ExifTool;
use noritsu_cleanup::{confirm_frame_names, display_summary, init};

fn main() {
    let cli = Cli::parse();
    init::init(cli.log_level());

    if let Err(e) = run(&cli) {
        error!("Program error: {e:#}");
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.resolve_config()?;
    let use_frame_names = config.options.use_frame_names;

    let exiftool = ExifTool::new(&config.options.exiftool_path);
    if !cli.dry_run {
        let version = exiftool
            .version()
            .context("exiftool is required to update timestamps")?;
        info!("using exiftool {version}");
    }

    let mut cleaner = NoritsuCleaner::new(config, exiftool)
        .with_dry_run(cli.dry_run)
        .with_progress(console::user_attended_stderr() && !cli.verbose);

    if use_frame_names && !cli.dry_run && !confirm_frame_names(cli.yes)? {
        println!("{}", style("Operation cancelled").yellow());
        return Ok(());
    }

    let result = cleaner.clean(&cli.search_path)?;
    display_summary(&result, cli.dry_run);

    info!("Program exited normally");
    Ok(())
}
