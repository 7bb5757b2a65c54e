use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use colored::*;
use odsview_core::OdsViewConfig;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process;

const USAGE: &str = "Usage: ods2html <input.ods> <output.html>";
const USAGE_EXIT_CODE: i32 = 1;

#[derive(Parser)]
#[command(name = "ods2html")]
#[command(
    about = "Convert an ODS spreadsheet into HTML tables (or JSON for a .json output)",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Path to the ODS file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file (.html, or .json for the JSON table format)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,
}

/// What the command line asks for
enum Invocation {
    Convert(Cli),
    /// `--help` or `--version`, printed by clap
    Info(clap::Error),
    /// Wrong number or shape of arguments
    Usage,
}

fn parse_args<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Invocation::Convert(cli),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            Invocation::Info(e)
        }
        Err(e) => {
            log::debug!("Argument error: {e}");
            Invocation::Usage
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match parse_args(std::env::args_os()) {
        Invocation::Convert(cli) => cli,
        Invocation::Info(e) => e.exit(),
        Invocation::Usage => {
            eprintln!("{USAGE}");
            process::exit(USAGE_EXIT_CODE);
        }
    };

    if let Err(e) = run(&cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = OdsViewConfig::discover(None).context("Failed to load odsview.toml")?;

    let sheets = odsview_core::convert_file(&cli.input, &cli.output, &config.convert)?;
    log::info!("Wrote {} sheet(s)", sheets);

    println!(
        "{}",
        format!(
            "Converted {} to {}",
            cli.input.display(),
            cli.output.display()
        )
        .green()
    );
    Ok(())
}
