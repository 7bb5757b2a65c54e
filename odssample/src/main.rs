use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use odsview_core::sample::{SAMPLE_FILE_NAME, write_sample};

#[derive(Parser)]
#[command(name = "odssample")]
#[command(about = "Write the two-sheet sample spreadsheet to sample.ods", long_about = None)]
#[command(version)]
struct Cli {}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    Cli::parse();

    write_sample(SAMPLE_FILE_NAME)
        .with_context(|| format!("Failed to write {}", SAMPLE_FILE_NAME))?;
    log::debug!("Sample written to {}", SAMPLE_FILE_NAME);

    println!(
        "{}",
        format!("Sample ODS file created: {}", SAMPLE_FILE_NAME).green()
    );
    Ok(())
}
