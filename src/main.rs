use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

mod dates;
mod gains;
mod records;
mod report;

/// Summarise capital gains from a disposals CSV, split into short term and
/// long term holdings per asset.
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    /// CSV file of disposals, with asset, proceeds, cost basis and the
    /// acquisition and disposition dates
    file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let file = File::open(&cli.file)
        .with_context(|| format!("failed to open {}", cli.file.display()))?;
    let records = records::read_csv(BufReader::new(file))?;
    log::info!(
        "Read {} disposal records from {}",
        records.len(),
        cli.file.display()
    );

    let gains = gains::calculate_gains(&records)?;
    print!("{}", report::render(&gains));

    Ok(())
}
