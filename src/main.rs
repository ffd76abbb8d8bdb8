//! streamhealth - Stream health verdict for a LiveStats transmitter log
//!
//! Reads one session log and prints whether the stream was Good, Marginal or Poor.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use streamhealth::{analyze_reader, AnalyzerSettings, Compatibility, MalformedLinePolicy};

#[derive(Parser, Debug)]
#[command(version, about = "Stream health verdict for a LiveStats transmitter log")]
struct Args {
    /// Log file to analyze (prompted for when omitted)
    file: Option<PathBuf>,
    /// Settings JSON to use instead of the one in the config directory
    #[arg(long)]
    config: Option<PathBuf>,
    /// Skip malformed lines instead of aborting
    #[arg(long)]
    skip_malformed: bool,
    /// Reproduce the historical reporting quirks
    #[arg(long)]
    reference: bool,
    /// Also print the individual metrics
    #[arg(short, long)]
    verbose: bool,
    /// Print the full report as JSON
    #[arg(long)]
    json: bool,
}

fn prompt_file_name() -> Result<PathBuf> {
    print!("File name: ");
    io::stdout().flush()?;
    let mut name = String::new();
    io::stdin()
        .read_line(&mut name)
        .context("reading file name")?;
    Ok(PathBuf::from(name.trim()))
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => AnalyzerSettings::load_from(path)
            .with_context(|| format!("loading settings {path:?}"))?,
        None => AnalyzerSettings::load(),
    };
    if args.skip_malformed {
        settings.on_malformed = MalformedLinePolicy::Skip;
    }
    if args.reference {
        settings.compatibility = Compatibility::reference();
    }

    let path = match args.file {
        Some(path) => path,
        None => prompt_file_name()?,
    };

    if !path.exists() {
        println!(
            "Sorry, the file could not be opened or found. Please make sure it exists. Have a great day!"
        );
        return Ok(());
    }

    let file = File::open(&path).with_context(|| format!("opening {path:?}"))?;
    let report = analyze_reader(BufReader::new(file), &settings)
        .with_context(|| format!("analyzing {path:?}"))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Stream health: {}", report.overall_health);

    if args.verbose {
        println!();
        println!("Total time: {}", report.total_time);
        println!("Lost Frames: {}", report.lost_frame_events);
        println!("Frame loss metric: {}", report.frame_lost_metric);
        println!("Frame size change metric: {}", report.frame_size_change_metric);
        println!("Frame size metric: {}", report.frame_size_metric);
    }

    println!();
    Ok(())
}
