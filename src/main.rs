//! osis2usfm - OSIS to USFM converter

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use osis2usfm::{BookNames, ConvertConfig, Converter};

#[derive(Parser)]
#[command(name = "osis2usfm")]
#[command(version, about = "Convert an OSIS Bible into per-book USFM files", long_about = None)]
#[command(after_help = "EXAMPLES:
    osis2usfm kjv.osis                  Write kjv_01_GEN.usfm ... kjv_66_REV.usfm
    osis2usfm kjv.osis booknames.txt    Fill \\h and \\toc2 from ID=Name lines
    osis2usfm -i kjv.osis               List books without writing files")]
struct Cli {
    /// Input OSIS XML file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Book names file with one ID=Name entry per line
    #[arg(value_name = "BOOKNAMES")]
    names: Option<PathBuf>,

    /// Write output files into DIR instead of next to the input
    #[arg(short, long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Show books found in the input without converting
    #[arg(short, long)]
    info: bool,

    /// Suppress output messages
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let result = if cli.info {
        show_info(&cli)
    } else {
        convert(&cli)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let default_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn converter(cli: &Cli) -> osis2usfm::Result<Converter> {
    let names = BookNames::load_optional(cli.names.as_deref())?;
    let mut config = ConvertConfig::new().with_names(names);
    if let Some(dir) = &cli.out_dir {
        config = config.with_out_dir(dir);
    }
    Ok(Converter::with_config(config))
}

fn convert(cli: &Cli) -> osis2usfm::Result<()> {
    let written = converter(cli)?.convert_file(&cli.input)?;
    if !cli.quiet {
        println!("Converted {} books from {}", written.len(), cli.input.display());
    }
    Ok(())
}

fn show_info(cli: &Cli) -> osis2usfm::Result<()> {
    let bible = osis2usfm::parse_file(&cli.input)?;
    let summaries = converter(cli)?.survey(&bible)?;

    println!("File: {}", cli.input.display());
    println!("Testaments: {}", bible.testaments.len());
    println!("Books: {}", summaries.len());
    for book in &summaries {
        println!(
            "{:02} {:<4} {:<24} {:>4} chapters {:>6} verses",
            book.slot.sequence(),
            book.slot.id(),
            book.name,
            book.chapters,
            book.verses,
        );
    }

    Ok(())
}
