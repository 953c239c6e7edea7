//! resume-pdf CLI - render a JSON resume to PDF

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use resume_pdf::layout::PaginationPolicy;
use resume_pdf::resume::{generate, ResumeRecord};
use resume_pdf::Config;

#[derive(Parser)]
#[command(name = "resume-pdf")]
#[command(version)]
#[command(about = "Render a JSON resume into a paginated PDF", long_about = None)]
struct Cli {
    /// Resume data (JSON)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output PDF (overrides the configuration file)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Layout configuration (JSON)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Draw a band in the highlight colour across the top of the first page
    #[arg(long)]
    header_strip: bool,

    /// When to start a new page
    #[arg(long, value_enum)]
    pagination: Option<Pagination>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Pagination {
    /// Break once the cursor has passed the bottom margin
    Lagging,
    /// Break before the cursor would pass the bottom margin
    Proactive,
}

impl From<Pagination> for PaginationPolicy {
    fn from(pagination: Pagination) -> Self {
        match pagination {
            Pagination::Lagging => PaginationPolicy::Lagging,
            Pagination::Proactive => PaginationPolicy::Proactive,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> resume_pdf::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(output) = cli.output {
        config.output = output;
    }
    if cli.header_strip {
        config.header_strip = true;
    }
    if let Some(pagination) = cli.pagination {
        config.pagination = pagination.into();
    }

    let record = ResumeRecord::from_path(&cli.input)?;
    let summary = generate(&record, &config)?;

    for warning in &summary.warnings {
        eprintln!(
            "warning: a paragraph on page {} is {} tall but only {} fits",
            warning.page + 1,
            warning.block_height,
            warning.available_height
        );
    }
    println!("{} ({} page(s))", config.output.display(), summary.pages);
    Ok(())
}
