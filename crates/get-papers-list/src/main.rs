use std::path::PathBuf;

use clap::{
  builder::{ArgAction, NonEmptyStringValueParser},
  Parser,
};
use console::{style, Emoji};
use errors::GetPapersListErrors;
use getpapers::{
  classify::KeywordClassifier,
  clients::{pubmed::DEFAULT_BASE_URL, PubmedClient},
  output::{self, CsvOutcome},
  paper,
};
use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

pub mod errors;

static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
static BOOKS: Emoji<'_, '_> = Emoji("📚 ", "");
static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "");

#[derive(Parser)]
#[command(
  author,
  version,
  about = "Fetch research papers from PubMed with pharmaceutical or biotech authors"
)]
struct Cli {
  /// Search query for PubMed
  #[arg(value_parser = NonEmptyStringValueParser::new())]
  query: String,

  /// Save results to a CSV file instead of printing a table
  #[arg(short, long, value_name = "PATH")]
  file: Option<PathBuf>,

  /// Print the query and the PubMed IDs that were found
  #[arg(short, long)]
  debug: bool,

  /// Verbose mode (-v, -vv, -vvv)
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Root URL of the NCBI E-utilities service
  #[arg(long, env = "PUBMED_EUTILS_URL", default_value = DEFAULT_BASE_URL)]
  base_url: String,
}

/// Setup logging with the specified verbosity level
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_target(true)
    .init();
}

#[tokio::main]
async fn main() {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  // Failures are reported on stderr; the exit status stays 0.
  if let Err(e) = run(cli).await {
    eprintln!("{} {}", style("Error:").for_stderr().red().bold(), e);
  }
}

async fn run(cli: Cli) -> Result<(), GetPapersListErrors> {
  if cli.debug {
    println!(
      "{} Fetching papers for query: {}",
      style(LOOKING_GLASS).cyan(),
      style(&cli.query).yellow()
    );
  }

  let client = PubmedClient::new().with_base_url(&cli.base_url)?;
  trace!("Using E-utilities at: {}", client.base_url());

  let ids = client.search(&cli.query).await?;
  if cli.debug {
    println!("{} Found PubMed IDs: {:?}", style(BOOKS).cyan(), ids);
  }

  let articles = client.fetch_details(&ids).await?;
  let papers = paper::extract(&articles, &KeywordClassifier::default())?;
  debug!("Papers with company affiliations: {:?}", papers);

  if papers.is_empty() {
    println!("{} No papers found matching the criteria.", style(WARNING).yellow());
    return Ok(());
  }

  match cli.file {
    Some(path) => match output::write_csv(&papers, &path)? {
      CsvOutcome::Written(rows) => {
        debug!("Wrote {rows} rows");
        println!("{} Results saved to {}", style(SAVE).green(), style(path.display()).yellow());
      },
      CsvOutcome::NoData => println!("{} No data available to save.", style(WARNING).yellow()),
    },
    None => println!("{}", output::render_table(&papers)),
  }
  Ok(())
}
