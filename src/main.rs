use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use is_terminal::IsTerminal;
use paperscout::config::ToolConfig;
use paperscout::{BlockingPaperTools, PaperMetadata, PaperRecord, PaperTools};

/// paperscout - resilient Semantic Scholar search, metadata, and PDF-link tools
#[derive(Parser, Debug)]
#[command(name = "paperscout")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search papers, look up metadata, and find PDF links on Semantic Scholar", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (-v, -vv, -vvv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Per-attempt request timeout in seconds (overrides the config file)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Run the operation through the blocking client on a worker thread
    #[arg(long, global = true, default_value_t = false)]
    blocking: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
}

impl OutputFormat {
    fn wants_json(self) -> bool {
        match self {
            OutputFormat::Json => true,
            OutputFormat::Table => false,
            OutputFormat::Auto => !std::io::stdout().is_terminal(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search for papers with a free-text query
    Search {
        /// Free-text search query
        query: String,

        /// Maximum number of results (overrides the config file)
        #[arg(long, short)]
        limit: Option<usize>,
    },
    /// Look up metadata for a paper by Semantic Scholar ID, DOI, or arXiv ID
    Metadata {
        /// Opaque paper identifier
        paper_id: String,
    },
    /// Find a direct PDF link on a paper's page
    PdfLink {
        /// Paper identifier or full paper page URL
        id_or_url: String,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("paperscout={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => ToolConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ToolConfig::default(),
    };
    let search_limit = match &cli.command {
        Commands::Search { limit, .. } => *limit,
        _ => None,
    };
    let config = apply_cli_overrides(config, cli.timeout, search_limit);

    let json = cli.output.wants_json();

    if cli.blocking {
        let command = cli.command;
        tokio::task::spawn_blocking(move || run_blocking(command, config, json))
            .await
            .context("blocking worker panicked")?
    } else {
        run_async(cli.command, config, json).await
    }
}

/// Flags beat the config file, which beats the built-in defaults; an absent
/// flag leaves the loaded value alone.
fn apply_cli_overrides(
    mut config: ToolConfig,
    timeout_secs: Option<u64>,
    search_limit: Option<usize>,
) -> ToolConfig {
    if let Some(secs) = timeout_secs {
        config.timeout = Duration::from_secs(secs);
    }
    if let Some(limit) = search_limit {
        config.search_limit = limit;
    }
    config
}

async fn run_async(command: Commands, config: ToolConfig, json: bool) -> Result<()> {
    let tools = PaperTools::new(config)?;

    match command {
        Commands::Search { query, .. } => {
            let papers = tools.search_papers(&query).await?;
            print_search_results(&papers, json)
        }
        Commands::Metadata { paper_id } => match tools.get_paper_metadata(&paper_id).await {
            Ok(meta) => print_metadata(&meta),
            Err(err) => {
                // The metadata surface always answers with a JSON mapping
                println!("{}", serde_json::to_string_pretty(&err.to_error_value())?);
                std::process::exit(1);
            }
        },
        Commands::PdfLink { id_or_url } => {
            let link = tools.find_pdf_link(&id_or_url).await?;
            print_pdf_link(link, json)
        }
    }
}

fn run_blocking(command: Commands, config: ToolConfig, json: bool) -> Result<()> {
    let tools = BlockingPaperTools::new(config)?;

    match command {
        Commands::Search { query, .. } => {
            let papers = tools.search_papers(&query)?;
            print_search_results(&papers, json)
        }
        Commands::Metadata { paper_id } => match tools.get_paper_metadata(&paper_id) {
            Ok(meta) => print_metadata(&meta),
            Err(err) => {
                println!("{}", serde_json::to_string_pretty(&err.to_error_value())?);
                std::process::exit(1);
            }
        },
        Commands::PdfLink { id_or_url } => {
            let link = tools.find_pdf_link(&id_or_url)?;
            print_pdf_link(link, json)
        }
    }
}

fn print_search_results(papers: &[PaperRecord], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(papers)?);
        return Ok(());
    }

    if papers.is_empty() {
        println!("No papers found.");
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Title", "Authors", "Year", "URL"]);

    for paper in papers {
        table.add_row(vec![
            Cell::new(&paper.title),
            Cell::new(paper.author_names().join("; ")),
            Cell::new(
                paper
                    .year
                    .map(|y| y.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(paper.url.as_deref().unwrap_or("-")),
        ]);
    }

    println!("{table}");
    Ok(())
}

fn print_metadata(meta: &PaperMetadata) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(meta)?);
    Ok(())
}

fn print_pdf_link(link: Option<String>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::json!({ "pdf_url": link }));
        return Ok(());
    }

    match link {
        Some(url) => println!("{url}"),
        None => println!("No direct PDF link found."),
    }
    Ok(())
}
