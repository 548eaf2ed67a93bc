// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use disclosure_miner::utils::logging::{
    format_error, format_info, format_step, format_success, format_warning, init_logger,
};
use disclosure_miner::{
    BatchAggregator, BatchResult, Config, CsvExporter, FileScanner, JsonExporter,
    PageTextExtractor, PdfUpload, ScannedFile, validate_inputs,
};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "disclosure_miner")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Keyword paragraph mining for PDF disclosure reports", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find keyword paragraphs in PDF files and export the match and tally tables
    Analyze(AnalyzeArgs),

    /// Print the extracted text of a PDF page by page
    Pages {
        file: PathBuf,

        #[arg(long, value_name = "N")]
        page: Option<u32>,
    },
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Keywords separated by commas or semicolons, e.g. "ESG; Climate, Green"
    #[arg(short, long, env = "DISCLOSURE_MINER_KEYWORDS", default_value = "")]
    keywords: String,

    /// Output directory, overrides export.output_dir
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write batch.json and manifest.json
    #[arg(long)]
    json: bool,

    /// Analyze one file at a time instead of using the worker pool
    #[arg(long)]
    sequential: bool,

    #[arg(long, value_name = "NUM")]
    workers: Option<usize>,

    /// PDF files or directories scanned recursively for *.pdf
    paths: Vec<PathBuf>,
}

// Blocking extractions abandoned after their budget get this long to notice
// cancellation before the process exits without them.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !cli.color {
        colored::control::set_override(false);
    }
    init_logger(cli.color, cli.verbose);

    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Analyze(args) => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("Failed to start async runtime")?;
            let outcome = runtime.block_on(cmd_analyze(config, args, cli.color));
            runtime.shutdown_timeout(SHUTDOWN_GRACE);
            outcome?;
        }
        Commands::Pages { file, page } => {
            cmd_pages(&config, &file, page)?;
        }
    }

    Ok(())
}

async fn cmd_analyze(mut config: Config, args: AnalyzeArgs, color: bool) -> Result<()> {
    let start_time = Instant::now();

    if let Some(output) = args.output {
        config.export.output_dir = output;
    }
    if let Some(workers) = args.workers {
        config.pipeline.parallel_workers = workers.max(1);
    }

    println!("{}", format_step(1, 3, "Collecting PDF files"));
    let scanner = FileScanner::new(config.pipeline.clone());
    let files = scanner.scan_paths(&args.paths).context("Failed to collect input files")?;
    let loaded = scanner.load(&files);
    let uploads = loaded.uploads;

    let keywords = validate_inputs(&uploads, &args.keywords).context("Cannot start analysis")?;
    println!(
        "{}",
        format_info(&format!(
            "{} files, keywords: {}",
            uploads.len(),
            keywords.as_slice().join(", ")
        ))
    );

    println!("{}", format_step(2, 3, "Analyzing"));
    let aggregator = BatchAggregator::new(config.clone()).with_color(color);
    let mut batch = if args.sequential {
        aggregator.run(&uploads, &keywords)?
    } else {
        aggregator.run_parallel(&uploads, &keywords).await?
    };
    for failure in loaded.failures {
        batch.push_failure(failure);
    }
    report_files(&files, &batch);

    println!("{}", format_step(3, 3, "Exporting"));
    let paths = CsvExporter::new(&config.export)
        .export(&batch)
        .context("Failed to export csv tables")?;
    println!("{}", format_success(&format!("Wrote {}", paths.matches.display())));
    println!("{}", format_success(&format!("Wrote {}", paths.statistics.display())));

    if args.json {
        let manifest = JsonExporter::new(&config.export.output_dir)?
            .export_batch(&batch, true)
            .context("Failed to export json")?;
        println!(
            "{}",
            format_success(&format!("Wrote {} json files", manifest.files.len() + 1))
        );
    }

    let totals = batch.totals();
    for (keyword, count) in totals.iter() {
        println!("  {:<24} {}", keyword, count);
    }

    info!(
        "Analysis complete in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    if batch.files_succeeded() == 0 {
        anyhow::bail!("none of the {} files could be analyzed", files.len());
    }

    Ok(())
}

// Display names are unique per batch, see `FileScanner::scan_paths`
fn report_files(files: &[ScannedFile], batch: &BatchResult) {
    for file in files {
        if let Some(failure) = batch.failures.iter().find(|f| f.filename == file.display_name) {
            println!("{}", format_error(&failure.reason));
        } else if let Some(row) = batch.tallies.iter().find(|t| t.filename == file.display_name) {
            println!(
                "{}",
                format_success(&format!(
                    "{} analyzed ({} keyword hits)",
                    row.filename,
                    row.counts.total()
                ))
            );
        }
    }

    if batch.is_partial() {
        println!(
            "{}",
            format_warning(&format!(
                "{} files failed, results are partial",
                batch.failures.len()
            ))
        );
    }
}

fn cmd_pages(config: &Config, file: &Path, page: Option<u32>) -> Result<()> {
    let upload = PdfUpload::from_path(file).context("Failed to read pdf")?;
    let extractor = PageTextExtractor::new(config.extraction.clone());
    let pages = extractor
        .extract(&upload)
        .with_context(|| format!("Failed to extract text from {}", file.display()))?;

    let mut printed = 0;
    for text in pages.iter().filter(|p| page.is_none_or(|n| n == p.number)) {
        println!("{}", format_info(&format!("Page {}", text.number)));
        println!("{}", text.text);
        printed += 1;
    }

    if printed == 0
        && let Some(n) = page
    {
        anyhow::bail!("{} has {} pages, page {} not found", upload.filename, pages.len(), n);
    }

    Ok(())
}
