//! pdfoutline CLI - PDF title and heading outline extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::batch::{default_data_dirs, find_pdfs, process_directory_with_progress};
use pdfoutline::{
    to_json, DocumentSource, HeadingLevel, JsonFormat, OutlineExtractor, OutlineOptions,
    PdfDocument,
};

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(version)]
#[command(about = "Extract a title and H1-H3 outline from PDF files", long_about = None)]
struct Cli {
    /// Process documents one at a time
    #[arg(long, global = true)]
    sequential: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one JSON outline per PDF in a directory
    Batch {
        /// Directory containing PDF files
        #[arg(value_name = "INPUT_DIR", env = "PDFOUTLINE_INPUT")]
        input: Option<PathBuf>,

        /// Directory for the JSON outlines
        #[arg(value_name = "OUTPUT_DIR", env = "PDFOUTLINE_OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Print the outline of a single PDF
    Outline {
        /// Input PDF file, or `-` to read from stdin
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let options = OutlineOptions::new().with_parallel(!cli.sequential);

    let result = match cli.command {
        Some(Commands::Batch { input, output }) => cmd_batch(input, output, &options),
        Some(Commands::Outline {
            input,
            output,
            compact,
        }) => cmd_outline(&input, output.as_deref(), compact, options),
        Some(Commands::Info { input }) => cmd_info(&input, options),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => cmd_batch(None, None, &options),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_batch(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    options: &OutlineOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let (default_input, default_output) = default_data_dirs();
    let explicit_input = input.is_some();
    let input_dir = input.unwrap_or(default_input);
    let output_dir = output.unwrap_or(default_output);

    if !input_dir.is_dir() {
        if explicit_input {
            return Err(format!("Input directory not found: {}", input_dir.display()).into());
        }
        // Default layout not set up yet: nothing to do.
        fs::create_dir_all(&output_dir)?;
        println!("{} {}", "No PDF files found in".yellow(), input_dir.display());
        return Ok(());
    }

    let total = find_pdfs(&input_dir)?.len();
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let summary = process_directory_with_progress(&input_dir, &output_dir, options, |path, _ok| {
        pb.set_message(path.file_name().unwrap_or_default().to_string_lossy().into_owned());
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    if summary.total() == 0 {
        println!("{} {}", "No PDF files found in".yellow(), input_dir.display());
        return Ok(());
    }

    println!(
        "{} {} of {} documents -> {}",
        "Processed".green().bold(),
        summary.processed,
        summary.total(),
        output_dir.display()
    );
    if summary.skipped > 0 {
        println!("  {} {} non-PDF files skipped", "-".dimmed(), summary.skipped);
    }
    for (path, message) in &summary.failed {
        println!("  {} {}: {}", "✗".red(), path.display(), message);
    }

    if summary.all_failed() {
        return Err("every document failed".into());
    }
    Ok(())
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    options: OutlineOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let extractor = OutlineExtractor::new(options)?;
    let outline = if input == Path::new("-") {
        let doc = PdfDocument::from_reader(std::io::stdin().lock())?;
        extractor.extract(&doc)?
    } else {
        extractor.extract_file(input)?
    };

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = to_json(&outline, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path, options: OutlineOptions) -> Result<(), Box<dyn std::error::Error>> {
    let doc = PdfDocument::open(input)?;
    let outline = OutlineExtractor::new(options)?.extract(&doc)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), doc.version());
    println!("{}: {}", "Pages".bold(), doc.page_count());
    if let Some(title) = doc.metadata_title() {
        println!("{}: {}", "Metadata title".bold(), title);
    }
    println!("{}: {}", "Resolved title".bold(), outline.title);

    println!();
    println!("{}", "Outline".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for level in HeadingLevel::ALL {
        println!("{}: {}", level.as_str().bold(), outline.count_at(level));
    }

    let mut pages: Vec<u32> = outline.headings.iter().map(|h| h.page).collect();
    pages.dedup();
    for page in pages {
        println!("{}", format!("Page {}", page).dimmed());
        for heading in outline.headings_on_page(page) {
            let indent = "  ".repeat(usize::from(heading.level.depth()));
            println!("{}{}", indent, heading.text);
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF title and heading outline extraction tool");
    println!();
    println!("License: MIT");
}
