//! Batch processing of PDF directories.
//!
//! Each document is processed independently. A failure in one document is
//! reported in its [`DocumentResult`] and never stops the rest of the batch.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::Result;
use crate::model::Outline;
use crate::pipeline::{OutlineExtractor, OutlineOptions};
use crate::render::{to_json, JsonFormat};

/// Outcome of processing one document.
#[derive(Debug)]
pub struct DocumentResult {
    /// Input path
    pub path: PathBuf,
    /// Extracted outline or the per-document error
    pub result: Result<Outline>,
}

impl DocumentResult {
    /// Check if the document was processed successfully.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Counts from a directory run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Documents written to the output directory
    pub processed: usize,
    /// Documents that failed, with the error message
    pub failed: Vec<(PathBuf, String)>,
    /// Non-PDF files left alone in the input directory
    pub skipped: usize,
}

impl BatchSummary {
    /// Total number of PDF documents attempted.
    pub fn total(&self) -> usize {
        self.processed + self.failed.len()
    }

    /// Check if every document failed (and there was at least one).
    pub fn all_failed(&self) -> bool {
        self.processed == 0 && !self.failed.is_empty()
    }
}

/// Input and output directories used when none are given.
///
/// Container layout (`/app/input`, `/app/output`) when `/app/input` exists,
/// otherwise the same layout relative to the working directory.
pub fn default_data_dirs() -> (PathBuf, PathBuf) {
    let container_input = PathBuf::from("/app/input");
    if container_input.exists() {
        (container_input, PathBuf::from("/app/output"))
    } else {
        (PathBuf::from("app/input"), PathBuf::from("app/output"))
    }
}

/// List the `*.pdf` files (any extension case) directly inside `dir`, sorted.
pub fn find_pdfs<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    scan_dir(dir.as_ref()).map(|(pdfs, _)| pdfs)
}

/// Sorted PDF files plus the number of other regular files.
fn scan_dir(dir: &Path) -> Result<(Vec<PathBuf>, usize)> {
    let mut paths = Vec::new();
    let mut others = 0;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let is_pdf = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if is_pdf {
            paths.push(path);
        } else {
            others += 1;
        }
    }
    paths.sort();
    Ok((paths, others))
}

/// Extract outlines for many files, in parallel unless the options say otherwise.
///
/// Results are returned in input order.
pub fn process_files(paths: &[PathBuf], options: &OutlineOptions) -> Result<Vec<DocumentResult>> {
    let extractor = OutlineExtractor::new(options.clone())?;
    let run = |path: &PathBuf| DocumentResult {
        path: path.clone(),
        result: extractor.extract_file(path),
    };

    Ok(if options.parallel {
        paths.par_iter().map(run).collect()
    } else {
        paths.iter().map(run).collect()
    })
}

/// Output file for an input document: `<output_dir>/<stem>.json`.
pub fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or_default().to_os_string();
    name.push(".json");
    output_dir.join(name)
}

/// Process every PDF in `input_dir`, writing one JSON outline per document.
pub fn process_directory<P, Q>(input_dir: P, output_dir: Q, options: &OutlineOptions) -> Result<BatchSummary>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    process_directory_with_progress(input_dir, output_dir, options, |_, _| {})
}

/// Like [`process_directory`], calling `on_done(path, ok)` after each document.
pub fn process_directory_with_progress<P, Q, F>(
    input_dir: P,
    output_dir: Q,
    options: &OutlineOptions,
    on_done: F,
) -> Result<BatchSummary>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: Fn(&Path, bool) + Sync,
{
    let input_dir = input_dir.as_ref();
    let output_dir = output_dir.as_ref();

    fs::create_dir_all(output_dir)?;
    let (pdfs, skipped) = scan_dir(input_dir)?;
    if skipped > 0 {
        log::info!("Skipping {} non-PDF files in {}", skipped, input_dir.display());
    }
    if pdfs.is_empty() {
        log::info!("No PDF files found in {}", input_dir.display());
        return Ok(BatchSummary {
            skipped,
            ..BatchSummary::default()
        });
    }

    let extractor = OutlineExtractor::new(options.clone())?;
    let run = |path: &PathBuf| -> (PathBuf, Result<PathBuf>) {
        let result = extractor.extract_file(path).and_then(|outline| {
            let target = output_path(path, output_dir);
            fs::write(&target, to_json(&outline, JsonFormat::Pretty)?)?;
            Ok(target)
        });
        on_done(path, result.is_ok());
        (path.clone(), result)
    };

    let outcomes: Vec<(PathBuf, Result<PathBuf>)> = if options.parallel {
        pdfs.par_iter().map(run).collect()
    } else {
        pdfs.iter().map(run).collect()
    };

    let mut summary = BatchSummary {
        skipped,
        ..BatchSummary::default()
    };
    for (path, outcome) in outcomes {
        match outcome {
            Ok(target) => {
                log::info!("Processed {} -> {}", path.display(), target.display());
                summary.processed += 1;
            }
            Err(e) => {
                log::warn!("Error processing {}: {}", path.display(), e);
                summary.failed.push((path, e.to_string()));
            }
        }
    }

    Ok(summary)
}
