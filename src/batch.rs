//! Batch conversion of every `*.txt` file in one directory.

use std::error::Error as _;
use std::ffi::OsStr;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::error::{ConversionError, Result};
use crate::model::{Block, ConversionResult, PageSetup, StyleSheet};
use crate::render::{DocumentRenderer, RenderRequest};
use crate::report::Reporter;
use crate::segment::{segments, TitleRule};

/// Extension of the files picked up by the batch.
pub const INPUT_EXTENSION: &str = ".txt";

/// Extension substituted into the output file names.
pub const OUTPUT_EXTENSION: &str = ".pdf";

/// Rule deriving the output file name from the input file name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputNaming {
    /// Replaces the first `.txt` anywhere in the name, so `a.txt.txt` becomes `a.pdf.txt`.
    #[default]
    FirstOccurrence,
    /// Replaces only the trailing `.txt`, so `a.txt.txt` becomes `a.txt.pdf`.
    Suffix,
}

/// Settings shared by every file of a batch.
#[derive(Clone, Debug)]
pub struct BatchOptions {
    /// Directory whose `*.txt` files are converted.
    pub directory: PathBuf,
    pub title_rule: TitleRule,
    pub output_naming: OutputNaming,
    pub styles: StyleSheet,
    pub page: PageSetup,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            title_rule: TitleRule::default(),
            output_naming: OutputNaming::default(),
            styles: StyleSheet::default(),
            page: PageSetup::default(),
        }
    }
}

impl BatchOptions {
    /// Creates options for `directory` with every other setting at its default.
    pub fn for_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Self::default()
        }
    }
}

/// Everything that happened during one batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Input files in enumeration order.
    pub found: Vec<PathBuf>,
    /// One outcome per attempted file, in the same order as `found`.
    pub outcomes: Vec<Result<ConversionResult>>,
}

impl BatchReport {
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.attempted() - self.succeeded()
    }
}

/// Returns whether `name` matches the shell pattern `*.txt`.
///
/// Like a shell glob, `*` does not match a leading dot and the match is case-sensitive.
pub fn matches_input_pattern(name: &str) -> bool {
    !name.starts_with('.') && name.ends_with(INPUT_EXTENSION)
}

/// Lists the entries of `directory` matching `*.txt`, without descending into subdirectories.
///
/// The order is whatever the file system yields and is not sorted.
pub fn find_text_files(directory: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(directory).map_err(|source| ConversionError::ListDirectory {
        path: directory.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Skipping unreadable entry in {}: {}", directory.display(), err);
                continue;
            }
        };

        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            warn!("Skipping non UTF-8 file name {:?}", file_name);
            continue;
        };

        if matches_input_pattern(name) {
            files.push(entry.path());
        }
    }

    Ok(files)
}

/// Derives the output file name for the input file `name`.
pub fn derive_output_name(name: &str, naming: OutputNaming) -> String {
    match naming {
        OutputNaming::FirstOccurrence => name.replacen(INPUT_EXTENSION, OUTPUT_EXTENSION, 1),
        OutputNaming::Suffix => match name.strip_suffix(INPUT_EXTENSION) {
            Some(stem) => format!("{}{}", stem, OUTPUT_EXTENSION),
            None => name.to_owned(),
        },
    }
}

/// Returns the path of the PDF written for `input`, next to the input file.
pub fn output_path(input: &Path, naming: OutputNaming) -> PathBuf {
    let name = input
        .file_name()
        .and_then(OsStr::to_str)
        .unwrap_or_default();
    input.with_file_name(derive_output_name(name, naming))
}

/// Reads, segments and renders a single file.
pub fn convert_file<R>(
    renderer: &mut R,
    input: &Path,
    output: &Path,
    options: &BatchOptions,
) -> Result<ConversionResult>
where
    R: DocumentRenderer + ?Sized,
{
    let bytes = fs::read(input).map_err(|source| ConversionError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|source| ConversionError::Decode {
        path: input.to_path_buf(),
        source,
    })?;

    let blocks: Vec<Block> = segments(&text, options.title_rule).collect();
    debug!("Segmented {} into {} block(s)", input.display(), blocks.len());

    let title = input
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or_default();
    let request = RenderRequest {
        blocks: &blocks,
        output,
        title,
        styles: &options.styles,
        page: &options.page,
    };

    renderer
        .render(&request)
        .map_err(|source| ConversionError::Render {
            path: input.to_path_buf(),
            source,
        })?;

    Ok(ConversionResult::success(input, output))
}

/// Collapses an outcome into the record handed to the reporter.
pub fn summarize(input: &Path, output: &Path, outcome: &Result<ConversionResult>) -> ConversionResult {
    match outcome {
        Ok(result) => result.clone(),
        Err(err) => {
            let reason = err
                .source()
                .map(ToString::to_string)
                .unwrap_or_else(|| err.to_string());
            ConversionResult::failure(input, output, reason)
        }
    }
}

/// Converts every `*.txt` file of `options.directory`, one after the other.
///
/// A failing file does not stop the batch; only a directory that cannot be listed returns an
/// error.  Per-file lines are reported once every file has been attempted.
pub fn run_batch<R, W>(
    options: &BatchOptions,
    renderer: &mut R,
    reporter: &mut Reporter<W>,
) -> Result<BatchReport>
where
    R: DocumentRenderer + ?Sized,
    W: Write,
{
    reporter.start();

    let found = find_text_files(&options.directory)?;
    if found.is_empty() {
        reporter.no_files(&options.directory);
        return Ok(BatchReport::default());
    }

    reporter.listing(&found);

    let outputs: Vec<PathBuf> = found
        .iter()
        .map(|input| output_path(input, options.output_naming))
        .collect();
    let outcomes: Vec<Result<ConversionResult>> = found
        .iter()
        .zip(&outputs)
        .map(|(input, output)| convert_file(&mut *renderer, input, output, options))
        .collect();

    for ((input, output), outcome) in found.iter().zip(&outputs).zip(&outcomes) {
        reporter.conversion(&summarize(input, output, outcome));
    }

    reporter.finish(found.len());

    let report = BatchReport { found, outcomes };
    info!(
        "Batch finished: {} attempted, {} succeeded, {} failed",
        report.attempted(),
        report.succeeded(),
        report.failed()
    );
    Ok(report)
}
