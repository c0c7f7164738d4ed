//! Human-readable console output of a batch.
//!
//! The reporter only formats records it is handed; it never decides whether a conversion
//! succeeded.  Console write failures are logged once and otherwise ignored.

use std::io::{self, Write};
use std::path::Path;

use log::warn;

use crate::model::{ConversionResult, ConversionStatus};

const RULE_WIDTH: usize = 50;

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

fn describe_directory(directory: &Path) -> String {
    if directory == Path::new(".") {
        "the current directory".to_owned()
    } else {
        directory.display().to_string()
    }
}

/// Writes the status lines of a batch to a console-like sink.
pub struct Reporter<W: Write> {
    out: W,
    write_failed: bool,
}

impl Reporter<io::Stdout> {
    /// Creates a reporter writing to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            write_failed: false,
        }
    }

    /// Consumes the reporter and returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: impl AsRef<str>) {
        if let Err(err) = writeln!(self.out, "{}", text.as_ref()) {
            if !self.write_failed {
                warn!("Unable to write console output: {}", err);
                self.write_failed = true;
            }
        }
    }

    fn rule(&mut self) {
        self.line("=".repeat(RULE_WIDTH));
    }

    /// Start banner.
    pub fn start(&mut self) {
        self.line("Starting conversion of .txt files to PDF...");
        self.rule();
    }

    pub fn no_files(&mut self, directory: &Path) {
        let text = format!("No .txt files found in {}.", describe_directory(directory));
        self.line(text);
    }

    /// File count followed by one line per file.
    pub fn listing(&mut self, files: &[impl AsRef<Path>]) {
        self.line(format!("Found {} .txt file(s):", files.len()));
        for file in files {
            let text = format!("  - {}", display_name(file.as_ref()));
            self.line(text);
        }
        self.line("");
    }

    /// Success or failure line of a single file.
    pub fn conversion(&mut self, result: &ConversionResult) {
        let text = match &result.status {
            ConversionStatus::Success => format!(
                "✓ Successfully converted: {} → {}",
                display_name(&result.input),
                display_name(&result.output)
            ),
            ConversionStatus::Failure(message) => format!(
                "✗ Error converting {}: {}",
                display_name(&result.input),
                message
            ),
        };
        self.line(text);
    }

    /// Completion banner and the number of attempted files.
    pub fn finish(&mut self, attempted: usize) {
        self.line("");
        self.rule();
        self.line("Conversion complete!");
        self.line(format!("Converted {} file(s) to PDF format.", attempted));
        if let Err(err) = self.out.flush() {
            warn!("Unable to flush console output: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn output_of(report: impl FnOnce(&mut Reporter<Vec<u8>>)) -> String {
        let mut reporter = Reporter::new(Vec::new());
        report(&mut reporter);
        String::from_utf8(reporter.into_inner()).expect("console output is UTF-8")
    }

    #[test]
    fn no_files_message_names_current_directory() {
        let text = output_of(|r| r.no_files(Path::new(".")));
        assert_eq!(text, "No .txt files found in the current directory.\n");
    }

    #[test]
    fn listing_shows_count_and_names() {
        let files = vec![PathBuf::from("./a.txt"), PathBuf::from("./b.txt")];
        let text = output_of(|r| r.listing(&files));
        assert_eq!(text, "Found 2 .txt file(s):\n  - a.txt\n  - b.txt\n\n");
    }

    #[test]
    fn conversion_lines() {
        let ok = ConversionResult::success("dir/a.txt", "dir/a.pdf");
        let failed = ConversionResult::failure("dir/b.txt", "dir/b.pdf", "invalid utf-8");
        let text = output_of(|r| {
            r.conversion(&ok);
            r.conversion(&failed);
        });
        assert_eq!(
            text,
            "✓ Successfully converted: a.txt → a.pdf\n✗ Error converting b.txt: invalid utf-8\n"
        );
    }

    #[test]
    fn finish_reports_attempted_count() {
        let text = output_of(|r| r.finish(3));
        assert!(text.contains("Conversion complete!"));
        assert!(text.ends_with("Converted 3 file(s) to PDF format.\n"));
    }
}
