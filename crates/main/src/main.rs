use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use txt2pdf::{
    run_batch, BatchOptions, GenpdfRenderer, OutputNaming, PageSize, Reporter, TitleRule,
};

/// Converts every `*.txt` file of a directory into a PDF next to it.
///
/// Each file is split on blank lines: the first segment becomes the title and the remaining
/// segments become justified body paragraphs.  Running without arguments converts the current
/// directory.
#[derive(Parser)]
#[command(author, version, about = "Convert .txt files to PDF")]
struct Cli {
    /// Directory containing the .txt files.
    #[arg(long, value_name = "DIR", default_value = ".")]
    dir: PathBuf,

    /// Directory holding the Roboto TrueType files, searched before the default locations.
    #[arg(long, value_name = "DIR")]
    fonts_dir: Option<PathBuf>,

    /// Paper size of the generated documents.
    #[arg(long, value_enum, default_value = "letter")]
    paper_size: PaperSizeArg,

    /// Which segment becomes the document title.
    #[arg(long, value_enum, default_value = "first-segment")]
    title_rule: TitleRuleArg,

    /// How output file names are derived from input names.
    #[arg(long, value_enum, default_value = "first-occurrence")]
    output_naming: OutputNamingArg,

    /// Exit with a failure status when any file could not be converted.
    #[arg(long)]
    fail_on_error: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperSizeArg {
    Letter,
    A4,
    Legal,
}

#[derive(Clone, Copy, ValueEnum)]
enum TitleRuleArg {
    /// Only the very first segment can be the title; a leading blank line means no title.
    FirstSegment,
    /// The first non-blank segment is the title.
    FirstNonBlank,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputNamingArg {
    /// Replace the first `.txt` in the name (`a.txt.txt` becomes `a.pdf.txt`).
    FirstOccurrence,
    /// Replace the trailing `.txt` only (`a.txt.txt` becomes `a.txt.pdf`).
    Suffix,
}

impl From<PaperSizeArg> for PageSize {
    fn from(arg: PaperSizeArg) -> Self {
        match arg {
            PaperSizeArg::Letter => PageSize::Letter,
            PaperSizeArg::A4 => PageSize::A4,
            PaperSizeArg::Legal => PageSize::Legal,
        }
    }
}

impl From<TitleRuleArg> for TitleRule {
    fn from(arg: TitleRuleArg) -> Self {
        match arg {
            TitleRuleArg::FirstSegment => TitleRule::FirstSegment,
            TitleRuleArg::FirstNonBlank => TitleRule::FirstNonBlank,
        }
    }
}

impl From<OutputNamingArg> for OutputNaming {
    fn from(arg: OutputNamingArg) -> Self {
        match arg {
            OutputNamingArg::FirstOccurrence => OutputNaming::FirstOccurrence,
            OutputNamingArg::Suffix => OutputNaming::Suffix,
        }
    }
}

impl Cli {
    fn batch_options(&self) -> BatchOptions {
        let mut options = BatchOptions::for_directory(&self.dir);
        options.title_rule = self.title_rule.into();
        options.output_naming = self.output_naming.into();
        options.page.size = self.paper_size.into();
        options
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let options = cli.batch_options();
    log::debug!("Converting {} with {:?}", options.directory.display(), options.page);

    let mut renderer = GenpdfRenderer::new().with_fonts_dir(cli.fonts_dir.clone());
    let mut reporter = Reporter::stdout();

    match run_batch(&options, &mut renderer, &mut reporter) {
        Ok(report) if cli.fail_on_error && report.failed() > 0 => {
            log::error!("{} of {} file(s) failed", report.failed(), report.attempted());
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            print_error_sources(&err);
            ExitCode::FAILURE
        }
    }
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
