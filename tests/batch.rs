use std::cell::RefCell;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use genpdf::error::{Error, ErrorKind};
use tempfile::TempDir;
use txt2pdf::batch::{convert_file, find_text_files};
use txt2pdf::{
    run_batch, BatchOptions, Block, ConversionError, DocumentRenderer, OutputNaming,
    RenderRequest, Reporter, TitleRule,
};

/// Renderer that writes a marker file and remembers every request.
#[derive(Default)]
struct RecordingRenderer {
    calls: Vec<(PathBuf, String, Vec<Block>)>,
    fail_for: Option<String>,
}

impl DocumentRenderer for RecordingRenderer {
    fn render(&mut self, request: &RenderRequest<'_>) -> Result<(), Error> {
        self.calls.push((
            request.output.to_path_buf(),
            request.title.to_owned(),
            request.blocks.to_vec(),
        ));

        if self.fail_for.as_deref() == Some(request.title) {
            return Err(Error::new("layout failed", ErrorKind::InvalidData));
        }

        fs::write(request.output, b"%PDF-fake")
            .map_err(|err| Error::new("Failed to write output", err))
    }
}

fn directory_with(files: &[(&str, &[u8])]) -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).expect("write input file");
    }
    dir
}

fn run(options: &BatchOptions, renderer: &mut RecordingRenderer) -> (txt2pdf::BatchReport, String) {
    let mut reporter = Reporter::new(Vec::new());
    let report = run_batch(options, renderer, &mut reporter).expect("batch runs");
    let console = String::from_utf8(reporter.into_inner()).expect("console output is UTF-8");
    (report, console)
}

#[test]
fn empty_directory_reports_no_files_and_never_renders() {
    let dir = directory_with(&[("readme.md", b"# not text")]);
    let mut renderer = RecordingRenderer::default();

    let (report, console) = run(&BatchOptions::for_directory(dir.path()), &mut renderer);

    assert!(renderer.calls.is_empty());
    assert_eq!(report.attempted(), 0);
    assert!(console.contains("No .txt files found"));
    assert!(!console.contains("Conversion complete!"));
}

#[test]
fn undecodable_file_does_not_stop_the_batch() {
    let dir = directory_with(&[
        ("alpha.txt", b"Alpha\n\nFirst body."),
        ("broken.txt", &[0x66, 0x6f, 0xff, 0xfe, 0x6f]),
        ("gamma.txt", b"Gamma\n\nThird body."),
    ]);
    let mut renderer = RecordingRenderer::default();

    let (report, console) = run(&BatchOptions::for_directory(dir.path()), &mut renderer);

    assert_eq!(report.attempted(), 3);
    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.failed(), 1);
    assert_eq!(renderer.calls.len(), 2);

    assert!(dir.path().join("alpha.pdf").is_file());
    assert!(dir.path().join("gamma.pdf").is_file());
    assert!(!dir.path().join("broken.pdf").exists());

    let failure = report
        .outcomes
        .iter()
        .find_map(|outcome| outcome.as_ref().err())
        .expect("one failure");
    assert!(matches!(failure, ConversionError::Decode { .. }));
    assert!(failure.path().ends_with("broken.txt"));

    assert!(console.contains("✗ Error converting broken.txt"));
    assert!(console.contains("✓ Successfully converted: alpha.txt → alpha.pdf"));
    assert!(console.contains("Converted 3 file(s) to PDF format."));
}

#[test]
fn render_failure_is_reported_and_batch_continues() {
    let dir = directory_with(&[("first.txt", b"One"), ("second.txt", b"Two")]);
    let mut renderer = RecordingRenderer {
        fail_for: Some("first".to_owned()),
        ..RecordingRenderer::default()
    };

    let (report, console) = run(&BatchOptions::for_directory(dir.path()), &mut renderer);

    assert_eq!(renderer.calls.len(), 2);
    assert_eq!(report.failed(), 1);
    assert!(console.contains("✗ Error converting first.txt"));
    assert!(dir.path().join("second.pdf").is_file());
}

#[test]
fn outputs_use_first_occurrence_naming_by_default() {
    let dir = directory_with(&[("a.txt.txt", b"Title")]);
    let mut renderer = RecordingRenderer::default();

    run(&BatchOptions::for_directory(dir.path()), &mut renderer);

    assert_eq!(renderer.calls[0].0, dir.path().join("a.pdf.txt"));
    assert!(dir.path().join("a.pdf.txt").is_file());
}

#[test]
fn suffix_naming_replaces_trailing_extension() {
    let dir = directory_with(&[("a.txt.txt", b"Title")]);
    let mut renderer = RecordingRenderer::default();
    let options = BatchOptions {
        output_naming: OutputNaming::Suffix,
        ..BatchOptions::for_directory(dir.path())
    };

    run(&options, &mut renderer);

    assert_eq!(renderer.calls[0].0, dir.path().join("a.txt.pdf"));
}

#[test]
fn renderer_receives_segmented_blocks_and_title() {
    let dir = directory_with(&[("report.txt", b"Report\n\nLine one.\nLine two.")]);
    let mut renderer = RecordingRenderer::default();
    let input = dir.path().join("report.txt");
    let output = dir.path().join("report.pdf");

    let result = convert_file(&mut renderer, &input, &output, &BatchOptions::default())
        .expect("conversion succeeds");

    assert!(result.is_success());
    let (_, title, blocks) = &renderer.calls[0];
    assert_eq!(title, "report");
    assert_eq!(
        blocks,
        &vec![
            Block::title("Report"),
            Block::paragraph("Line one. Line two.")
        ]
    );
}

#[test]
fn title_rule_is_forwarded_to_the_segmenter() {
    let dir = directory_with(&[("late.txt", b"\n\nBody text here.")]);
    let input = dir.path().join("late.txt");
    let output = dir.path().join("late.pdf");

    let mut literal = RecordingRenderer::default();
    convert_file(&mut literal, &input, &output, &BatchOptions::default()).expect("converts");
    assert_eq!(literal.calls[0].2, vec![Block::paragraph("Body text here.")]);

    let mut corrected = RecordingRenderer::default();
    let options = BatchOptions {
        title_rule: TitleRule::FirstNonBlank,
        ..BatchOptions::default()
    };
    convert_file(&mut corrected, &input, &output, &options).expect("converts");
    assert_eq!(corrected.calls[0].2, vec![Block::title("Body text here.")]);
}

#[test]
fn missing_input_is_a_read_error() {
    let mut renderer = RecordingRenderer::default();
    let err = convert_file(
        &mut renderer,
        Path::new("/__txt2pdf_missing__/gone.txt"),
        Path::new("/__txt2pdf_missing__/gone.pdf"),
        &BatchOptions::default(),
    )
    .unwrap_err();

    assert!(matches!(err, ConversionError::Read { .. }));
    assert!(renderer.calls.is_empty());
}

#[test]
fn unlistable_directory_aborts_the_batch() {
    let mut renderer = RecordingRenderer::default();
    let mut reporter = Reporter::new(Vec::new());
    let options = BatchOptions::for_directory("/__txt2pdf_missing_dir__");

    let err = run_batch(&options, &mut renderer, &mut reporter).unwrap_err();

    assert!(err.is_fatal());
    assert!(find_text_files(Path::new("/__txt2pdf_missing_dir__")).is_err());
}

/// Console sink whose contents stay readable while the reporter owns it.
#[derive(Clone, Default)]
struct SharedConsole(Rc<RefCell<Vec<u8>>>);

impl SharedConsole {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedConsole {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Renderer that captures the console output seen at each render.
struct ConsoleSnapshotRenderer {
    console: SharedConsole,
    snapshots: Vec<String>,
}

impl DocumentRenderer for ConsoleSnapshotRenderer {
    fn render(&mut self, request: &RenderRequest<'_>) -> Result<(), Error> {
        self.snapshots.push(self.console.contents());
        fs::write(request.output, b"%PDF-fake")
            .map_err(|err| Error::new("Failed to write output", err))
    }
}

#[test]
fn per_file_lines_are_reported_after_every_conversion() {
    let dir = directory_with(&[("one.txt", b"One"), ("two.txt", b"Two"), ("three.txt", b"Three")]);
    let console = SharedConsole::default();
    let mut renderer = ConsoleSnapshotRenderer {
        console: console.clone(),
        snapshots: Vec::new(),
    };
    let mut reporter = Reporter::new(console.clone());

    let report = run_batch(
        &BatchOptions::for_directory(dir.path()),
        &mut renderer,
        &mut reporter,
    )
    .expect("batch runs");

    assert_eq!(report.succeeded(), 3);
    assert_eq!(renderer.snapshots.len(), 3);
    for snapshot in &renderer.snapshots {
        assert!(snapshot.contains("Found 3 .txt file(s):"));
        assert!(!snapshot.contains("Successfully converted"));
    }
    assert_eq!(console.contents().matches("✓ Successfully converted").count(), 3);
}
