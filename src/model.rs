//! Data structures describing the logical content of a converted document.
//!
//! The types in this module sit between the text segmenter and the PDF renderer.  They do not
//! reference `genpdf` directly so the segmenter can be exercised (and tested) without loading any
//! fonts; the [`crate::render`] module maps them onto [`genpdf::elements`] when a file is written.

use std::fmt;
use std::path::PathBuf;

/// Metadata that controls how a block of text is aligned once it is laid out.
///
/// The first three variants map directly to [`genpdf::Alignment`].  `Justified` is handled by
/// [`crate::elements::TextBlock`], which stretches word gaps to fill every line but the last.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAlignment {
    /// Left aligned content.
    #[default]
    Left,
    /// Center aligned content.
    Center,
    /// Right aligned content.
    Right,
    /// Fully justified paragraphs.
    Justified,
}

/// One titled or body unit of text produced by the segmenter.
///
/// A block is created once from the raw file contents and consumed once by the renderer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    /// Document heading, stripped of surrounding whitespace but otherwise unmodified.
    Title(String),
    /// Body paragraph with internal whitespace runs collapsed to single spaces.
    Paragraph(String),
}

impl Block {
    /// Convenience helper for building a title block.
    pub fn title(text: impl Into<String>) -> Self {
        Self::Title(text.into())
    }

    /// Convenience helper for building a paragraph block.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph(text.into())
    }

    /// Returns the text carried by the block.
    pub fn text(&self) -> &str {
        match self {
            Self::Title(text) | Self::Paragraph(text) => text,
        }
    }

    /// Returns whether the block is the document title.
    pub fn is_title(&self) -> bool {
        matches!(self, Self::Title(_))
    }
}

/// Typographic settings applied to one kind of [`Block`].
///
/// Sizes are expressed in PostScript points to keep the profiles readable; the renderer converts
/// them to millimetres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockStyle {
    font_size: u8,
    bold: bool,
    alignment: HorizontalAlignment,
    space_after_pt: f64,
    spacer_after_pt: f64,
    leading_pt: Option<f64>,
}

impl BlockStyle {
    /// Creates a left-aligned regular style with the given font size and no extra spacing.
    pub fn new(font_size: u8) -> Self {
        Self {
            font_size,
            bold: false,
            alignment: HorizontalAlignment::Left,
            space_after_pt: 0.0,
            spacer_after_pt: 0.0,
            leading_pt: None,
        }
    }

    /// Heading profile: 16pt bold, left aligned, 20pt after plus a 20pt spacer.
    pub fn title() -> Self {
        Self::new(16)
            .with_bold(true)
            .with_space_after_pt(20.0)
            .with_spacer_after_pt(20.0)
    }

    /// Body profile: 12pt, justified, 12pt after, 16pt leading.
    pub fn body() -> Self {
        Self::new(12)
            .with_alignment(HorizontalAlignment::Justified)
            .with_space_after_pt(12.0)
            .with_leading_pt(Some(16.0))
    }

    pub fn font_size(&self) -> u8 {
        self.font_size
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }

    pub fn alignment(&self) -> HorizontalAlignment {
        self.alignment
    }

    /// Vertical space reserved after the block, in points.
    pub fn space_after_pt(&self) -> f64 {
        self.space_after_pt
    }

    /// Height of an empty spacer pushed after the block, in points.
    pub fn spacer_after_pt(&self) -> f64 {
        self.spacer_after_pt
    }

    /// Baseline-to-baseline distance in points, if fixed.
    pub fn leading_pt(&self) -> Option<f64> {
        self.leading_pt
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn with_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_space_after_pt(mut self, space_after_pt: f64) -> Self {
        self.space_after_pt = space_after_pt;
        self
    }

    pub fn with_spacer_after_pt(mut self, spacer_after_pt: f64) -> Self {
        self.spacer_after_pt = spacer_after_pt;
        self
    }

    pub fn with_leading_pt(mut self, leading_pt: impl Into<Option<f64>>) -> Self {
        self.leading_pt = leading_pt.into();
        self
    }
}

/// The pair of style profiles used for every converted document.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleSheet {
    /// Applied to [`Block::Title`].
    pub title: BlockStyle,
    /// Applied to [`Block::Paragraph`].
    pub body: BlockStyle,
}

impl StyleSheet {
    /// Returns the style profile for the given block.
    pub fn style_for(&self, block: &Block) -> &BlockStyle {
        match block {
            Block::Title(_) => &self.title,
            Block::Paragraph(_) => &self.body,
        }
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            title: BlockStyle::title(),
            body: BlockStyle::body(),
        }
    }
}

/// Paper sizes supported by the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PageSize {
    /// US Letter, 8.5 x 11 in.
    #[default]
    Letter,
    /// ISO A4, 210 x 297 mm.
    A4,
    /// US Legal, 8.5 x 14 in.
    Legal,
}

/// Page geometry applied to every generated document.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageSetup {
    /// Paper size of every page.
    pub size: PageSize,
    /// Margin applied on all four sides, in points.
    pub margin_pt: f64,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            size: PageSize::Letter,
            margin_pt: 72.0,
        }
    }
}

/// Final state of a single file conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConversionStatus {
    Success,
    Failure(String),
}

/// Outcome of processing one input file.
///
/// Created per file, handed to the reporter and then discarded; nothing is shared across files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionResult {
    /// Path of the text file that was read.
    pub input: PathBuf,
    /// Path of the PDF file that was (or would have been) written.
    pub output: PathBuf,
    /// Whether the conversion succeeded.
    pub status: ConversionStatus,
}

impl ConversionResult {
    /// Creates a successful result.
    pub fn success(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            status: ConversionStatus::Success,
        }
    }

    /// Creates a failed result carrying a human-readable message.
    pub fn failure(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            status: ConversionStatus::Failure(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ConversionStatus::Success
    }
}

impl fmt::Display for ConversionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Failure(message) => write!(f, "failure: {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_style_sheet_matches_profiles() {
        let sheet = StyleSheet::default();
        assert_eq!(sheet.title.font_size(), 16);
        assert!(sheet.title.is_bold());
        assert_eq!(sheet.title.alignment(), HorizontalAlignment::Left);
        assert_eq!(sheet.body.font_size(), 12);
        assert_eq!(sheet.body.alignment(), HorizontalAlignment::Justified);
        assert_eq!(sheet.body.leading_pt(), Some(16.0));
    }

    #[test]
    fn style_for_selects_by_block_kind() {
        let sheet = StyleSheet::default();
        assert_eq!(sheet.style_for(&Block::title("T")).font_size(), 16);
        assert_eq!(sheet.style_for(&Block::paragraph("P")).font_size(), 12);
    }

    #[test]
    fn default_page_is_letter_with_inch_margins() {
        let page = PageSetup::default();
        assert_eq!(page.size, PageSize::Letter);
        assert_eq!(page.margin_pt, 72.0);
    }
}
