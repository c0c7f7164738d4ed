//! Rendering of segmented blocks into PDF files.
//!
//! Page layout, font metrics and PDF encoding are delegated to `genpdf`.  The batch driver only
//! talks to the [`DocumentRenderer`] trait so it can be driven by a different backend in tests.

use std::path::{Path, PathBuf};

use genpdf::elements::PaddedElement;
use genpdf::error::Error;
use genpdf::fonts::{FontData, FontFamily};
use genpdf::style::Style;
use genpdf::{Element, Margins, Mm};
use log::debug;

use crate::builder::DocumentBuilder;
use crate::elements::{mm_from_pt, TextBlock};
use crate::fonts;
use crate::model::{Block, BlockStyle, PageSetup, StyleSheet};

/// Everything a renderer needs to produce one document.
#[derive(Clone, Copy, Debug)]
pub struct RenderRequest<'a> {
    /// Blocks in document order.
    pub blocks: &'a [Block],
    /// Path of the PDF file to write.
    pub output: &'a Path,
    /// Title stored in the document metadata.
    pub title: &'a str,
    pub styles: &'a StyleSheet,
    pub page: &'a PageSetup,
}

/// Capability turning a block sequence into a paginated document on disk.
pub trait DocumentRenderer {
    /// Writes the document described by `request` to `request.output`.
    fn render(&mut self, request: &RenderRequest<'_>) -> Result<(), Error>;
}

/// [`DocumentRenderer`] backed by `genpdf`.
///
/// The font family is resolved on the first render and reused for every later document.  A
/// failed resolution is returned as the render error of the current file and retried next time.
#[derive(Default)]
pub struct GenpdfRenderer {
    fonts_dir: Option<PathBuf>,
    font_family: Option<FontFamily<FontData>>,
}

impl GenpdfRenderer {
    /// Creates a renderer that searches the default font locations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Searches `fonts_dir` before the default font locations.
    pub fn with_fonts_dir(mut self, fonts_dir: impl Into<Option<PathBuf>>) -> Self {
        self.fonts_dir = fonts_dir.into();
        self
    }

    fn font_family(&mut self) -> Result<FontFamily<FontData>, Error> {
        if let Some(family) = &self.font_family {
            return Ok(family.clone());
        }

        let family = fonts::resolve_font_family(self.fonts_dir.as_deref())?;
        self.font_family = Some(family.clone());
        Ok(family)
    }

    /// Builds the `genpdf` document for `request` without writing it.
    pub fn build_document(&mut self, request: &RenderRequest<'_>) -> Result<genpdf::Document, Error> {
        let font_family = self.font_family()?;
        let mut document = DocumentBuilder::from_page_setup(request.page)
            .with_title(request.title)
            .build(font_family);

        for block in request.blocks {
            document.push(block_element(block, request.styles.style_for(block)));
        }

        Ok(document)
    }

    /// Renders `request` into an in-memory PDF, ignoring `request.output`.
    pub fn render_to_bytes(&mut self, request: &RenderRequest<'_>) -> Result<Vec<u8>, Error> {
        let document = self.build_document(request)?;
        let mut bytes = Vec::new();
        document.render(&mut bytes)?;
        Ok(bytes)
    }
}

impl DocumentRenderer for GenpdfRenderer {
    fn render(&mut self, request: &RenderRequest<'_>) -> Result<(), Error> {
        let document = self.build_document(request)?;
        debug!(
            "Rendering {} block(s) to {}",
            request.blocks.len(),
            request.output.display()
        );
        document.render_to_file(request.output)
    }
}

fn block_element(block: &Block, block_style: &BlockStyle) -> PaddedElement<TextBlock> {
    let mut style = Style::new().with_font_size(block_style.font_size());
    if block_style.is_bold() {
        style.set_bold();
    }

    let spacing = mm_from_pt(block_style.space_after_pt() + block_style.spacer_after_pt());

    TextBlock::new(block.text())
        .with_style(style)
        .with_alignment(block_style.alignment())
        .with_leading(block_style.leading_pt().map(mm_from_pt))
        .padded(Margins::trbl(Mm::default(), Mm::default(), spacing, Mm::default()))
}
