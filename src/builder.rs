//! Document construction helpers for txt2pdf.

use genpdf::error::Error;
use genpdf::fonts::{FontData, FontFamily};
use genpdf::style;
use genpdf::{self, Margins, PageDecorator, PaperSize, Size};

use crate::elements::mm_from_pt;
use crate::model::{PageSetup, PageSize};

impl From<PageSize> for PaperSize {
    fn from(size: PageSize) -> Self {
        match size {
            PageSize::Letter => PaperSize::Letter,
            PageSize::A4 => PaperSize::A4,
            PageSize::Legal => PaperSize::Legal,
        }
    }
}

/// Builder for `genpdf::Document` instances pre-configured with the crate defaults.
#[derive(Default)]
pub struct DocumentBuilder {
    paper_size: Option<Size>,
    margins: Option<Margins>,
    title: Option<String>,
}

impl DocumentBuilder {
    /// Creates a new builder instance with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder using the paper size and margins of `page`.
    pub fn from_page_setup(page: &PageSetup) -> Self {
        let margin = mm_from_pt(page.margin_pt);
        Self::new()
            .with_paper_size(PaperSize::from(page.size))
            .with_margins(Margins::all(margin))
    }

    /// Sets the paper size used for newly created documents.
    pub fn with_paper_size(mut self, paper_size: impl Into<Size>) -> Self {
        self.paper_size = Some(paper_size.into());
        self
    }

    /// Sets the margins applied through the page decorator.
    pub fn with_margins(mut self, margins: impl Into<Margins>) -> Self {
        self.margins = Some(margins.into());
        self
    }

    /// Sets the title stored in the document metadata.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builds a fully configured `genpdf::Document` using the given font family.
    pub fn build(self, font_family: FontFamily<FontData>) -> genpdf::Document {
        let mut document = genpdf::Document::new(font_family);

        if let Some(paper_size) = self.paper_size {
            document.set_paper_size(paper_size);
        }

        if let Some(title) = self.title {
            document.set_title(title);
        }

        document.set_page_decorator(MarginDecorator::new(self.margins));
        document
    }
}

struct MarginDecorator {
    margins: Option<Margins>,
}

impl MarginDecorator {
    fn new(margins: Option<Margins>) -> Self {
        Self { margins }
    }
}

impl PageDecorator for MarginDecorator {
    fn decorate_page<'a>(
        &mut self,
        _context: &genpdf::Context,
        mut area: genpdf::render::Area<'a>,
        _style: style::Style,
    ) -> Result<genpdf::render::Area<'a>, Error> {
        if let Some(margins) = self.margins {
            area.add_margins(margins);
        }

        Ok(area)
    }
}
