//! Element implementations built on top of `genpdf` primitives.
//!
//! `genpdf::elements::Paragraph` cannot justify text or use a fixed leading, so body text is laid
//! out by [`TextBlock`], which positions every word itself.

use std::ops::Range;

use genpdf::error::Error;
use genpdf::style::Style;
use genpdf::{render, Element, Mm, Position, RenderResult, Size};

use crate::model::HorizontalAlignment;

const MM_PER_POINT: f64 = 25.4 / 72.0;
const WIDTH_TOLERANCE_MM: f64 = 1e-6;

pub(crate) fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

pub(crate) fn mm_to_f64(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

/// Converts a length in PostScript points to millimetres.
pub fn mm_from_pt(points: f64) -> Mm {
    mm_from_f64(points * MM_PER_POINT)
}

/// Greedily distributes words over lines no wider than `max_width`.
///
/// `widths` holds the width of every word and `space` the width of a single space, all in the
/// same unit.  A word wider than `max_width` gets a line of its own.
pub fn wrap_words(widths: &[f64], space: f64, max_width: f64) -> Vec<Range<usize>> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut line_width = 0.0;

    for (index, &width) in widths.iter().enumerate() {
        if index == start {
            line_width = width;
        } else if line_width + space + width <= max_width + WIDTH_TOLERANCE_MM {
            line_width += space + width;
        } else {
            lines.push(start..index);
            start = index;
            line_width = width;
        }
    }

    if start < widths.len() {
        lines.push(start..widths.len());
    }

    lines
}

/// Horizontal placement of one line: offset of the first word and the gap between words.
fn line_placement(
    alignment: HorizontalAlignment,
    words_width: f64,
    word_count: usize,
    space: f64,
    available: f64,
    is_last_line: bool,
) -> (f64, f64) {
    let gaps = word_count.saturating_sub(1) as f64;
    let natural = words_width + space * gaps;

    match alignment {
        HorizontalAlignment::Left => (0.0, space),
        HorizontalAlignment::Center => (((available - natural) / 2.0).max(0.0), space),
        HorizontalAlignment::Right => ((available - natural).max(0.0), space),
        HorizontalAlignment::Justified if is_last_line || gaps == 0.0 => (0.0, space),
        HorizontalAlignment::Justified => (0.0, ((available - words_width) / gaps).max(space)),
    }
}

struct Layout {
    widths: Vec<f64>,
    space: f64,
    lines: Vec<Range<usize>>,
}

/// A block of text wrapped into lines of whitespace-separated words.
///
/// Whitespace inside the source text is never printed; it only separates words.  The block keeps
/// track of the lines already rendered so it can continue on the next page when the current area
/// runs out of height.
pub struct TextBlock {
    words: Vec<String>,
    style: Style,
    alignment: HorizontalAlignment,
    leading: Option<Mm>,
    layout: Option<Layout>,
    next_line: usize,
}

impl TextBlock {
    /// Creates a left-aligned block from the given text.
    pub fn new(text: &str) -> Self {
        Self {
            words: text.split_whitespace().map(str::to_owned).collect(),
            style: Style::new(),
            alignment: HorizontalAlignment::Left,
            leading: None,
            layout: None,
            next_line: 0,
        }
    }

    /// Sets the style merged into the inherited style at render time.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Fixes the baseline-to-baseline distance instead of using the font line height.
    pub fn with_leading(mut self, leading: impl Into<Option<Mm>>) -> Self {
        self.leading = leading.into();
        self
    }

    /// Returns the number of words in the block.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    fn compute_layout(&self, context: &genpdf::Context, style: Style, available: f64) -> Layout {
        let widths: Vec<f64> = self
            .words
            .iter()
            .map(|word| mm_to_f64(style.str_width(&context.font_cache, word)))
            .collect();
        let space = mm_to_f64(style.str_width(&context.font_cache, " "));
        let lines = wrap_words(&widths, space, available);
        Layout {
            widths,
            space,
            lines,
        }
    }
}

impl Element for TextBlock {
    fn render(
        &mut self,
        context: &genpdf::Context,
        mut area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let style = style.and(self.style);
        let available = mm_to_f64(area.size().width);

        if self.layout.is_none() {
            self.layout = Some(self.compute_layout(context, style, available));
        }

        let mut result = RenderResult::default();
        let Some(layout) = self.layout.as_ref() else {
            return Ok(result);
        };

        let font_line_height = style.line_height(&context.font_cache);
        let line_height = self.leading.unwrap_or(font_line_height);

        while let Some(line) = layout.lines.get(self.next_line) {
            if line_height > area.size().height {
                result.has_more = true;
                return Ok(result);
            }

            let is_last_line = self.next_line + 1 == layout.lines.len();
            let words_width: f64 = layout.widths[line.clone()].iter().sum();
            let (offset, gap) = line_placement(
                self.alignment,
                words_width,
                line.len(),
                layout.space,
                available,
                is_last_line,
            );

            let mut cursor = offset;
            for index in line.clone() {
                let position = Position::new(mm_from_f64(cursor), 0);
                match area.text_section(&context.font_cache, position, style) {
                    Some(mut section) => section.print_str(&self.words[index], style)?,
                    None => {
                        result.has_more = true;
                        return Ok(result);
                    }
                }
                cursor += layout.widths[index] + gap;
            }

            result.size = result
                .size
                .stack_vertical(Size::new(mm_from_f64(available), line_height));
            area.add_offset(Position::new(0, line_height));
            self.next_line += 1;
        }

        Ok(result)
    }
}
