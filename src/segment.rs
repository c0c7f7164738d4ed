//! Splitting raw file text into title and body blocks.
//!
//! Input is split on the blank-line delimiter `\n\n`.  Files that separate paragraphs with a
//! single newline, or that use `\r\n` line endings, therefore come out as one large segment.

use std::iter::Enumerate;
use std::str::Split;

use crate::model::Block;

/// Delimiter separating two segments of the input text.
pub const SEGMENT_DELIMITER: &str = "\n\n";

/// Rule deciding which segment becomes the [`Block::Title`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TitleRule {
    /// Only the segment at index 0 of the raw split can be the title.  When that segment is blank
    /// the document has no title at all.
    #[default]
    FirstSegment,
    /// The first segment that is not blank becomes the title, wherever it appears.
    FirstNonBlank,
}

/// Lazy iterator over the blocks of a text, created by [`segments`].
pub struct Segments<'a> {
    raw: Enumerate<Split<'a, &'static str>>,
    rule: TitleRule,
    seen_content: bool,
}

impl Iterator for Segments<'_> {
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        for (index, raw) in self.raw.by_ref() {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }

            let is_title = match self.rule {
                TitleRule::FirstSegment => index == 0,
                TitleRule::FirstNonBlank => !self.seen_content,
            };
            self.seen_content = true;

            return Some(if is_title {
                Block::Title(trimmed.to_owned())
            } else {
                Block::Paragraph(normalize_whitespace(trimmed))
            });
        }

        None
    }
}

/// Returns the blocks of `text` in input order using the given title rule.
pub fn segments(text: &str, rule: TitleRule) -> Segments<'_> {
    Segments {
        raw: text.split(SEGMENT_DELIMITER).enumerate(),
        rule,
        seen_content: false,
    }
}

/// Collects the blocks of `text` using [`TitleRule::FirstSegment`].
pub fn segment(text: &str) -> Vec<Block> {
    segments(text, TitleRule::FirstSegment).collect()
}

/// Collapses every whitespace run into a single space and strips both ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
