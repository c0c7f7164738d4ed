//! Core entry point for the txt2pdf crate.
//!
//! Every `*.txt` file of a directory is split on blank lines into a title and body paragraphs
//! ([`segment`]) and rendered to a PDF next to it ([`render`]).  [`batch::run_batch`] drives the
//! whole directory and reports each file through [`report::Reporter`].

pub mod batch;
pub mod builder;
pub mod elements;
pub mod error;
pub mod fonts;
pub mod model;
pub mod render;
pub mod report;
pub mod segment;

pub use batch::{run_batch, BatchOptions, BatchReport, OutputNaming};
pub use error::{ConversionError, Result};
pub use model::{Block, ConversionResult, ConversionStatus, PageSetup, PageSize, StyleSheet};
pub use render::{DocumentRenderer, GenpdfRenderer, RenderRequest};
pub use report::Reporter;
pub use segment::{segment, segments, TitleRule};
