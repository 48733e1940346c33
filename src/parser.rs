//! Structural queries against the "Map item format" wiki page.
//!
//! Every assumption about the page markup lives in the constants below,
//! so a markup change on the wiki should only need an edit here.

use std::collections::HashSet;

use derive_more::{Display, From};
use getset::Getters;
use itertools::Itertools;
use log::{debug, trace};
use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::colour::{Colour, ColourParseError};

/// Captions of the palette tables, i.e. `//*[@id="mw-content-text"]/div/table/caption`.
pub const CAPTION_SELECTOR: &str = "#mw-content-text > div > table > caption";
/// Lower-cased suffix that marks a caption as a palette table.
pub const CAPTION_MARKER: &str = "color table (map color id)";
/// Zero-based column holding the `r, g, b[, a]` text.
pub const COLOUR_COLUMN: usize = 2;
pub const UNKNOWN_VERSION: &str = "Unknown Version";

#[derive(Clone, PartialEq, Eq, Hash, Debug, From, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionLabel(String);

impl VersionLabel {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VersionLabel {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl Default for VersionLabel {
    fn default() -> Self {
        UNKNOWN_VERSION.into()
    }
}

/// All colours of one palette table, in row order.
#[derive(Clone, PartialEq, Eq, Debug, Getters)]
#[getset(get = "pub")]
pub struct VersionColours {
    version: VersionLabel,
    colours: Vec<Colour>,
}

impl VersionColours {
    pub fn into_parts(self) -> (VersionLabel, Vec<Colour>) {
        (self.version, self.colours)
    }
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("Table has no <tbody> child")]
    MissingBody,
    #[error("Row {row} has no cells")]
    EmptyRow { row: usize },
    #[error("Row {row} has no cell at column {column}")]
    MissingCell { row: usize, column: usize },
    #[error("Row {row} has no text at column {column}")]
    MissingText { row: usize, column: usize },
    #[error("Row {row} has an invalid colour {text:?}: {source}")]
    Colour {
        row: usize,
        text: String,
        source: ColourParseError,
    },
    #[error("Caption has no parent table")]
    MissingTable,
}

fn child_elements<'a>(e: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    e.children().filter_map(ElementRef::wrap)
}

/// The text node directly at the start of `e`, ignoring anything after its first child.
/// Footnote markers such as `<sup>[1]</sup>` therefore never end up in the result.
fn leading_text<'a>(e: ElementRef<'a>) -> Option<&'a str> {
    e.children()
        .next()
        .and_then(|node| node.value().as_text())
        .map(|text| &**text)
}

/// Reads the colours of one palette table.
/// Rows whose first cell is a `<th>` are treated as labels and skipped.
pub fn parse_table(
    table: ElementRef,
    version: Option<VersionLabel>,
) -> Result<VersionColours, TableError> {
    let version = version.unwrap_or_default();
    let body = child_elements(table)
        .find(|e| e.value().name() == "tbody")
        .ok_or(TableError::MissingBody)?;

    let mut colours = vec![];
    let mut seen = HashSet::new();
    for (row, tr) in child_elements(body)
        .filter(|e| e.value().name() == "tr")
        .enumerate()
    {
        let cells = child_elements(tr).collect_vec();
        let first = cells.first().ok_or(TableError::EmptyRow { row })?;
        if first.value().name() == "th" {
            trace!("Skipping header row {row} of {version}");
            continue;
        }
        let cell = cells.get(COLOUR_COLUMN).ok_or(TableError::MissingCell {
            row,
            column: COLOUR_COLUMN,
        })?;
        let text = leading_text(*cell)
            .ok_or(TableError::MissingText {
                row,
                column: COLOUR_COLUMN,
            })?
            .trim()
            .to_lowercase();
        // Duplicates are kept so that positions stay aligned with map colour ids.
        if !seen.insert(text.clone()) {
            debug!("Colour {text:?} appears more than once in {version}");
        }
        let colour = text
            .parse::<Colour>()
            .map_err(|source| TableError::Colour { row, text, source })?;
        colours.push(colour);
    }
    Ok(VersionColours { version, colours })
}

/// Lower-cased, trimmed caption text, or `None` for captions not starting with text.
fn caption_text(caption: ElementRef) -> Option<String> {
    leading_text(caption).map(|text| text.trim().to_lowercase())
}

/// Captions of the palette tables, in page order.
pub fn find_captions(html: &Html) -> Vec<ElementRef<'_>> {
    html.select(selector!(CAPTION_SELECTOR))
        .filter(|&caption| caption_text(caption).is_some_and(|t| t.ends_with(CAPTION_MARKER)))
        .inspect(|&caption| debug!("Found palette caption: {:?}", caption_text(caption)))
        .collect()
}

/// The enclosing table of each caption.
pub fn find_tables<'a>(captions: &[ElementRef<'a>]) -> Result<Vec<ElementRef<'a>>, TableError> {
    captions
        .iter()
        .map(|caption| {
            caption
                .parent()
                .and_then(ElementRef::wrap)
                .ok_or(TableError::MissingTable)
        })
        .collect()
}

/// `"Java Color Table (Map Color ID)"` becomes `"java"`.
pub fn version_label(caption: &str) -> VersionLabel {
    caption
        .to_lowercase()
        .replace(CAPTION_MARKER, "")
        .trim()
        .to_owned()
        .into()
}

/// One entry per palette table on the page, in page order.
pub fn parse_colour_versions(html: &Html) -> Result<Vec<VersionColours>, TableError> {
    let captions = find_captions(html);
    let tables = find_tables(&captions)?;
    captions
        .into_iter()
        .zip(tables)
        .map(|(caption, table)| {
            let label = version_label(leading_text(caption).unwrap_or_default());
            parse_table(table, Some(label))
        })
        .collect()
}
