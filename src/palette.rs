use std::{
    fmt::Debug,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use itertools::Itertools;
use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    api::PageScraper,
    colour::Colour,
    fs_json_util::{read_json, write_json},
    parser::{VersionColours, VersionLabel},
};

/// Map colours per version, in the order the wiki lists them.
///
/// The JSON form is `{ "<version>": [[r, g, b, a], ...], ... }`, where the index
/// into each array is the map colour id.
#[derive(Clone, PartialEq, Eq, Default, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(IndexMap<VersionLabel, Vec<Colour>>);

impl FromIterator<VersionColours> for Palette {
    /// A repeated version keeps its first position but takes the last colours.
    fn from_iter<I: IntoIterator<Item = VersionColours>>(iter: I) -> Self {
        Self(iter.into_iter().map(VersionColours::into_parts).collect())
    }
}

impl Palette {
    pub fn get(&self, version: &VersionLabel) -> Option<&[Colour]> {
        self.0.get(version).map(Vec::as_slice)
    }

    pub fn versions(&self) -> impl Iterator<Item = &VersionLabel> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The closest colour of `version` to `colour`, with its map colour id.
    /// Ties go to the lower id.
    pub fn nearest(&self, version: &VersionLabel, colour: &Colour) -> Option<(usize, Colour)> {
        self.get(version)?
            .iter()
            .copied()
            .enumerate()
            .min_by(|(_, x), (_, y)| colour.distance(x).total_cmp(&colour.distance(y)))
    }

    pub fn load<P: Into<PathBuf> + Debug>(path: P) -> anyhow::Result<Self> {
        read_json(path)
    }

    /// Overwrites `path`.  The write is not atomic.
    pub fn save<P: Into<PathBuf>>(&self, path: P) -> anyhow::Result<()> {
        write_json(path, self)
    }
}

/// Scrapes every palette table and writes them to `destination`.
/// Nothing is written unless scraping succeeds.
pub async fn download_palette<P: AsRef<Path> + Debug>(
    scraper: &mut PageScraper,
    destination: P,
) -> anyhow::Result<Palette> {
    let palette = scraper.colour_versions().await?.into_iter().collect::<Palette>();
    palette.save(destination.as_ref())?;
    info!(
        "Saved {} version(s) to {:?}: [{}]",
        palette.len(),
        destination,
        palette.versions().join(", ")
    );
    Ok(palette)
}
