//! Block manifest loading.
//!
//! A manifest is a JSON file holding one [`BlockType`] object or an array of
//! them. [`ManifestLoader`] reads manifests through a [`ContentSource`] so it
//! works the same on disk ([`FsSource`]) and against in-memory fixtures.

pub mod source;

pub use source::*;

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use rayon::prelude::*;
use serde::Deserialize;

use crate::desc::BlockDescOptions;
use crate::model::BlockType;

#[derive(Deserialize)]
#[serde(untagged)]
enum Manifest {
    Many(Vec<BlockType>),
    One(BlockType),
}

/// Parse manifest text. `origin` is only used in error messages.
pub fn parse_manifest(text: &str, origin: Option<&str>) -> Result<Vec<BlockType>> {
    let manifest: Manifest = serde_json::from_str(text)
        .with_context(|| format!("Failed to parse manifest {}", origin.unwrap_or("<memory>")))?;
    Ok(match manifest {
        Manifest::Many(block_types) => block_types,
        Manifest::One(block_type) => vec![block_type],
    })
}

/// Block types gathered from a directory, plus the manifests that failed.
#[derive(Debug, Default)]
pub struct LoadedManifests {
    pub block_types: Vec<BlockType>,
    pub failures: Vec<(Utf8PathBuf, anyhow::Error)>,
}

pub struct ManifestLoader<S: ContentSource> {
    source: S,
}

impl<S: ContentSource> ManifestLoader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Load every block type from a single manifest.
    pub fn load_file(&mut self, path: impl AsRef<Utf8Path>) -> Result<Vec<BlockType>> {
        let path = path.as_ref();
        let text = self.source.read_to_string(path)?;
        parse_manifest(&text, Some(path.as_str()))
    }

    /// Load every `*.json` manifest below `dir`. Manifests are parsed in
    /// parallel; block types keep the listing order of their files. A broken
    /// manifest is reported in `failures` and does not stop the others.
    pub fn load_dir(&mut self, dir: impl AsRef<Utf8Path>) -> Result<LoadedManifests> {
        let dir = dir.as_ref();
        let paths: Vec<Utf8PathBuf> = self
            .source
            .list_dir(dir)
            .with_context(|| format!("Failed to list manifests in {}", dir))?
            .into_iter()
            .filter(|p| p.extension() == Some("json"))
            .collect();

        let mut loaded = LoadedManifests::default();
        let mut texts: Vec<(Utf8PathBuf, String)> = Vec::new();
        for p in paths {
            match self.source.read_to_string(&p) {
                Ok(t) => texts.push((p, t)),
                Err(e) => loaded.failures.push((p, e)),
            }
        }

        let parsed: Vec<(Utf8PathBuf, Result<Vec<BlockType>>)> = texts
            .into_par_iter()
            .map(|(p, t)| {
                let res = parse_manifest(&t, Some(p.as_str()));
                (p, res)
            })
            .collect();
        for (p, res) in parsed {
            match res {
                Ok(block_types) => loaded.block_types.extend(block_types),
                Err(e) => loaded.failures.push((p, e)),
            }
        }
        Ok(loaded)
    }

    /// Load [`BlockDescOptions`] from a JSON file. Missing keys keep defaults.
    pub fn load_options(&mut self, path: impl AsRef<Utf8Path>) -> Result<BlockDescOptions> {
        let path = path.as_ref();
        let text = self.source.read_to_string(path)?;
        BlockDescOptions::from_json_str(&text)
            .with_context(|| format!("Failed to parse options {}", path))
    }
}
