//! Player asset discovery and playback helpers
//!
//! A player directory holds one `tris.md2` model and any number of PCX skins.
//! Weapon skins (`w_*.pcx`) and HUD icons (`*_i.pcx`) share the directory and
//! are filtered out.

use log::{debug, info};
use q2_md2::{Md2Error, Md2Model};
use q2_pcx::{DecodedImage, LoadError, load_pcx};
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// File name of the model inside a player directory
pub const MODEL_FILE_NAME: &str = "tris.md2";

/// Default animation rate in frames per second
pub const DEFAULT_FPS: f32 = 7.0;

/// Scale applied to model positions when posing
pub const DEFAULT_SCALE: f32 = 0.1;

/// Errors produced while discovering player assets
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("no model found: {0} does not exist")]
    NoModel(PathBuf),

    #[error("failed to read directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load model {path}: {source}")]
    Model {
        path: PathBuf,
        #[source]
        source: Md2Error,
    },

    #[error(transparent)]
    Texture(#[from] LoadError),
}

/// Resolve the directory holding a player's assets.
///
/// Trailing separators are ignored and a path to an `.md2` file resolves to
/// the directory containing it.
pub fn resolve_player_dir(path: &Path) -> PathBuf {
    let is_model = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md2"));

    if is_model {
        path.parent().map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    } else {
        // Collecting components drops trailing separators
        path.components().collect()
    }
}

/// Check whether a directory entry name is a selectable skin
pub fn is_skin_file(file_name: &str) -> bool {
    let path = Path::new(file_name);
    let (Some(stem), Some(ext)) = (
        path.file_stem().and_then(|s| s.to_str()),
        path.extension().and_then(|e| e.to_str()),
    ) else {
        return false;
    };

    if file_name.chars().nth(1) == Some('_') || stem.ends_with("_i") {
        return false;
    }

    ext.eq_ignore_ascii_case("pcx")
}

/// A skin found next to a model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkinEntry {
    pub path: PathBuf,
    /// File stem, used for display
    pub name: String,
}

/// Skins of a player ordered by path
#[derive(Debug, Clone, Default)]
pub struct SkinRegistry {
    skins: BTreeMap<PathBuf, SkinEntry>,
    selected: Option<PathBuf>,
}

impl SkinRegistry {
    /// Register a skin. The first skin in path order becomes the default.
    pub fn insert(&mut self, path: PathBuf) {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.skins.insert(path.clone(), SkinEntry { path, name });
    }

    /// First skin in path order
    pub fn default_skin(&self) -> Option<&SkinEntry> {
        self.skins.values().next()
    }

    /// Select a skin by path. An unknown path clears the selection.
    pub fn select(&mut self, path: &Path) -> bool {
        if self.skins.contains_key(path) {
            self.selected = Some(path.to_path_buf());
            true
        } else {
            debug!("Unknown skin {}", path.display());
            self.selected = None;
            false
        }
    }

    /// Select the default skin
    pub fn select_default(&mut self) {
        self.selected = self.default_skin().map(|skin| skin.path.clone());
    }

    /// Selected skin, if any
    pub fn selected(&self) -> Option<&SkinEntry> {
        self.selected.as_ref().and_then(|path| self.skins.get(path))
    }

    /// Look a skin up by its stem, e.g. `grunt`
    pub fn find_by_name(&self, name: &str) -> Option<&SkinEntry> {
        self.skins.values().find(|skin| skin.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkinEntry> {
        self.skins.values()
    }

    pub fn len(&self) -> usize {
        self.skins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skins.is_empty()
    }
}

/// Model and skins of one player directory
#[derive(Debug)]
pub struct PlayerAssets {
    pub dir: PathBuf,
    pub model: Md2Model,
    pub skins: SkinRegistry,
}

impl PlayerAssets {
    /// Load the model of a player directory and enumerate its skins.
    ///
    /// The default skin is selected.
    pub fn discover(path: &Path) -> Result<Self, AssetError> {
        let dir = resolve_player_dir(path);
        let model_path = dir.join(MODEL_FILE_NAME);
        if !model_path.is_file() {
            return Err(AssetError::NoModel(model_path));
        }

        let model = Md2Model::load(&model_path).map_err(|source| AssetError::Model {
            path: model_path.clone(),
            source,
        })?;

        let directory_error = |source| AssetError::Directory {
            path: dir.clone(),
            source,
        };

        let mut skins = SkinRegistry::default();
        for entry in fs::read_dir(&dir).map_err(directory_error)? {
            let entry = entry.map_err(directory_error)?;
            if entry.file_type().map_err(directory_error)?.is_dir() {
                continue;
            }

            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if is_skin_file(file_name) {
                skins.insert(entry.path());
            } else {
                debug!("Skipping {file_name}");
            }
        }
        skins.select_default();

        info!(
            "Found {} with {} skin(s) in {}",
            MODEL_FILE_NAME,
            skins.len(),
            dir.display()
        );

        Ok(Self { dir, model, skins })
    }
}

/// Decoded skins keyed by path; each file is decoded at most once
#[derive(Debug, Default)]
pub struct TextureCache {
    textures: HashMap<PathBuf, DecodedImage>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `path` on first use and return the cached image afterwards
    pub fn get_or_load(&mut self, path: &Path) -> Result<&DecodedImage, LoadError> {
        match self.textures.entry(path.to_path_buf()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let pcx = load_pcx(path)?;
                debug!(
                    "Decoded texture {} ({}x{})",
                    path.display(),
                    pcx.image.width(),
                    pcx.image.height()
                );
                Ok(entry.insert(pcx.image))
            }
        }
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.textures.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

/// Converts elapsed time into a blend delta
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackRate {
    fps: f32,
}

impl PlaybackRate {
    /// A negative rate is treated as a stopped animation
    pub fn new(fps: f32) -> Self {
        Self { fps: fps.max(0.0) }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Blend delta for `elapsed` seconds
    pub fn delta(&self, elapsed: f32) -> f32 {
        (self.fps * elapsed).max(0.0)
    }

    /// Blend delta for an elapsed duration
    pub fn delta_for(&self, elapsed: Duration) -> f32 {
        self.delta(elapsed.as_secs_f32())
    }
}

impl Default for PlaybackRate {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}
