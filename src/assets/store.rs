use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::assets::decode::{SpriteAsset, decode_sprite};
use crate::foundation::error::{BabycamError, BabycamResult};

/// Normalize and validate asset-root-relative paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> BabycamResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(BabycamError::asset("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(BabycamError::asset("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(BabycamError::asset("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(BabycamError::asset("asset path must contain a file name"));
    }

    Ok(out.join("/"))
}

/// Startup-time sprite and font loader. Each distinct path is read once and shared.
#[derive(Debug)]
pub struct AssetStore {
    root: PathBuf,
    sprites: BTreeMap<String, Arc<SpriteAsset>>,
    fonts: BTreeMap<String, Arc<Vec<u8>>>,
}

impl AssetStore {
    /// Create a store resolving relative paths against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            sprites: BTreeMap::new(),
            fonts: BTreeMap::new(),
        }
    }

    /// Root directory for relative asset paths.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Register an in-memory sprite under a path key, bypassing disk IO.
    pub fn insert(&mut self, rel: &str, sprite: SpriteAsset) -> BabycamResult<Arc<SpriteAsset>> {
        let key = normalize_rel_path(rel)?;
        let sprite = Arc::new(sprite);
        self.sprites.insert(key, Arc::clone(&sprite));
        Ok(sprite)
    }

    /// Load (or reuse) the sprite at `rel`.
    pub fn load_sprite(&mut self, rel: &str) -> BabycamResult<Arc<SpriteAsset>> {
        let key = normalize_rel_path(rel)?;
        if let Some(s) = self.sprites.get(&key) {
            return Ok(Arc::clone(s));
        }

        let path = self.root.join(&key);
        let bytes = std::fs::read(&path)
            .map_err(|e| BabycamError::asset(format!("read sprite '{}': {e}", path.display())))?;
        let sprite = decode_sprite(&bytes).map_err(|e| match e {
            BabycamError::Asset(msg) => BabycamError::asset(format!("{key}: {msg}")),
            other => other,
        })?;
        tracing::debug!(
            path = %key,
            width = sprite.width(),
            height = sprite.height(),
            alpha = sprite.has_alpha(),
            "loaded sprite"
        );

        let sprite = Arc::new(sprite);
        self.sprites.insert(key, Arc::clone(&sprite));
        Ok(sprite)
    }

    /// Register in-memory font bytes under a path key, bypassing disk IO.
    pub fn insert_font(&mut self, rel: &str, bytes: Vec<u8>) -> BabycamResult<Arc<Vec<u8>>> {
        let key = normalize_rel_path(rel)?;
        let bytes = Arc::new(bytes);
        self.fonts.insert(key, Arc::clone(&bytes));
        Ok(bytes)
    }

    /// Load (or reuse) the raw font file at `rel`. Parsing happens when a caption registers it.
    pub fn load_font(&mut self, rel: &str) -> BabycamResult<Arc<Vec<u8>>> {
        let key = normalize_rel_path(rel)?;
        if let Some(f) = self.fonts.get(&key) {
            return Ok(Arc::clone(f));
        }

        let path = self.root.join(&key);
        let bytes = std::fs::read(&path)
            .map_err(|e| BabycamError::asset(format!("read font '{}': {e}", path.display())))?;
        if bytes.is_empty() {
            return Err(BabycamError::asset(format!("{key}: font file is empty")));
        }
        tracing::debug!(path = %key, bytes = bytes.len(), "loaded font");

        let bytes = Arc::new(bytes);
        self.fonts.insert(key, Arc::clone(&bytes));
        Ok(bytes)
    }

    /// Number of distinct sprites loaded.
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// Return `true` when nothing has been loaded yet.
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
