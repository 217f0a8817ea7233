//! Directory of palette files.

use crate::{CptError, Palette, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File extension of colour palette tables.
pub const CPT_EXTENSION: &str = "cpt";

/// A directory containing `*.cpt` palette files.
#[derive(Debug, Clone)]
pub struct CptRepository {
    dir: PathBuf,
}

impl CptRepository {
    /// Open a palette directory. The directory must exist.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(CptError::NotFound(dir.to_path_buf()));
        }
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// The palette directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All palette files in the directory, sorted by file name.
    pub fn list(&self) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == CPT_EXTENSION) {
                paths.push(path);
            }
        }
        paths.sort();
        debug!(dir = %self.dir.display(), count = paths.len(), "listed palettes");
        Ok(paths)
    }

    /// Resolve a palette by name (`colombia` or `colombia.cpt`) inside the
    /// directory.
    pub fn path_for(&self, name: &str) -> PathBuf {
        let file = if name.ends_with(&format!(".{}", CPT_EXTENSION)) {
            name.to_string()
        } else {
            format!("{}.{}", name, CPT_EXTENSION)
        };
        self.dir.join(file)
    }

    /// Load a palette by name.
    pub fn load(&self, name: &str) -> Result<Palette> {
        Palette::from_file(self.path_for(name))
    }

    /// Parse every palette in the directory.
    ///
    /// Returns one result per file so callers can report failures without
    /// aborting the whole scan.
    pub fn load_all(&self) -> Result<Vec<(PathBuf, Result<Palette>)>> {
        let loaded = self
            .list()?
            .into_iter()
            .map(|path| {
                let palette = Palette::from_file(&path);
                if let Err(e) = &palette {
                    warn!("invalid palette: {}", e);
                }
                (path, palette)
            })
            .collect();
        Ok(loaded)
    }
}
