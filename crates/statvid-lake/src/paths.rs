//! Data-lake directory layout.

use std::path::{Path, PathBuf};

use crate::error::LakeError;

/// Root and tier directories of the data lake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub base: PathBuf,
    pub bronze: PathBuf,
    pub silver: PathBuf,
    pub gold: PathBuf,
    pub interim: PathBuf,
    pub external: PathBuf,
}

impl DataPaths {
    #[must_use]
    pub fn new(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref().to_path_buf();
        Self {
            bronze: base.join("bronze"),
            silver: base.join("silver"),
            gold: base.join("gold"),
            interim: base.join("interim"),
            external: base.join("external"),
            base,
        }
    }

    /// Raw API artifacts: `<bronze>/youtube`.
    #[must_use]
    pub fn youtube_bronze(&self) -> PathBuf {
        self.bronze.join("youtube")
    }

    /// Creates every tier directory that does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError::Io`] naming the directory that could not be created.
    pub fn ensure(&self) -> Result<(), LakeError> {
        for dir in [
            &self.bronze,
            &self.silver,
            &self.gold,
            &self.interim,
            &self.external,
        ] {
            std::fs::create_dir_all(dir).map_err(|e| LakeError::io(dir, e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_hang_off_base() {
        let paths = DataPaths::new("/srv/data");
        assert_eq!(paths.base, PathBuf::from("/srv/data"));
        assert_eq!(paths.bronze, PathBuf::from("/srv/data/bronze"));
        assert_eq!(paths.gold, PathBuf::from("/srv/data/gold"));
        assert_eq!(
            paths.youtube_bronze(),
            PathBuf::from("/srv/data/bronze/youtube")
        );
    }

    #[test]
    fn ensure_creates_all_tiers() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::new(dir.path().join("lake"));
        paths.ensure().unwrap();
        for tier in ["bronze", "silver", "gold", "interim", "external"] {
            assert!(dir.path().join("lake").join(tier).is_dir(), "{tier} missing");
        }
    }
}
