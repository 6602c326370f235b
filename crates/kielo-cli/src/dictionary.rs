// Locating and loading the dictionary files

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use kielo_fi::{Options, Session};

/// Versioned subdirectory of a dictionary package.
const DICT_SUBDIR: &str = "5/mor-standard";

const MOR_VFST: &str = "mor.vfst";
const AUTOCORR_VFST: &str = "autocorr.vfst";

/// Directories tried when no dictionary directory is given.
fn default_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        paths.push(home.join(".voikko"));
    }
    paths.push(PathBuf::from("/etc/voikko"));
    paths.push(PathBuf::from("/usr/lib/voikko"));
    paths.push(PathBuf::from("/usr/share/voikko"));
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd);
    }
    paths
}

/// The directory holding `mor.vfst` under `dir`, either `dir` itself or its
/// versioned subdirectory.
pub fn resolve(dir: &Path) -> Option<PathBuf> {
    [dir.to_path_buf(), dir.join(DICT_SUBDIR)]
        .into_iter()
        .find(|candidate| candidate.join(MOR_VFST).is_file())
}

/// Raw transducer bytes of one dictionary.
#[derive(Debug)]
pub struct Dictionary {
    pub dir: PathBuf,
    pub morphology: Vec<u8>,
    pub autocorrect: Option<Vec<u8>>,
}

impl Dictionary {
    /// Read the dictionary in `dir`, or search the usual places when `dir`
    /// is `None`.
    pub fn find(dir: Option<&Path>) -> Result<Self> {
        let searched = match dir {
            Some(dir) => vec![dir.to_path_buf()],
            None => default_search_paths(),
        };
        let Some(found) = searched.iter().find_map(|d| resolve(d)) else {
            let list: Vec<String> = searched
                .iter()
                .map(|p| format!("  - {}", p.display()))
                .collect();
            bail!("could not find {MOR_VFST} in any of:\n{}", list.join("\n"));
        };
        Self::read(&found)
    }

    fn read(dir: &Path) -> Result<Self> {
        let mor_path = dir.join(MOR_VFST);
        let morphology =
            fs::read(&mor_path).with_context(|| format!("failed to read {}", mor_path.display()))?;

        let autocorr_path = dir.join(AUTOCORR_VFST);
        let autocorrect = if autocorr_path.is_file() {
            Some(
                fs::read(&autocorr_path)
                    .with_context(|| format!("failed to read {}", autocorr_path.display()))?,
            )
        } else {
            None
        };

        log::info!(
            "dictionary {} ({} bytes, autocorrect: {})",
            dir.display(),
            morphology.len(),
            autocorrect.is_some()
        );
        Ok(Self {
            dir: dir.to_path_buf(),
            morphology,
            autocorrect,
        })
    }

    pub fn open(&self, options: Options) -> Result<Session> {
        Session::with_options(&self.morphology, self.autocorrect.as_deref(), options)
            .with_context(|| format!("failed to load dictionary from {}", self.dir.display()))
    }
}
