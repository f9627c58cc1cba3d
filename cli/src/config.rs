//! Skill root resolution.
//!
//! Roots come from `--skills-dir` flags when given, then from the
//! `SKILLREG_SKILLS_DIR` environment variable (a platform path list), and
//! finally fall back to `./skills`.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use skillreg_skills::SkillLoader;

/// Environment variable holding a path list of skill roots.
pub const SKILLS_DIR_ENV: &str = "SKILLREG_SKILLS_DIR";

/// Root used when nothing else is configured.
pub const DEFAULT_SKILLS_DIR: &str = "skills";

/// Pick the skill roots to load, in priority order.
pub fn resolve_roots(flags: &[PathBuf], env_value: Option<&OsStr>) -> Vec<PathBuf> {
    let roots: Vec<PathBuf> = if !flags.is_empty() {
        flags.to_vec()
    } else if let Some(value) = env_value.filter(|value| !value.is_empty()) {
        std::env::split_paths(value)
            .filter(|path| !path.as_os_str().is_empty())
            .collect()
    } else {
        Vec::new()
    };

    if roots.is_empty() {
        return vec![PathBuf::from(DEFAULT_SKILLS_DIR)];
    }

    roots.iter().map(|root| expand_tilde(root)).collect()
}

/// Build a loader over the given roots.
pub fn loader_for(roots: &[PathBuf]) -> SkillLoader {
    roots
        .iter()
        .fold(SkillLoader::new(), |loader, root| loader.add_path(root))
}

/// Expand ~ to home directory in a path.
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}
