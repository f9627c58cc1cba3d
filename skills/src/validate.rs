//! Structural checks over a skill root.

use std::fmt;
use std::path::{Path, PathBuf};

use async_fs as afs;
use futures_lite::future::block_on;

use crate::loader::{SKILL_FILE, path_exists_async, scan_root};
use crate::{SkillError, SkillRecord};

/// Outcome for a single skill directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// The directory has a usable `SKILL.md`.
    Ok,
    /// The directory has no `SKILL.md`.
    MissingDocument,
    /// The document exists but could not be read or parsed (strict mode only),
    /// or the directory itself could not be inspected.
    Invalid(String),
}

impl CheckStatus {
    /// Whether this status counts as a pass.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => f.write_str("ok"),
            Self::MissingDocument => write!(f, "missing {SKILL_FILE}"),
            Self::Invalid(reason) => write!(f, "invalid: {reason}"),
        }
    }
}

/// Check result for one directory under the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryCheck {
    /// Directory name.
    pub id: String,
    /// Full path of the directory.
    pub path: PathBuf,
    /// What was found.
    pub status: CheckStatus,
}

/// Per-directory results for a whole root, sorted by directory name.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// The root that was checked.
    pub root: PathBuf,
    /// One entry per skill directory.
    pub checks: Vec<DirectoryCheck>,
}

impl ValidationReport {
    /// True when every directory passed.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.checks.iter().all(|check| check.status.is_ok())
    }

    /// The directories that did not pass.
    pub fn failures(&self) -> impl Iterator<Item = &DirectoryCheck> {
        self.checks.iter().filter(|check| !check.status.is_ok())
    }
}

/// Check that every skill directory under `root` carries a `SKILL.md`.
///
/// With `strict`, each document is also parsed and parse failures are
/// reported as [`CheckStatus::Invalid`].
///
/// # Errors
///
/// Returns `SkillError::Configuration` if `root` is missing or unreadable.
pub async fn validate_root(root: &Path, strict: bool) -> Result<ValidationReport, SkillError> {
    let (dirs, listing_warnings) = scan_root(root).await?;

    let mut checks: Vec<DirectoryCheck> = listing_warnings
        .into_iter()
        .map(|warning| DirectoryCheck {
            id: dir_name(&warning.path),
            status: CheckStatus::Invalid(warning.error.to_string()),
            path: warning.path,
        })
        .collect();

    for dir in dirs {
        let status = check_dir(&dir.path, &dir.id, strict).await;
        if !status.is_ok() {
            tracing::debug!(id = %dir.id, status = %status, "skill directory failed validation");
        }
        checks.push(DirectoryCheck {
            id: dir.id,
            path: dir.path,
            status,
        });
    }

    checks.sort_by(|a, b| a.id.cmp(&b.id));

    Ok(ValidationReport {
        root: root.to_path_buf(),
        checks,
    })
}

/// Blocking variant of [`validate_root`].
///
/// # Errors
///
/// Same as [`validate_root`].
pub fn validate_root_blocking(root: &Path, strict: bool) -> Result<ValidationReport, SkillError> {
    block_on(validate_root(root, strict))
}

async fn check_dir(dir: &Path, id: &str, strict: bool) -> CheckStatus {
    let skill_file = dir.join(SKILL_FILE);

    match path_exists_async(&skill_file).await {
        Ok(true) => {}
        Ok(false) => return CheckStatus::MissingDocument,
        Err(err) => return CheckStatus::Invalid(err.to_string()),
    }

    if !strict {
        return CheckStatus::Ok;
    }

    let content = match afs::read_to_string(&skill_file).await {
        Ok(content) => content,
        Err(source) => {
            let err = SkillError::ReadFile {
                path: skill_file,
                source,
            };
            return CheckStatus::Invalid(err.to_string());
        }
    };

    match SkillRecord::parse(id, &content) {
        Ok(_) => CheckStatus::Ok,
        Err(err) => CheckStatus::Invalid(err.to_string()),
    }
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
