//! Skill loader for loading skills from the filesystem.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use async_fs as afs;
use futures_lite::future::block_on;
use futures_lite::stream::StreamExt;

use crate::{SkillError, SkillRecord};

/// File name of the document every skill directory must contain.
pub const SKILL_FILE: &str = "SKILL.md";

/// Loads skills from filesystem directories.
///
/// # Example
///
/// ```rust,ignore
/// let loader = SkillLoader::new()
///     .add_path("~/.skills")
///     .add_path("./skills");
///
/// let report = loader.load_all().await?;
/// for warning in &report.warnings {
///     eprintln!("skipped {warning}");
/// }
/// ```
#[derive(Debug, Default, Clone)]
pub struct SkillLoader {
    paths: Vec<PathBuf>,
}

/// Outcome of a batch load.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Loaded skills, in scan order.
    pub skills: Vec<SkillRecord>,
    /// Directories that were skipped, in scan order.
    pub warnings: Vec<LoadWarning>,
}

impl LoadReport {
    /// True when no directory had to be skipped.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// A skill directory that was skipped during loading.
#[derive(Debug)]
pub struct LoadWarning {
    /// The skipped directory.
    pub path: PathBuf,
    /// Why it was skipped.
    pub error: SkillError,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.error)
    }
}

/// A candidate skill directory found under a root.
#[derive(Debug, Clone)]
pub(crate) struct SkillDir {
    pub(crate) id: String,
    pub(crate) path: PathBuf,
}

impl SkillLoader {
    /// Create a new skill loader with no paths.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a path to search for skills.
    ///
    /// Each path should be a directory containing skill subdirectories.
    /// The structure expected is:
    /// ```text
    /// path/
    /// └── skill-id/
    ///     └── SKILL.md
    /// ```
    #[must_use]
    pub fn add_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.push(path.into());
        self
    }

    /// The configured roots, in search order.
    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Load all skills from all configured paths.
    ///
    /// Roots are scanned in the order they were added, and each root's
    /// subdirectories in file-name order. A directory that is missing its
    /// `SKILL.md`, fails to parse, or reuses an id from an earlier root is
    /// skipped and reported in [`LoadReport::warnings`].
    ///
    /// # Errors
    ///
    /// Returns `SkillError::Configuration` if any root is missing or cannot
    /// be listed.
    pub async fn load_all(&self) -> Result<LoadReport, SkillError> {
        let mut report = LoadReport::default();
        let mut seen = HashSet::new();

        for base_path in &self.paths {
            let (dirs, listing_warnings) = scan_root(base_path).await?;
            report.warnings.extend(listing_warnings);
            let before = report.skills.len();

            for dir in dirs {
                if !seen.insert(dir.id.clone()) {
                    skip(
                        &mut report,
                        dir.path,
                        SkillError::DuplicateId { id: dir.id },
                    );
                    continue;
                }

                match Self::load_from_dir(&dir.path, &dir.id).await {
                    Ok(skill) => {
                        tracing::debug!(
                            id = %skill.id,
                            triggers = skill.triggers.len(),
                            "loaded skill"
                        );
                        report.skills.push(skill);
                    }
                    Err(error) => {
                        seen.remove(&dir.id);
                        skip(&mut report, dir.path, error);
                    }
                }
            }

            tracing::info!(
                root = %base_path.display(),
                count = report.skills.len() - before,
                "skills loaded"
            );
        }

        Ok(report)
    }

    /// Blocking variant of [`load_all`](Self::load_all) for callers without
    /// an async executor.
    ///
    /// # Errors
    ///
    /// Same as [`load_all`](Self::load_all).
    pub fn load_all_blocking(&self) -> Result<LoadReport, SkillError> {
        block_on(self.load_all())
    }

    /// Load a specific skill by id.
    ///
    /// Searches all configured paths for a directory named `id`; the first
    /// root that has one wins.
    ///
    /// # Errors
    ///
    /// Returns `SkillError::NotFound` if no skill with the given id exists,
    /// or other errors if the skill cannot be read or parsed.
    pub async fn load(&self, id: &str) -> Result<SkillRecord, SkillError> {
        for base_path in &self.paths {
            let skill_path = base_path.join(id);
            if is_dir_async(&skill_path).await? {
                return Self::load_from_dir(&skill_path, id).await;
            }
        }

        Err(SkillError::NotFound {
            name: id.to_string(),
        })
    }

    /// Load a skill from a specific directory.
    async fn load_from_dir(dir: &Path, id: &str) -> Result<SkillRecord, SkillError> {
        let skill_file = dir.join(SKILL_FILE);

        if !path_exists_async(&skill_file).await? {
            return Err(SkillError::MissingDocument {
                path: dir.to_path_buf(),
            });
        }

        let content =
            afs::read_to_string(&skill_file)
                .await
                .map_err(|source| SkillError::ReadFile {
                    path: skill_file.clone(),
                    source,
                })?;

        let mut skill = SkillRecord::parse(id, &content)?;
        skill.path = Some(skill_file);

        Ok(skill)
    }
}

fn skip(report: &mut LoadReport, path: PathBuf, error: SkillError) {
    tracing::warn!(path = %path.display(), error = %error, "skipping skill directory");
    report.warnings.push(LoadWarning { path, error });
}

/// List the candidate skill directories of a root, sorted by name.
///
/// Hidden entries and plain files are ignored. Entries whose metadata can't
/// be read come back as warnings.
pub(crate) async fn scan_root(
    root: &Path,
) -> Result<(Vec<SkillDir>, Vec<LoadWarning>), SkillError> {
    let configuration = |reason: String| SkillError::Configuration {
        path: root.to_path_buf(),
        reason,
    };

    match afs::metadata(root).await {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Err(configuration("not a directory".to_string())),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(configuration("does not exist".to_string()));
        }
        Err(err) => return Err(configuration(err.to_string())),
    }

    let mut entries = afs::read_dir(root)
        .await
        .map_err(|err| configuration(err.to_string()))?;

    let mut dirs = Vec::new();
    let mut warnings = Vec::new();

    while let Some(entry) = entries
        .try_next()
        .await
        .map_err(|err| configuration(err.to_string()))?
    {
        let path = entry.path();
        let id = entry.file_name().to_string_lossy().into_owned();

        if id.starts_with('.') {
            tracing::trace!(path = %path.display(), "ignoring hidden entry");
            continue;
        }

        // Follows symlinks so linked skill directories are picked up.
        match afs::metadata(&path).await {
            Ok(meta) if meta.is_dir() => dirs.push(SkillDir { id, path }),
            Ok(_) => tracing::trace!(path = %path.display(), "ignoring non-directory entry"),
            Err(source) => {
                let error = SkillError::ReadFile {
                    path: path.clone(),
                    source,
                };
                tracing::warn!(path = %path.display(), error = %error, "skipping skill directory");
                warnings.push(LoadWarning { path, error });
            }
        }
    }

    dirs.sort_by(|a, b| a.id.cmp(&b.id));
    Ok((dirs, warnings))
}

pub(crate) async fn path_exists_async(path: &Path) -> Result<bool, SkillError> {
    match afs::metadata(path).await {
        Ok(_) => Ok(true),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(SkillError::ReadFile {
            path: path.to_path_buf(),
            source: err,
        }),
    }
}

async fn is_dir_async(path: &Path) -> Result<bool, SkillError> {
    match afs::metadata(path).await {
        Ok(meta) => Ok(meta.is_dir()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(SkillError::ReadFile {
            path: path.to_path_buf(),
            source: err,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_lite::future::block_on;
    use std::fs;
    use std::path::Path;
    use tempfile::{TempDir, tempdir};

    fn skill_content(name: &str, triggers: &[&str]) -> String {
        let mut content = format!("---\nname: {name}\ndescription: {name} guidance\n");
        if !triggers.is_empty() {
            content.push_str("triggers:\n");
            for trigger in triggers {
                content.push_str(&format!("  - \"{trigger}\"\n"));
            }
        }
        content.push_str("---\n\nInstructions here.\n");
        content
    }

    fn create_skill_dir(base: &Path, name: &str) -> PathBuf {
        let skill_dir = base.join(name);
        fs::create_dir(&skill_dir).expect("create skill directory");
        skill_dir
    }

    fn create_skill_with_content(base: &Path, name: &str, content: &str) -> PathBuf {
        let skill_dir = create_skill_dir(base, name);
        fs::write(skill_dir.join(SKILL_FILE), content).expect("write SKILL.md");
        skill_dir
    }

    fn prepare_loader() -> (TempDir, SkillLoader) {
        let dir = tempdir().expect("create temp dir");
        let loader = SkillLoader::new().add_path(dir.path());
        (dir, loader)
    }

    #[test]
    fn test_load_skill_from_dir() {
        let (dir, loader) = prepare_loader();
        let skill_dir = create_skill_with_content(
            dir.path(),
            "test-skill",
            &skill_content("Test Skill", &["test"]),
        );

        let report = block_on(loader.load_all()).expect("load skill");

        assert!(report.is_clean());
        assert_eq!(report.skills.len(), 1);
        assert_eq!(report.skills[0].id, "test-skill");
        assert_eq!(report.skills[0].name, "Test Skill");
        assert_eq!(report.skills[0].path, Some(skill_dir.join(SKILL_FILE)));
    }

    #[test]
    fn test_scan_order_is_sorted() {
        let (dir, loader) = prepare_loader();
        for name in ["zeta", "alpha", "mid"] {
            create_skill_with_content(dir.path(), name, &skill_content(name, &[name]));
        }

        let report = loader.load_all_blocking().expect("load skills");
        let ids: Vec<&str> = report.skills.iter().map(|s| s.id.as_str()).collect();

        assert_eq!(ids, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_ignores_files_and_hidden_dirs() {
        let (dir, loader) = prepare_loader();
        create_skill_with_content(dir.path(), "real", &skill_content("real", &["real"]));
        create_skill_dir(dir.path(), ".git");
        fs::write(dir.path().join("README.md"), "# Skills").expect("write readme");

        let report = loader.load_all_blocking().expect("load skills");

        assert!(report.is_clean());
        assert_eq!(report.skills.len(), 1);
    }

    #[test]
    fn test_load_skill_by_id() {
        let (dir, loader) = prepare_loader();
        create_skill_with_content(dir.path(), "my-skill", &skill_content("My skill", &[]));

        let skill = block_on(loader.load("my-skill")).expect("load skill by id");

        assert_eq!(skill.id, "my-skill");
    }

    #[test]
    fn test_load_skill_not_found() {
        let (_dir, loader) = prepare_loader();
        let result = block_on(loader.load("nonexistent"));

        assert!(matches!(result, Err(SkillError::NotFound { .. })));
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let dir = tempdir().expect("create temp dir");
        let loader = SkillLoader::new().add_path(dir.path().join("nope"));

        let result = loader.load_all_blocking();

        let err = result.expect_err("missing root must fail");
        assert!(err.is_fatal());
        assert!(matches!(err, SkillError::Configuration { .. }));
    }

    #[test]
    fn test_root_that_is_a_file_is_fatal() {
        let dir = tempdir().expect("create temp dir");
        let file = dir.path().join("skills");
        fs::write(&file, "not a dir").expect("write file");

        let result = SkillLoader::new().add_path(file).load_all_blocking();

        assert!(matches!(result, Err(SkillError::Configuration { .. })));
    }

    #[test]
    fn test_missing_document_is_skipped() {
        let (dir, loader) = prepare_loader();
        create_skill_with_content(
            dir.path(),
            "valid-skill",
            &skill_content("valid-skill", &["valid"]),
        );
        create_skill_dir(dir.path(), "missing-markdown");

        let report = loader.load_all_blocking().expect("load never fails here");

        assert_eq!(report.skills.len(), 1);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].path.ends_with("missing-markdown"));
        assert!(matches!(
            report.warnings[0].error,
            SkillError::MissingDocument { .. }
        ));
    }

    #[test]
    fn test_malformed_frontmatter_is_skipped() {
        let (dir, loader) = prepare_loader();
        create_skill_with_content(dir.path(), "broken", "name: broken");
        create_skill_with_content(
            dir.path(),
            "blank-trigger",
            "---\nname: b\ndescription: d\ntriggers: [\"\"]\n---\n",
        );

        let report = loader.load_all_blocking().expect("load never fails here");

        assert!(report.skills.is_empty());
        assert_eq!(report.warnings.len(), 2);
        assert!(matches!(
            report.warnings[0].error,
            SkillError::InvalidTrigger { .. }
        ));
        assert!(matches!(
            report.warnings[1].error,
            SkillError::MissingFrontmatter
        ));
    }

    #[test]
    fn test_unreadable_document_is_skipped() {
        let (dir, loader) = prepare_loader();
        create_skill_with_content(dir.path(), "good", &skill_content("good", &["good"]));
        let bad_dir = create_skill_dir(dir.path(), "not-utf8");
        fs::write(bad_dir.join(SKILL_FILE), b"\xff\xfe").expect("write SKILL.md");

        let report = loader.load_all_blocking().expect("load never fails here");

        assert_eq!(report.skills.len(), 1);
        assert_eq!(report.skills[0].id, "good");
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].path.ends_with("not-utf8"));
        assert!(matches!(
            report.warnings[0].error,
            SkillError::ReadFile { .. }
        ));
    }

    #[test]
    fn test_duplicate_id_across_roots_keeps_first() {
        let first = tempdir().expect("create temp dir");
        let second = tempdir().expect("create temp dir");
        create_skill_with_content(first.path(), "maven", &skill_content("first", &["maven"]));
        create_skill_with_content(second.path(), "maven", &skill_content("second", &["mvn"]));
        create_skill_with_content(second.path(), "docker", &skill_content("docker", &["docker"]));

        let report = SkillLoader::new()
            .add_path(first.path())
            .add_path(second.path())
            .load_all_blocking()
            .expect("load skills");

        let names: Vec<&str> = report.skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["first", "docker"]);
        assert_eq!(report.warnings.len(), 1);
        assert!(matches!(
            report.warnings[0].error,
            SkillError::DuplicateId { .. }
        ));
    }

    #[test]
    fn test_broken_skill_does_not_shadow_later_root() {
        let first = tempdir().expect("create temp dir");
        let second = tempdir().expect("create temp dir");
        create_skill_dir(first.path(), "maven");
        create_skill_with_content(second.path(), "maven", &skill_content("second", &["mvn"]));

        let report = SkillLoader::new()
            .add_path(first.path())
            .add_path(second.path())
            .load_all_blocking()
            .expect("load skills");

        assert_eq!(report.skills.len(), 1);
        assert_eq!(report.skills[0].name, "second");
        assert_eq!(report.warnings.len(), 1);
    }
}
