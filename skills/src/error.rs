//! Error types for the skills system.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when working with skills.
#[derive(Debug, Error)]
pub enum SkillError {
    /// A skill root is missing or cannot be listed. Loading cannot proceed.
    #[error("skill root {path} is not usable: {reason}")]
    Configuration {
        /// The configured root path.
        path: PathBuf,
        /// Why the root was rejected.
        reason: String,
    },

    /// Failed to read a skill file.
    #[error("failed to read skill file at {path}: {source}")]
    ReadFile {
        /// Path to the file that couldn't be read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse skill frontmatter.
    #[error("failed to parse skill frontmatter: {0}")]
    ParseFrontmatter(#[from] serde_yaml::Error),

    /// Skill file is missing required frontmatter.
    #[error("skill file missing frontmatter delimiter '---'")]
    MissingFrontmatter,

    /// A trigger in the frontmatter is empty or whitespace only.
    #[error("trigger #{index} of skill '{skill}' is blank")]
    InvalidTrigger {
        /// Id of the skill declaring the trigger.
        skill: String,
        /// Zero-based position in the `triggers` list.
        index: usize,
    },

    /// A skill directory has no `SKILL.md`.
    #[error("skill directory {path} has no SKILL.md")]
    MissingDocument {
        /// Path to the skill directory.
        path: PathBuf,
    },

    /// Another root already provided a skill with this id.
    #[error("skill '{id}' is already loaded from an earlier root")]
    DuplicateId {
        /// The conflicting skill id.
        id: String,
    },

    /// Skill not found.
    #[error("skill '{name}' not found")]
    NotFound {
        /// Name of the skill that wasn't found.
        name: String,
    },
}

impl SkillError {
    /// Whether this error aborts a load.
    ///
    /// Only configuration errors are fatal; everything else is confined to a
    /// single skill directory, which is skipped with a warning.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}
