//! Skill records and frontmatter parsing.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{SkillError, Trigger};

/// A loaded skill document.
///
/// Records are built once by the loader and only ever handed out by shared
/// reference afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillRecord {
    /// Unique id, taken from the skill's directory name.
    pub id: String,
    /// Name declared in the frontmatter.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Trigger patterns in declaration order. Empty means never activated.
    pub triggers: Vec<Trigger>,
    /// The markdown body (everything after the frontmatter).
    pub body: String,
    /// Optional list of allowed tools (None = all tools allowed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_tools: Option<Vec<String>>,
    /// The `SKILL.md` this record was read from, if any.
    #[serde(skip)]
    pub path: Option<PathBuf>,
}

/// YAML frontmatter parsed from SKILL.md files.
#[derive(Debug, Clone, Deserialize)]
pub struct SkillFrontmatter {
    /// Declared name of the skill.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Trigger phrases that activate this skill.
    #[serde(default)]
    pub triggers: Vec<String>,
    /// Optional list of allowed tools.
    #[serde(default)]
    pub tools: Option<Vec<String>>,
}

impl SkillRecord {
    /// Parse a skill from SKILL.md content.
    ///
    /// The file format is:
    /// ```markdown
    /// ---
    /// name: maven
    /// description: Maven build guidance
    /// triggers:
    ///   - "maven"
    ///   - "pom.xml"
    /// ---
    ///
    /// # Maven
    ///
    /// The rest of the file is the body...
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `SkillError::MissingFrontmatter` if the content doesn't open
    /// and close a `---` block, `SkillError::ParseFrontmatter` if the YAML
    /// cannot be parsed, or `SkillError::InvalidTrigger` if a trigger is blank.
    pub fn parse(id: impl Into<String>, content: &str) -> Result<Self, SkillError> {
        let id = id.into();
        let (yaml_content, body) = split_frontmatter(content)?;
        let frontmatter: SkillFrontmatter = serde_yaml::from_str(yaml_content)?;

        let triggers = frontmatter
            .triggers
            .into_iter()
            .enumerate()
            .map(|(index, text)| {
                Trigger::new(text).ok_or_else(|| SkillError::InvalidTrigger {
                    skill: id.clone(),
                    index,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id,
            name: frontmatter.name,
            description: frontmatter.description,
            triggers,
            body: body.to_string(),
            allowed_tools: frontmatter.tools,
            path: None,
        })
    }

    /// Whether this skill can ever be activated by text.
    #[must_use]
    pub fn is_matchable(&self) -> bool {
        !self.triggers.is_empty()
    }
}

/// Split a document into its YAML frontmatter and trimmed body.
///
/// The opening `---` must be the first non-blank line and the block ends at
/// the next line consisting solely of `---`.
fn split_frontmatter(content: &str) -> Result<(&str, &str), SkillError> {
    let content = content.trim_start_matches('\u{feff}').trim_start();

    let rest = content
        .strip_prefix("---")
        .ok_or(SkillError::MissingFrontmatter)?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
        .ok_or(SkillError::MissingFrontmatter)?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = rest[offset + line.len()..].trim();
            return Ok((yaml, body));
        }
        offset += line.len();
    }

    Err(SkillError::MissingFrontmatter)
}
