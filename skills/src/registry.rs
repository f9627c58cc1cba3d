//! Skill registry for storing and querying skills.

use std::collections::HashMap;

use crate::{
    LoadWarning, MatchResult, SkillError, SkillLoader, SkillMatcher, SkillRecord,
    SubstringMatcher,
};

/// An immutable, ordered set of skills paired with a matcher.
///
/// The registry is built once and then only read, so a single instance can be
/// shared across threads. Iteration and match results follow the order the
/// skills were loaded in.
///
/// # Example
///
/// ```rust,ignore
/// let loader = SkillLoader::new().add_path("./skills");
/// let (registry, warnings) = SkillRegistry::from_loader(&loader)?;
///
/// for skill in registry.activate("help me write a pom.xml") {
///     println!("{}", skill.body);
/// }
/// ```
#[derive(Debug, Default)]
pub struct SkillRegistry<M = SubstringMatcher> {
    skills: Vec<SkillRecord>,
    index: HashMap<String, usize>,
    matcher: M,
}

impl SkillRegistry {
    /// Build a registry using the default substring matcher.
    ///
    /// If two records share an id, the first one wins.
    #[must_use]
    pub fn new(skills: Vec<SkillRecord>) -> Self {
        Self::with_matcher(skills, SubstringMatcher::new())
    }

    /// Load every configured root and build a registry from the result.
    ///
    /// Skipped directories are returned alongside the registry.
    ///
    /// # Errors
    ///
    /// Returns `SkillError::Configuration` if a root is missing or unreadable.
    pub fn from_loader(loader: &SkillLoader) -> Result<(Self, Vec<LoadWarning>), SkillError> {
        let report = loader.load_all_blocking()?;
        Ok((Self::new(report.skills), report.warnings))
    }
}

impl<M: SkillMatcher> SkillRegistry<M> {
    /// Build a registry with a custom matcher.
    ///
    /// If two records share an id, the first one wins.
    #[must_use]
    pub fn with_matcher(skills: Vec<SkillRecord>, matcher: M) -> Self {
        let mut index = HashMap::with_capacity(skills.len());
        let mut unique = Vec::with_capacity(skills.len());

        for skill in skills {
            if index.contains_key(&skill.id) {
                tracing::warn!(id = %skill.id, "dropping skill with duplicate id");
                continue;
            }
            index.insert(skill.id.clone(), unique.len());
            unique.push(skill);
        }

        Self {
            skills: unique,
            index,
            matcher,
        }
    }

    /// Get a skill by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SkillRecord> {
        self.index.get(id).map(|&position| &self.skills[position])
    }

    /// Check if a skill exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All skill ids, in load order.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.skills.iter().map(|skill| skill.id.as_str()).collect()
    }

    /// Iterate over the skills in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, SkillRecord> {
        self.skills.iter()
    }

    /// Number of registered skills.
    #[must_use]
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// The matcher used by [`match_text`](Self::match_text).
    #[must_use]
    pub const fn matcher(&self) -> &M {
        &self.matcher
    }

    /// Find the skills activated by `text`, with the trigger and span that
    /// activated each one.
    #[must_use]
    pub fn match_text(&self, text: &str) -> Vec<MatchResult<'_>> {
        self.matcher.match_text(text, &self.skills)
    }

    /// The skills activated by `text`, in load order.
    #[must_use]
    pub fn activate(&self, text: &str) -> Vec<&SkillRecord> {
        self.match_text(text)
            .into_iter()
            .map(|result| result.skill)
            .collect()
    }
}

impl<'a, M> IntoIterator for &'a SkillRegistry<M> {
    type Item = &'a SkillRecord;
    type IntoIter = std::slice::Iter<'a, SkillRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.skills.iter()
    }
}
