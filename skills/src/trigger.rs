//! Trigger patterns declared in skill frontmatter.

use std::fmt;
use std::ops::Range;

use caseless::Caseless;
use serde::Serialize;

/// How a trigger is written in the frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerKind {
    /// A plain keyword or phrase, e.g. `pom.xml`.
    Keyword,
    /// A tag-delimited token, e.g. `<commit-msg>`. The angle brackets are part
    /// of the pattern and must appear in the text.
    Tag,
}

/// A single trigger pattern.
///
/// Triggers are never blank. The case-folded needle is computed once at
/// construction so matching doesn't re-fold the pattern per query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct Trigger {
    source: String,
    needle: String,
    kind: TriggerKind,
}

impl Trigger {
    /// Build a trigger from its frontmatter text.
    ///
    /// Returns `None` when the text is empty or whitespace only.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Option<Self> {
        let source = source.into();
        if source.trim().is_empty() {
            return None;
        }

        let kind = if is_tag(&source) {
            TriggerKind::Tag
        } else {
            TriggerKind::Keyword
        };
        let needle = fold_case(&source);

        Some(Self {
            source,
            needle,
            kind,
        })
    }

    /// The trigger as written in the frontmatter.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The case-folded pattern searched for in folded text.
    #[must_use]
    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// Whether this is a keyword or a tag.
    #[must_use]
    pub const fn kind(&self) -> TriggerKind {
        self.kind
    }

    /// Find the first occurrence of this trigger in already case-folded text.
    ///
    /// The returned range indexes into `folded`.
    #[must_use]
    pub fn find_in(&self, folded: &str) -> Option<Range<usize>> {
        folded
            .find(&self.needle)
            .map(|start| start..start + self.needle.len())
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl From<Trigger> for String {
    fn from(trigger: Trigger) -> Self {
        trigger.source
    }
}

/// Apply Unicode default case folding to `text`.
pub(crate) fn fold_case(text: &str) -> String {
    text.chars().default_case_fold().collect()
}

/// Case-fold a single character. Folding never looks at neighbouring
/// characters, so folding a string char by char equals [`fold_case`].
pub(crate) fn fold_char(ch: char) -> impl Iterator<Item = char> {
    std::iter::once(ch).default_case_fold()
}

fn is_tag(source: &str) -> bool {
    source.len() > 2 && source.starts_with('<') && source.ends_with('>')
}
