//! Skill matching based on trigger phrases.

use std::fmt;
use std::ops::Range;

use crate::trigger::{fold_case, fold_char};
use crate::{SkillRecord, Trigger};

/// Decides which skills a piece of text activates.
///
/// Implementations must only return skills from the slice they are given,
/// each at most once, and must be deterministic for identical inputs.
pub trait SkillMatcher: fmt::Debug + Send + Sync {
    /// Find the skills activated by `text`, in the order they appear in `skills`.
    fn match_text<'a>(&self, text: &str, skills: &'a [SkillRecord]) -> Vec<MatchResult<'a>>;
}

/// Result of matching a skill against some text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult<'a> {
    /// The activated skill.
    pub skill: &'a SkillRecord,
    /// The trigger that matched.
    pub matched_trigger: &'a Trigger,
    /// Byte range of the match within the text passed to the matcher.
    pub span: Range<usize>,
}

impl MatchResult<'_> {
    /// Id of the activated skill.
    #[must_use]
    pub fn skill_id(&self) -> &str {
        &self.skill.id
    }
}

/// Case-insensitive substring matching over triggers.
///
/// Keyword triggers match anywhere in the text. Tag triggers such as
/// `<commit-msg>` match only when the delimiters are present too. The first
/// trigger in declaration order that matches is reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl SubstringMatcher {
    /// Create a new substring matcher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SkillMatcher for SubstringMatcher {
    fn match_text<'a>(&self, text: &str, skills: &'a [SkillRecord]) -> Vec<MatchResult<'a>> {
        if text.is_empty() {
            return Vec::new();
        }

        let folded = FoldedText::new(text);

        skills
            .iter()
            .filter_map(|skill| {
                skill.triggers.iter().find_map(|trigger| {
                    trigger.find_in(&folded.text).map(|range| MatchResult {
                        skill,
                        matched_trigger: trigger,
                        span: folded.original_span(&range),
                    })
                })
            })
            .collect()
    }
}

/// Case-folded text that remembers where each folded byte came from.
struct FoldedText {
    text: String,
    // For every byte of `text`, the byte range of the original character.
    origin: Vec<(usize, usize)>,
}

impl FoldedText {
    fn new(original: &str) -> Self {
        let mut text = String::with_capacity(original.len());
        let mut origin = Vec::with_capacity(original.len());

        for (start, ch) in original.char_indices() {
            let end = start + ch.len_utf8();
            let mut buf = [0u8; 4];
            for folded in fold_char(ch) {
                text.push_str(folded.encode_utf8(&mut buf));
                origin.extend(std::iter::repeat_n((start, end), folded.len_utf8()));
            }
        }

        debug_assert_eq!(fold_case(original), text);
        Self { text, origin }
    }

    fn original_span(&self, folded: &Range<usize>) -> Range<usize> {
        let start = self.origin[folded.start].0;
        let end = self.origin[folded.end - 1].1;
        start..end
    }
}
