//! Rendering of command results for humans and for scripts.

use std::io::{self, Write};

use serde::Serialize;
use skillreg_skills::{MatchResult, SkillRecord, TriggerKind, ValidationReport};

/// JSON shape of one activated skill.
#[derive(Debug, Serialize)]
struct MatchView<'a> {
    id: &'a str,
    name: &'a str,
    trigger: &'a str,
    kind: TriggerKind,
    span: [usize; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<&'a str>,
}

/// JSON shape of one loaded skill.
#[derive(Debug, Serialize)]
struct SkillView<'a> {
    id: &'a str,
    name: &'a str,
    description: &'a str,
    triggers: Vec<&'a str>,
}

impl<'a> From<&'a SkillRecord> for SkillView<'a> {
    fn from(skill: &'a SkillRecord) -> Self {
        Self {
            id: &skill.id,
            name: &skill.name,
            description: &skill.description,
            triggers: skill.triggers.iter().map(|t| t.as_str()).collect(),
        }
    }
}

/// Print activated skills, one per line or as a JSON array.
pub fn write_matches(
    out: &mut impl Write,
    matches: &[MatchResult<'_>],
    json: bool,
    with_body: bool,
) -> io::Result<()> {
    if json {
        let views: Vec<MatchView<'_>> = matches
            .iter()
            .map(|m| MatchView {
                id: m.skill_id(),
                name: &m.skill.name,
                trigger: m.matched_trigger.as_str(),
                kind: m.matched_trigger.kind(),
                span: [m.span.start, m.span.end],
                body: with_body.then_some(m.skill.body.as_str()),
            })
            .collect();
        serde_json::to_writer_pretty(&mut *out, &views)?;
        return writeln!(out);
    }

    for m in matches {
        writeln!(
            out,
            "{}\t{}\t[{}..{}]",
            m.skill_id(),
            m.matched_trigger,
            m.span.start,
            m.span.end
        )?;
        if with_body {
            writeln!(out, "{}\n", m.skill.body)?;
        }
    }
    Ok(())
}

/// Print loaded skills with their triggers.
pub fn write_skills<'a>(
    out: &mut impl Write,
    skills: impl IntoIterator<Item = &'a SkillRecord>,
    json: bool,
) -> io::Result<()> {
    if json {
        let views: Vec<SkillView<'_>> = skills.into_iter().map(SkillView::from).collect();
        serde_json::to_writer_pretty(&mut *out, &views)?;
        return writeln!(out);
    }

    for skill in skills {
        let triggers: Vec<&str> = skill.triggers.iter().map(|t| t.as_str()).collect();
        if triggers.is_empty() {
            writeln!(out, "{}\t{}\t(no triggers)", skill.id, skill.description)?;
        } else {
            writeln!(
                out,
                "{}\t{}\t{}",
                skill.id,
                skill.description,
                triggers.join(", ")
            )?;
        }
    }
    Ok(())
}

/// Print a validation report; offending directories are marked `FAIL`.
pub fn write_validation(out: &mut impl Write, report: &ValidationReport) -> io::Result<()> {
    writeln!(out, "{}", report.root.display())?;
    for check in &report.checks {
        if check.status.is_ok() {
            writeln!(out, "  ok    {}", check.id)?;
        } else {
            writeln!(out, "  FAIL  {}: {}", check.id, check.status)?;
        }
    }

    let failed = report.failures().count();
    writeln!(
        out,
        "  {} checked, {} failed",
        report.checks.len(),
        failed
    )
}
