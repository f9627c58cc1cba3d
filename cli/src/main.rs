//! Command-line front end for a skill registry.
//!
//! Loads `SKILL.md` documents from one or more skill roots and either checks
//! their structure or reports which skills a piece of text activates.
//!
//! # Usage
//!
//! ```bash
//! # Check that every skill directory has a SKILL.md (exit 1 if not)
//! skillreg validate
//! skillreg --skills-dir ./skills validate --strict
//!
//! # Which skills does this text activate?
//! skillreg match "help me write a pom.xml"
//! echo "deploy with dockerfile" | skillreg match --json
//!
//! # Inspect the registry
//! skillreg list
//! skillreg show maven
//! ```
//!
//! Roots default to `$SKILLREG_SKILLS_DIR`, then `./skills`. Set `RUST_LOG`
//! to adjust logging; skipped skill directories are logged as warnings.

mod config;
mod output;

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use skillreg_skills::{SkillRegistry, validate_root_blocking};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "skillreg",
    version,
    about = "Validate skill documents and match text against their triggers"
)]
struct Args {
    /// Skill root directory. Repeat to search several roots in order.
    /// Must come before the subcommand.
    #[arg(long = "skills-dir", value_name = "PATH")]
    skills_dirs: Vec<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that every skill directory contains a SKILL.md.
    Validate {
        /// Also parse each SKILL.md and fail on malformed frontmatter.
        #[arg(long)]
        strict: bool,
    },
    /// List the skills activated by some text, in load order.
    Match {
        /// Text to match. Read from stdin when omitted.
        text: Option<String>,
        /// Emit JSON instead of tab-separated lines.
        #[arg(long)]
        json: bool,
        /// Include each activated skill's body.
        #[arg(long)]
        body: bool,
    },
    /// List loaded skills and their triggers.
    List {
        /// Emit JSON instead of tab-separated lines.
        #[arg(long)]
        json: bool,
    },
    /// Print the body of one skill.
    Show {
        /// Skill id (its directory name).
        id: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let env_value = std::env::var_os(config::SKILLS_DIR_ENV);
    let roots = config::resolve_roots(&args.skills_dirs, env_value.as_deref());
    tracing::debug!(roots = ?roots, "resolved skill roots");

    let mut stdout = io::stdout().lock();

    match args.command {
        Command::Validate { strict } => {
            let all_ok = validate(&mut stdout, &roots, strict)?;
            Ok(if all_ok {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Match { text, json, body } => {
            let text = match text {
                Some(text) => text,
                None => read_stdin()?,
            };
            let registry = load_registry(&roots)?;
            let matches = registry.match_text(&text);
            output::write_matches(&mut stdout, &matches, json, body)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::List { json } => {
            let registry = load_registry(&roots)?;
            output::write_skills(&mut stdout, &registry, json)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Show { id } => {
            let registry = load_registry(&roots)?;
            let Some(skill) = registry.get(&id) else {
                bail!("skill '{id}' not found");
            };
            writeln!(stdout, "{}", skill.body)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Validate every root; returns whether all of them passed.
fn validate(out: &mut impl Write, roots: &[PathBuf], strict: bool) -> Result<bool> {
    let mut all_ok = true;

    for root in roots {
        let report = validate_root_blocking(root, strict)
            .with_context(|| format!("failed to validate {}", root.display()))?;
        output::write_validation(out, &report)?;
        all_ok &= report.is_ok();
    }

    Ok(all_ok)
}

fn load_registry(roots: &[PathBuf]) -> Result<SkillRegistry> {
    let loader = config::loader_for(roots);
    let (registry, warnings) =
        SkillRegistry::from_loader(&loader).context("failed to load skills")?;

    tracing::info!(
        skills = registry.len(),
        skipped = warnings.len(),
        "registry ready"
    );
    Ok(registry)
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("failed to read text from stdin")?;
    Ok(text)
}
