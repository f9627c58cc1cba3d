//! Skill registry
//!
//! Skills are markdown documents that teach an agent how to handle a
//! particular domain. Each one lives in its own directory and declares the
//! trigger phrases that should pull it into the agent's context.
//!
//! # Structure
//!
//! ```text
//! skills/
//! ├── maven/
//! │   └── SKILL.md           # Frontmatter + body
//! └── docker/
//!     └── SKILL.md
//! ```
//!
//! The directory name is the skill's id.
//!
//! # SKILL.md Format
//!
//! ```markdown
//! ---
//! name: maven
//! description: Build and dependency management with Maven
//! triggers:
//!   - "maven"
//!   - "pom.xml"
//!   - "<mvn-goal>"
//! ---
//!
//! # Maven
//!
//! When editing a pom.xml, ...
//! ```
//!
//! Triggers match case-insensitively as plain substrings. A trigger wrapped
//! in angle brackets only matches when the brackets appear in the text too.
//!
//! # Usage
//!
//! ```rust,ignore
//! use skillreg_skills::{SkillLoader, SkillRegistry};
//!
//! let loader = SkillLoader::new().add_path("./skills");
//! let (registry, warnings) = SkillRegistry::from_loader(&loader)?;
//!
//! for skill in registry.activate("help me write a pom.xml") {
//!     println!("{}", skill.body);
//! }
//! ```

mod error;
mod loader;
mod matcher;
mod registry;
mod skill;
mod trigger;
mod validate;

pub use error::SkillError;
pub use loader::{LoadReport, LoadWarning, SKILL_FILE, SkillLoader};
pub use matcher::{MatchResult, SkillMatcher, SubstringMatcher};
pub use registry::SkillRegistry;
pub use skill::{SkillFrontmatter, SkillRecord};
pub use trigger::{Trigger, TriggerKind};
pub use validate::{
    CheckStatus, DirectoryCheck, ValidationReport, validate_root, validate_root_blocking,
};
