//! End-to-end loading and matching against a real skill tree.

use std::fs;
use std::path::Path;

use skillreg_skills::{SKILL_FILE, SkillError, SkillLoader, SkillRegistry};
use tempfile::{TempDir, tempdir};

fn write_skill(root: &Path, id: &str, triggers: &[&str]) {
    let dir = root.join(id);
    fs::create_dir(&dir).expect("create skill directory");

    let triggers: String = triggers.iter().map(|t| format!("  - \"{t}\"\n")).collect();
    let content = format!(
        "---\nname: {id}\ndescription: Guidance for {id}\ntriggers:\n{triggers}---\n\n# {id}\n\nUse {id} carefully.\n"
    );
    fs::write(dir.join(SKILL_FILE), content).expect("write SKILL.md");
}

fn build_tree() -> TempDir {
    let root = tempdir().expect("create temp dir");
    write_skill(root.path(), "maven", &["maven", "pom.xml"]);
    write_skill(root.path(), "docker", &["docker", "dockerfile"]);
    root
}

fn activated(registry: &SkillRegistry, text: &str) -> Vec<String> {
    registry
        .activate(text)
        .into_iter()
        .map(|skill| skill.id.clone())
        .collect()
}

#[test]
fn maven_and_docker_scenario() {
    let root = build_tree();
    let loader = SkillLoader::new().add_path(root.path());
    let (registry, warnings) = SkillRegistry::from_loader(&loader).expect("load registry");

    assert!(warnings.is_empty());
    assert_eq!(registry.ids(), vec!["docker", "maven"]);

    assert_eq!(activated(&registry, "help me write a pom.xml"), vec!["maven"]);
    assert_eq!(activated(&registry, "deploy with dockerfile"), vec!["docker"]);
    assert!(activated(&registry, "hello").is_empty());
}

#[test]
fn matching_properties_hold() {
    let root = build_tree();
    let loader = SkillLoader::new().add_path(root.path());
    let (registry, _) = SkillRegistry::from_loader(&loader).expect("load registry");

    assert_eq!(activated(&registry, "MAVEN"), activated(&registry, "maven"));
    assert!(activated(&registry, "").is_empty());
    assert!(activated(&registry, "gradle build").is_empty());

    let text = "maven builds inside a Docker image";
    let first = registry.match_text(text);
    let second = registry.match_text(text);
    assert_eq!(first, second);
    assert!(first.iter().all(|m| registry.contains(m.skill_id())));
    assert_eq!(&text[first[0].span.clone()], "Docker");
}

#[test]
fn loader_skips_one_bad_directory_of_six() {
    let root = tempdir().expect("create temp dir");
    for id in ["a", "b", "c", "d", "e"] {
        write_skill(root.path(), id, &[id]);
    }
    fs::create_dir(root.path().join("no-document")).expect("create empty skill dir");

    let report = SkillLoader::new()
        .add_path(root.path())
        .load_all_blocking()
        .expect("load never fails for a bad skill directory");

    assert_eq!(report.skills.len(), 5);
    assert_eq!(report.warnings.len(), 1);
    assert!(matches!(
        report.warnings[0].error,
        SkillError::MissingDocument { .. }
    ));
}

#[test]
fn registries_are_independent() {
    let first = build_tree();
    let second = tempdir().expect("create temp dir");
    write_skill(second.path(), "kubernetes", &["kubectl"]);

    let (a, _) = SkillRegistry::from_loader(&SkillLoader::new().add_path(first.path()))
        .expect("load first registry");
    let (b, _) = SkillRegistry::from_loader(&SkillLoader::new().add_path(second.path()))
        .expect("load second registry");

    assert!(activated(&a, "kubectl apply").is_empty());
    assert_eq!(activated(&b, "kubectl apply"), vec!["kubernetes"]);
}
