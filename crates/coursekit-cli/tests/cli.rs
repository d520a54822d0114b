use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn coursekit(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("coursekit").unwrap();
    cmd.current_dir(dir).arg("--no-color");
    cmd
}

fn write_templates(root: &Path) {
    let dir = root.join("tools/templates");
    fs::create_dir_all(&dir).unwrap();
    for kind in ["chapter", "practical", "notes"] {
        fs::write(
            dir.join(format!("{}_template.ipynb", kind)),
            format!("{{\"cells\": [], \"kind\": \"{}\"}}", kind),
        )
        .unwrap();
    }
}

fn write_config(root: &Path, converter: &str) {
    fs::write(
        root.join("coursekit.toml"),
        format!("[export]\nconverter = \"{}\"\n", converter),
    )
    .unwrap();
}

#[test]
fn test_help_lists_commands() {
    let temp = tempfile::tempdir().unwrap();
    coursekit(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("setup"));
}

#[test]
fn test_create_chapter_copies_template() {
    let temp = tempfile::tempdir().unwrap();
    write_templates(temp.path());

    coursekit(temp.path())
        .args(["create", "chapter", "3", "--course", "A", "--title", "Loops"])
        .assert()
        .success()
        .stdout(predicate::str::contains("chapter-03-loops.ipynb"))
        .stderr(predicate::str::contains("didn't exist"));

    let created = temp
        .path()
        .join("notebooks/A/03-Chapter-03/chapter-03-loops.ipynb");
    assert_eq!(
        fs::read(&created).unwrap(),
        fs::read(temp.path().join("tools/templates/chapter_template.ipynb")).unwrap()
    );
}

#[test]
fn test_create_practical_default_name() {
    let temp = tempfile::tempdir().unwrap();
    write_templates(temp.path());

    coursekit(temp.path())
        .args(["create", "practical", "5"])
        .assert()
        .success();

    assert!(temp
        .path()
        .join("notebooks/DPP/Practicals/P05-practical-5.ipynb")
        .is_file());
}

#[test]
fn test_create_unknown_template_fails() {
    let temp = tempfile::tempdir().unwrap();
    write_templates(temp.path());

    coursekit(temp.path())
        .args(["create", "from", "lecture", "out/lecture.ipynb"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown template type 'lecture'"))
        .stderr(predicate::str::contains("chapter, practical, notes"));

    assert!(!temp.path().join("out").exists());
}

#[test]
fn test_create_from_with_title_into_directory() {
    let temp = tempfile::tempdir().unwrap();
    write_templates(temp.path());
    fs::create_dir_all(temp.path().join("handouts")).unwrap();

    coursekit(temp.path())
        .args(["create", "from", "practical", "handouts", "--title", "Lab Intro"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lab-intro.ipynb"));

    assert_eq!(
        fs::read(temp.path().join("handouts/lab-intro.ipynb")).unwrap(),
        fs::read(temp.path().join("tools/templates/practical_template.ipynb")).unwrap()
    );
}

#[test]
fn test_create_missing_template_fails() {
    let temp = tempfile::tempdir().unwrap();

    coursekit(temp.path())
        .args(["create", "notes", "notes/week1.ipynb"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Template not found"));

    assert!(!temp.path().join("notes").exists());
}

#[test]
fn test_export_empty_directory() {
    let temp = tempfile::tempdir().unwrap();
    fs::create_dir_all(temp.path().join("empty")).unwrap();

    coursekit(temp.path())
        .args(["export", "empty"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No notebooks found"));
}

#[test]
fn test_export_missing_notebook_fails() {
    let temp = tempfile::tempdir().unwrap();

    coursekit(temp.path())
        .args(["export", "missing.ipynb"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Notebook not found"));
}

#[test]
fn test_export_rejects_unknown_format() {
    let temp = tempfile::tempdir().unwrap();

    coursekit(temp.path())
        .args(["export", "nb.ipynb", "--format", "docx"])
        .assert()
        .failure();
}

#[cfg(unix)]
#[test]
fn test_export_directory_tally() {
    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path().join("notebooks/DPP");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("a.ipynb"), "{}").unwrap();
    fs::write(dir.join("b.ipynb"), "{}").unwrap();

    // `true` accepts any arguments and exits 0
    write_config(temp.path(), "true");
    coursekit(temp.path())
        .args(["export", "notebooks/DPP", "--format", "markdown"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2/2"));
    assert!(temp.path().join("outputs/DPP/reports").is_dir());

    write_config(temp.path(), "false");
    coursekit(temp.path())
        .args(["export", "notebooks/DPP"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("0/2"))
        .stderr(predicate::str::contains("2 of 2 notebooks failed"));
}

#[test]
fn test_render_json_bundle() {
    let temp = tempfile::tempdir().unwrap();

    coursekit(temp.path())
        .args(["render", "header", "Loops", "--level", "3", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"text/markdown\": \"### Loops\""));
}

#[test]
fn test_init_then_validate() {
    let temp = tempfile::tempdir().unwrap();

    coursekit(temp.path()).arg("init").assert().success();
    assert!(temp.path().join("coursekit.toml").is_file());
    assert!(temp
        .path()
        .join("tools/templates/practical_template.ipynb")
        .is_file());

    coursekit(temp.path())
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));
}

#[test]
fn test_invalid_config_is_reported() {
    let temp = tempfile::tempdir().unwrap();
    write_config(temp.path(), "");

    coursekit(temp.path())
        .args(["create", "chapter", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("export.converter must not be empty"));
}

#[test]
fn test_setup_requires_requirements_file() {
    let temp = tempfile::tempdir().unwrap();

    coursekit(temp.path())
        .args(["setup", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requirements.txt not found"));
}
