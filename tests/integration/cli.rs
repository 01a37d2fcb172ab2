//! End-to-end tests of the `tessera` binary.

use anyhow::Result;
use predicates::prelude::*;

use crate::common::{TestProject, site_project, tessera};

#[test]
fn test_render_prints_output() -> Result<()> {
    let project = TestProject::new()?;
    project.write_template("hello.tmpl", "Hello {{data.name}}!")?;

    tessera(project.root())
        .args(["render", "hello.tmpl", "--data", r#"{"name": "CLI"}"#])
        .assert()
        .success()
        .stdout("Hello CLI!\n");
    Ok(())
}

#[test]
fn test_render_with_views() -> Result<()> {
    let project = TestProject::new()?;
    project.write_template("list.tmpl", "<{{{content}}}>")?;
    project.write_template("a.tmpl", "a")?;
    project.write_template("b.tmpl", "{{data.v}}")?;

    tessera(project.root())
        .args(["render", "list.tmpl", "--view", "a.tmpl", "--view", r#"{"templatePath": "b.tmpl", "data": {"v": "b"}}"#])
        .assert()
        .success()
        .stdout("<ab>\n");
    Ok(())
}

#[test]
fn test_render_spec_file() -> Result<()> {
    let project = TestProject::new()?;
    project.write_template("shell.tmpl", "({{{content}}})")?;
    project.write_template("x.tmpl", "x")?;
    let spec = project.write_file(
        "response.json",
        r#"{"templatePath": "shell.tmpl", "views": ["x.tmpl"]}"#,
    )?;

    tessera(project.root())
        .args(["render", "--spec"])
        .arg(&spec)
        .assert()
        .success()
        .stdout("(x)\n");
    Ok(())
}

#[test]
fn test_document_command() -> Result<()> {
    let project = site_project()?;

    tessera(project.root())
        .args([
            "document",
            "shells/app.tmpl",
            "--view",
            "views/about.tmpl",
            "--data",
            r#"{"title": "Docs"}"#,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("<title>Docs</title>"))
        .stdout(predicate::str::contains("<style>body{margin:0}</style>"));
    Ok(())
}

#[test]
fn test_tree_command_prints_json() -> Result<()> {
    let project = site_project()?;

    let output = tessera(project.root())
        .args(["tree", "shells/app.tmpl", "--view", "views/home.tmpl", "--compact"])
        .output()?;
    assert!(output.status.success());

    let tree: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(tree["partialContents"]["../partials/nav.tmpl"], "<nav>{{data.title}}</nav>");
    assert_eq!(tree["views"][0]["content"], "<h1>{{data.heading}}</h1>");
    assert_eq!(
        tree["styles"]["async"],
        serde_json::json!(["/styles/shell.css", "/styles/nav.css", "/styles/home.css"])
    );
    Ok(())
}

#[test]
fn test_missing_template_exits_with_suggestion() -> Result<()> {
    let project = TestProject::new()?;
    project.write_template("index.tmpl", "i")?;

    tessera(project.root())
        .args(["render", "indx.tmpl"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Template not found"))
        .stderr(predicate::str::contains("index.tmpl"));
    Ok(())
}

#[test]
fn test_invalid_config_reported() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("tessera.toml", "templates_dir = [")?;
    project.write_template("a.tmpl", "a")?;

    tessera(project.root())
        .args(["render", "a.tmpl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse configuration"));
    Ok(())
}

#[test]
fn test_config_from_env() -> Result<()> {
    let project = TestProject::new()?;
    let config = project.write_file("alt.toml", "templates_dir = \"alt\"\n")?;
    project.write_file("alt/a.tmpl", "from alt")?;

    tessera(project.root())
        .env("TESSERA_CONFIG", &config)
        .args(["render", "a.tmpl"])
        .assert()
        .success()
        .stdout("from alt\n");
    Ok(())
}
