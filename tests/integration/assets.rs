//! Style and script aggregation across a view tree.

use anyhow::Result;
use indexmap::IndexSet;
use serde_json::json;
use tessera::views::{RenderOptions, ViewSpec};

use crate::common::{TestProject, site_project};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn listed(set: &IndexSet<String>) -> Vec<&str> {
    set.iter().map(String::as_str).collect()
}

#[tokio::test]
async fn test_duplicates_keep_first_position() -> Result<()> {
    let project = site_project()?;
    let tree = project
        .engine()
        .build(
            "documents/html.tmpl",
            &[ViewSpec::new("shells/app.tmpl").with_views(vec![ViewSpec::new("views/home.tmpl")])],
            &RenderOptions::default(),
        )
        .await?;

    assert_eq!(
        listed(&tree.styles.asynchronous),
        ["/styles/shell.css", "/styles/nav.css", "/styles/home.css"]
    );
    assert_eq!(listed(&tree.scripts.sync), ["/scripts/runtime-sync.js"]);
    assert_eq!(listed(&tree.scripts.asynchronous), ["/scripts/nav.js", "/scripts/home.js"]);
    Ok(())
}

#[tokio::test]
async fn test_inline_style_relative_to_declaring_file() -> Result<()> {
    let project = TestProject::new()?;
    project.write_template("main.tmpl", "---\npartials:\n  - widgets/w.tmpl\n---\n{{#styles.inline}}[{{{this}}}]{{/styles.inline}}")?;
    project.write_template("widgets/w.tmpl", "---\nstyles:\n  - ./w-inline.css\n---\nW")?;
    project.write_template("widgets/w-inline.css", "CSS!")?;

    let engine = project.engine();
    let tree = engine.build("main.tmpl", &[], &RenderOptions::default()).await?;
    assert_eq!(tree.styles.inline.len(), 1);
    assert!(tree.styles.inline[0].ends_with("templates/widgets/w-inline.css"));

    let html = engine.render("main.tmpl", &[], &RenderOptions::default()).await?;
    assert_eq!(html, "[CSS!]");
    Ok(())
}

#[tokio::test]
async fn test_child_inline_stays_inline() -> Result<()> {
    let project = TestProject::new()?;
    project.write_template("parent.tmpl", "---\nstyles:\n  - /styles/theme.css\n---\n{{{content}}}")?;
    project.write_template("child.tmpl", "---\nstyles:\n  - /styles/theme-inline.css\n---\nC")?;
    project.write_static("styles/theme-inline.css", "x")?;

    let tree = project
        .engine()
        .build("parent.tmpl", &[ViewSpec::new("child.tmpl")], &RenderOptions::default())
        .await?;
    assert_eq!(listed(&tree.styles.asynchronous), ["/styles/theme.css"]);
    assert_eq!(tree.styles.inline.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_options_assets_classified_like_root() -> Result<()> {
    let project = TestProject::new()?;
    project.write_template(
        "page.tmpl",
        "{{#scripts.sync}}S:{{{this}}} {{/scripts.sync}}{{#scripts.async}}A:{{{this}}} {{/scripts.async}}",
    )?;

    let options = RenderOptions {
        scripts: strings(&["/js/first-sync.js", "/js/later.js"]),
        ..RenderOptions::default()
    };
    let html = project.engine().render("page.tmpl", &[], &options).await?;
    assert_eq!(html, "S:/js/first-sync.js A:/js/later.js ");
    Ok(())
}

#[tokio::test]
async fn test_categorized_front_matter() -> Result<()> {
    let project = TestProject::new()?;
    project.write_template(
        "page.tmpl",
        "---\nscripts:\n  sync: [/js/a.js]\n  async: [/js/b-sync.js]\n---\nP",
    )?;

    let tree = project.engine().build("page.tmpl", &[], &RenderOptions::default()).await?;
    assert_eq!(listed(&tree.scripts.sync), ["/js/a.js"]);
    assert_eq!(listed(&tree.scripts.asynchronous), ["/js/b-sync.js"]);
    Ok(())
}

#[tokio::test]
async fn test_document_embeds_inline_styles() -> Result<()> {
    let project = site_project()?;
    let html = project
        .engine()
        .render_document(
            "shells/app.tmpl",
            &[ViewSpec::new("views/home.tmpl").with_data(json!({"heading": "Hi"}))],
            &RenderOptions::with_data(json!({"title": "T"})),
        )
        .await?;

    assert!(html.contains("<style>body{margin:0}</style>"));
    assert!(!html.contains("critical-inline.css"));
    assert!(html.contains(r#"<link rel="stylesheet" href="/styles/shell.css">"#));
    assert!(html.contains(r#"<script src="/scripts/runtime-sync.js"></script>"#));
    assert!(html.contains(r#"<script src="/scripts/home.js" async></script>"#));
    Ok(())
}
