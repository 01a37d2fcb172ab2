//! Failure modes that abort a render.

use anyhow::Result;
use tessera::core::{Diagnostics, TesseraError, user_friendly_error};
use tessera::views::{RenderOptions, ViewSpec};

use crate::common::TestProject;

#[tokio::test]
async fn test_duplicate_partial_names_key() -> Result<()> {
    let project = TestProject::new()?;
    project.write_template(
        "page.tmpl",
        "---\npartials:\n  - a/card.tmpl\n  - b/wrapper.tmpl\n---\n{{> a/card.tmpl}}",
    )?;
    project.write_template("a/card.tmpl", "---\npartials:\n  - item.tmpl\n---\nA")?;
    project.write_template("a/item.tmpl", "first")?;
    project.write_template("b/wrapper.tmpl", "---\npartials:\n  - item.tmpl\n---\nB")?;
    project.write_template("b/item.tmpl", "second")?;

    let err = project.engine().render("page.tmpl", &[], &RenderOptions::default()).await.unwrap_err();
    match &err {
        TesseraError::DuplicatePartial { partial_path } => assert_eq!(partial_path, "item.tmpl"),
        other => panic!("expected DuplicatePartial, got {other:?}"),
    }
    assert!(err.to_string().contains("'item.tmpl'"));
    assert_eq!(err.status_code(), 500);
    Ok(())
}

#[tokio::test]
async fn test_same_partial_twice_is_allowed() -> Result<()> {
    let project = TestProject::new()?;
    project.write_template(
        "page.tmpl",
        "---\npartials:\n  - icon.tmpl\n  - icon.tmpl\n---\n{{> icon.tmpl}}{{> icon.tmpl}}",
    )?;
    project.write_template("icon.tmpl", "*")?;

    let html = project.engine().render("page.tmpl", &[], &RenderOptions::default()).await?;
    assert_eq!(html, "**");
    Ok(())
}

#[tokio::test]
async fn test_missing_template_is_not_found() -> Result<()> {
    let project = TestProject::new()?;
    project.write_template("views/home.tmpl", "home")?;

    let err = project
        .engine()
        .render("views/hom.tmpl", &[], &RenderOptions::default())
        .await
        .unwrap_err();

    match &err {
        TesseraError::TemplateNotFound { template_path, suggestions } => {
            assert!(template_path.ends_with("views/hom.tmpl"));
            assert_eq!(suggestions, &vec!["home.tmpl".to_string()]);
        }
        other => panic!("expected TemplateNotFound, got {other:?}"),
    }
    assert_eq!(err.status_code(), 404);

    let ctx = user_friendly_error(err.into());
    assert_eq!(ctx.suggestion.as_deref(), Some("Did you mean: home.tmpl?"));
    Ok(())
}

#[tokio::test]
async fn test_missing_child_view_aborts() -> Result<()> {
    let project = TestProject::new()?;
    project.write_template("shell.tmpl", "{{{content}}}")?;
    project.write_template("a.tmpl", "A")?;

    let result = project
        .engine()
        .render(
            "shell.tmpl",
            &[ViewSpec::new("a.tmpl"), ViewSpec::new("missing.tmpl")],
            &RenderOptions::default(),
        )
        .await;
    assert!(matches!(result, Err(TesseraError::TemplateNotFound { .. })));
    Ok(())
}

#[tokio::test]
async fn test_self_including_partial_is_a_loop() -> Result<()> {
    let project = TestProject::new()?;
    project.write_template("loop.tmpl", "---\npartials:\n  - loop.tmpl\n---\n{{> loop.tmpl}}")?;

    let err = project.engine().render("loop.tmpl", &[], &RenderOptions::default()).await.unwrap_err();
    assert!(matches!(err, TesseraError::PartialsLoop { .. }));
    Ok(())
}

#[tokio::test]
async fn test_missing_inline_asset_aborts() -> Result<()> {
    let project = TestProject::new()?;
    project.write_template("page.tmpl", "---\nstyles:\n  - /styles/gone-inline.css\n---\nP")?;

    let err = project.engine().render("page.tmpl", &[], &RenderOptions::default()).await.unwrap_err();
    assert!(matches!(err, TesseraError::InlineAssetRead { .. }));
    Ok(())
}

#[tokio::test]
async fn test_wrong_front_matter_shape_is_fatal() -> Result<()> {
    let project = TestProject::new()?;
    project.write_template("page.tmpl", "---\nstyles: /one.css\n---\nP")?;

    let err = project.engine().render("page.tmpl", &[], &RenderOptions::default()).await.unwrap_err();
    assert!(matches!(err, TesseraError::InvalidFrontMatter { .. }));
    Ok(())
}

#[tokio::test]
async fn test_malformed_yaml_warns_once_and_renders_body() -> Result<()> {
    let project = TestProject::new()?;
    project.write_template("shell.tmpl", "{{{content}}}")?;
    project.write_template("broken.tmpl", "---\nstyles: [oops\n---\nB")?;

    let diagnostics = Diagnostics::new();
    let html = project
        .engine()
        .render_with_diagnostics(
            "shell.tmpl",
            &[ViewSpec::new("broken.tmpl"), ViewSpec::new("broken.tmpl")],
            &RenderOptions::default(),
            &diagnostics,
        )
        .await?;

    assert!(html.contains("styles: [oops"));
    assert_eq!(diagnostics.warning_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_unclosed_section_is_template_error() -> Result<()> {
    let project = TestProject::new()?;
    project.write_template("bad.tmpl", "{{#items}}never closed")?;

    let err = project.engine().render("bad.tmpl", &[], &RenderOptions::default()).await.unwrap_err();
    match err {
        TesseraError::Template { name, .. } => assert!(name.ends_with("bad.tmpl")),
        other => panic!("expected Template error, got {other:?}"),
    }
    Ok(())
}
