//! View tree composition: partials, child views and the content placeholder.

use anyhow::Result;
use serde_json::json;
use tessera::views::{RenderOptions, ViewSpec};

use crate::common::TestProject;

#[tokio::test]
async fn test_partial_scenario() -> Result<()> {
    tessera::test_utils::init_test_logging(None);

    let project = TestProject::new()?;
    project.write_template(
        "example/main.tmpl",
        "---\npartials:\n  - partial.tmpl\n---\nHello.{{> partial.tmpl}}Goodbye.",
    )?;
    project.write_template("example/partial.tmpl", "Partial.")?;

    let html = project.engine().render_view("example/main.tmpl", json!(null)).await?;
    assert_eq!(html, "Hello.Partial.Goodbye.");
    Ok(())
}

#[tokio::test]
async fn test_content_placeholder_wraps_child() -> Result<()> {
    let project = TestProject::new()?;
    project.write_template("parent.tmpl", "A{{content}}B")?;
    project.write_template("child.tmpl", "X")?;

    let html = project
        .engine()
        .render("parent.tmpl", &[ViewSpec::new("child.tmpl")], &RenderOptions::default())
        .await?;
    assert_eq!(html, "AXB");
    Ok(())
}

#[tokio::test]
async fn test_indexed_content_selects_children() -> Result<()> {
    let project = TestProject::new()?;
    project.write_template("parent.tmpl", "{{content-1}}{{content-0}}")?;
    project.write_template("y.tmpl", "Y")?;
    project.write_template("z.tmpl", "Z")?;

    let html = project
        .engine()
        .render(
            "parent.tmpl",
            &[ViewSpec::new("y.tmpl"), ViewSpec::new("z.tmpl")],
            &RenderOptions::default(),
        )
        .await?;
    assert_eq!(html, "ZY");
    Ok(())
}

#[tokio::test]
async fn test_nested_views_render_depth_first() -> Result<()> {
    let project = TestProject::new()?;
    project.write_template("p.tmpl", "1{{content}}")?;
    project.write_template("c.tmpl", "2{{content}}")?;
    project.write_template("g.tmpl", "3")?;

    let tree = ViewSpec::new("c.tmpl").with_views(vec![ViewSpec::new("g.tmpl")]);
    let html = project.engine().render("p.tmpl", &[tree], &RenderOptions::default()).await?;
    assert_eq!(html, "123");
    Ok(())
}

#[tokio::test]
async fn test_each_child_has_its_own_data() -> Result<()> {
    let project = TestProject::new()?;
    project.write_template("list.tmpl", "<ul>{{{content}}}</ul>")?;
    project.write_template("item.tmpl", "<li>{{data.name}}</li>")?;

    let views: Vec<_> = ["a", "b", "c"]
        .iter()
        .map(|name| ViewSpec::new("item.tmpl").with_data(json!({"name": name})))
        .collect();
    let html = project
        .engine()
        .render("list.tmpl", &views, &RenderOptions::with_data(json!({"name": "root"})))
        .await?;

    assert_eq!(html, "<ul><li>a</li><li>b</li><li>c</li></ul>");
    Ok(())
}

#[tokio::test]
async fn test_nested_partials_flatten_into_one_map() -> Result<()> {
    let project = TestProject::new()?;
    project.write_template(
        "page.tmpl",
        "---\npartials:\n  - parts/card.tmpl\n---\n{{#data.cards}}{{> parts/card.tmpl}}{{/data.cards}}",
    )?;
    project.write_template(
        "parts/card.tmpl",
        "---\npartials:\n  - title.tmpl\n---\n<div>{{> title.tmpl}}</div>",
    )?;
    project.write_template("parts/title.tmpl", "<h2>{{title}}</h2>")?;

    let engine = project.engine();
    let options = RenderOptions::with_data(json!({"cards": [{"title": "One"}, {"title": "Two"}]}));

    let tree = engine.build("page.tmpl", &[], &options).await?;
    let keys: Vec<_> = tree.partial_contents.keys().collect();
    assert_eq!(keys, vec!["parts/card.tmpl", "title.tmpl"]);

    let html = engine.render("page.tmpl", &[], &options).await?;
    assert_eq!(html, "<div><h2>One</h2></div><div><h2>Two</h2></div>");
    Ok(())
}

#[tokio::test]
async fn test_front_matter_views_precede_caller_views() -> Result<()> {
    let project = TestProject::new()?;
    project.write_template(
        "layout.tmpl",
        "---\nviews:\n  - templatePath: header.tmpl\n    data:\n      text: Top\n---\n{{{content}}}",
    )?;
    project.write_template("header.tmpl", "<header>{{data.text}}</header>")?;
    project.write_template("body.tmpl", "<section/>")?;

    let html = project
        .engine()
        .render("layout.tmpl", &[ViewSpec::new("body.tmpl")], &RenderOptions::default())
        .await?;
    assert_eq!(html, "<header>Top</header><section/>");
    Ok(())
}

#[tokio::test]
async fn test_render_is_deterministic() -> Result<()> {
    let project = crate::common::site_project()?;
    let engine = project.engine();
    let views = [
        ViewSpec::new("views/home.tmpl").with_data(json!({"heading": "Welcome"})),
        ViewSpec::new("views/about.tmpl").with_data(json!({"body": "About us"})),
    ];
    let options = RenderOptions::with_data(json!({"title": "Site"}));

    let first = engine.render_document("shells/app.tmpl", &views, &options).await?;
    for _ in 0..5 {
        assert_eq!(engine.render_document("shells/app.tmpl", &views, &options).await?, first);
    }
    Ok(())
}

#[tokio::test]
async fn test_empty_body_renders_empty() -> Result<()> {
    let project = TestProject::new()?;
    project.write_template("assets-only.tmpl", "---\nstyles:\n  - /a.css\n---\n")?;

    let tree = project.engine().build("assets-only.tmpl", &[], &RenderOptions::default()).await?;
    assert_eq!(tree.content.as_deref(), Some(""));

    let html = project.engine().render_view("assets-only.tmpl", json!(null)).await?;
    assert_eq!(html, "");
    Ok(())
}
