//! Shared helpers for integration tests.

#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use std::path::Path;

pub use tessera::test_utils::TestProject;

/// A small site used by several tests.
///
/// ```text
/// templates/documents/html.tmpl   document with inline + async styles, scripts
/// templates/shells/app.tmpl       shell with a nav partial
/// templates/partials/nav.tmpl
/// templates/views/home.tmpl
/// templates/views/about.tmpl
/// static/styles/critical-inline.css
/// ```
pub fn site_project() -> Result<TestProject> {
    let project = TestProject::new()?;

    project.write_template(
        "documents/html.tmpl",
        r#"---
styles:
  - /styles/critical-inline.css
scripts:
  - /scripts/runtime-sync.js
---
<!DOCTYPE html>
<html>
<head>
<title>{{data.title}}</title>
{{#styles.inline}}<style>{{{this}}}</style>{{/styles.inline}}
{{#styles.async}}<link rel="stylesheet" href="{{{this}}}">{{/styles.async}}
{{#scripts.sync}}<script src="{{{this}}}"></script>{{/scripts.sync}}
</head>
<body>{{{content}}}
{{#scripts.async}}<script src="{{{this}}}" async></script>{{/scripts.async}}
</body>
</html>
"#,
    )?;

    project.write_template(
        "shells/app.tmpl",
        r#"---
styles:
  - /styles/shell.css
partials:
  - ../partials/nav.tmpl
---
{{> ../partials/nav.tmpl}}<main>{{{content}}}</main>
"#,
    )?;

    project.write_template(
        "partials/nav.tmpl",
        r#"---
styles:
  - /styles/nav.css
scripts:
  - /scripts/nav.js
---
<nav>{{data.title}}</nav>
"#,
    )?;

    project.write_template(
        "views/home.tmpl",
        r#"---
styles:
  - /styles/home.css
  - /styles/shell.css
scripts:
  - /scripts/nav.js
  - /scripts/home.js
---
<h1>{{data.heading}}</h1>
"#,
    )?;

    project.write_template("views/about.tmpl", "<p>{{data.body}}</p>")?;
    project.write_static("styles/critical-inline.css", "body{margin:0}")?;

    Ok(project)
}

/// `tessera` command rooted at `root`.
pub fn tessera(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tessera").expect("tessera binary should be built");
    cmd.arg("--root").arg(root).env_remove("TESSERA_CONFIG").env_remove("RUST_LOG");
    cmd
}
