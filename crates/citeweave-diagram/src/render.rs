//! HTML rendering for Plotly figures.

use std::fs;
use std::path::Path;

use minijinja::{context, Environment};
use serde_json::Value;
use tracing::info;

use citeweave_common::Result;

// Template name has no .html extension on purpose: minijinja auto-escaping
// would mangle the injected figure JSON.
const TEMPLATE_NAME: &str = "diagram";
const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{{ title }}</title>
  <script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
</head>
<body>
  <div id="graph" style="width:100%;height:100vh;"></div>
  <script>
    const figure = {{ figure_json }};
    Plotly.newPlot("graph", figure.data, figure.layout, { responsive: true });
  </script>
</body>
</html>
"#;

/// Render a figure into a standalone interactive HTML page.
pub fn render_html(figure: &Value, title: &str) -> Result<String> {
    let mut env = Environment::new();
    env.add_template(TEMPLATE_NAME, TEMPLATE)
        .map_err(|e| anyhow::anyhow!("template error: {e}"))?;
    let template = env
        .get_template(TEMPLATE_NAME)
        .map_err(|e| anyhow::anyhow!("template error: {e}"))?;

    let figure_json = serde_json::to_string(figure)?;
    template
        .render(context! { title => title, figure_json => figure_json })
        .map_err(|e| anyhow::anyhow!("render error: {e}").into())
}

/// Render and write the HTML artifact.
pub fn write_html(figure: &Value, title: &str, path: &Path) -> Result<()> {
    let html = render_html(figure, title)?;
    fs::write(path, html)?;
    info!(path = %path.display(), "Diagram saved");
    Ok(())
}
