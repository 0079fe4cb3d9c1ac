//! HTML shell around rendered markup and the hydration snapshot.

use catalog::CatalogState;

use super::assets::AssetPaths;

/// Serialize the state snapshot for embedding inside a `<script>` block.
///
/// Every `<` becomes `\u003c` so a value such as `</script>` cannot close the
/// block early. The result is still valid JSON.
///
/// # Errors
///
/// Returns an error if the state fails to serialize.
pub fn serialize_state(state: &CatalogState) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(state)?.replace('<', "\\u003c"))
}

/// Complete document for a rendered page.
#[must_use]
pub fn html_document(markup: &str, snapshot: &str, assets: &AssetPaths) -> String {
    let vendors = assets
        .vendors
        .as_deref()
        .map(|src| format!("\n    <script src=\"{src}\" type=\"text/javascript\"></script>"))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>Movie Catalog</title>
    <link rel="stylesheet" href="{stylesheet}" type="text/css">
  </head>
  <body>
    <div id="app">{markup}</div>
    <script id="preloadedState">
      window.__PRELOADED_STATE__ = {snapshot}
    </script>
    <script src="{script}" type="text/javascript"></script>{vendors}
  </body>
</html>
"#,
        stylesheet = assets.stylesheet,
        script = assets.script,
    )
}

/// Served when rendering fails. Carries no preloaded state.
#[must_use]
pub fn fallback_document() -> &'static str {
    r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <title>Movie Catalog</title>
  </head>
  <body>
    <div id="app"><h1>Something went wrong</h1><p>Please try again later.</p></div>
  </body>
</html>
"#
}

#[cfg(test)]
#[path = "document_test.rs"]
mod tests;
