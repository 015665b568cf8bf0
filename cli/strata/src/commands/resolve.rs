//! `strata resolve`: print the resolved model.

use std::path::Path;

use anyhow::{bail, Context, Result};
use strata_model::Model;
use strata_resolve::{format_artifacts, format_fragment_tree, resolve_model};

use crate::manifest::ProjectManifest;

/// Resolve the project (or a single module) and print it.
///
/// `format` is `text` (default) or `json`.
pub fn run(
    project_dir: &Path,
    manifest: &ProjectManifest,
    module: Option<&str>,
    format: Option<&str>,
) -> Result<()> {
    let mut decls = manifest.load_modules(project_dir)?;
    if let Some(name) = module {
        decls.retain(|d| d.name == name);
        if decls.is_empty() {
            bail!("no module named '{name}' in {}", manifest.project.name);
        }
    }
    let model = resolve_model(&decls)?;
    print!("{}", render(&model, format)?);
    Ok(())
}

pub(crate) fn render(model: &Model, format: Option<&str>) -> Result<String> {
    match format.unwrap_or("text") {
        "text" => {
            let mut out = String::new();
            for module in &model.modules {
                out.push_str(&format_fragment_tree(module));
                out.push('\n');
                out.push_str(&format_artifacts(module));
            }
            Ok(out)
        }
        "json" => {
            let mut json = serde_json::to_string_pretty(model).context("serializing model")?;
            json.push('\n');
            Ok(json)
        }
        other => bail!("unknown format '{other}' (expected text or json)"),
    }
}
