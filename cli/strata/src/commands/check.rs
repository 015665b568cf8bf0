//! `strata check`: validate every module declaration.

use std::path::Path;

use anyhow::Result;
use strata_resolve::resolve_model;

use crate::manifest::ProjectManifest;

/// Resolve all modules and print a one-line summary.
pub fn run(project_dir: &Path, manifest: &ProjectManifest) -> Result<()> {
    println!("{}", summary(project_dir, manifest)?);
    Ok(())
}

pub(crate) fn summary(project_dir: &Path, manifest: &ProjectManifest) -> Result<String> {
    let decls = manifest.load_modules(project_dir)?;
    let model = resolve_model(&decls)?;
    let fragments: usize = model.modules.iter().map(|m| m.fragments.len()).sum();
    let artifacts: usize = model.modules.iter().map(|m| m.artifacts.len()).sum();
    Ok(format!(
        "{}: {} modules, {fragments} fragments, {artifacts} artifacts",
        manifest.project.name,
        model.modules.len()
    ))
}
