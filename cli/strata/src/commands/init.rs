//! `strata init`: project scaffolding.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::manifest::{module_template, ProjectManifest, MANIFEST_FILE, MODULE_FILE};

/// Create a new Strata project in directory `name` relative to cwd.
pub fn run(name: &str) -> Result<()> {
    create_project(Path::new(name), name)
}

pub(crate) fn create_project(project_dir: &Path, name: &str) -> Result<()> {
    if project_dir.exists() {
        bail!("directory '{}' already exists", project_dir.display());
    }

    let module_dir = project_dir.join("shared");
    for dir in ["src", "src@jvm", "src@iosArm64", "test"] {
        fs::create_dir_all(module_dir.join(dir))
            .with_context(|| format!("creating shared/{dir}/ directory"))?;
    }

    fs::write(project_dir.join(MANIFEST_FILE), ProjectManifest::template(name))
        .with_context(|| format!("writing {MANIFEST_FILE}"))?;
    fs::write(module_dir.join(MODULE_FILE), module_template())
        .with_context(|| format!("writing shared/{MODULE_FILE}"))?;

    println!("Created project '{name}'");
    println!("  {name}/{MANIFEST_FILE}");
    println!("  {name}/shared/{MODULE_FILE}");
    println!("  {name}/shared/src/");

    Ok(())
}
