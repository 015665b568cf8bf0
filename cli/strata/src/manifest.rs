//! `strata.toml` project manifest and `module.toml` loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use strata_model::ModuleDecl;
use tracing::debug;

/// Project manifest file name.
pub const MANIFEST_FILE: &str = "strata.toml";
/// Per-module declaration file name.
pub const MODULE_FILE: &str = "module.toml";

/// The top-level manifest of a Strata project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectManifest {
    pub project: ProjectConfig,
}

/// `[project]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    /// Module directories relative to the manifest.
    #[serde(default = "default_modules")]
    pub modules: Vec<String>,
}

fn default_modules() -> Vec<String> {
    vec![".".to_string()]
}

impl ProjectManifest {
    /// Search upward from `start_dir` for a `strata.toml` file, parse and return it
    /// along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                let content = fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: ProjectManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                debug!(path = %candidate.display(), "loaded project manifest");
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing strata.toml")
    }

    /// Load every module listed in the manifest, in manifest order.
    ///
    /// A module without an explicit `root` is rooted at its directory
    /// relative to the project.
    pub fn load_modules(&self, project_dir: &Path) -> Result<Vec<ModuleDecl>> {
        let mut modules = Vec::with_capacity(self.project.modules.len());
        for entry in &self.project.modules {
            let mut decl = load_module(&project_dir.join(entry))?;
            if decl.root.as_os_str().is_empty() && entry != "." {
                decl.root = PathBuf::from(entry);
            }
            modules.push(decl);
        }
        Ok(modules)
    }

    /// Generate the default manifest for `strata init`.
    pub fn template(name: &str) -> String {
        format!(
            r#"[project]
name = "{name}"
modules = ["shared"]
"#
        )
    }
}

/// Read `module.toml` from a module directory.
pub fn load_module(module_dir: &Path) -> Result<ModuleDecl> {
    let path = module_dir.join(MODULE_FILE);
    let content =
        fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    let decl: ModuleDecl =
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
    debug!(module = %decl.name, path = %path.display(), "loaded module declaration");
    Ok(decl)
}

/// Default `module.toml` for `strata init`.
pub fn module_template() -> &'static str {
    r#"name = "shared"

[product]
type = "lib"
platforms = ["jvm", "iosArm64"]

[[variants]]
name = "mode"
options = [
    { name = "debug", default = true },
    { name = "release" },
]

[settings.""]
kotlin = { languageVersion = "1.9" }

[test-dependencies]
"" = ["org.jetbrains.kotlin:kotlin-test:1.9.0"]
"#
}
