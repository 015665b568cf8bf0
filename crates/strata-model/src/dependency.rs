//! External dependency declarations.
//!
//! The engine never fetches anything; it only attaches these declarations to
//! the fragments they apply to.

use serde::{Deserialize, Serialize};

/// Which classpaths a dependency participates in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyScope {
    #[default]
    All,
    Compile,
    Runtime,
}

/// A declared dependency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawDependency")]
pub struct DependencyDecl {
    pub notation: String,
    pub scope: DependencyScope,
    pub exported: bool,
}

impl DependencyDecl {
    pub fn new(notation: impl Into<String>) -> Self {
        Self {
            notation: notation.into(),
            scope: DependencyScope::All,
            exported: false,
        }
    }

    pub fn with_scope(mut self, scope: DependencyScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn exported(mut self) -> Self {
        self.exported = true;
        self
    }
}

/// Accepted input shapes: a bare notation string or a detailed table.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDependency {
    Notation(String),
    Detailed {
        notation: String,
        #[serde(default)]
        scope: DependencyScope,
        #[serde(default)]
        exported: bool,
    },
}

impl From<RawDependency> for DependencyDecl {
    fn from(raw: RawDependency) -> Self {
        match raw {
            RawDependency::Notation(notation) => DependencyDecl::new(notation),
            RawDependency::Detailed {
                notation,
                scope,
                exported,
            } => DependencyDecl {
                notation,
                scope,
                exported,
            },
        }
    }
}
