//! Module declarations and the resolved model for Strata.
//!
//! The input side is a [`ModuleDecl`]: target platforms, aliases, variant
//! dimensions and settings/dependencies scoped by [`Modifiers`]. The output
//! side is a [`Model`] of [`ResolvedModule`]s, each holding the fragments
//! (compilation units) and artifacts (build outputs) produced by the
//! resolution engine in `strata-resolve`.
//!
//! Settings are closed tagged unions: [`FragmentPart`] for compiler-facing
//! sections and [`ArtifactPart`] for output-facing ones. Every consumer
//! matches them exhaustively.

pub mod artifact;
pub mod decl;
pub mod dependency;
pub mod error;
pub mod fragment;
pub mod model;
pub mod modifiers;
pub mod naming;
pub mod settings;

pub use artifact::{Artifact, ArtifactPart};
pub use decl::{
    ModuleDecl, OptionDependency, ProductDecl, Repository, VariantDimension, VariantOption,
    MAIN_OPTION, TEST_DIMENSION, TEST_OPTION,
};
pub use dependency::{DependencyDecl, DependencyScope};
pub use error::{ModelError, Result};
pub use fragment::{DependencyKind, Fragment, FragmentId, FragmentLink};
pub use model::{Model, ResolvedModule};
pub use modifiers::{applicable, Modifiers};
pub use naming::{camel_join, camel_merge, capitalize, decapitalize};
pub use settings::{
    AndroidSettings, ComposeSettings, FragmentPart, JavaSettings, JunitSettings, KotlinSettings,
    NativeSettings, PartKind, PublishingSettings, Settings,
};
