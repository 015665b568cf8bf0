//! Fragment and artifact resolution engine for Strata.
//!
//! Turns a [`ModuleDecl`](strata_model::ModuleDecl) into a
//! [`ResolvedModule`](strata_model::ResolvedModule) in four stages:
//!
//! 1. **Seed planning** ([`seeds`]): the minimal set of platform groupings
//!    the module needs, each linked to its smallest enclosing grouping.
//! 2. **Variant expansion** ([`variants`]): the cross product of every
//!    variant dimension (the implicit `test` dimension last), with edges
//!    re-pointed after each step.
//! 3. **Fragment graph** ([`graph`]): scoped settings and dependencies merged
//!    by specificity, source layout computed ([`layout`]), `Refine` cycles
//!    rejected.
//! 4. **Artifact grouping** ([`artifacts`]): leaf fragments partitioned into
//!    build outputs according to the product type.
//!
//! Resolution is a pure function of the declaration; see [`pipeline`].

pub mod arena;
pub mod artifacts;
pub mod context;
pub mod error;
pub mod graph;
pub mod layout;
pub mod pipeline;
pub mod report;
pub mod seeds;
pub mod variants;

pub use context::ResolutionContext;
pub use error::{ResolveError, Result};
pub use pipeline::{resolve_model, resolve_module};
pub use report::{format_artifacts, format_fragment_tree};
