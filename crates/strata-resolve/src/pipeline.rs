//! Resolution pipeline.
//!
//! Orchestrates the stages for one module and collects modules into a
//! [`Model`]. Resolution is pure: the same declaration always yields the
//! same fragments and artifacts, in the same order.

use strata_model::{Model, ModuleDecl, ResolvedModule};
use tracing::{debug, info};

use crate::artifacts::assign_artifacts;
use crate::context::ResolutionContext;
use crate::error::Result;
use crate::graph::build_fragments;
use crate::seeds::{plan_seeds, seed_arena};
use crate::variants::expand_variants;

/// Resolve a single module declaration.
///
/// Any failure is reported as [`ResolveError::Module`](crate::ResolveError::Module)
/// naming `decl.name`.
pub fn resolve_module(decl: &ModuleDecl) -> Result<ResolvedModule> {
    resolve_stages(decl).map_err(|e| e.in_module(&decl.name))
}

fn resolve_stages(decl: &ModuleDecl) -> Result<ResolvedModule> {
    // Stage 1: validate the declaration
    let ctx = ResolutionContext::new(decl)?;
    debug!(
        module = %decl.name,
        product = %ctx.product,
        platforms = ctx.combined_platforms.len(),
        dimensions = ctx.dimensions.len(),
        "resolution context ready"
    );

    // Stage 2: plan seeds
    let seeds = plan_seeds(&ctx);

    // Stage 3: expand variants
    let arena = expand_variants(seed_arena(&seeds), &ctx.dimensions);

    // Stage 4: build the fragment graph
    let scoped_settings = decl.scoped_settings();
    let fragments = build_fragments(&ctx, &arena, &scoped_settings)?;

    // Stage 5: group artifacts
    let mut module = ResolvedModule {
        name: decl.name.clone(),
        product: ctx.product,
        platforms: ctx.module_platforms.clone(),
        fragments,
        artifacts: Vec::new(),
        repositories: decl.repositories.clone(),
        scoped_settings,
    };
    assign_artifacts(&ctx, &mut module);

    Ok(module)
}

/// Resolve every module; the first failure aborts the whole model.
pub fn resolve_model(decls: &[ModuleDecl]) -> Result<Model> {
    let modules = decls
        .iter()
        .map(resolve_module)
        .collect::<Result<Vec<_>>>()?;
    info!(
        modules = modules.len(),
        fragments = modules.iter().map(|m| m.fragments.len()).sum::<usize>(),
        "resolved model"
    );
    Ok(Model { modules })
}
