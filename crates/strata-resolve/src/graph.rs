//! Fragment graph assembly.
//!
//! Turns the expanded arena into resolved [`Fragment`]s: scoped settings and
//! dependencies are merged by specificity, paths are laid out, edges become
//! per-fragment links, and the `Refine` subgraph is checked for cycles.

use std::collections::{BTreeSet, HashSet};

use strata_model::{
    applicable, DependencyDecl, DependencyKind, Fragment, FragmentId, FragmentLink, Modifiers,
    Settings,
};
use tracing::{debug, trace};

use crate::arena::FragmentArena;
use crate::context::ResolutionContext;
use crate::error::{ResolveError, Result};
use crate::layout::source_paths;

/// Build the resolved fragments of a module from its expanded arena.
///
/// `settings` are the module's scoped entries; each fragment records the
/// merge of those matching its own tags.
pub fn build_fragments(
    ctx: &ResolutionContext<'_>,
    arena: &FragmentArena,
    settings: &[(Modifiers, Settings)],
) -> Result<Vec<Fragment>> {
    let dependencies = ctx.decl.scoped_dependencies();

    let mut fragments = Vec::with_capacity(arena.len());
    for (id, node) in arena.nodes().iter().enumerate() {
        let (source_path, resource_path) = source_paths(ctx, node);
        let mut fragment = Fragment {
            name: node.name.clone(),
            platforms: node.platforms.clone(),
            root_platforms: node.root_platforms.clone(),
            aliases: node.aliases.clone(),
            variants: node.variants.clone(),
            is_test: node.is_test,
            is_default: node.is_default,
            is_leaf: false,
            dependencies: arena
                .edges_from(id)
                .map(|edge| FragmentLink {
                    target: edge.target,
                    kind: edge.kind,
                })
                .collect(),
            external_dependencies: Vec::new(),
            settings_parts: Vec::new(),
            source_path,
            resource_path,
        };
        let tags = fragment.tags();
        fragment.settings_parts = Settings::merge_scoped(settings, &tags).into_parts();
        fragment.external_dependencies = merge_dependencies(&dependencies, &tags);
        trace!(fragment = %fragment.name, tags = ?tags, "merged settings");
        fragments.push(fragment);
    }

    check_refine_cycles(&fragments)?;
    debug!(module = %ctx.decl.name, fragments = fragments.len(), "built fragment graph");
    Ok(fragments)
}

/// Collect applicable dependencies; a more specific entry replaces a general one with the same notation.
pub fn merge_dependencies(
    entries: &[(Modifiers, &[DependencyDecl])],
    tags: &BTreeSet<String>,
) -> Vec<DependencyDecl> {
    let mut merged: Vec<DependencyDecl> = Vec::new();
    for (_, decls) in applicable(entries, tags) {
        for decl in decls.iter() {
            match merged.iter_mut().find(|d| d.notation == decl.notation) {
                Some(existing) => *existing = decl.clone(),
                None => merged.push(decl.clone()),
            }
        }
    }
    merged
}

/// Reject cycles among `Refine` edges, naming the edge that closes the cycle.
pub fn check_refine_cycles(fragments: &[Fragment]) -> Result<()> {
    let mut visited = HashSet::new();
    let mut stack = HashSet::new();

    fn dfs(
        fragments: &[Fragment],
        node: FragmentId,
        visited: &mut HashSet<FragmentId>,
        stack: &mut HashSet<FragmentId>,
    ) -> Result<()> {
        visited.insert(node);
        stack.insert(node);

        for target in fragments[node].dependency_targets(DependencyKind::Refine) {
            if stack.contains(&target) {
                return Err(ResolveError::CyclicDependency {
                    from: fragments[node].name.clone(),
                    to: fragments[target].name.clone(),
                });
            }
            if !visited.contains(&target) {
                dfs(fragments, target, visited, stack)?;
            }
        }

        stack.remove(&node);
        Ok(())
    }

    for id in 0..fragments.len() {
        if !visited.contains(&id) {
            dfs(fragments, id, &mut visited, &mut stack)?;
        }
    }
    Ok(())
}
