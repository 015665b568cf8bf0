//! Fragment seed planning.
//!
//! A seed is one platform grouping the module needs a fragment for. Seeds
//! come from the natural hierarchy, declared targets, aliases, modifier
//! tokens, individual leaves and, for multi-platform modules, a common seed
//! over everything. Seeds with equal platform sets are merged.

use std::collections::BTreeSet;

use strata_model::{camel_join, DependencyKind};
use strata_platform::{leaf_closure, natural_hierarchy, Platform, PlatformSet};
use tracing::{debug, trace, warn};

use crate::arena::{deepest_root, FragmentArena, FragmentNode};
use crate::context::ResolutionContext;

/// A planning-time placeholder for one fragment before variant expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentSeed {
    pub platforms: PlatformSet,
    pub aliases: BTreeSet<String>,
    pub root_platforms: PlatformSet,
    /// Index of the smallest seed strictly containing this one.
    pub parent: Option<usize>,
}

impl FragmentSeed {
    fn rooted(platforms: PlatformSet, root: Platform) -> Self {
        Self {
            platforms,
            aliases: BTreeSet::new(),
            root_platforms: PlatformSet::from([root]),
            parent: None,
        }
    }

    fn aliased(platforms: PlatformSet, alias: &str) -> Self {
        Self {
            platforms,
            aliases: BTreeSet::from([alias.to_string()]),
            root_platforms: PlatformSet::new(),
            parent: None,
        }
    }

    /// Fragment name before variant expansion.
    pub fn name(&self) -> String {
        if !self.aliases.is_empty() {
            return camel_join(self.aliases.iter().map(String::as_str));
        }
        match deepest_root(&self.root_platforms) {
            Some(root) => root.pretty().to_string(),
            None => camel_join(self.platforms.iter().map(|p| p.pretty())),
        }
    }
}

/// Plan the seeds of a module, deduplicated and linked to their parents.
pub fn plan_seeds(ctx: &ResolutionContext<'_>) -> Vec<FragmentSeed> {
    let combined = &ctx.combined_platforms;
    let mut seeds: Vec<FragmentSeed> = Vec::new();

    // Stage 1: natural hierarchy nodes fully covered by the module
    for (node, leaves) in natural_hierarchy() {
        if !leaves.is_empty() && leaves.is_subset(combined) {
            push_seed(&mut seeds, FragmentSeed::rooted(leaves, node));
        }
    }

    // Stage 2: declared targets
    for &target in &ctx.targets {
        push_seed(&mut seeds, FragmentSeed::rooted(leaf_closure([&target]), target));
    }

    // Stage 3: aliases
    for (alias, members) in &ctx.aliases {
        push_seed(&mut seeds, FragmentSeed::aliased(leaf_closure(members), alias));
    }

    // Stage 4: modifier tokens
    for key in ctx.decl.modifier_keys() {
        for token in key.tokens() {
            if let Some(seed) = modifier_seed(ctx, token) {
                push_seed(&mut seeds, seed);
            }
        }
    }

    // Stage 5: individual leaves
    for &leaf in combined {
        push_seed(&mut seeds, FragmentSeed::rooted(PlatformSet::from([leaf]), leaf));
    }

    // Stage 6: common
    if combined.len() > 1 {
        push_seed(&mut seeds, FragmentSeed::rooted(combined.clone(), Platform::Common));
    }

    link_parents(&mut seeds);
    debug!(module = %ctx.decl.name, seeds = seeds.len(), "planned fragment seeds");
    seeds
}

/// Resolve one modifier token to a seed. Alias names win over platform names.
fn modifier_seed(ctx: &ResolutionContext<'_>, token: &str) -> Option<FragmentSeed> {
    let (selected, seed) = if let Some(members) = ctx.aliases.get(token) {
        let selected = leaf_closure(members);
        (selected.clone(), FragmentSeed::aliased(selected, token))
    } else if let Some(platform) = Platform::from_pretty(token) {
        let selected = leaf_closure([&platform]);
        (selected.clone(), FragmentSeed::rooted(selected, platform))
    } else {
        if !ctx.is_option(token) {
            warn!(module = %ctx.decl.name, token, "modifier token is not a platform, alias or variant option");
        }
        return None;
    };

    let platforms: PlatformSet = selected
        .intersection(&ctx.combined_platforms)
        .copied()
        .collect();
    if platforms.is_empty() {
        warn!(module = %ctx.decl.name, token, "modifier does not select any declared platform");
        return None;
    }
    Some(FragmentSeed { platforms, ..seed })
}

/// Append `seed`, or merge it into the earlier seed with the same platforms.
fn push_seed(seeds: &mut Vec<FragmentSeed>, seed: FragmentSeed) {
    if let Some(existing) = seeds.iter_mut().find(|s| s.platforms == seed.platforms) {
        existing.aliases.extend(seed.aliases);
        existing.root_platforms.extend(seed.root_platforms);
        return;
    }
    trace!(platforms = ?seed.platforms, "new seed");
    seeds.push(seed);
}

/// Point every seed at its smallest strict superset; earlier seeds win ties.
fn link_parents(seeds: &mut [FragmentSeed]) {
    for i in 0..seeds.len() {
        let mut parent: Option<usize> = None;
        for (j, candidate) in seeds.iter().enumerate() {
            if i == j || candidate.platforms.len() <= seeds[i].platforms.len() {
                continue;
            }
            if !seeds[i].platforms.is_subset(&candidate.platforms) {
                continue;
            }
            if parent.map_or(true, |p| candidate.platforms.len() < seeds[p].platforms.len()) {
                parent = Some(j);
            }
        }
        seeds[i].parent = parent;
    }
}

/// The initial fragment population: one node per seed, one `Refine` edge per parent link.
pub fn seed_arena(seeds: &[FragmentSeed]) -> FragmentArena {
    let mut arena = FragmentArena::new();
    for seed in seeds {
        arena.add_node(FragmentNode {
            name: seed.name(),
            platforms: seed.platforms.clone(),
            root_platforms: seed.root_platforms.clone(),
            aliases: seed.aliases.clone(),
            variants: Vec::new(),
            is_test: false,
            is_default: true,
        });
    }
    for (id, seed) in seeds.iter().enumerate() {
        if let Some(parent) = seed.parent {
            arena.add_edge(id, parent, DependencyKind::Refine);
        }
    }
    arena
}
