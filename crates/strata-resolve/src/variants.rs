//! Variant expansion.
//!
//! Each dimension multiplies the fragment population by its option count.
//! Clones are laid out option-major: the clone of node `n` for option `o`
//! lives at `o * len + n`. Inherited edges are re-pointed within the same
//! option's clones, then the options' own dependencies are added.

use strata_model::{camel_merge, FragmentId, VariantDimension, TEST_OPTION};
use tracing::{debug, trace};

use crate::arena::FragmentArena;

/// Expand `arena` through every dimension in order.
pub fn expand_variants(arena: FragmentArena, dimensions: &[VariantDimension]) -> FragmentArena {
    let mut current = arena;
    for (index, dimension) in dimensions.iter().enumerate() {
        current = expand_dimension(&current, dimension, &dimensions[..index]);
        debug!(
            dimension = %dimension.name,
            fragments = current.len(),
            edges = current.edge_count(),
            "expanded variant dimension"
        );
    }
    current
}

/// One expansion step. `earlier` holds the dimensions already applied to `prev`.
pub fn expand_dimension(
    prev: &FragmentArena,
    dimension: &VariantDimension,
    earlier: &[VariantDimension],
) -> FragmentArena {
    let len = prev.len();
    let clone_of = |option: usize, id: FragmentId| option * len + id;
    let mut next = FragmentArena::new();

    for option in &dimension.options {
        for node in prev.nodes() {
            let mut clone = node.clone();
            if !option.default {
                clone.name = camel_merge(&node.name, &option.name);
            }
            clone.variants.push(option.name.clone());
            if option.name == TEST_OPTION {
                clone.is_test = true;
            }
            clone.is_default =
                node.is_default && (option.counts_as_default() || (clone.is_test && node.is_default));
            trace!(name = %clone.name, "cloned fragment");
            next.add_node(clone);
        }
    }

    // Inherited edges, re-pointed at the closest clone of the same option.
    for o in 0..dimension.options.len() {
        for edge in prev.edges() {
            let source = clone_of(o, edge.source);
            let original = prev.node(edge.target);
            let candidates = (0..len)
                .map(|id| clone_of(o, id))
                .filter(|&c| c != source && next.node(c).platforms == original.platforms);
            if let Some(target) = closest_variant(&next, candidates, &original.variants) {
                next.add_edge(source, target, edge.kind);
            }
        }
    }

    // Option dependencies.
    for (o, option) in dimension.options.iter().enumerate() {
        for dep in &option.depends_on {
            if let Some(t) = dimension.options.iter().position(|x| x.name == dep.target) {
                for id in 0..len {
                    next.add_edge(clone_of(o, id), clone_of(t, id), dep.kind);
                }
                continue;
            }
            let Some(d) = earlier.iter().position(|x| x.option(&dep.target).is_some()) else {
                continue;
            };
            for id in 0..len {
                let node = prev.node(id);
                let mut wanted = node.variants.clone();
                if wanted.get(d) == Some(&dep.target) {
                    continue;
                }
                wanted[d] = dep.target.clone();
                if let Some(target) = prev.find(&node.platforms, &wanted) {
                    next.add_edge(clone_of(o, id), clone_of(o, target), dep.kind);
                }
            }
        }
    }

    next
}

/// The candidate sharing the most variant options with `variants`; the first wins ties.
fn closest_variant(
    arena: &FragmentArena,
    candidates: impl Iterator<Item = FragmentId>,
    variants: &[String],
) -> Option<FragmentId> {
    let mut best: Option<(FragmentId, usize)> = None;
    for candidate in candidates {
        let shared = arena
            .node(candidate)
            .variants
            .iter()
            .filter(|v| variants.contains(v))
            .count();
        if best.map_or(true, |(_, score)| shared > score) {
            best = Some((candidate, shared));
        }
    }
    best.map(|(id, _)| id)
}
