//! Source and resource directory layout.
//!
//! `src` / `resources` for production fragments, `test` / `testResources`
//! for test fragments, with an `@suffix` when the fragment does not cover
//! the whole module or carries non-default variant options:
//!
//! ```text
//! src                 common, default variants
//! src@jvm             jvm only
//! src@release         every platform, release
//! test@ios+release    ios tests, release
//! ```

use std::path::PathBuf;

use crate::arena::FragmentNode;
use crate::context::ResolutionContext;

/// Source and resource directories of `node`, relative to the module root.
pub fn source_paths(ctx: &ResolutionContext<'_>, node: &FragmentNode) -> (PathBuf, PathBuf) {
    let (sources, resources) = if node.is_test {
        ("test", "testResources")
    } else {
        ("src", "resources")
    };
    let root = &ctx.decl.root;
    match suffix(ctx, node) {
        Some(suffix) => (
            root.join(format!("{sources}@{suffix}")),
            root.join(format!("{resources}@{suffix}")),
        ),
        None => (root.join(sources), root.join(resources)),
    }
}

/// Options of `node` that are not their dimension's default, test dimension excluded.
pub fn non_default_variants<'n>(ctx: &ResolutionContext<'_>, node: &'n FragmentNode) -> Vec<&'n str> {
    non_default_options(ctx, &node.variants)
}

/// Like [`non_default_variants`] for a bare option list in dimension order.
pub fn non_default_options<'v>(ctx: &ResolutionContext<'_>, variants: &'v [String]) -> Vec<&'v str> {
    variants
        .iter()
        .zip(&ctx.dimensions)
        .filter(|(_, dimension)| !dimension.is_test())
        .filter(|(option, dimension)| {
            dimension
                .default_option()
                .map_or(true, |default| &default.name != *option)
        })
        .map(|(option, _)| option.as_str())
        .collect()
}

fn suffix(ctx: &ResolutionContext<'_>, node: &FragmentNode) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    if node.platforms != ctx.module_platforms {
        parts.push(node.label().join("+"));
    }
    parts.extend(non_default_variants(ctx, node).into_iter().map(str::to_string));
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("+"))
    }
}
