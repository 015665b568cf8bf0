//! Fragment tree display.
//!
//! Formats a resolved module as an ASCII tree following `Refine` edges from
//! the most general fragments down:
//! ```text
//! shared (lib)
//! └── common [jvm, iosArm64] src
//!     ├── jvm [jvm] src@jvm
//!     └── iosArm64 [iosArm64] src@iosArm64
//! ```
//! A fragment refining several parents is printed once in full and marked
//! `(shared)` on later occurrences.

use std::collections::BTreeSet;
use std::fmt::Write;

use strata_model::{DependencyKind, FragmentId, ResolvedModule};

/// Format the fragment tree of a module.
pub fn format_fragment_tree(module: &ResolvedModule) -> String {
    let mut out = format!("{} ({})\n", module.name, module.product);

    let children = refining_fragments(module);
    let roots: Vec<FragmentId> = (0..module.fragments.len())
        .filter(|&id| {
            module.fragments[id]
                .dependency_targets(DependencyKind::Refine)
                .next()
                .is_none()
        })
        .collect();

    let mut printed = BTreeSet::new();
    let count = roots.len();
    for (i, &root) in roots.iter().enumerate() {
        format_fragment(&mut out, module, &children, root, "", i == count - 1, &mut printed);
    }

    let _ = writeln!(
        out,
        "\n{} fragments, {} artifacts",
        module.fragments.len(),
        module.artifacts.len()
    );
    out
}

/// For each fragment, the fragments that refine it.
fn refining_fragments(module: &ResolvedModule) -> Vec<Vec<FragmentId>> {
    let mut children = vec![Vec::new(); module.fragments.len()];
    for (id, fragment) in module.fragments.iter().enumerate() {
        for target in fragment.dependency_targets(DependencyKind::Refine) {
            children[target].push(id);
        }
    }
    children
}

fn format_fragment(
    out: &mut String,
    module: &ResolvedModule,
    children: &[Vec<FragmentId>],
    id: FragmentId,
    prefix: &str,
    is_last: bool,
    printed: &mut BTreeSet<FragmentId>,
) {
    let connector = if is_last { "└── " } else { "├── " };
    let fragment = &module.fragments[id];
    let platforms: Vec<&str> = fragment.platforms.iter().map(|p| p.pretty()).collect();
    let shared = !printed.insert(id);
    let shared_marker = if shared { " (shared)" } else { "" };

    let _ = writeln!(
        out,
        "{prefix}{connector}{} [{}] {}{shared_marker}",
        fragment.name,
        platforms.join(", "),
        fragment.source_path.display()
    );
    if shared {
        return;
    }

    let child_prefix = if is_last {
        format!("{prefix}    ")
    } else {
        format!("{prefix}│   ")
    };
    let child_count = children[id].len();
    for (i, &child) in children[id].iter().enumerate() {
        format_fragment(out, module, children, child, &child_prefix, i == child_count - 1, printed);
    }
}

/// Format a flat list of artifacts with their member fragments.
pub fn format_artifacts(module: &ResolvedModule) -> String {
    let mut out = String::new();
    for artifact in &module.artifacts {
        let members: Vec<&str> = artifact
            .fragments
            .iter()
            .map(|&id| module.fragments[id].name.as_str())
            .collect();
        let test_marker = if artifact.is_test { " (test)" } else { "" };
        let _ = writeln!(out, "{}{test_marker}: {}", artifact.name, members.join(", "));
    }
    out
}
