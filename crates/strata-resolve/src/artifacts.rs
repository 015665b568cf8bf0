//! Artifact grouping.
//!
//! Leaf fragments (exactly one platform) become artifact members.
//! Applications get one artifact per leaf; libraries get one artifact per
//! variant combination spanning every platform.

use std::collections::BTreeSet;

use strata_model::{
    camel_join, Artifact, ArtifactPart, Fragment, FragmentId, FragmentPart, PartKind,
    ResolvedModule, TEST_OPTION,
};
use strata_platform::{Platform, PlatformSet};
use tracing::{debug, trace};

use crate::context::ResolutionContext;
use crate::layout::non_default_options;

/// Compute the artifacts of `module` and flag their members as leaves.
pub fn assign_artifacts(ctx: &ResolutionContext<'_>, module: &mut ResolvedModule) {
    let leaves: Vec<FragmentId> = module
        .fragments
        .iter()
        .enumerate()
        .filter(|(_, f)| f.single_platform().is_some())
        .map(|(id, _)| id)
        .collect();

    let groups: Vec<(String, Vec<FragmentId>)> = if ctx.product.is_library() {
        group_by_variants(&module.fragments, &leaves)
            .into_iter()
            .map(|(variants, members)| (library_artifact_name(ctx, &variants), members))
            .collect()
    } else {
        leaves
            .iter()
            .map(|&id| (module.fragments[id].name.clone(), vec![id]))
            .collect()
    };

    let mut artifacts = Vec::with_capacity(groups.len());
    for (name, members) in groups {
        let first = &module.fragments[members[0]];
        let variants = first.variants.clone();
        let platforms: PlatformSet = members
            .iter()
            .flat_map(|&id| module.fragments[id].platforms.iter().copied())
            .collect();
        let parts = artifact_parts(module, &members, &platforms);
        trace!(artifact = %name, members = members.len(), "grouped artifact");
        artifacts.push(Artifact {
            name,
            platforms,
            is_test: variants.iter().any(|v| v == TEST_OPTION),
            variants,
            fragments: members,
            parts,
        });
    }

    for artifact in &artifacts {
        for &id in &artifact.fragments {
            module.fragments[id].is_leaf = true;
        }
    }
    debug!(module = %module.name, artifacts = artifacts.len(), "grouped artifacts");
    module.artifacts = artifacts;
}

/// Leaves grouped by identical variant options, in order of first appearance.
fn group_by_variants(fragments: &[Fragment], leaves: &[FragmentId]) -> Vec<(Vec<String>, Vec<FragmentId>)> {
    let mut groups: Vec<(Vec<String>, Vec<FragmentId>)> = Vec::new();
    for &id in leaves {
        let variants = &fragments[id].variants;
        match groups.iter_mut().find(|(v, _)| v == variants) {
            Some((_, members)) => members.push(id),
            None => groups.push((variants.clone(), vec![id])),
        }
    }
    groups
}

/// `release`, `releaseTest`; default variants are named after the module (`shared`, `sharedTest`).
pub fn library_artifact_name(ctx: &ResolutionContext<'_>, variants: &[String]) -> String {
    let mut words = non_default_options(ctx, variants);
    if words.is_empty() {
        words.push(ctx.decl.name.as_str());
    }
    if variants.iter().any(|v| v == TEST_OPTION) {
        words.push(TEST_OPTION);
    }
    camel_join(words)
}

/// Output-facing parts derived from the members' effective settings; the first member providing a kind wins.
fn artifact_parts(module: &ResolvedModule, members: &[FragmentId], platforms: &PlatformSet) -> Vec<ArtifactPart> {
    let mut parts = Vec::new();
    let mut provided: BTreeSet<PartKind> = BTreeSet::new();
    for &id in members {
        for part in module.effective_parts(id) {
            let kind = part.kind();
            if provided.contains(&kind) {
                continue;
            }
            if let Some(derived) = artifact_part(part, platforms) {
                provided.insert(kind);
                parts.push(derived);
            }
        }
    }
    parts
}

fn artifact_part(part: FragmentPart, platforms: &PlatformSet) -> Option<ArtifactPart> {
    match part {
        FragmentPart::Android(s) => platforms.contains(&Platform::Android).then(|| ArtifactPart::Android {
            compile_sdk: s.compile_sdk,
            min_sdk: s.min_sdk,
            max_sdk: s.max_sdk,
            target_sdk: s.target_sdk,
            application_id: s.application_id,
            namespace: s.namespace,
        }),
        FragmentPart::Java(s) => platforms.contains(&Platform::Jvm).then(|| ArtifactPart::JvmApplication {
            main_class: s.main_class,
            package_prefix: s.package_prefix,
        }),
        FragmentPart::Native(s) => platforms
            .iter()
            .any(|p| Platform::Native.contains(*p))
            .then(|| ArtifactPart::NativeApplication {
                entry_point: s.entry_point,
            }),
        FragmentPart::Publishing(s) => Some(ArtifactPart::Publishing {
            group: s.group,
            version: s.version,
        }),
        FragmentPart::Compose(s) => Some(ArtifactPart::Compose {
            enabled: s.enabled.unwrap_or(false),
        }),
        FragmentPart::Kotlin(_) | FragmentPart::Junit(_) => None,
    }
}
