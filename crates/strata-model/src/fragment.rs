//! Resolved fragments: one compilation unit per platform set and variant combination.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strata_platform::{Platform, PlatformSet};

use crate::dependency::DependencyDecl;
use crate::settings::FragmentPart;

/// Index of a fragment within its module.
pub type FragmentId = usize;

/// Kind of an edge between two fragments.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    /// The target's code and settings are visible to and inherited by the source.
    #[default]
    Refine,
    /// The target's code (including internals) is visible, settings are not inherited.
    Friend,
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyKind::Refine => f.write_str("refine"),
            DependencyKind::Friend => f.write_str("friend"),
        }
    }
}

/// An outgoing edge of a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FragmentLink {
    pub target: FragmentId,
    pub kind: DependencyKind,
}

/// A fully resolved compilation unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fragment {
    pub name: String,
    /// Leaf platforms compiled by this fragment; never empty.
    pub platforms: PlatformSet,
    /// Natural-hierarchy nodes this fragment was planned for.
    pub root_platforms: PlatformSet,
    /// Alias names this fragment was planned for.
    pub aliases: BTreeSet<String>,
    /// One option per variant dimension, in dimension order.
    pub variants: Vec<String>,
    pub is_test: bool,
    pub is_default: bool,
    /// Whether the fragment is a member of an artifact.
    pub is_leaf: bool,
    pub dependencies: Vec<FragmentLink>,
    pub external_dependencies: Vec<DependencyDecl>,
    pub settings_parts: Vec<FragmentPart>,
    pub source_path: PathBuf,
    pub resource_path: PathBuf,
}

impl Fragment {
    /// Modifier tags this fragment answers to: root platform names, aliases and variants.
    pub fn tags(&self) -> BTreeSet<String> {
        self.root_platforms
            .iter()
            .map(|p| p.pretty().to_string())
            .chain(self.aliases.iter().cloned())
            .chain(self.variants.iter().cloned())
            .collect()
    }

    /// The only platform of a single-platform fragment.
    pub fn single_platform(&self) -> Option<Platform> {
        match self.platforms.len() {
            1 => self.platforms.iter().next().copied(),
            _ => None,
        }
    }

    /// Targets of outgoing edges of the given kind.
    pub fn dependency_targets(&self, kind: DependencyKind) -> impl Iterator<Item = FragmentId> + '_ {
        self.dependencies
            .iter()
            .filter(move |link| link.kind == kind)
            .map(|link| link.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment() -> Fragment {
        Fragment {
            name: "iosArm64Release".into(),
            platforms: PlatformSet::from([Platform::IosArm64]),
            root_platforms: PlatformSet::from([Platform::IosArm64]),
            aliases: BTreeSet::from(["mobile".to_string()]),
            variants: vec!["release".into(), "main".into()],
            is_test: false,
            is_default: false,
            is_leaf: true,
            dependencies: vec![
                FragmentLink {
                    target: 3,
                    kind: DependencyKind::Refine,
                },
                FragmentLink {
                    target: 1,
                    kind: DependencyKind::Friend,
                },
            ],
            external_dependencies: Vec::new(),
            settings_parts: Vec::new(),
            source_path: PathBuf::from("src@iosArm64+release"),
            resource_path: PathBuf::from("resources@iosArm64+release"),
        }
    }

    #[test]
    fn tags_combine_roots_aliases_and_variants() {
        let tags = fragment().tags();
        let expected: BTreeSet<String> = ["iosArm64", "mobile", "release", "main"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(tags, expected);
    }

    #[test]
    fn single_platform() {
        assert_eq!(fragment().single_platform(), Some(Platform::IosArm64));
    }

    #[test]
    fn filter_dependencies_by_kind() {
        let f = fragment();
        assert_eq!(f.dependency_targets(DependencyKind::Refine).collect::<Vec<_>>(), vec![3]);
        assert_eq!(f.dependency_targets(DependencyKind::Friend).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn kind_deserializes_lowercase() {
        let kind: DependencyKind = serde_json::from_str("\"friend\"").unwrap();
        assert_eq!(kind, DependencyKind::Friend);
    }
}
