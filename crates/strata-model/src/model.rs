//! The resolved model: modules with their fragments and artifacts.

use std::collections::{BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};
use strata_platform::{PlatformSet, ProductType};

use crate::artifact::Artifact;
use crate::decl::Repository;
use crate::fragment::{DependencyKind, Fragment, FragmentId};
use crate::modifiers::Modifiers;
use crate::settings::{FragmentPart, Settings};

/// One resolved module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedModule {
    pub name: String,
    pub product: ProductType,
    /// Leaf closure of the declared target platforms.
    pub platforms: PlatformSet,
    pub fragments: Vec<Fragment>,
    pub artifacts: Vec<Artifact>,
    pub repositories: Vec<Repository>,
    /// Declared settings entries, test entries keyed under `test`.
    #[serde(default)]
    pub scoped_settings: Vec<(Modifiers, Settings)>,
}

impl ResolvedModule {
    pub fn fragment(&self, name: &str) -> Option<&Fragment> {
        self.fragments.iter().find(|f| f.name == name)
    }

    pub fn fragment_id(&self, name: &str) -> Option<FragmentId> {
        self.fragments.iter().position(|f| f.name == name)
    }

    pub fn artifact(&self, name: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.name == name)
    }

    /// Fragments that are members of some artifact.
    pub fn leaf_fragments(&self) -> impl Iterator<Item = &Fragment> {
        self.fragments.iter().filter(|f| f.is_leaf)
    }

    /// `id` followed by every fragment reachable through `Refine` edges, breadth-first.
    pub fn refine_closure(&self, id: FragmentId) -> Vec<FragmentId> {
        let mut seen = BTreeSet::from([id]);
        let mut order = vec![id];
        let mut queue = VecDeque::from([id]);
        while let Some(current) = queue.pop_front() {
            for target in self.fragments[current].dependency_targets(DependencyKind::Refine) {
                if seen.insert(target) {
                    order.push(target);
                    queue.push_back(target);
                }
            }
        }
        order
    }

    /// Settings in effect for `id`, including those inherited through `Refine`.
    ///
    /// Entries matching any fragment of the closure are applied once, general
    /// keys first, so an ancestor's specific value is not undone by a general
    /// entry that also matches `id`.
    pub fn effective_parts(&self, id: FragmentId) -> Vec<FragmentPart> {
        let tags: BTreeSet<String> = self
            .refine_closure(id)
            .into_iter()
            .flat_map(|ancestor| self.fragments[ancestor].tags())
            .collect();
        Settings::merge_scoped(&self.scoped_settings, &tags).into_parts()
    }
}

/// All modules resolved in one pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub modules: Vec<ResolvedModule>,
}

impl Model {
    pub fn module(&self, name: &str) -> Option<&ResolvedModule> {
        self.modules.iter().find(|m| m.name == name)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use strata_platform::Platform;

    use super::*;
    use crate::fragment::FragmentLink;
    use crate::settings::KotlinSettings;

    fn fragment(root: Platform, platforms: &[Platform], deps: &[FragmentId]) -> Fragment {
        Fragment {
            name: root.pretty().to_string(),
            platforms: platforms.iter().copied().collect(),
            root_platforms: PlatformSet::from([root]),
            aliases: BTreeSet::new(),
            variants: vec!["main".into()],
            is_test: false,
            is_default: true,
            is_leaf: platforms.len() == 1,
            dependencies: deps
                .iter()
                .map(|&target| FragmentLink {
                    target,
                    kind: DependencyKind::Refine,
                })
                .collect(),
            external_dependencies: Vec::new(),
            settings_parts: Vec::new(),
            source_path: PathBuf::from("src"),
            resource_path: PathBuf::from("resources"),
        }
    }

    fn debug(value: bool) -> Settings {
        Settings {
            kotlin: Some(KotlinSettings {
                debug: Some(value),
                ..KotlinSettings::default()
            }),
            ..Settings::default()
        }
    }

    fn module() -> ResolvedModule {
        let both = [Platform::Jvm, Platform::IosArm64];
        ResolvedModule {
            name: "shared".into(),
            product: ProductType::Lib,
            platforms: PlatformSet::from(both),
            fragments: vec![
                fragment(Platform::Common, &both, &[]),
                fragment(Platform::Jvm, &[Platform::Jvm], &[0]),
                fragment(Platform::Ios, &[Platform::IosArm64], &[0]),
                fragment(Platform::IosArm64, &[Platform::IosArm64], &[2]),
            ],
            artifacts: Vec::new(),
            repositories: Vec::new(),
            scoped_settings: vec![
                (Modifiers::empty(), debug(true)),
                (Modifiers::of(["ios"]), debug(false)),
            ],
        }
    }

    fn effective_debug(m: &ResolvedModule, id: FragmentId) -> Option<bool> {
        Settings::from_parts(&m.effective_parts(id)).kotlin.and_then(|k| k.debug)
    }

    #[test]
    fn closure_starts_with_self() {
        let m = module();
        assert_eq!(m.refine_closure(1), vec![1, 0]);
        assert_eq!(m.refine_closure(3), vec![3, 2, 0]);
        assert_eq!(m.refine_closure(0), vec![0]);
    }

    #[test]
    fn effective_parts_keep_inherited_specific_values() {
        let m = module();
        assert_eq!(effective_debug(&m, 0), Some(true));
        assert_eq!(effective_debug(&m, 1), Some(true));
        assert_eq!(effective_debug(&m, 2), Some(false));
        assert_eq!(effective_debug(&m, 3), Some(false));
    }

    #[test]
    fn lookups() {
        let m = module();
        assert_eq!(m.fragment_id("iosArm64"), Some(3));
        assert!(m.fragment("android").is_none());
        assert_eq!(m.leaf_fragments().count(), 3);

        let model = Model {
            modules: vec![m],
        };
        assert!(model.module("shared").is_some());
    }
}
