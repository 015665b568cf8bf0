//! The declarative module description consumed by the resolution engine.
//!
//! A declaration is produced by an external front end (the CLI reads it
//! from `module.toml` through serde). It is never mutated by the engine.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strata_platform::Platform;

use crate::dependency::DependencyDecl;
use crate::error::{ModelError, Result};
use crate::fragment::DependencyKind;
use crate::modifiers::Modifiers;
use crate::settings::Settings;

/// Name of the implicit dimension appended after all declared ones.
pub const TEST_DIMENSION: &str = "test";
/// Option of the implicit dimension that marks test fragments.
pub const TEST_OPTION: &str = "test";
/// Default option of the implicit dimension.
pub const MAIN_OPTION: &str = "main";

/// A module declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModuleDecl {
    /// Module name, used for reporting and for unnamed library artifacts.
    pub name: String,
    /// Directory that source and resource paths are resolved against.
    #[serde(default)]
    pub root: PathBuf,
    pub product: ProductDecl,
    /// Alias name -> member platform names.
    #[serde(default)]
    pub aliases: BTreeMap<String, Vec<String>>,
    /// Variant dimensions, in declaration order.
    #[serde(default)]
    pub variants: Vec<VariantDimension>,
    #[serde(default)]
    pub settings: BTreeMap<Modifiers, Settings>,
    #[serde(default)]
    pub test_settings: BTreeMap<Modifiers, Settings>,
    #[serde(default)]
    pub dependencies: BTreeMap<Modifiers, Vec<DependencyDecl>>,
    #[serde(default)]
    pub test_dependencies: BTreeMap<Modifiers, Vec<DependencyDecl>>,
    #[serde(default)]
    pub repositories: Vec<Repository>,
}

/// Product section: type token and target platform names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDecl {
    #[serde(rename = "type")]
    pub product_type: String,
    #[serde(default)]
    pub platforms: Vec<String>,
}

/// A Maven repository declared by the module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub publish: bool,
}

/// An orthogonal build axis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantDimension {
    pub name: String,
    #[serde(default)]
    pub options: Vec<VariantOption>,
}

/// One value of a variant dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VariantOption {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub default: bool,
    /// Whether fragments carrying this option are built by default.
    /// Falls back to `default` when unset.
    #[serde(default)]
    pub counts_as_default: Option<bool>,
    #[serde(default)]
    pub depends_on: Vec<OptionDependency>,
}

/// An extra edge from fragments tagged with one option to fragments tagged with another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDependency {
    pub target: String,
    #[serde(default)]
    pub kind: DependencyKind,
}

impl VariantOption {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn as_default(mut self) -> Self {
        self.default = true;
        self
    }

    pub fn counting_as_default(mut self, counts: bool) -> Self {
        self.counts_as_default = Some(counts);
        self
    }

    pub fn depending_on(mut self, target: impl Into<String>, kind: DependencyKind) -> Self {
        self.depends_on.push(OptionDependency {
            target: target.into(),
            kind,
        });
        self
    }

    pub fn counts_as_default(&self) -> bool {
        self.counts_as_default.unwrap_or(self.default)
    }
}

impl VariantDimension {
    pub fn new(name: impl Into<String>, options: Vec<VariantOption>) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }

    /// The implicit `test` dimension: `main` (default) and `test`, which is a friend of `main`.
    pub fn test() -> Self {
        Self::new(
            TEST_DIMENSION,
            vec![
                VariantOption::new(MAIN_OPTION).as_default(),
                VariantOption::new(TEST_OPTION)
                    .counting_as_default(false)
                    .depending_on(MAIN_OPTION, DependencyKind::Friend),
            ],
        )
    }

    /// Check names and the single-default rule.
    pub fn validate(&self) -> Result<()> {
        if self.options.is_empty() {
            return Err(ModelError::NoOptions {
                dimension: self.name.clone(),
            });
        }
        for (i, option) in self.options.iter().enumerate() {
            if option.name.trim().is_empty() {
                return Err(ModelError::MissingOptionName {
                    dimension: self.name.clone(),
                    position: i + 1,
                });
            }
        }
        let defaults = self.options.iter().filter(|o| o.default).count();
        if defaults != 1 {
            return Err(ModelError::DefaultOptionCount {
                dimension: self.name.clone(),
                found: defaults,
            });
        }
        Ok(())
    }

    pub fn default_option(&self) -> Option<&VariantOption> {
        self.options.iter().find(|o| o.default)
    }

    pub fn option(&self, name: &str) -> Option<&VariantOption> {
        self.options.iter().find(|o| o.name == name)
    }

    pub fn is_test(&self) -> bool {
        self.name == TEST_DIMENSION
    }
}

impl ModuleDecl {
    /// Validated dimensions with the implicit test dimension appended last.
    pub fn dimensions(&self) -> Result<Vec<VariantDimension>> {
        let mut dimensions = Vec::with_capacity(self.variants.len() + 1);
        for dimension in &self.variants {
            if dimension.is_test() {
                return Err(ModelError::ReservedDimension {
                    dimension: dimension.name.clone(),
                });
            }
            dimension.validate()?;
            dimensions.push(dimension.clone());
        }
        dimensions.push(VariantDimension::test());

        let mut seen = BTreeSet::new();
        for dimension in &dimensions {
            for option in &dimension.options {
                if !seen.insert(option.name.as_str()) {
                    return Err(ModelError::DuplicateOption {
                        option: option.name.clone(),
                    });
                }
            }
        }

        // Option dependencies may only look at the same or an earlier dimension.
        for (i, dimension) in dimensions.iter().enumerate() {
            for option in &dimension.options {
                for dep in &option.depends_on {
                    let known = dimensions[..=i]
                        .iter()
                        .any(|d| d.option(&dep.target).is_some());
                    if !known {
                        return Err(ModelError::UnknownOptionDependency {
                            option: option.name.clone(),
                            target: dep.target.clone(),
                            dimension: dimension.name.clone(),
                        });
                    }
                }
            }
        }

        Ok(dimensions)
    }

    /// Aliases resolved to platforms, in alias name order.
    pub fn alias_platforms(&self) -> Result<BTreeMap<String, Vec<Platform>>> {
        let mut resolved = BTreeMap::new();
        for (alias, members) in &self.aliases {
            if Platform::from_pretty(alias).is_some() {
                return Err(ModelError::AliasShadowsPlatform {
                    alias: alias.clone(),
                });
            }
            if members.is_empty() {
                return Err(ModelError::EmptyAlias {
                    alias: alias.clone(),
                });
            }
            let mut platforms = Vec::with_capacity(members.len());
            for member in members {
                let platform =
                    Platform::from_pretty(member).ok_or_else(|| ModelError::UnknownAliasPlatform {
                        alias: alias.clone(),
                        platform: member.clone(),
                    })?;
                platforms.push(platform);
            }
            resolved.insert(alias.clone(), platforms);
        }
        Ok(resolved)
    }

    /// Every modifier key used by settings or dependencies, test maps included.
    pub fn modifier_keys(&self) -> BTreeSet<Modifiers> {
        self.settings
            .keys()
            .chain(self.test_settings.keys())
            .chain(self.dependencies.keys())
            .chain(self.test_dependencies.keys())
            .cloned()
            .collect()
    }

    /// Settings entries with test entries re-keyed under the `test` tag.
    pub fn scoped_settings(&self) -> Vec<(Modifiers, Settings)> {
        self.settings
            .iter()
            .map(|(key, settings)| (key.clone(), settings.clone()))
            .chain(
                self.test_settings
                    .iter()
                    .map(|(key, settings)| (key.with(TEST_OPTION), settings.clone())),
            )
            .collect()
    }

    /// Dependency entries with test entries re-keyed under the `test` tag.
    pub fn scoped_dependencies(&self) -> Vec<(Modifiers, &[DependencyDecl])> {
        self.dependencies
            .iter()
            .map(|(key, deps)| (key.clone(), deps.as_slice()))
            .chain(
                self.test_dependencies
                    .iter()
                    .map(|(key, deps)| (key.with(TEST_OPTION), deps.as_slice())),
            )
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mode() -> VariantDimension {
        VariantDimension::new(
            "mode",
            vec![
                VariantOption::new("debug").as_default(),
                VariantOption::new("release"),
            ],
        )
    }

    #[test]
    fn test_dimension_is_appended() {
        let decl = ModuleDecl {
            variants: vec![mode()],
            ..ModuleDecl::default()
        };
        let dims = decl.dimensions().unwrap();
        assert_eq!(dims.len(), 2);
        assert_eq!(dims[1].name, TEST_DIMENSION);
        assert_eq!(dims[1].default_option().unwrap().name, MAIN_OPTION);
    }

    #[test]
    fn missing_option_name() {
        let dim = VariantDimension::new(
            "mode",
            vec![VariantOption::new("debug").as_default(), VariantOption::new("")],
        );
        let err = dim.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "variant dimension 'mode': option #2 is missing a name"
        );
    }

    #[test]
    fn no_default_rejected() {
        let dim = VariantDimension::new(
            "mode",
            vec![VariantOption::new("debug"), VariantOption::new("release")],
        );
        assert_eq!(
            dim.validate().unwrap_err(),
            ModelError::DefaultOptionCount {
                dimension: "mode".into(),
                found: 0
            }
        );
    }

    #[test]
    fn two_defaults_rejected() {
        let dim = VariantDimension::new(
            "mode",
            vec![
                VariantOption::new("debug").as_default(),
                VariantOption::new("release").as_default(),
            ],
        );
        assert!(matches!(
            dim.validate(),
            Err(ModelError::DefaultOptionCount { found: 2, .. })
        ));
    }

    #[test]
    fn empty_dimension_rejected() {
        let dim = VariantDimension::new("mode", Vec::new());
        assert!(matches!(dim.validate(), Err(ModelError::NoOptions { .. })));
    }

    #[test]
    fn reserved_and_duplicate_names() {
        let decl = ModuleDecl {
            variants: vec![VariantDimension::test()],
            ..ModuleDecl::default()
        };
        assert!(matches!(
            decl.dimensions(),
            Err(ModelError::ReservedDimension { .. })
        ));

        let decl = ModuleDecl {
            variants: vec![VariantDimension::new(
                "flavor",
                vec![VariantOption::new("main").as_default()],
            )],
            ..ModuleDecl::default()
        };
        assert_eq!(
            decl.dimensions().unwrap_err(),
            ModelError::DuplicateOption {
                option: "main".into()
            }
        );
    }

    #[test]
    fn option_dependency_on_later_dimension_rejected() {
        let decl = ModuleDecl {
            variants: vec![
                VariantDimension::new(
                    "mode",
                    vec![
                        VariantOption::new("debug").as_default(),
                        VariantOption::new("release")
                            .depending_on("paid", DependencyKind::Refine),
                    ],
                ),
                VariantDimension::new(
                    "tier",
                    vec![
                        VariantOption::new("free").as_default(),
                        VariantOption::new("paid"),
                    ],
                ),
            ],
            ..ModuleDecl::default()
        };
        assert!(matches!(
            decl.dimensions(),
            Err(ModelError::UnknownOptionDependency { .. })
        ));
    }

    #[test]
    fn alias_validation() {
        let mut decl = ModuleDecl::default();
        decl.aliases
            .insert("mobile".into(), vec!["android".into(), "ios".into()]);
        let aliases = decl.alias_platforms().unwrap();
        assert_eq!(aliases["mobile"], vec![Platform::Android, Platform::Ios]);

        decl.aliases.insert("broken".into(), vec!["foo".into()]);
        assert_eq!(
            decl.alias_platforms().unwrap_err(),
            ModelError::UnknownAliasPlatform {
                alias: "broken".into(),
                platform: "foo".into()
            }
        );
    }

    #[test]
    fn alias_cannot_shadow_platform() {
        let mut decl = ModuleDecl::default();
        decl.aliases.insert("jvm".into(), vec!["jvm".into()]);
        assert!(matches!(
            decl.alias_platforms(),
            Err(ModelError::AliasShadowsPlatform { .. })
        ));
    }

    #[test]
    fn test_settings_are_rekeyed() {
        let mut decl = ModuleDecl::default();
        decl.settings.insert(Modifiers::of(["ios"]), Settings::default());
        decl.test_settings
            .insert(Modifiers::of(["ios"]), Settings::default());
        let keys: Vec<_> = decl.scoped_settings().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![Modifiers::of(["ios"]), Modifiers::of(["ios", "test"])]
        );
        assert_eq!(decl.modifier_keys().len(), 1);
    }

    #[test]
    fn deserialize_module_toml() {
        let decl: ModuleDecl = toml::from_str(
            r#"
name = "shared"

[product]
type = "lib"
platforms = ["jvm", "iosArm64"]

[aliases]
mobile = ["iosArm64"]

[[variants]]
name = "mode"
options = [
    { name = "debug", default = true },
    { name = "release", depends-on = [{ target = "debug", kind = "friend" }] },
]

[settings.""]
kotlin = { languageVersion = "1.9" }

[settings."ios+release"]
kotlin = { debug = false }

[dependencies]
"" = ["org.jetbrains.kotlinx:kotlinx-coroutines-core:1.7.3"]

[test-dependencies]
jvm = [{ notation = "junit:junit:4.13", scope = "runtime" }]
"#,
        )
        .unwrap();
        assert_eq!(decl.name, "shared");
        assert_eq!(decl.product.product_type, "lib");
        assert_eq!(decl.variants[0].options[1].depends_on[0].kind, DependencyKind::Friend);
        assert_eq!(decl.settings.len(), 2);
        assert!(decl.settings.contains_key(&Modifiers::empty()));
        assert!(decl.settings.contains_key(&Modifiers::of(["ios", "release"])));
        assert_eq!(decl.test_dependencies[&Modifiers::of(["jvm"])].len(), 1);
    }
}
