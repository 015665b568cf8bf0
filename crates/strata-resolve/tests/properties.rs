//! End-to-end properties of module resolution.

use std::collections::BTreeSet;

use strata_model::{
    ArtifactPart, DependencyKind, Fragment, ModuleDecl, ResolvedModule, Settings, VariantDimension,
};
use strata_platform::{leaf_closure, Platform, PlatformSet};
use strata_resolve::{resolve_model, resolve_module, ResolveError};

fn parse(source: &str) -> ModuleDecl {
    toml::from_str(source).unwrap()
}

fn resolve(source: &str) -> ResolvedModule {
    resolve_module(&parse(source)).unwrap()
}

/// A module exercising aliases, two dimensions, scoped settings and dependencies.
const RICH: &str = r#"
name = "shared"
root = "shared"

[product]
type = "lib"
platforms = ["jvm", "android", "ios", "linuxX64"]

[aliases]
mobile = ["android", "ios"]

[[variants]]
name = "mode"
options = [
    { name = "debug", default = true },
    { name = "release", depends-on = [{ target = "debug", kind = "friend" }] },
]

[[variants]]
name = "tier"
options = [
    { name = "free", default = true },
    { name = "paid" },
]

[settings.""]
kotlin = { languageVersion = "1.9", debug = true }
publishing = { group = "org.example", version = "1.0" }

[settings.mobile]
kotlin = { optIns = ["kotlin.RequiresOptIn"] }

[settings."ios+release"]
kotlin = { debug = false }

[settings.release]
kotlin = { languageVersion = "2.0" }

[settings.linux]
native = { entryPoint = "org.example.main" }

[dependencies]
"" = ["org.jetbrains.kotlinx:kotlinx-coroutines-core:1.7.3"]
"ios" = [{ notation = "../ios-support", exported = true }]

[test-dependencies]
"" = ["org.jetbrains.kotlin:kotlin-test:1.9.0"]
"#;

fn fragment<'m>(module: &'m ResolvedModule, name: &str) -> &'m Fragment {
    module
        .fragment(name)
        .unwrap_or_else(|| panic!("no fragment named {name}"))
}

fn refine_ancestors(module: &ResolvedModule, name: &str) -> BTreeSet<String> {
    let id = module.fragment_id(name).unwrap();
    module
        .refine_closure(id)
        .into_iter()
        .map(|i| module.fragments[i].name.clone())
        .collect()
}

fn settings_of(module: &ResolvedModule, name: &str) -> Settings {
    Settings::from_parts(&fragment(module, name).settings_parts)
}

#[test]
fn resolution_is_deterministic() {
    let decl = parse(RICH);
    let first = resolve_module(&decl).unwrap();
    let second = resolve_module(&decl).unwrap();
    assert_eq!(first, second);
}

#[test]
fn refine_edges_are_acyclic() {
    let module = resolve(RICH);
    // Every closure terminates without revisiting its start.
    for (id, fragment) in module.fragments.iter().enumerate() {
        for target in fragment.dependency_targets(DependencyKind::Refine) {
            assert!(
                !module.refine_closure(target).contains(&id),
                "{} is reachable from its own ancestor",
                fragment.name
            );
        }
    }
}

#[test]
fn one_leaf_per_platform_and_variant_combination() {
    let module = resolve(RICH);
    let leaves = leaf_closure(&[Platform::Jvm, Platform::Android, Platform::Ios, Platform::LinuxX64]);
    assert_eq!(module.platforms, leaves);

    let combinations = 2 * 2 * 2;
    for platform in &leaves {
        let matching: Vec<&Fragment> = module
            .fragments
            .iter()
            .filter(|f| f.single_platform() == Some(*platform))
            .collect();
        assert_eq!(matching.len(), combinations, "leaves for {platform}");
        let variants: BTreeSet<&Vec<String>> = matching.iter().map(|f| &f.variants).collect();
        assert_eq!(variants.len(), combinations);
        assert!(matching.iter().all(|f| f.is_leaf));
    }

    let unique: BTreeSet<(PlatformSet, Vec<String>)> = module
        .fragments
        .iter()
        .map(|f| (f.platforms.clone(), f.variants.clone()))
        .collect();
    assert_eq!(unique.len(), module.fragments.len());
}

#[test]
fn common_fragment_is_ancestor_within_each_combination() {
    let module = resolve(RICH);
    let full = module.platforms.clone();
    for common in module.fragments.iter().filter(|f| f.platforms == full) {
        for other in module
            .fragments
            .iter()
            .filter(|f| f.variants == common.variants && f.name != common.name)
        {
            assert!(
                refine_ancestors(&module, &other.name).contains(&common.name),
                "{} does not refine {}",
                other.name,
                common.name
            );
        }
    }
}

#[test]
fn specific_settings_win() {
    let module = resolve(RICH);

    let ios = settings_of(&module, "ios").kotlin.unwrap();
    assert_eq!(ios.debug, Some(true));
    assert_eq!(ios.language_version.as_deref(), Some("1.9"));

    let ios_release = settings_of(&module, "iosRelease").kotlin.unwrap();
    assert_eq!(ios_release.debug, Some(false));
    assert_eq!(ios_release.language_version.as_deref(), Some("2.0"));

    let mobile = settings_of(&module, "mobile").kotlin.unwrap();
    assert_eq!(mobile.opt_ins, Some(vec!["kotlin.RequiresOptIn".to_string()]));

    let linux = settings_of(&module, "linuxX64");
    assert_eq!(linux.native.unwrap().entry_point.as_deref(), Some("org.example.main"));
    assert!(settings_of(&module, "jvm").native.is_none());
}

fn effective_settings(module: &ResolvedModule, name: &str) -> Settings {
    let id = module.fragment_id(name).unwrap();
    Settings::from_parts(&module.effective_parts(id))
}

const IOS_OVERRIDES: &str = r#"
[settings.""]
kotlin = { debug = true }
compose = { enabled = false }

[settings.ios]
kotlin = { debug = false }
compose = { enabled = true }
"#;

#[test]
fn inherited_specific_settings_survive_general_entries() {
    let module = resolve(&format!(
        "name = \"shared\"\nproduct = {{ type = \"lib\", platforms = [\"jvm\", \"ios\"] }}\n{IOS_OVERRIDES}"
    ));
    // The leaf only matches the unscoped key itself; `ios` reaches it through `Refine`.
    assert_eq!(settings_of(&module, "iosArm64").kotlin.unwrap().debug, Some(true));
    assert_eq!(settings_of(&module, "ios").kotlin.unwrap().debug, Some(false));

    for leaf in ["iosArm64", "iosSimulatorArm64", "iosX64"] {
        let effective = effective_settings(&module, leaf);
        assert_eq!(effective.kotlin.unwrap().debug, Some(false), "{leaf}");
        assert_eq!(effective.compose.unwrap().enabled, Some(true), "{leaf}");
    }
    let jvm = effective_settings(&module, "jvm");
    assert_eq!(jvm.kotlin.unwrap().debug, Some(true));
    assert_eq!(jvm.compose.unwrap().enabled, Some(false));
}

#[test]
fn artifact_parts_use_inherited_settings() {
    let module = resolve(&format!(
        "name = \"app\"\nproduct = {{ type = \"ios/app\", platforms = [\"ios\"] }}\n{IOS_OVERRIDES}"
    ));
    let artifact = module.artifact("iosArm64").unwrap();
    assert_eq!(artifact.parts, vec![ArtifactPart::Compose { enabled: true }]);
}

#[test]
fn default_fragments_use_default_options() {
    let module = resolve(RICH);
    let dimensions: Vec<VariantDimension> = parse(RICH).dimensions().unwrap();
    for fragment in module.fragments.iter().filter(|f| f.is_default) {
        for (option, dimension) in fragment.variants.iter().zip(&dimensions) {
            if dimension.is_test() {
                continue;
            }
            assert_eq!(
                Some(option),
                dimension.default_option().map(|o| &o.name),
                "{} is default but uses {option}",
                fragment.name
            );
        }
    }
    assert!(fragment(&module, "jvm").is_default);
    assert!(fragment(&module, "jvmTest").is_default);
    assert!(!fragment(&module, "jvmRelease").is_default);
    assert!(!fragment(&module, "jvmPaid").is_default);
}

#[test]
fn two_platforms_share_common() {
    let module = resolve(
        r#"
name = "shared"
product = { type = "lib", platforms = ["jvm", "iosArm64"] }
"#,
    );
    let main: Vec<&str> = module
        .fragments
        .iter()
        .filter(|f| !f.is_test)
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(main, vec!["jvm", "iosArm64", "common"]);

    let common = module.fragment_id("common").unwrap();
    for leaf in ["jvm", "iosArm64"] {
        let targets: Vec<_> = fragment(&module, leaf)
            .dependency_targets(DependencyKind::Refine)
            .collect();
        assert_eq!(targets, vec![common]);
    }
}

#[test]
fn mode_dimension_over_jvm() {
    let module = resolve(
        r#"
name = "app"
product = { type = "jvm/app", platforms = ["jvm"] }

[[variants]]
name = "mode"
options = [{ name = "debug", default = true }, { name = "release" }]
"#,
    );
    let main: Vec<&Fragment> = module.fragments.iter().filter(|f| !f.is_test).collect();
    let names: Vec<&str> = main.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["jvm", "jvmRelease"]);
    assert!(fragment(&module, "jvm").is_default);
    assert!(!fragment(&module, "jvmRelease").is_default);
    assert_eq!(
        fragment(&module, "jvmRelease").source_path.display().to_string(),
        "src@release"
    );
    assert_eq!(module.artifacts.len(), 4);
}

#[test]
fn library_without_platforms_is_rejected() {
    let err = resolve_module(&parse(
        r#"
name = "empty"
product = { type = "lib" }
"#,
    ))
    .unwrap_err();
    assert!(err
        .to_string()
        .contains("platforms should not be empty for 'lib' product type"));
}

#[test]
fn option_dependency_does_not_duplicate_edges() {
    // `test` already friends `main`; declaring the same edge again is a no-op.
    let module = resolve(
        r#"
name = "shared"
product = { type = "lib", platforms = ["jvm", "iosArm64"] }

[[variants]]
name = "mode"
options = [
    { name = "debug", default = true },
    { name = "release", depends-on = [{ target = "debug", kind = "refine" }, { target = "debug", kind = "refine" }] },
]
"#,
    );
    for fragment in &module.fragments {
        let unique: BTreeSet<_> = fragment
            .dependencies
            .iter()
            .map(|l| (l.target, l.kind))
            .collect();
        assert_eq!(unique.len(), fragment.dependencies.len(), "{}", fragment.name);
    }
    let release = fragment(&module, "jvmRelease");
    let jvm = module.fragment_id("jvm").unwrap();
    assert!(release
        .dependency_targets(DependencyKind::Refine)
        .any(|t| t == jvm));
}

#[test]
fn library_artifacts_group_by_variants() {
    let module = resolve(RICH);
    let names: Vec<&str> = module.artifacts.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "shared",
            "release",
            "paid",
            "releasePaid",
            "sharedTest",
            "releaseTest",
            "paidTest",
            "releasePaidTest"
        ]
    );
    let shared = module.artifact("shared").unwrap();
    assert_eq!(shared.platforms, module.platforms);
    assert!(!shared.is_test);
    assert!(module.artifact("releasePaidTest").unwrap().is_test);
}

#[test]
fn external_dependencies_follow_scope() {
    let module = resolve(RICH);
    let ios = &fragment(&module, "ios").external_dependencies;
    assert!(ios.iter().any(|d| d.notation == "../ios-support" && d.exported));
    // Leaves see it through their `Refine` ancestors only.
    let leaf = &fragment(&module, "iosArm64").external_dependencies;
    assert!(!leaf.iter().any(|d| d.notation == "../ios-support"));
    let jvm = &fragment(&module, "jvm").external_dependencies;
    assert_eq!(jvm.len(), 1);
    let jvm_test = &fragment(&module, "jvmTest").external_dependencies;
    assert_eq!(jvm_test.len(), 2);
}

#[test]
fn paths_and_aliases() {
    let module = resolve(RICH);
    let mobile = fragment(&module, "mobile");
    assert_eq!(
        mobile.platforms,
        leaf_closure(&[Platform::Android, Platform::Ios])
    );
    assert_eq!(mobile.source_path.display().to_string(), "shared/src@mobile");
    assert_eq!(
        fragment(&module, "iosReleaseTest").source_path.display().to_string(),
        "shared/test@ios+release"
    );
    assert_eq!(fragment(&module, "common").source_path.display().to_string(), "shared/src");
    let android = fragment(&module, "android");
    let mobile_id = module.fragment_id("mobile").unwrap();
    assert!(android
        .dependency_targets(DependencyKind::Refine)
        .any(|t| t == mobile_id));
}

#[test]
fn model_errors_name_the_module() {
    let decls = vec![
        parse(RICH),
        parse(
            r#"
name = "cli"
product = { type = "jvm/app", platforms = ["iosArm64"] }
"#,
        ),
    ];
    let err = resolve_model(&decls).unwrap_err();
    assert!(matches!(err, ResolveError::Module { ref module, .. } if module == "cli"));
    assert_eq!(
        err.to_string(),
        "module 'cli': product type 'jvm/app' doesn't support 'iosArm64' platform"
    );
}
