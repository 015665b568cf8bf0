//! Settings sections and their merge rules.
//!
//! Every field is optional; an absent field means "inherit". Merging lays a
//! more specific [`Settings`] over a more general one field by field, so a
//! value set by a specific entry is never lost to a general one applied
//! afterwards in the wrong order.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::modifiers::{applicable, Modifiers};

fn overlay<T: Clone>(base: &mut Option<T>, top: &Option<T>) {
    if let Some(value) = top {
        *base = Some(value.clone());
    }
}

fn overlay_section<T: Default + Clone>(
    base: &mut Option<T>,
    top: &Option<T>,
    merge: impl FnOnce(&mut T, &T),
) {
    if let Some(top) = top {
        merge(base.get_or_insert_with(T::default), top);
    }
}

/// Kotlin compiler options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KotlinSettings {
    pub language_version: Option<String>,
    pub api_version: Option<String>,
    pub all_warnings_as_errors: Option<bool>,
    pub suppress_warnings: Option<bool>,
    pub verbose: Option<bool>,
    pub debug: Option<bool>,
    pub progressive_mode: Option<bool>,
    pub language_features: Option<Vec<String>>,
    pub opt_ins: Option<Vec<String>>,
    pub free_compiler_args: Option<Vec<String>>,
    pub linker_opts: Option<Vec<String>>,
}

impl KotlinSettings {
    pub fn merge(&mut self, top: &Self) {
        overlay(&mut self.language_version, &top.language_version);
        overlay(&mut self.api_version, &top.api_version);
        overlay(&mut self.all_warnings_as_errors, &top.all_warnings_as_errors);
        overlay(&mut self.suppress_warnings, &top.suppress_warnings);
        overlay(&mut self.verbose, &top.verbose);
        overlay(&mut self.debug, &top.debug);
        overlay(&mut self.progressive_mode, &top.progressive_mode);
        overlay(&mut self.language_features, &top.language_features);
        overlay(&mut self.opt_ins, &top.opt_ins);
        overlay(&mut self.free_compiler_args, &top.free_compiler_args);
        overlay(&mut self.linker_opts, &top.linker_opts);
    }
}

/// JVM options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JavaSettings {
    pub main_class: Option<String>,
    pub package_prefix: Option<String>,
    pub source: Option<String>,
    pub target: Option<String>,
}

impl JavaSettings {
    pub fn merge(&mut self, top: &Self) {
        overlay(&mut self.main_class, &top.main_class);
        overlay(&mut self.package_prefix, &top.package_prefix);
        overlay(&mut self.source, &top.source);
        overlay(&mut self.target, &top.target);
    }
}

/// Android SDK and application identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AndroidSettings {
    pub compile_sdk: Option<String>,
    pub min_sdk: Option<String>,
    pub max_sdk: Option<u32>,
    pub target_sdk: Option<String>,
    pub application_id: Option<String>,
    pub namespace: Option<String>,
}

impl AndroidSettings {
    pub fn merge(&mut self, top: &Self) {
        overlay(&mut self.compile_sdk, &top.compile_sdk);
        overlay(&mut self.min_sdk, &top.min_sdk);
        overlay(&mut self.max_sdk, &top.max_sdk);
        overlay(&mut self.target_sdk, &top.target_sdk);
        overlay(&mut self.application_id, &top.application_id);
        overlay(&mut self.namespace, &top.namespace);
    }
}

/// Kotlin/Native options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NativeSettings {
    pub entry_point: Option<String>,
}

impl NativeSettings {
    pub fn merge(&mut self, top: &Self) {
        overlay(&mut self.entry_point, &top.entry_point);
    }
}

/// Test runner options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JunitSettings {
    pub platform_enabled: Option<bool>,
}

impl JunitSettings {
    pub fn merge(&mut self, top: &Self) {
        overlay(&mut self.platform_enabled, &top.platform_enabled);
    }
}

/// Maven publication coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PublishingSettings {
    pub group: Option<String>,
    pub version: Option<String>,
}

impl PublishingSettings {
    pub fn merge(&mut self, top: &Self) {
        overlay(&mut self.group, &top.group);
        overlay(&mut self.version, &top.version);
    }
}

/// Compose compiler plugin toggle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComposeSettings {
    pub enabled: Option<bool>,
}

impl ComposeSettings {
    pub fn merge(&mut self, top: &Self) {
        overlay(&mut self.enabled, &top.enabled);
    }
}

/// One scoped settings entry as declared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub kotlin: Option<KotlinSettings>,
    pub java: Option<JavaSettings>,
    pub android: Option<AndroidSettings>,
    pub native: Option<NativeSettings>,
    pub junit: Option<JunitSettings>,
    pub publishing: Option<PublishingSettings>,
    pub compose: Option<ComposeSettings>,
}

impl Settings {
    /// Lay `top` over `self`; fields `top` leaves unset are kept.
    pub fn merge(&mut self, top: &Settings) {
        overlay_section(&mut self.kotlin, &top.kotlin, KotlinSettings::merge);
        overlay_section(&mut self.java, &top.java, JavaSettings::merge);
        overlay_section(&mut self.android, &top.android, AndroidSettings::merge);
        overlay_section(&mut self.native, &top.native, NativeSettings::merge);
        overlay_section(&mut self.junit, &top.junit, JunitSettings::merge);
        overlay_section(&mut self.publishing, &top.publishing, PublishingSettings::merge);
        overlay_section(&mut self.compose, &top.compose, ComposeSettings::merge);
    }

    /// Apply every entry whose key is a subset of `tags`, general keys first.
    pub fn merge_scoped(entries: &[(Modifiers, Settings)], tags: &BTreeSet<String>) -> Settings {
        let mut merged = Settings::default();
        for (_, settings) in applicable(entries, tags) {
            merged.merge(settings);
        }
        merged
    }

    /// Present sections as parts, in [`PartKind`] order.
    pub fn into_parts(self) -> Vec<FragmentPart> {
        let mut parts = Vec::new();
        if let Some(s) = self.kotlin {
            parts.push(FragmentPart::Kotlin(s));
        }
        if let Some(s) = self.java {
            parts.push(FragmentPart::Java(s));
        }
        if let Some(s) = self.android {
            parts.push(FragmentPart::Android(s));
        }
        if let Some(s) = self.native {
            parts.push(FragmentPart::Native(s));
        }
        if let Some(s) = self.junit {
            parts.push(FragmentPart::Junit(s));
        }
        if let Some(s) = self.publishing {
            parts.push(FragmentPart::Publishing(s));
        }
        if let Some(s) = self.compose {
            parts.push(FragmentPart::Compose(s));
        }
        parts
    }

    /// Rebuild settings from parts; later parts of the same kind win field by field.
    pub fn from_parts(parts: &[FragmentPart]) -> Settings {
        let mut settings = Settings::default();
        for part in parts {
            let layer = match part.clone() {
                FragmentPart::Kotlin(s) => Settings {
                    kotlin: Some(s),
                    ..Settings::default()
                },
                FragmentPart::Java(s) => Settings {
                    java: Some(s),
                    ..Settings::default()
                },
                FragmentPart::Android(s) => Settings {
                    android: Some(s),
                    ..Settings::default()
                },
                FragmentPart::Native(s) => Settings {
                    native: Some(s),
                    ..Settings::default()
                },
                FragmentPart::Junit(s) => Settings {
                    junit: Some(s),
                    ..Settings::default()
                },
                FragmentPart::Publishing(s) => Settings {
                    publishing: Some(s),
                    ..Settings::default()
                },
                FragmentPart::Compose(s) => Settings {
                    compose: Some(s),
                    ..Settings::default()
                },
            };
            settings.merge(&layer);
        }
        settings
    }
}

/// Kind of a settings part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PartKind {
    Kotlin,
    Java,
    Android,
    Native,
    Junit,
    Publishing,
    Compose,
}

/// A merged settings section attached to a fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FragmentPart {
    Kotlin(KotlinSettings),
    Java(JavaSettings),
    Android(AndroidSettings),
    Native(NativeSettings),
    Junit(JunitSettings),
    Publishing(PublishingSettings),
    Compose(ComposeSettings),
}

impl FragmentPart {
    pub fn kind(&self) -> PartKind {
        match self {
            FragmentPart::Kotlin(_) => PartKind::Kotlin,
            FragmentPart::Java(_) => PartKind::Java,
            FragmentPart::Android(_) => PartKind::Android,
            FragmentPart::Native(_) => PartKind::Native,
            FragmentPart::Junit(_) => PartKind::Junit,
            FragmentPart::Publishing(_) => PartKind::Publishing,
            FragmentPart::Compose(_) => PartKind::Compose,
        }
    }
}
