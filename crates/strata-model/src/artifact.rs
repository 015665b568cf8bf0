//! Resolved build outputs.

use serde::{Deserialize, Serialize};
use strata_platform::PlatformSet;

use crate::fragment::FragmentId;

/// Output-facing settings of an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ArtifactPart {
    /// Android SDK levels and application identity.
    #[serde(rename_all = "camelCase")]
    Android {
        compile_sdk: Option<String>,
        min_sdk: Option<String>,
        max_sdk: Option<u32>,
        target_sdk: Option<String>,
        application_id: Option<String>,
        namespace: Option<String>,
    },
    /// JVM application entry point.
    #[serde(rename_all = "camelCase")]
    JvmApplication {
        main_class: Option<String>,
        package_prefix: Option<String>,
    },
    /// Native executable entry point.
    #[serde(rename_all = "camelCase")]
    NativeApplication { entry_point: Option<String> },
    /// Maven publication coordinates.
    Publishing {
        group: Option<String>,
        version: Option<String>,
    },
    /// Compose plugin toggle.
    Compose { enabled: bool },
}

/// A resolved build output composed of leaf fragments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub name: String,
    /// Union of member fragments' platforms.
    pub platforms: PlatformSet,
    pub variants: Vec<String>,
    pub is_test: bool,
    pub fragments: Vec<FragmentId>,
    pub parts: Vec<ArtifactPart>,
}
