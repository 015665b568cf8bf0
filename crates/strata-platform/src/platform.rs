//! The natural platform hierarchy.
//!
//! Every platform is a node in a fixed tree. Leaves are concrete compile
//! targets; interior nodes only group them. Sets of platforms are always
//! kept as [`BTreeSet`]s so that iteration order follows the table order
//! below, which makes every downstream computation deterministic.

use std::collections::{BTreeSet, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};

/// An ordered set of platforms.
pub type PlatformSet = BTreeSet<Platform>;

/// A node of the static platform tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Platform {
    Common,

    Jvm,
    Android,
    Js,
    Wasm,

    Native,

    Linux,
    LinuxX64,
    LinuxArm64,

    Apple,
    Ios,
    IosArm64,
    IosSimulatorArm64,
    IosX64,
    Macos,
    MacosX64,
    MacosArm64,
    Tvos,
    TvosArm64,
    TvosX64,
    TvosSimulatorArm64,
    Watchos,
    WatchosArm64,
    WatchosArm32,
    WatchosDeviceArm64,
    WatchosSimulatorArm64,

    Mingw,
    MingwX64,

    AndroidNative,
    AndroidNativeArm32,
    AndroidNativeArm64,
    AndroidNativeX64,
    AndroidNativeX86,
}

impl Platform {
    /// Every platform, in table order.
    pub const ALL: [Platform; 33] = [
        Platform::Common,
        Platform::Jvm,
        Platform::Android,
        Platform::Js,
        Platform::Wasm,
        Platform::Native,
        Platform::Linux,
        Platform::LinuxX64,
        Platform::LinuxArm64,
        Platform::Apple,
        Platform::Ios,
        Platform::IosArm64,
        Platform::IosSimulatorArm64,
        Platform::IosX64,
        Platform::Macos,
        Platform::MacosX64,
        Platform::MacosArm64,
        Platform::Tvos,
        Platform::TvosArm64,
        Platform::TvosX64,
        Platform::TvosSimulatorArm64,
        Platform::Watchos,
        Platform::WatchosArm64,
        Platform::WatchosArm32,
        Platform::WatchosDeviceArm64,
        Platform::WatchosSimulatorArm64,
        Platform::Mingw,
        Platform::MingwX64,
        Platform::AndroidNative,
        Platform::AndroidNativeArm32,
        Platform::AndroidNativeArm64,
        Platform::AndroidNativeX64,
        Platform::AndroidNativeX86,
    ];

    /// The parent node, `None` only for [`Platform::Common`].
    pub const fn parent(self) -> Option<Platform> {
        use Platform::*;
        match self {
            Common => None,
            Jvm | Android | Js | Wasm | Native => Some(Common),
            Linux | Apple | Mingw | AndroidNative => Some(Native),
            LinuxX64 | LinuxArm64 => Some(Linux),
            Ios | Macos | Tvos | Watchos => Some(Apple),
            IosArm64 | IosSimulatorArm64 | IosX64 => Some(Ios),
            MacosX64 | MacosArm64 => Some(Macos),
            TvosArm64 | TvosX64 | TvosSimulatorArm64 => Some(Tvos),
            WatchosArm64 | WatchosArm32 | WatchosDeviceArm64 | WatchosSimulatorArm64 => {
                Some(Watchos)
            }
            MingwX64 => Some(Mingw),
            AndroidNativeArm32 | AndroidNativeArm64 | AndroidNativeX64 | AndroidNativeX86 => {
                Some(AndroidNative)
            }
        }
    }

    /// Whether this platform is a concrete compile target.
    pub const fn is_leaf(self) -> bool {
        use Platform::*;
        !matches!(
            self,
            Common | Native | Linux | Apple | Ios | Macos | Tvos | Watchos | Mingw | AndroidNative
        )
    }

    /// Display name, as written in declarations (`iosSimulatorArm64`).
    pub const fn pretty(self) -> &'static str {
        use Platform::*;
        match self {
            Common => "common",
            Jvm => "jvm",
            Android => "android",
            Js => "js",
            Wasm => "wasm",
            Native => "native",
            Linux => "linux",
            LinuxX64 => "linuxX64",
            LinuxArm64 => "linuxArm64",
            Apple => "apple",
            Ios => "ios",
            IosArm64 => "iosArm64",
            IosSimulatorArm64 => "iosSimulatorArm64",
            IosX64 => "iosX64",
            Macos => "macos",
            MacosX64 => "macosX64",
            MacosArm64 => "macosArm64",
            Tvos => "tvos",
            TvosArm64 => "tvosArm64",
            TvosX64 => "tvosX64",
            TvosSimulatorArm64 => "tvosSimulatorArm64",
            Watchos => "watchos",
            WatchosArm64 => "watchosArm64",
            WatchosArm32 => "watchosArm32",
            WatchosDeviceArm64 => "watchosDeviceArm64",
            WatchosSimulatorArm64 => "watchosSimulatorArm64",
            Mingw => "mingw",
            MingwX64 => "mingwX64",
            AndroidNative => "androidNative",
            AndroidNativeArm32 => "androidNativeArm32",
            AndroidNativeArm64 => "androidNativeArm64",
            AndroidNativeX64 => "androidNativeX64",
            AndroidNativeX86 => "androidNativeX86",
        }
    }

    /// Look a platform up by its display name.
    pub fn from_pretty(name: &str) -> Option<Platform> {
        Self::ALL.into_iter().find(|p| p.pretty() == name)
    }

    /// Direct children, in table order.
    pub fn children(self) -> Vec<Platform> {
        Self::ALL
            .into_iter()
            .filter(|p| p.parent() == Some(self))
            .collect()
    }

    /// All leaf descendants found by breadth-first descent, self included if leaf.
    pub fn leaf_children(self) -> Vec<Platform> {
        let mut leaves = Vec::new();
        let mut queue = VecDeque::from([self]);
        while let Some(platform) = queue.pop_front() {
            queue.extend(platform.children());
            if platform.is_leaf() {
                leaves.push(platform);
            }
        }
        leaves
    }

    /// Number of edges between this node and [`Platform::Common`].
    pub fn depth(self) -> usize {
        let mut depth = 0;
        let mut current = self;
        while let Some(parent) = current.parent() {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Whether `self` is a (non-strict) ancestor of `other`.
    pub fn contains(self, other: Platform) -> bool {
        let mut current = Some(other);
        while let Some(p) = current {
            if p == self {
                return true;
            }
            current = p.parent();
        }
        false
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pretty())
    }
}

/// Union of the leaf closures of `platforms`.
pub fn leaf_closure<'a>(platforms: impl IntoIterator<Item = &'a Platform>) -> PlatformSet {
    platforms
        .into_iter()
        .flat_map(|p| p.leaf_children())
        .collect()
}

/// Every interior node except `common`, paired with its leaf closure.
pub fn natural_hierarchy() -> Vec<(Platform, PlatformSet)> {
    Platform::ALL
        .into_iter()
        .filter(|p| !p.is_leaf() && *p != Platform::Common)
        .map(|p| (p, p.leaf_children().into_iter().collect()))
        .collect()
}
