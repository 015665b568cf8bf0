//! Product types and their platform allowlists.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PlatformError, Result};
use crate::platform::Platform;

/// What a module produces.
///
/// Application-like products yield one artifact per leaf platform;
/// library-like products yield one artifact per variant combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductType {
    #[serde(rename = "lib")]
    Lib,
    #[serde(rename = "jvm/app")]
    JvmApp,
    #[serde(rename = "android/app")]
    AndroidApp,
    #[serde(rename = "ios/app")]
    IosApp,
    #[serde(rename = "macos/app")]
    MacosApp,
    #[serde(rename = "linux/app")]
    LinuxApp,
}

impl ProductType {
    /// Every product type, in display order.
    pub const ALL: [ProductType; 6] = [
        ProductType::Lib,
        ProductType::JvmApp,
        ProductType::AndroidApp,
        ProductType::IosApp,
        ProductType::MacosApp,
        ProductType::LinuxApp,
    ];

    /// Token used in declarations.
    pub const fn value(self) -> &'static str {
        match self {
            ProductType::Lib => "lib",
            ProductType::JvmApp => "jvm/app",
            ProductType::AndroidApp => "android/app",
            ProductType::IosApp => "ios/app",
            ProductType::MacosApp => "macos/app",
            ProductType::LinuxApp => "linux/app",
        }
    }

    /// Whether the product groups leaf fragments by variant rather than by platform.
    pub const fn is_library(self) -> bool {
        matches!(self, ProductType::Lib)
    }

    /// Leaf platforms this product can be built for.
    pub fn supported_leaves(self) -> Vec<Platform> {
        match self {
            ProductType::Lib => Platform::Common.leaf_children(),
            ProductType::JvmApp => vec![Platform::Jvm],
            ProductType::AndroidApp => vec![Platform::Android],
            ProductType::IosApp => Platform::Ios.leaf_children(),
            ProductType::MacosApp => Platform::Macos.leaf_children(),
            ProductType::LinuxApp => Platform::Linux.leaf_children(),
        }
    }

    /// Platforms used when an application declares none. Libraries have no default.
    pub fn default_platforms(self) -> Option<Vec<Platform>> {
        match self {
            ProductType::Lib => None,
            ProductType::JvmApp => Some(vec![Platform::Jvm]),
            ProductType::AndroidApp => Some(vec![Platform::Android]),
            ProductType::IosApp => Some(Platform::Ios.leaf_children()),
            ProductType::MacosApp => Some(Platform::Macos.leaf_children()),
            ProductType::LinuxApp => Some(Platform::Linux.leaf_children()),
        }
    }

    /// Whether `platform` may be declared as a target of this product.
    ///
    /// Interior nodes are accepted when their whole leaf closure is supported;
    /// `common` is never a valid declared target.
    pub fn supports(self, platform: Platform) -> bool {
        if platform == Platform::Common {
            return false;
        }
        let supported = self.supported_leaves();
        platform
            .leaf_children()
            .iter()
            .all(|leaf| supported.contains(leaf))
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for ProductType {
    type Err = PlatformError;

    fn from_str(token: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.value() == token)
            .ok_or_else(|| PlatformError::UnsupportedProductType {
                token: token.to_string(),
                supported: Self::ALL.iter().map(|p| p.value().to_string()).collect(),
            })
    }
}

/// Validate a product declaration and return its target platforms.
///
/// `platforms` are display names as written by the user. Unknown names and
/// names not allowed by the product type are reported together. An
/// application with no platforms falls back to its defaults.
pub fn validate_product(product: ProductType, platforms: &[String]) -> Result<Vec<Platform>> {
    if platforms.is_empty() {
        return product
            .default_platforms()
            .ok_or_else(|| PlatformError::EmptyPlatforms {
                product: product.value().to_string(),
            });
    }

    let mut accepted = Vec::new();
    let mut rejected = Vec::new();
    for name in platforms {
        match Platform::from_pretty(name) {
            Some(p) if product.supports(p) => {
                if !accepted.contains(&p) {
                    accepted.push(p);
                }
            }
            _ => rejected.push(name.clone()),
        }
    }

    if !rejected.is_empty() {
        return Err(PlatformError::UnsupportedPlatforms {
            product: product.value().to_string(),
            platforms: rejected,
        });
    }

    Ok(accepted)
}
