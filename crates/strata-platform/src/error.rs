//! Error types for platform and product type validation.

/// Errors that can occur while validating a product declaration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    /// The product type token matched none of the known product types.
    #[error("unsupported product type '{token}', supported types: {}", .supported.join(", "))]
    UnsupportedProductType {
        /// The rejected token.
        token: String,
        /// Every supported product type name.
        supported: Vec<String>,
    },

    /// One or more declared platforms are unknown or not allowed for the product type.
    #[error(
        "product type '{product}' doesn't support {} {}",
        quoted(.platforms),
        noun(.platforms)
    )]
    UnsupportedPlatforms {
        /// Display name of the product type.
        product: String,
        /// The rejected platform names, in declaration order.
        platforms: Vec<String>,
    },

    /// A library-like product declared no platforms.
    #[error("platforms should not be empty for '{product}' product type")]
    EmptyPlatforms {
        /// Display name of the product type.
        product: String,
    },
}

fn quoted(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("'{n}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn noun(names: &[String]) -> &'static str {
    if names.len() == 1 {
        "platform"
    } else {
        "platforms"
    }
}

/// Result type for platform operations.
pub type Result<T> = std::result::Result<T, PlatformError>;
