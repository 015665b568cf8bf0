//! Declaration error types.

/// Errors found in the shape of a module declaration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A variant dimension has no options at all.
    #[error("variant dimension '{dimension}' declares no options")]
    NoOptions { dimension: String },

    /// An option was declared without a name.
    #[error("variant dimension '{dimension}': option #{position} is missing a name")]
    MissingOptionName { dimension: String, position: usize },

    /// Zero or several options are flagged as default.
    #[error("variant dimension '{dimension}' must declare exactly one default option, found {found}")]
    DefaultOptionCount { dimension: String, found: usize },

    /// A user dimension reuses the name of the implicit test dimension.
    #[error("variant dimension name '{dimension}' is reserved")]
    ReservedDimension { dimension: String },

    /// Two options (possibly in different dimensions) share a name.
    #[error("variant option '{option}' is declared more than once")]
    DuplicateOption { option: String },

    /// An option depends on an option that is not in its own or an earlier dimension.
    #[error("option '{option}' depends on '{target}', which is not an option of dimension '{dimension}' or an earlier one")]
    UnknownOptionDependency {
        option: String,
        target: String,
        dimension: String,
    },

    /// An alias member is not a known platform.
    #[error("alias '{alias}' refers to unknown platform '{platform}'")]
    UnknownAliasPlatform { alias: String, platform: String },

    /// An alias has no members.
    #[error("alias '{alias}' must contain at least one platform")]
    EmptyAlias { alias: String },

    /// An alias shadows a platform name.
    #[error("alias '{alias}' collides with a platform of the same name")]
    AliasShadowsPlatform { alias: String },

    /// A modifier key contains an empty token (`"ios++debug"`).
    #[error("invalid modifier key '{key}': empty token")]
    EmptyModifierToken { key: String },
}

/// Result type for declaration checks.
pub type Result<T> = std::result::Result<T, ModelError>;
