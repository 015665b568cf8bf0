//! Per-module resolution context.
//!
//! Everything derived from a [`ModuleDecl`] before planning starts: the
//! parsed product type, validated targets, resolved aliases and the variant
//! dimensions. Each stage takes the context explicitly.

use std::collections::BTreeMap;

use strata_model::{ModuleDecl, VariantDimension};
use strata_platform::{leaf_closure, validate_product, Platform, PlatformError, PlatformSet, ProductType};

use crate::error::Result;

/// Validated inputs shared by every resolution stage.
#[derive(Debug, Clone)]
pub struct ResolutionContext<'a> {
    pub decl: &'a ModuleDecl,
    pub product: ProductType,
    /// Declared targets after defaulting and deduplication, in declaration order.
    pub targets: Vec<Platform>,
    /// Leaf closure of `targets`.
    pub module_platforms: PlatformSet,
    /// Leaf closure of `targets` and every alias member.
    pub combined_platforms: PlatformSet,
    /// Alias name -> member platforms, in name order.
    pub aliases: BTreeMap<String, Vec<Platform>>,
    /// Declared dimensions followed by the implicit test dimension.
    pub dimensions: Vec<VariantDimension>,
}

impl<'a> ResolutionContext<'a> {
    pub fn new(decl: &'a ModuleDecl) -> Result<Self> {
        let product: ProductType = decl.product.product_type.parse()?;
        let targets = validate_product(product, &decl.product.platforms)?;
        let aliases = decl.alias_platforms()?;

        let unsupported: Vec<String> = aliases
            .values()
            .flatten()
            .filter(|p| !product.supports(**p))
            .map(|p| p.pretty().to_string())
            .collect();
        if !unsupported.is_empty() {
            return Err(PlatformError::UnsupportedPlatforms {
                product: product.to_string(),
                platforms: unsupported,
            }
            .into());
        }

        let dimensions = decl.dimensions()?;
        let module_platforms = leaf_closure(&targets);
        let combined_platforms = leaf_closure(targets.iter().chain(aliases.values().flatten()));

        Ok(Self {
            decl,
            product,
            targets,
            module_platforms,
            combined_platforms,
            aliases,
            dimensions,
        })
    }

    /// Whether `token` names an option of any dimension.
    pub fn is_option(&self, token: &str) -> bool {
        self.dimensions.iter().any(|d| d.option(token).is_some())
    }
}
