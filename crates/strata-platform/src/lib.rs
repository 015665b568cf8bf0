//! Static platform hierarchy and product type definitions for Strata.
//!
//! The hierarchy is a fixed tree rooted at [`Platform::Common`]. Interior
//! nodes (`native`, `apple`, `ios`, ...) group the leaf platforms that are
//! actual compile targets. Product types restrict which platforms a module
//! may declare.

pub mod error;
pub mod platform;
pub mod product;

pub use error::{PlatformError, Result};
pub use platform::{leaf_closure, natural_hierarchy, Platform, PlatformSet};
pub use product::{validate_product, ProductType};
