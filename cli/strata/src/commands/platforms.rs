//! `strata platforms`: the platform hierarchy and product types.

use anyhow::Result;
use strata_platform::{Platform, ProductType};

/// Print the platform tree, or the leaves a product type supports.
pub fn run(product: Option<&str>) -> Result<()> {
    match product {
        Some(token) => {
            let product: ProductType = token.parse()?;
            println!("{product} supports:");
            for leaf in product.supported_leaves() {
                println!("  {leaf}");
            }
        }
        None => {
            print!("{}", platform_tree());
            println!();
            println!("Product types:");
            for product in ProductType::ALL {
                println!("  {product}");
            }
        }
    }
    Ok(())
}

/// The natural platform hierarchy as an ASCII tree.
pub(crate) fn platform_tree() -> String {
    let mut out = format!("{}\n", Platform::Common);
    let children = Platform::Common.children();
    let count = children.len();
    for (i, child) in children.into_iter().enumerate() {
        format_platform(&mut out, child, "", i == count - 1);
    }
    out
}

fn format_platform(out: &mut String, platform: Platform, prefix: &str, is_last: bool) {
    let connector = if is_last { "└── " } else { "├── " };
    out.push_str(&format!("{prefix}{connector}{platform}\n"));

    let child_prefix = if is_last {
        format!("{prefix}    ")
    } else {
        format!("{prefix}│   ")
    };
    let children = platform.children();
    let count = children.len();
    for (i, child) in children.into_iter().enumerate() {
        format_platform(out, child, &child_prefix, i == count - 1);
    }
}
