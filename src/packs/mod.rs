//! Optional behavior packs shipped with the crate.
//!
//! None of these load by default. [`catalog`] registers them by name so a
//! config's `extensions-dir` can enable them: a file named `bounty.toml` (any
//! extension, any contents) in that directory turns on the bounty pack.

mod bounty;

pub use bounty::{BountyPack, BOUNTY_NAME, DEFAULT_THRESHOLD};

use crate::extensions::{Extension, ExtensionCatalog};

/// Catalog of every pack in this module.
#[must_use]
pub fn catalog() -> ExtensionCatalog {
    let mut catalog = ExtensionCatalog::new();
    catalog.register(BOUNTY_NAME, || Ok(Box::new(BountyPack::default()) as Box<dyn Extension>));
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lists_shipped_packs() {
        let catalog = catalog();
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec![BOUNTY_NAME]);
        let pack = (catalog.get(BOUNTY_NAME).unwrap())().unwrap();
        assert_eq!(pack.name(), BOUNTY_NAME);
    }
}
