//! Vocabulary definitions for schema.org graphs
//!
//! Defines the JSON-LD context and the table of well-known identifier slots
//! ("the one instance of this type on the page").

/// JSON-LD context emitted with every graph
pub const SCHEMA_ORG_CONTEXT: &str = "https://schema.org";

/// Prefix of generated content-hash identifiers: `#/schema/<alias>/<hash>`
pub const GENERATED_ID_PREFIX: &str = "#/schema";

/// Well-known identifier slots
///
/// A slot is a fixed fragment reserved for the primary instance of a type
/// on the page. Lookups go through [`crate::graph::Graph::find_slot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WellKnown {
    WebPage,
    WebSite,
    /// The Person or Organization the site represents
    Identity,
    Logo,
    PrimaryImage,
    Breadcrumb,
    Article,
    Product,
    HowTo,
    Recipe,
    Event,
}

impl WellKnown {
    pub const ALL: [WellKnown; 11] = [
        WellKnown::WebPage,
        WellKnown::WebSite,
        WellKnown::Identity,
        WellKnown::Logo,
        WellKnown::PrimaryImage,
        WellKnown::Breadcrumb,
        WellKnown::Article,
        WellKnown::Product,
        WellKnown::HowTo,
        WellKnown::Recipe,
        WellKnown::Event,
    ];

    /// The fragment reserved for this slot
    pub fn fragment(self) -> &'static str {
        match self {
            WellKnown::WebPage => "#webpage",
            WellKnown::WebSite => "#website",
            WellKnown::Identity => "#identity",
            WellKnown::Logo => "#logo",
            WellKnown::PrimaryImage => "#primaryimage",
            WellKnown::Breadcrumb => "#breadcrumb",
            WellKnown::Article => "#article",
            WellKnown::Product => "#product",
            WellKnown::HowTo => "#howto",
            WellKnown::Recipe => "#recipe",
            WellKnown::Event => "#event",
        }
    }

    /// Find the slot owning a graph key, if any
    pub fn from_graph_key(key: &str) -> Option<WellKnown> {
        WellKnown::ALL.into_iter().find(|slot| slot.fragment() == key)
    }
}

/// schema.org availability used when an Offer does not state one
pub const IN_STOCK: &str = "https://schema.org/InStock";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragments_are_unique() {
        let mut fragments: Vec<&str> = WellKnown::ALL.iter().map(|s| s.fragment()).collect();
        fragments.sort();
        fragments.dedup();
        assert_eq!(fragments.len(), WellKnown::ALL.len());
    }

    #[test]
    fn test_from_graph_key() {
        assert_eq!(WellKnown::from_graph_key("#identity"), Some(WellKnown::Identity));
        assert_eq!(WellKnown::from_graph_key("#/schema/person/abc"), None);
    }
}
