use std::collections::HashMap;

use tracing::{debug, trace, warn};

use super::product::{Product, DEFAULT_CATEGORY};
use crate::text_utils::normalize;

/// Largest normalized edit distance still accepted by the fuzzy strategy.
pub const FUZZY_THRESHOLD: f64 = 0.34;

/// One way of mapping normalized input to a canonical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The whole input is a registered alias.
    Exact,
    /// A registered alias occurs inside the input, in registration order.
    Substring,
    /// The input is within [`FUZZY_THRESHOLD`] of some alias.
    Fuzzy,
}

/// Strategies are tried in this order and the first hit wins. Changing the
/// order changes resolution results.
pub const RESOLUTION_ORDER: [Strategy; 3] = [Strategy::Exact, Strategy::Substring, Strategy::Fuzzy];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Nothing left after normalization.
    Empty,
    Catalog(Strategy),
    /// No catalog hit; the normalized input stands in as its own name.
    PassThrough,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub canonical: String,
    pub kind: MatchKind,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }
}

#[derive(Debug, Clone)]
struct IndexedProduct {
    canonical: String,
    aliases: Vec<String>,
    product: Product,
}

/// Alias lookup and fuzzy search over the product catalog.
///
/// Built once from the product list and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    products: Vec<Product>,
    indexed: Vec<IndexedProduct>,
    /// Normalized alias and the index into `indexed`, in registration order.
    aliases: Vec<(String, usize)>,
    by_alias: HashMap<String, usize>,
}

impl CatalogIndex {
    pub fn build(products: Vec<Product>) -> Self {
        let mut index = Self {
            products: Vec::with_capacity(products.len()),
            ..Self::default()
        };

        for product in products {
            index.register(&product);
            index.products.push(product);
        }

        debug!(
            products = index.indexed.len(),
            aliases = index.aliases.len(),
            "Catalog index built"
        );
        index
    }

    fn register(&mut self, product: &Product) {
        let aliases: Vec<String> = product
            .aliases()
            .into_iter()
            .map(normalize)
            .filter(|a| !a.is_empty())
            .collect();

        let Some(first) = product.aliases().first().map(|a| normalize(a)) else {
            trace!("Skipping product without aliases");
            return;
        };
        if first.is_empty() {
            warn!(names = ?product.names, "Skipping product with a blank canonical name");
            return;
        }

        let slot = self.indexed.len();
        for alias in &aliases {
            if self.by_alias.contains_key(alias) {
                trace!(alias = %alias, "Alias already claimed by an earlier product");
                continue;
            }
            self.by_alias.insert(alias.clone(), self.aliases.len());
            self.aliases.push((alias.clone(), slot));
        }

        self.indexed.push(IndexedProduct {
            canonical: first,
            aliases,
            product: product.clone(),
        });
    }

    /// Every product as loaded, including ones that could not be indexed.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Map arbitrary text to a canonical name. Never fails: without a catalog
    /// hit the normalized input is returned as a pass-through name.
    pub fn resolve(&self, raw: &str) -> Resolution {
        let candidate = normalize(raw);
        if candidate.is_empty() {
            return Resolution {
                canonical: String::new(),
                kind: MatchKind::Empty,
            };
        }

        for strategy in RESOLUTION_ORDER {
            if let Some(canonical) = self.try_strategy(strategy, &candidate) {
                trace!(input = %candidate, canonical, ?strategy, "Resolved item");
                return Resolution {
                    canonical: canonical.to_string(),
                    kind: MatchKind::Catalog(strategy),
                };
            }
        }

        trace!(input = %candidate, "No catalog match; passing through");
        Resolution {
            canonical: candidate,
            kind: MatchKind::PassThrough,
        }
    }

    /// Shorthand for [`CatalogIndex::resolve`] returning just the name.
    pub fn resolve_canonical(&self, raw: &str) -> String {
        self.resolve(raw).canonical
    }

    /// Run a single strategy against already normalized input.
    pub fn try_strategy(&self, strategy: Strategy, candidate: &str) -> Option<&str> {
        let slot = match strategy {
            Strategy::Exact => self.by_alias.get(candidate).map(|&i| self.aliases[i].1),
            Strategy::Substring => self
                .aliases
                .iter()
                .find(|(alias, _)| candidate.contains(alias.as_str()))
                .map(|(_, slot)| *slot),
            Strategy::Fuzzy => self.fuzzy_slot(candidate),
        }?;
        Some(self.indexed[slot].canonical.as_str())
    }

    fn fuzzy_slot(&self, candidate: &str) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (slot, entry) in self.indexed.iter().enumerate() {
            for alias in &entry.aliases {
                let distance = 1.0 - strsim::normalized_damerau_levenshtein(candidate, alias);
                if distance > FUZZY_THRESHOLD {
                    continue;
                }
                // Strictly better only, so earlier products win ties.
                if best.map_or(true, |(_, d)| distance < d) {
                    best = Some((slot, distance));
                }
            }
        }
        if let Some((slot, distance)) = best {
            trace!(
                input = candidate,
                canonical = %self.indexed[slot].canonical,
                distance,
                "Fuzzy match"
            );
        }
        best.map(|(slot, _)| slot)
    }

    /// The product whose canonical name equals `canonical`.
    pub fn product_for(&self, canonical: &str) -> Option<&Product> {
        let key = normalize(canonical);
        self.indexed
            .iter()
            .find(|p| p.canonical == key)
            .map(|p| &p.product)
    }

    /// Category and unit price for a canonical name, or the defaults for
    /// names that are not in the catalog.
    pub fn category_and_price(&self, canonical: &str) -> (String, f64) {
        match self.product_for(canonical) {
            Some(product) => (product.category_or_default().to_string(), product.price),
            None => (DEFAULT_CATEGORY.to_string(), 0.0),
        }
    }

    pub fn canonical_names(&self) -> impl Iterator<Item = &str> {
        self.indexed.iter().map(|p| p.canonical.as_str())
    }

    /// Products with any alias containing the normalized query, optionally
    /// capped by unit price.
    pub fn search(&self, query: &str, max_price: Option<f64>) -> Vec<Product> {
        let query = normalize(query);
        self.indexed
            .iter()
            .filter(|p| p.aliases.iter().any(|a| a.contains(query.as_str())))
            .filter(|p| max_price.map_or(true, |max| p.product.price <= max))
            .map(|p| p.product.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> CatalogIndex {
        CatalogIndex::build(vec![
            Product::new(["Milk", "dairy milk", "lait"], "Dairy", 2.5),
            Product::new(["Bread", "baguette"], "Bakery", 1.8),
            Product::new(["Almond Milk"], "Dairy", 3.2),
            Product::new(Vec::<String>::new(), "Ghost", 9.0),
            Product::new(["cheese"], "Dairy", 6.0),
        ])
    }

    #[test]
    fn exact_alias_resolves_to_canonical() {
        let index = catalog();
        let res = index.resolve("  DAIRY\u{200B} milk ");
        assert_eq!(res.canonical, "milk");
        assert_eq!(res.kind, MatchKind::Catalog(Strategy::Exact));
    }

    #[test]
    fn substring_uses_registration_order() {
        let index = catalog();
        // "milk" was registered before "almond milk" and shadows it.
        let res = index.resolve("fresh almond milk please");
        assert_eq!(res.canonical, "milk");
        assert_eq!(res.kind, MatchKind::Catalog(Strategy::Substring));
    }

    #[test]
    fn fuzzy_accepts_close_misspelling() {
        let index = catalog();
        let res = index.resolve("chese");
        assert_eq!(res.canonical, "cheese");
        assert_eq!(res.kind, MatchKind::Catalog(Strategy::Fuzzy));
    }

    #[test]
    fn far_input_passes_through() {
        let index = catalog();
        let res = index.resolve("Dragonfruit");
        assert_eq!(res.canonical, "dragonfruit");
        assert_eq!(res.kind, MatchKind::PassThrough);
    }

    #[test]
    fn blank_input_is_empty() {
        let res = catalog().resolve(" \u{FEFF} ");
        assert!(res.is_empty());
        assert_eq!(res.kind, MatchKind::Empty);
    }

    #[test]
    fn first_writer_keeps_alias() {
        let index = CatalogIndex::build(vec![
            Product::new(["Milk", "white"], "Dairy", 2.5),
            Product::new(["Paint", "white"], "Hardware", 10.0),
        ]);
        assert_eq!(index.resolve_canonical("white"), "milk");
    }

    #[test]
    fn category_and_price_default_for_unknown() {
        let index = catalog();
        assert_eq!(index.category_and_price("milk"), ("Dairy".to_string(), 2.5));
        assert_eq!(index.category_and_price("kale"), ("Other".to_string(), 0.0));
    }

    #[test]
    fn products_without_aliases_are_kept_but_not_indexed() {
        let index = catalog();
        assert_eq!(index.products().len(), 5);
        assert_eq!(index.canonical_names().count(), 4);
    }

    #[test]
    fn search_filters_by_alias_and_price() {
        let index = catalog();
        let names: Vec<String> = index
            .search("MILK", None)
            .into_iter()
            .map(|p| p.names[0].clone())
            .collect();
        assert_eq!(names, vec!["Milk", "Almond Milk"]);

        let cheap = index.search("milk", Some(3.0));
        assert_eq!(cheap.len(), 1);
        assert_eq!(cheap[0].names[0], "Milk");
    }
}
