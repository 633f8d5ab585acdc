//! # Catalog Types
//!
//! Read-only catalog records as delivered by the catalog service
//! (`GET /products`, `GET /categories`).
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Types                                   │
//! │                                                                         │
//! │  ┌─────────────────┐                                                   │
//! │  │    Product      │──┬──► sizes: [Size]          id, name, price      │
//! │  │  ─────────────  │  │                                                 │
//! │  │  id             │  ├──► addon_groups: [AddonGroup]                   │
//! │  │  name           │  │        mode: single | multi                     │
//! │  │  price_cents?   │  │        addons: [Addon]   id, name, price        │
//! │  │  category_id?   │  │                                                 │
//! │  └─────────────────┘  └──► pizza_config?: PizzaConfig                   │
//! │                                 flavor_category_id ──► Category         │
//! │                                 price_rule: higher | average            │
//! │                                 max_flavors?, sizes{name → override}    │
//! │                                                                         │
//! │  A Flavor is just a Product that lives in the flavor category.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Optional Branches
//! "Has sizes", "has addon groups" and "is a pizza" are plain optional
//! fields. Every consumer checks them explicitly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Size
// =============================================================================

/// A named price variant of a product ("Small", "Large", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    /// Unique within its product.
    pub id: String,
    pub name: String,
    pub price_cents: i64,
}

impl Size {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Addons
// =============================================================================

/// How addons inside one group may be combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Radio: at most one addon of the group.
    Single,
    /// Checkbox: independent toggles.
    #[default]
    Multi,
}

/// An optional paid extra.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Addon {
    /// Unique within its group.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price_cents: i64,
}

impl Addon {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// A named collection of addons sharing a selection mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AddonGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub mode: SelectionMode,
    #[serde(default)]
    pub addons: Vec<Addon>,
}

impl AddonGroup {
    /// Checks if the addon belongs to this group.
    pub fn contains(&self, addon_id: &str) -> bool {
        self.addons.iter().any(|a| a.id == addon_id)
    }
}

// =============================================================================
// Pizza Configuration
// =============================================================================

/// How the prices of several flavors combine into one base price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PriceRule {
    /// Arithmetic mean of the flavor prices.
    Average,
    /// Most expensive flavor wins. Unknown rules from the catalog land here.
    #[default]
    #[serde(other)]
    Higher,
}

/// Per-size override of the flavor limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SizeOverride {
    pub max_flavors: Option<u32>,
}

/// Present only on pizza-type products.
///
/// ## Example (catalog JSON)
/// ```json
/// {
///   "flavorCategoryId": "cat-flavors",
///   "priceRule": "average",
///   "maxFlavors": 2,
///   "sizes": { "Large": { "maxFlavors": 4 } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PizzaConfig {
    /// Category the flavor options are drawn from.
    pub flavor_category_id: String,
    #[serde(default)]
    pub price_rule: Option<PriceRule>,
    #[serde(default)]
    pub max_flavors: Option<u32>,
    /// Keyed by size *name*.
    #[serde(default)]
    pub sizes: BTreeMap<String, SizeOverride>,
}

impl PizzaConfig {
    /// The configured rule, `Higher` when the catalog leaves it out.
    pub fn price_rule(&self) -> PriceRule {
        self.price_rule.unwrap_or_default()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog item sellable through the POS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,

    /// Display name shown on the cart line and the kitchen ticket.
    pub name: String,

    /// Base price in cents. Ignored once a size is selected; may be absent
    /// on products that are only sold by size.
    #[serde(default)]
    pub price_cents: Option<i64>,

    #[serde(default)]
    pub category_id: Option<String>,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default)]
    pub sizes: Vec<Size>,

    #[serde(default)]
    pub addon_groups: Vec<AddonGroup>,

    #[serde(default)]
    pub pizza_config: Option<PizzaConfig>,
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Returns the base price as Money, if the catalog carries one.
    #[inline]
    pub fn base_price(&self) -> Option<Money> {
        self.price_cents.map(Money::from_cents)
    }

    /// Looks up a size by id.
    pub fn size(&self, size_id: &str) -> Option<&Size> {
        self.sizes.iter().find(|s| s.id == size_id)
    }

    /// Looks up a size by name (flavor prices are matched this way).
    pub fn size_named(&self, name: &str) -> Option<&Size> {
        self.sizes.iter().find(|s| s.name == name)
    }

    /// Finds an addon and the group that owns it.
    pub fn find_addon(&self, addon_id: &str) -> Option<(&AddonGroup, &Addon)> {
        self.addon_groups.iter().find_map(|group| {
            group
                .addons
                .iter()
                .find(|a| a.id == addon_id)
                .map(|addon| (group, addon))
        })
    }

    /// Checks if flavors can be chosen for this product.
    #[inline]
    pub fn is_pizza(&self) -> bool {
        self.pizza_config.is_some()
    }

    /// Checks if `candidate` is drawn from this product's flavor category.
    pub fn accepts_flavor(&self, candidate: &Product) -> bool {
        match (&self.pizza_config, &candidate.category_id) {
            (Some(config), Some(category)) => config.flavor_category_id == *category,
            _ => false,
        }
    }
}

// =============================================================================
// Category
// =============================================================================

/// A catalog category (`GET /categories`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pizza() -> Product {
        Product {
            id: "pizza".to_string(),
            name: "Pizza".to_string(),
            price_cents: None,
            category_id: Some("cat-pizza".to_string()),
            is_active: true,
            sizes: vec![
                Size {
                    id: "s1".to_string(),
                    name: "Medium".to_string(),
                    price_cents: 3000,
                },
                Size {
                    id: "s2".to_string(),
                    name: "Large".to_string(),
                    price_cents: 4000,
                },
            ],
            addon_groups: vec![AddonGroup {
                id: "g1".to_string(),
                name: "Crust".to_string(),
                mode: SelectionMode::Single,
                addons: vec![Addon {
                    id: "a1".to_string(),
                    name: "Catupiry".to_string(),
                    price_cents: 500,
                }],
            }],
            pizza_config: Some(PizzaConfig {
                flavor_category_id: "cat-flavors".to_string(),
                price_rule: None,
                max_flavors: Some(2),
                sizes: BTreeMap::new(),
            }),
        }
    }

    #[test]
    fn test_size_lookup_by_id_and_name() {
        let product = pizza();
        assert_eq!(product.size("s2").map(|s| s.price().cents()), Some(4000));
        assert_eq!(product.size_named("Medium").map(|s| s.id.as_str()), Some("s1"));
        assert!(product.size("nope").is_none());
    }

    #[test]
    fn test_find_addon_returns_owning_group() {
        let product = pizza();
        let (group, addon) = product.find_addon("a1").unwrap();
        assert_eq!(group.id, "g1");
        assert_eq!(addon.price().cents(), 500);
        assert!(product.find_addon("a9").is_none());
    }

    #[test]
    fn test_accepts_flavor_by_category() {
        let product = pizza();
        let mut flavor = pizza();
        flavor.pizza_config = None;

        flavor.category_id = Some("cat-flavors".to_string());
        assert!(product.accepts_flavor(&flavor));

        flavor.category_id = Some("cat-drinks".to_string());
        assert!(!product.accepts_flavor(&flavor));

        flavor.category_id = None;
        assert!(!product.accepts_flavor(&flavor));
    }

    #[test]
    fn test_price_rule_defaults_to_higher() {
        let config = pizza().pizza_config.unwrap();
        assert_eq!(config.price_rule(), PriceRule::Higher);
    }

    #[test]
    fn test_deserialize_catalog_product() {
        let json = r#"{
            "id": "p1",
            "name": "Pizza Grande",
            "sizes": [{ "id": "s1", "name": "Large", "priceCents": 4000 }],
            "addonGroups": [{
                "id": "g1",
                "name": "Extras",
                "mode": "single",
                "addons": [{ "id": "a1", "name": "Bacon", "priceCents": 350 }]
            }],
            "pizzaConfig": {
                "flavorCategoryId": "cat1",
                "priceRule": "average",
                "maxFlavors": 2,
                "sizes": { "Large": { "maxFlavors": 4 } }
            }
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.is_active);
        assert_eq!(product.price_cents, None);
        assert_eq!(product.addon_groups[0].mode, SelectionMode::Single);

        let config = product.pizza_config.unwrap();
        assert_eq!(config.price_rule(), PriceRule::Average);
        assert_eq!(config.sizes["Large"].max_flavors, Some(4));
    }

    #[test]
    fn test_unknown_price_rule_is_higher() {
        let json = r#"{ "flavorCategoryId": "cat1", "priceRule": "cheapest" }"#;
        let config: PizzaConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.price_rule(), PriceRule::Higher);

        let missing: PizzaConfig = serde_json::from_str(r#"{ "flavorCategoryId": "cat1" }"#).unwrap();
        assert_eq!(missing.price_rule(), PriceRule::Higher);

        assert_eq!(serde_json::to_string(&PriceRule::Average).unwrap(), r#""average""#);
        assert_eq!(serde_json::to_string(&PriceRule::Higher).unwrap(), r#""higher""#);
    }
}
