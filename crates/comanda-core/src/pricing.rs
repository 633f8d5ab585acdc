//! # Pricing Module
//!
//! Turns a product and a selection into a price and a display name.
//!
//! ## Price Composition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Unit Price Composition                               │
//! │                                                                         │
//! │  flavors selected?                                                      │
//! │     │                                                                   │
//! │     ├── no ──► size selected? ── yes ──► size.price                     │
//! │     │                         └─ no ───► product.price                  │
//! │     │                                                                   │
//! │     └── yes ─► resolve each flavor price (by size NAME)                 │
//! │                   │                                                     │
//! │                   ├── rule = higher  ──► max(prices)                    │
//! │                   └── rule = average ──► mean(prices)                   │
//! │                                                                         │
//! │  unit price = base price + Σ selected addon prices                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is pure. Nothing is clamped: catalog prices are
//! trusted to be non-negative (see [`crate::validation::validate_product`]).

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{AddonGroup, PriceRule, Product, Size};

/// Effective flavor limit for the product at the selected size.
///
/// Precedence: per-size override → product default → `1`. Products without
/// a pizza configuration always allow exactly one flavor. A `0` coming from
/// the catalog counts as "not set".
///
/// ## Example
/// ```rust
/// use comanda_core::pricing::effective_max_flavors;
/// use comanda_core::types::{PizzaConfig, Product, SizeOverride};
///
/// let mut product: Product = serde_json::from_str(r#"{ "id": "p", "name": "Pizza" }"#).unwrap();
/// assert_eq!(effective_max_flavors(&product, Some("Large")), 1);
///
/// product.pizza_config = Some(PizzaConfig {
///     flavor_category_id: "cat".into(),
///     price_rule: None,
///     max_flavors: Some(2),
///     sizes: [("Large".to_string(), SizeOverride { max_flavors: Some(4) })].into(),
/// });
/// assert_eq!(effective_max_flavors(&product, Some("Large")), 4);
/// assert_eq!(effective_max_flavors(&product, Some("Medium")), 2);
/// ```
pub fn effective_max_flavors(product: &Product, selected_size_name: Option<&str>) -> u32 {
    let Some(config) = &product.pizza_config else {
        return 1;
    };

    let per_size = selected_size_name
        .and_then(|name| config.sizes.get(name))
        .and_then(|o| o.max_flavors)
        .filter(|&n| n > 0);

    per_size
        .or_else(|| config.max_flavors.filter(|&n| n > 0))
        .unwrap_or(1)
}

/// Price of one flavor at the parent product's selected size.
///
/// Flavor sizes and parent sizes are separate catalog records that share a
/// naming convention, so the match is by **name**, never by id. Falls back
/// to the flavor's base price; `None` if the flavor has neither.
pub fn resolve_flavor_price(flavor: &Product, selected_size: Option<&Size>) -> Option<Money> {
    selected_size
        .and_then(|size| flavor.size_named(&size.name))
        .map(Size::price)
        .or_else(|| flavor.base_price())
}

/// Combines resolved flavor prices according to the price rule.
///
/// Returns `None` when there is nothing to combine.
pub fn combine_flavor_prices(prices: &[Money], rule: PriceRule) -> Option<Money> {
    match rule {
        PriceRule::Higher => prices.iter().max().copied(),
        PriceRule::Average => Money::average(prices),
    }
}

/// Base price before addons.
///
/// ## Errors
/// [`CoreError::UnresolvablePrice`] when flavors are selected but none has a
/// price, or when no flavor and no size is selected and the product has no
/// base price.
pub fn compute_base_price(
    product: &Product,
    selected_size: Option<&Size>,
    selected_flavors: &[Product],
    price_rule: PriceRule,
) -> CoreResult<Money> {
    let unresolvable = || CoreError::UnresolvablePrice {
        product_id: product.id.clone(),
    };

    if selected_flavors.is_empty() {
        return match selected_size {
            Some(size) => Ok(size.price()),
            None => product.base_price().ok_or_else(unresolvable),
        };
    }

    // Flavors without any price are skipped; the rule applies to the rest
    let prices: Vec<Money> = selected_flavors
        .iter()
        .filter_map(|flavor| resolve_flavor_price(flavor, selected_size))
        .collect();

    combine_flavor_prices(&prices, price_rule).ok_or_else(unresolvable)
}

/// Sum of the prices of every selected addon, across all groups.
pub fn compute_addons_surcharge(addon_groups: &[AddonGroup], selected_addon_ids: &[String]) -> Money {
    addon_groups
        .iter()
        .flat_map(|group| group.addons.iter())
        .filter(|addon| selected_addon_ids.iter().any(|id| *id == addon.id))
        .map(|addon| addon.price())
        .sum()
}

/// Base price plus addon surcharge.
pub fn compute_unit_price(
    product: &Product,
    selected_size: Option<&Size>,
    selected_addon_ids: &[String],
    selected_flavors: &[Product],
    price_rule: PriceRule,
) -> CoreResult<Money> {
    let base = compute_base_price(product, selected_size, selected_flavors, price_rule)?;
    Ok(base + compute_addons_surcharge(&product.addon_groups, selected_addon_ids))
}

/// `Name (Size) [Flavor1/Flavor2]`, flavors in selection order.
///
/// ## Example
/// ```rust
/// use comanda_core::pricing::compose_display_name;
/// use comanda_core::types::{Product, Size};
///
/// let pizza: Product = serde_json::from_str(r#"{ "id": "p", "name": "Pizza" }"#).unwrap();
/// let large = Size { id: "s".into(), name: "Large".into(), price_cents: 4000 };
/// let mussarela: Product = serde_json::from_str(r#"{ "id": "f1", "name": "Mussarela" }"#).unwrap();
/// let calabresa: Product = serde_json::from_str(r#"{ "id": "f2", "name": "Calabresa" }"#).unwrap();
///
/// assert_eq!(
///     compose_display_name(&pizza, Some(&large), &[mussarela, calabresa]),
///     "Pizza (Large) [Mussarela/Calabresa]"
/// );
/// ```
pub fn compose_display_name(
    product: &Product,
    selected_size: Option<&Size>,
    selected_flavors: &[Product],
) -> String {
    let mut name = product.name.clone();

    if let Some(size) = selected_size {
        name.push_str(&format!(" ({})", size.name));
    }

    if !selected_flavors.is_empty() {
        let flavors: Vec<&str> = selected_flavors.iter().map(|f| f.name.as_str()).collect();
        name.push_str(&format!(" [{}]", flavors.join("/")));
    }

    name
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Addon, PizzaConfig, SelectionMode, SizeOverride};
    use std::collections::BTreeMap;

    fn size(id: &str, name: &str, price_cents: i64) -> Size {
        Size {
            id: id.to_string(),
            name: name.to_string(),
            price_cents,
        }
    }

    fn flavor(id: &str, name: &str, price_cents: Option<i64>, sizes: Vec<Size>) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            price_cents,
            category_id: Some("cat1".to_string()),
            is_active: true,
            sizes,
            addon_groups: vec![],
            pizza_config: None,
        }
    }

    fn pizza(rule: Option<PriceRule>, max_flavors: Option<u32>) -> Product {
        Product {
            id: "pizza".to_string(),
            name: "Pizza".to_string(),
            price_cents: Some(2500),
            category_id: None,
            is_active: true,
            sizes: vec![size("s1", "Medium", 3000), size("s2", "Large", 4000)],
            addon_groups: vec![],
            pizza_config: Some(PizzaConfig {
                flavor_category_id: "cat1".to_string(),
                price_rule: rule,
                max_flavors,
                sizes: BTreeMap::new(),
            }),
        }
    }

    #[test]
    fn test_max_flavors_precedence() {
        let mut product = pizza(None, Some(2));
        product
            .pizza_config
            .as_mut()
            .unwrap()
            .sizes
            .insert("Large".to_string(), SizeOverride { max_flavors: Some(4) });

        assert_eq!(effective_max_flavors(&product, Some("Large")), 4);
        assert_eq!(effective_max_flavors(&product, Some("Medium")), 2);
        assert_eq!(effective_max_flavors(&product, None), 2);
    }

    #[test]
    fn test_max_flavors_defaults_to_one() {
        let mut product = pizza(None, None);
        assert_eq!(effective_max_flavors(&product, Some("Large")), 1);

        product.pizza_config = None;
        assert_eq!(effective_max_flavors(&product, Some("Large")), 1);
    }

    #[test]
    fn test_max_flavors_ignores_zero() {
        let mut product = pizza(None, Some(0));
        product
            .pizza_config
            .as_mut()
            .unwrap()
            .sizes
            .insert("Large".to_string(), SizeOverride { max_flavors: Some(0) });
        assert_eq!(effective_max_flavors(&product, Some("Large")), 1);
    }

    #[test]
    fn test_flavor_price_matches_size_by_name() {
        let calabresa = flavor("f1", "Calabresa", Some(3500), vec![size("x9", "Large", 2000)]);

        let parent_large = size("s2", "Large", 4000);
        assert_eq!(
            resolve_flavor_price(&calabresa, Some(&parent_large)),
            Some(Money::from_cents(2000))
        );

        let parent_small = size("s0", "Small", 2000);
        assert_eq!(
            resolve_flavor_price(&calabresa, Some(&parent_small)),
            Some(Money::from_cents(3500))
        );

        assert_eq!(
            resolve_flavor_price(&calabresa, None),
            Some(Money::from_cents(3500))
        );
    }

    #[test]
    fn test_flavor_without_any_price() {
        let ghost = flavor("f1", "Ghost", None, vec![]);
        assert_eq!(resolve_flavor_price(&ghost, None), None);
    }

    #[test]
    fn test_price_rule_higher_and_average() {
        let flavors = vec![
            flavor("f1", "A", Some(1000), vec![]),
            flavor("f2", "B", Some(1400), vec![]),
        ];

        let higher = compute_base_price(&pizza(None, Some(2)), None, &flavors, PriceRule::Higher);
        assert_eq!(higher.unwrap().cents(), 1400);

        let average = compute_base_price(&pizza(None, Some(2)), None, &flavors, PriceRule::Average);
        assert_eq!(average.unwrap().cents(), 1200);
    }

    #[test]
    fn test_base_price_without_flavors() {
        let product = pizza(None, None);
        let large = size("s2", "Large", 4000);

        let with_size = compute_base_price(&product, Some(&large), &[], PriceRule::Higher);
        assert_eq!(with_size.unwrap().cents(), 4000);

        let without_size = compute_base_price(&product, None, &[], PriceRule::Higher);
        assert_eq!(without_size.unwrap().cents(), 2500);
    }

    #[test]
    fn test_base_price_skips_unpriced_flavors() {
        let flavors = vec![
            flavor("f1", "Ghost", None, vec![]),
            flavor("f2", "B", Some(1400), vec![]),
        ];
        let price = compute_base_price(&pizza(None, Some(2)), None, &flavors, PriceRule::Average);
        assert_eq!(price.unwrap().cents(), 1400);
    }

    #[test]
    fn test_base_price_fails_when_no_flavor_resolves() {
        let flavors = vec![flavor("f1", "Ghost", None, vec![])];
        let result = compute_base_price(&pizza(None, Some(2)), None, &flavors, PriceRule::Higher);
        assert!(matches!(
            result,
            Err(CoreError::UnresolvablePrice { ref product_id }) if product_id == "pizza"
        ));
    }

    #[test]
    fn test_base_price_fails_without_size_or_base_price() {
        let mut product = pizza(None, None);
        product.price_cents = None;
        let result = compute_base_price(&product, None, &[], PriceRule::Higher);
        assert!(matches!(result, Err(CoreError::UnresolvablePrice { .. })));
    }

    #[test]
    fn test_combine_nothing() {
        assert_eq!(combine_flavor_prices(&[], PriceRule::Higher), None);
        assert_eq!(combine_flavor_prices(&[], PriceRule::Average), None);
    }

    #[test]
    fn test_unit_price_with_addons() {
        let mut product = pizza(None, None);
        product.pizza_config = None;
        product.addon_groups = vec![AddonGroup {
            id: "g1".to_string(),
            name: "Extras".to_string(),
            mode: SelectionMode::Multi,
            addons: vec![
                Addon {
                    id: "a1".to_string(),
                    name: "Bacon".to_string(),
                    price_cents: 350,
                },
                Addon {
                    id: "a2".to_string(),
                    name: "Egg".to_string(),
                    price_cents: 200,
                },
                Addon {
                    id: "a3".to_string(),
                    name: "Corn".to_string(),
                    price_cents: 100,
                },
            ],
        }];
        let medium = size("s1", "Medium", 3000);
        let selected = vec!["a1".to_string(), "a2".to_string()];

        let unit = compute_unit_price(&product, Some(&medium), &selected, &[], PriceRule::Higher)
            .unwrap();
        assert_eq!(unit.cents(), 3550);
        assert_eq!(unit.multiply_quantity(2).cents(), 7100);
    }

    #[test]
    fn test_surcharge_ignores_unknown_ids() {
        let groups = vec![AddonGroup {
            id: "g1".to_string(),
            name: "Extras".to_string(),
            mode: SelectionMode::Multi,
            addons: vec![Addon {
                id: "a1".to_string(),
                name: "Bacon".to_string(),
                price_cents: 350,
            }],
        }];
        let surcharge = compute_addons_surcharge(&groups, &["a1".to_string(), "zz".to_string()]);
        assert_eq!(surcharge.cents(), 350);
        assert_eq!(compute_addons_surcharge(&groups, &[]).cents(), 0);
    }

    #[test]
    fn test_display_name() {
        let product = pizza(None, Some(2));
        let large = size("s2", "Large", 4000);
        let flavors = vec![
            flavor("f1", "Mussarela", Some(3500), vec![]),
            flavor("f2", "Calabresa", Some(3800), vec![]),
        ];

        assert_eq!(
            compose_display_name(&product, Some(&large), &flavors),
            "Pizza (Large) [Mussarela/Calabresa]"
        );
        assert_eq!(compose_display_name(&product, Some(&large), &[]), "Pizza (Large)");
        assert_eq!(compose_display_name(&product, None, &flavors[1..]), "Pizza [Calabresa]");
        assert_eq!(compose_display_name(&product, None, &[]), "Pizza");
    }
}
