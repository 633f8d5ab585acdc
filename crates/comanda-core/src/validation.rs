//! # Validation Module
//!
//! Input validation for cashier input and catalog data.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end (TypeScript)                                       │
//! │  └── Immediate feedback (disabled buttons, counters)                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Terminal command (Rust)                                      │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: quantity, observation, catalog sanity                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Order service (external)                                     │
//! │  └── Authoritative checks on POST /orders                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use comanda_core::validation::{validate_observation, validate_quantity};
//!
//! validate_quantity(2).unwrap();
//! assert_eq!(validate_observation("  no onions ").unwrap(), "no onions");
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::Product;
use crate::{MAX_CART_LINES, MAX_ITEM_QUANTITY, MAX_OBSERVATION_LEN, MAX_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates the free-text note for the kitchen.
///
/// ## Rules
/// - Can be empty
/// - At most MAX_OBSERVATION_LEN (500) characters after trimming
///
/// ## Returns
/// The trimmed observation.
pub fn validate_observation(observation: &str) -> ValidationResult<String> {
    let observation = observation.trim();

    if observation.chars().count() > MAX_OBSERVATION_LEN {
        return Err(ValidationError::TooLong {
            field: "observation".to_string(),
            max: MAX_OBSERVATION_LEN,
        });
    }

    Ok(observation.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value for a new line item.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// Decrementing an existing line to zero is a removal and never reaches
/// this function.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Example
/// ```rust
/// use comanda_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(4200).is_ok());
/// assert!(validate_price_cents(0).is_ok());     // Free addon
/// assert!(validate_price_cents(-100).is_err());
/// assert!(validate_price_cents(i64::MAX).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates cart size before a new line is appended.
pub fn validate_cart_size(current_lines: usize) -> ValidationResult<()> {
    if current_lines >= MAX_CART_LINES {
        return Err(ValidationError::OutOfRange {
            field: "cart lines".to_string(),
            min: 0,
            max: MAX_CART_LINES as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Catalog Validators
// =============================================================================

/// Sanity-checks one catalog product.
///
/// ## Rules
/// - Name passes [`validate_product_name`]
/// - Base, size and addon prices are within 0..=MAX_PRICE_CENTS
/// - Size ids are unique within the product
/// - Addon ids are unique within their group
/// - A pizza configuration never sets a flavor limit of zero
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_name(&product.name)?;

    if let Some(cents) = product.price_cents {
        validate_price_cents(cents)?;
    }

    let mut size_ids = HashSet::new();
    for size in &product.sizes {
        validate_price_cents(size.price_cents)?;
        if !size_ids.insert(size.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "size id".to_string(),
                value: size.id.clone(),
            });
        }
    }

    for group in &product.addon_groups {
        let mut addon_ids = HashSet::new();
        for addon in &group.addons {
            validate_price_cents(addon.price_cents)?;
            if !addon_ids.insert(addon.id.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "addon id".to_string(),
                    value: addon.id.clone(),
                });
            }
        }
    }

    if let Some(config) = &product.pizza_config {
        let limits = config
            .sizes
            .values()
            .filter_map(|o| o.max_flavors)
            .chain(config.max_flavors);

        for limit in limits {
            if limit == 0 {
                return Err(ValidationError::MustBePositive {
                    field: "maxFlavors".to_string(),
                });
            }
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Addon, AddonGroup, PizzaConfig, SelectionMode, Size};
    use std::collections::BTreeMap;

    fn product() -> Product {
        Product {
            id: "p1".to_string(),
            name: "X-Burger".to_string(),
            price_cents: Some(2500),
            category_id: None,
            is_active: true,
            sizes: vec![Size {
                id: "s1".to_string(),
                name: "Double".to_string(),
                price_cents: 3200,
            }],
            addon_groups: vec![AddonGroup {
                id: "g1".to_string(),
                name: "Extras".to_string(),
                mode: SelectionMode::Multi,
                addons: vec![Addon {
                    id: "a1".to_string(),
                    name: "Cheddar".to_string(),
                    price_cents: 0,
                }],
            }],
            pizza_config: None,
        }
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Pizza Grande").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_observation() {
        assert_eq!(validate_observation("").unwrap(), "");
        assert_eq!(validate_observation(" well done ").unwrap(), "well done");
        assert!(validate_observation(&"x".repeat(MAX_OBSERVATION_LEN)).is_ok());
        assert!(validate_observation(&"x".repeat(MAX_OBSERVATION_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1099).is_ok());
        assert!(validate_price_cents(-100).is_err());
        assert!(validate_price_cents(MAX_PRICE_CENTS).is_ok());
        assert!(validate_price_cents(MAX_PRICE_CENTS + 1).is_err());
    }

    #[test]
    fn test_validate_cart_size() {
        assert!(validate_cart_size(0).is_ok());
        assert!(validate_cart_size(MAX_CART_LINES - 1).is_ok());
        assert!(validate_cart_size(MAX_CART_LINES).is_err());
    }

    #[test]
    fn test_validate_product_ok() {
        assert!(validate_product(&product()).is_ok());
    }

    #[test]
    fn test_validate_product_rejects_negative_prices() {
        let mut p = product();
        p.sizes[0].price_cents = -1;
        assert!(validate_product(&p).is_err());

        let mut p = product();
        p.addon_groups[0].addons[0].price_cents = -50;
        assert!(validate_product(&p).is_err());
    }

    #[test]
    fn test_validate_product_rejects_duplicate_ids() {
        let mut p = product();
        p.sizes.push(p.sizes[0].clone());
        assert!(matches!(
            validate_product(&p),
            Err(ValidationError::Duplicate { .. })
        ));

        let mut p = product();
        let dup = p.addon_groups[0].addons[0].clone();
        p.addon_groups[0].addons.push(dup);
        assert!(matches!(
            validate_product(&p),
            Err(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_validate_product_rejects_zero_flavor_limit() {
        let mut p = product();
        p.pizza_config = Some(PizzaConfig {
            flavor_category_id: "cat".to_string(),
            price_rule: None,
            max_flavors: Some(0),
            sizes: BTreeMap::new(),
        });
        assert!(matches!(
            validate_product(&p),
            Err(ValidationError::MustBePositive { .. })
        ));
    }
}
