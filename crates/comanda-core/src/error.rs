//! # Error Types
//!
//! Domain-specific error types for comanda-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  comanda-core errors (this file)                                       │
//! │  ├── CoreError        - Selection, pricing and cart failures           │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  comanda-terminal errors (app)                                         │
//! │  ├── ConfigError      - Configuration loading failures                 │
//! │  └── ApiError         - What the front end sees (serialized)           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Front end              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Severity
//! Only [`CoreError::SelectionLimitReached`] is expected during normal use;
//! it is feedback for the cashier, not a failure. Everything else rejects the
//! single operation that raised it.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not in the catalog snapshot.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Size id does not belong to the product being configured.
    #[error("Size {size_id} not found on product {product_id}")]
    SizeNotFound { product_id: String, size_id: String },

    /// Addon id is not in any of the product's addon groups.
    #[error("Addon {addon_id} not found on product {product_id}")]
    AddonNotFound {
        product_id: String,
        addon_id: String,
    },

    /// Candidate is not a flavor option of the pizza product.
    ///
    /// ## When This Occurs
    /// - Product has no pizza configuration
    /// - Candidate belongs to a different category than `flavor_category_id`
    #[error("{flavor_id} is not a flavor option of product {product_id}")]
    NotAFlavor {
        product_id: String,
        flavor_id: String,
    },

    /// Flavor selection is already full.
    ///
    /// ## User Workflow
    /// ```text
    /// Pizza (Large), max 2 flavors, selected [Mussarela, Calabresa]
    ///      │
    ///      ▼
    /// Tap "Portuguesa"
    ///      │
    ///      ▼
    /// SelectionLimitReached { max: 2 }   selection unchanged
    ///      │
    ///      ▼
    /// UI shows: "Choose at most 2 flavors"
    /// ```
    #[error("At most {max} flavors can be selected")]
    SelectionLimitReached { max: u32 },

    /// No price could be resolved for the configured product.
    ///
    /// ## When This Occurs
    /// - Flavors are selected but none of them has a matching size price or a
    ///   base price (catalog data inconsistency)
    /// - Product has neither a selected size nor a base price
    #[error("Price could not be resolved for product {product_id}")]
    UnresolvablePrice { product_id: String },

    /// Cart line id is not in the cart.
    #[error("Cart line not found: {0}")]
    LineNotFound(String),

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Checkout was attempted with nothing in the cart.
    #[error("Cannot create an order from an empty cart")]
    EmptyCart,

    /// Catalog payload could not be parsed.
    #[error("Invalid catalog data: {0}")]
    InvalidCatalog(#[from] serde_json::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns true for conditions that are user feedback rather than failures.
    pub fn is_soft(&self) -> bool {
        matches!(self, CoreError::SelectionLimitReached { .. })
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when input (user or catalog) doesn't meet requirements.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Duplicate value (e.g., two sizes sharing an id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::SelectionLimitReached { max: 2 };
        assert_eq!(err.to_string(), "At most 2 flavors can be selected");

        let err = CoreError::UnresolvablePrice {
            product_id: "pizza-1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Price could not be resolved for product pizza-1"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: 999,
        };
        assert_eq!(err.to_string(), "quantity must be between 1 and 999");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_only_limit_reached_is_soft() {
        assert!(CoreError::SelectionLimitReached { max: 1 }.is_soft());
        assert!(!CoreError::EmptyCart.is_soft());
        assert!(!CoreError::UnresolvablePrice {
            product_id: "p".to_string()
        }
        .is_soft());
    }
}
