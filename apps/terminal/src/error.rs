//! # API Error Type
//!
//! Unified error type for terminal commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Comanda                                │
//! │                                                                         │
//! │  Front end                   Rust host                                  │
//! │  ─────────                   ─────────                                  │
//! │                                                                         │
//! │  toggleFlavor('f3')                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Lookup failed? ─── CoreError::ProductNotFound ────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Bad input? ─────── CoreError::Validation ───── ApiError ──────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "NOT_FOUND", "message": "Product not found: f3" }            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Hitting the flavor limit is not an error at this layer: the selection
//! commands report it as `limitReached` on the draft instead.

use serde::Serialize;
use tracing::error;

use comanda_core::CoreError;

use crate::config::ConfigError;

/// API error returned from terminal commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "PRICING_ERROR",
///   "message": "No price can be resolved for product: pizza-grande"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product, size, addon, flavor, line or draft not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Flavor limit reached
    SelectionLimit,

    /// Product has no resolvable price
    PricingError,

    /// Cart operation failed
    CartError,

    /// Terminal configuration is unusable
    ConfigError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// No product is open in the options modal.
    pub fn no_draft() -> Self {
        ApiError::new(ErrorCode::NotFound, "No product is being configured")
    }
}

/// Converts engine errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::ProductNotFound(_)
            | CoreError::SizeNotFound { .. }
            | CoreError::AddonNotFound { .. }
            | CoreError::LineNotFound(_) => ErrorCode::NotFound,
            CoreError::NotAFlavor { .. } | CoreError::Validation(_) => ErrorCode::ValidationError,
            CoreError::SelectionLimitReached { .. } => ErrorCode::SelectionLimit,
            CoreError::UnresolvablePrice { .. } => ErrorCode::PricingError,
            CoreError::CartTooLarge { .. }
            | CoreError::QuantityTooLarge { .. }
            | CoreError::EmptyCart => ErrorCode::CartError,
            CoreError::InvalidCatalog(e) => {
                error!(error = %e, "Catalog payload rejected");
                ErrorCode::Internal
            }
        };

        ApiError::new(code, err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================
