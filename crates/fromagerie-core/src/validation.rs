//! # Input Validation
//!
//! Small, pure checks run at the edge before any business logic.
//! Each returns `Result<(), ValidationError>` so call sites compose
//! them with `?`.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: request parsing      (HTTP layer, out of scope here)      │
//! │  Layer 2: field validation     (this file)                          │
//! │  Layer 3: business rules       (pricing, access)                    │
//! │  Layer 4: database constraints (CHECK / FK / UNIQUE)                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::MAX_ITEM_QUANTITY;

/// Maximum length for product and cheese-type names.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum length for usernames.
pub const MAX_USERNAME_LENGTH: usize = 150;

/// Maximum weight a single catalog item may declare, in grams (50 kg).
pub const MAX_WEIGHT_GRAMS: i64 = 50_000;

/// Maximum price a single catalog item may carry, in cents (1,000,000.00).
///
/// Keeps `MAX_PRICE_CENTS * MAX_ITEM_QUANTITY` far inside i64 range, so
/// line totals never overflow.
pub const MAX_PRICE_CENTS: i64 = 100_000_000;

/// Validates a line-item quantity.
///
/// Quantities must be strictly positive and no larger than
/// [`MAX_ITEM_QUANTITY`]. Zero and negative quantities are rejected
/// explicitly rather than priced at 0.
pub fn validate_quantity(quantity: i64) -> Result<(), ValidationError> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    if quantity > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }
    Ok(())
}

/// Validates a price expressed in cents. Zero is allowed (free samples);
/// negatives and anything past [`MAX_PRICE_CENTS`] are not.
pub fn validate_price_cents(cents: i64) -> Result<(), ValidationError> {
    if cents < 0 || cents > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }
    Ok(())
}

/// Validates a product or cheese-type name: non-empty after trimming,
/// at most [`MAX_NAME_LENGTH`] characters.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }
    Ok(())
}

/// Validates a username: non-empty, at most [`MAX_USERNAME_LENGTH`]
/// characters, limited to letters, digits and `@ . + - _`.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max: MAX_USERNAME_LENGTH,
        });
    }
    let valid = username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'));
    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "username".to_string(),
            reason: "only letters, digits and @.+-_ are allowed".to_string(),
        });
    }
    Ok(())
}

/// Validates an item weight in grams.
pub fn validate_weight_grams(grams: i64) -> Result<(), ValidationError> {
    if grams <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "weight".to_string(),
        });
    }
    if grams > MAX_WEIGHT_GRAMS {
        return Err(ValidationError::OutOfRange {
            field: "weight".to_string(),
            min: 1,
            max: MAX_WEIGHT_GRAMS,
        });
    }
    Ok(())
}

/// Validates that a string looks like a UUID (hyphenated hex form).
pub fn validate_uuid(field: &str, value: &str) -> Result<(), ValidationError> {
    if uuid::Uuid::parse_str(value).is_err() {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "not a valid UUID".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_bounds() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());

        assert!(matches!(
            validate_quantity(0),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            validate_quantity(-7),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            validate_quantity(MAX_ITEM_QUANTITY + 1),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_price_bounds() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(10_000).is_ok());
        assert!(validate_price_cents(MAX_PRICE_CENTS).is_ok());

        assert!(validate_price_cents(-1).is_err());
        assert!(matches!(
            validate_price_cents(MAX_PRICE_CENTS + 1),
            Err(ValidationError::OutOfRange { .. })
        ));
        // The caps together keep the largest possible line total well
        // inside i64 range.
        assert!(MAX_PRICE_CENTS.checked_mul(crate::MAX_ITEM_QUANTITY).is_some());
    }

    #[test]
    fn test_name_rules() {
        assert!(validate_name("Brynza").is_ok());
        assert!(validate_name("  ").is_err());
        assert!(validate_name("").is_err());
        assert!(validate_name(&"x".repeat(MAX_NAME_LENGTH)).is_ok());
        assert!(validate_name(&"x".repeat(MAX_NAME_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_username_rules() {
        assert!(validate_username("rivka").is_ok());
        assert!(validate_username("sales.manager+1@fromagerie").is_ok());
        assert!(validate_username("").is_err());
        assert!(matches!(
            validate_username("no spaces"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_weight_rules() {
        assert!(validate_weight_grams(250).is_ok());
        assert!(validate_weight_grams(0).is_err());
        assert!(validate_weight_grams(MAX_WEIGHT_GRAMS + 1).is_err());
    }

    #[test]
    fn test_uuid_check() {
        let id = uuid::Uuid::new_v4().to_string();
        assert!(validate_uuid("product_id", &id).is_ok());
        assert!(validate_uuid("product_id", "not-a-uuid").is_err());
    }
}
