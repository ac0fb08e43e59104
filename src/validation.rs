use rust_decimal::Decimal;

use crate::error::{AppError, AppResult};
use crate::models::{ProductFields, ProductPayload};

// =============================================================================
// Validation Constants
// =============================================================================

/// Maximum length for product names and categories.
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum length for product descriptions.
pub const MAX_DESCRIPTION_LENGTH: usize = 4096;

/// Field names as they appear on the wire, in the order they are reported.
const REQUIRED_FIELDS: [&str; 5] = ["name", "description", "price", "category", "inStock"];

/// Validate a create/replace payload into a complete set of product fields.
///
/// Rules:
/// - `name`, `description`, `category` must be present and not blank
/// - `price` must be present and not negative (zero is allowed)
/// - `inStock` must be present; `false` is a valid value
/// - text fields are trimmed and length-capped
///
/// Every missing field is reported at once, e.g.
/// `Missing required field(s): price, inStock`.
pub fn validate_product_payload(payload: ProductPayload) -> AppResult<ProductFields> {
    let name = present_text(payload.name);
    let description = present_text(payload.description);
    let category = present_text(payload.category);

    let present = [
        name.is_some(),
        description.is_some(),
        payload.price.is_some(),
        category.is_some(),
        payload.in_stock.is_some(),
    ];
    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .zip(present)
        .filter(|(_, ok)| !ok)
        .map(|(field, _)| *field)
        .collect();

    let (Some(name), Some(description), Some(price), Some(category), Some(in_stock)) = (
        name,
        description,
        payload.price,
        category,
        payload.in_stock,
    ) else {
        return Err(AppError::BadRequest(format!(
            "Missing required field(s): {}",
            missing.join(", ")
        )));
    };

    validate_length(&name, "name", MAX_NAME_LENGTH)?;
    validate_length(&description, "description", MAX_DESCRIPTION_LENGTH)?;
    validate_length(&category, "category", MAX_NAME_LENGTH)?;
    validate_price(price)?;

    Ok(ProductFields {
        name,
        description,
        price,
        category,
        in_stock,
    })
}

/// Validate that a price is not negative.
pub fn validate_price(price: Decimal) -> AppResult<()> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(AppError::BadRequest(
            "price must not be negative".to_string(),
        ));
    }
    Ok(())
}

/// Trimmed text, or `None` when absent or blank.
fn present_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_length(value: &str, field: &str, max: usize) -> AppResult<()> {
    if value.chars().count() > max {
        return Err(AppError::BadRequest(format!(
            "{field} cannot exceed {max} characters"
        )));
    }
    Ok(())
}
