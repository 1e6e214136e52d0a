//! # Validation Module
//!
//! Business rule checks for data crossing the collaborator boundary.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Points                                  │
//! │                                                                         │
//! │  Catalog service ──► fetchCategories / fetchItems                      │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                  validate_categories / validate_catalog                 │
//! │                        │  fail → malformed response, cache untouched    │
//! │                        ▼                                                │
//! │                  CatalogCache                                           │
//! │                                                                         │
//! │  CartSnapshot ──► bill_lines() ──► validate_bill_lines ──► createBill  │
//! │                                     fail → nothing is sent              │
//! │                                                                         │
//! │  ItemDraft ──► validate_item_draft ──► createItem / updateItem         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::{BillLine, CatalogItem, Category, ItemDraft};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates a display name (category or item).
///
/// ## Example
/// ```rust
/// use till_core::validation::validate_name;
///
/// assert!(validate_name("item name", "Tea").is_ok());
/// assert!(validate_name("item name", "   ").is_err());
/// ```
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates one catalog item.
///
/// ## Rules
/// - Name must not be blank
/// - Price must not be negative (zero is allowed)
pub fn validate_catalog_item(item: &CatalogItem) -> ValidationResult<()> {
    validate_name("item name", &item.name)?;

    if item.price.is_negative() {
        return Err(ValidationError::Negative {
            field: format!("price of item {}", item.id),
        });
    }

    Ok(())
}

/// Validates an item before it is sent for creation or update.
///
/// ## Rules
/// - Name must not be blank
/// - Price must not be negative
/// - A category is required (ids start at 1)
pub fn validate_item_draft(draft: &ItemDraft) -> ValidationResult<()> {
    validate_name("item name", &draft.name)?;

    if draft.price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    if draft.category_id < 1 {
        return Err(ValidationError::BelowMinimum {
            field: "category_id".to_string(),
            min: 1,
            actual: draft.category_id,
        });
    }

    Ok(())
}

/// Validates a whole item list as returned by the catalog service.
pub fn validate_catalog(items: &[CatalogItem]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        validate_catalog_item(item)?;
        if !seen.insert(item.id) {
            return Err(ValidationError::Duplicate {
                field: "item id".to_string(),
                value: item.id.to_string(),
            });
        }
    }
    Ok(())
}

/// Validates a category list.
pub fn validate_categories(categories: &[Category]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(categories.len());
    for category in categories {
        validate_name("category name", &category.name)?;
        if !seen.insert(category.id) {
            return Err(ValidationError::Duplicate {
                field: "category id".to_string(),
                value: category.id.to_string(),
            });
        }
    }
    Ok(())
}

// =============================================================================
// Bill Validators
// =============================================================================

/// Validates one bill request entry.
///
/// ## Rules
/// - Quantity must be at least 1 (the billing service rejects less)
/// - Unit price must not be negative
pub fn validate_bill_line(line: &BillLine) -> ValidationResult<()> {
    if line.quantity < 1 {
        return Err(ValidationError::BelowMinimum {
            field: "quantity".to_string(),
            min: 1,
            actual: line.quantity,
        });
    }

    if line.unit_price.is_negative() {
        return Err(ValidationError::Negative {
            field: "unit_price".to_string(),
        });
    }

    Ok(())
}

/// Validates a bill request: non-empty, every line valid.
pub fn validate_bill_lines(lines: &[BillLine]) -> ValidationResult<()> {
    if lines.is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }
    lines.iter().try_for_each(validate_bill_line)
}

// =============================================================================
// Unit Tests
// =============================================================================
