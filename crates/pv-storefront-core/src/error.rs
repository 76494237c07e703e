use pv_api_types::{CategoryId, Cents};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorefrontError {
    #[error("unknown category: {0}")]
    UnknownCategory(CategoryId),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,
    #[error("cart total {total} is below the {minimum} minimum; add {shortfall} more")]
    BelowMinimum {
        total: Cents,
        minimum: Cents,
        shortfall: Cents,
    },
}
