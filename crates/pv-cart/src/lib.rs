//! Cart derivation and the cart panel state machine.

pub mod aggregate;
pub mod view;

pub use aggregate::{CartSnapshot, line_items, snapshot};
pub use view::{CartDisplay, CartView};
