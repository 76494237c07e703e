//! Selection state for the storefront.
//!
//! `SelectionStore` owns the set of selected asset ids, `pack` implements the
//! category-wide "Add All" / "Remove Pack" action on top of it, and
//! `PaginationWindow` tracks how much of a view has been revealed. None of
//! these know about prices or the cart view.

pub mod pack;
pub mod store;
pub mod window;

pub use pack::{PackToggle, is_pack_fully_selected, pack_button, toggle_pack};
pub use store::SelectionStore;
pub use window::{DEFAULT_PAGE_SIZE, PaginationWindow};
