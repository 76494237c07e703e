//! Storefront session: selection, packs, pagination and the cart, wired
//! behind one owned struct.
//!
//! Every action mutates first, then recomputes the cart snapshot, syncs the
//! cart panel and notifies observers, all inside the same `&mut self` call.

mod error;
mod observer;
mod storefront;

pub use error::{CheckoutError, StorefrontError};
pub use observer::{CartAction, CartChange, CartObserver, TracingObserver};
pub use storefront::{OrderSummary, Storefront, ViewFilter};

pub use pv_cart::{CartDisplay, CartSnapshot};
pub use pv_selection::{DEFAULT_PAGE_SIZE, PackToggle};
