//! Cart panel state machine.
//!
//! States: `Hidden` → `CollapsedBadge` → `Expanded`.
//!
//! - selection goes from empty to non-empty: `Hidden` → `CollapsedBadge`
//! - selection becomes empty: any state → `Hidden`
//! - open: `CollapsedBadge` → `Expanded`
//! - close: `Expanded` → `CollapsedBadge`
//!
//! Checkout eligibility is not a state. `CartDisplay` reads it off the
//! snapshot every time it is rendered.

use crate::aggregate::CartSnapshot;
use pv_api_types::CartViewState;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartView {
    state: CartViewState,
}

impl Default for CartView {
    fn default() -> Self {
        Self {
            state: CartViewState::Hidden,
        }
    }
}

impl CartView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> CartViewState {
        self.state
    }

    fn set_state(&mut self, target: CartViewState) {
        if self.state != target {
            debug!(from = ?self.state, to = ?target, "cart view transition");
            self.state = target;
        }
    }

    /// Apply the count-driven transitions after a selection change.
    pub fn sync(&mut self, selected_count: usize) -> CartViewState {
        match (self.state, selected_count) {
            (_, 0) => self.set_state(CartViewState::Hidden),
            (CartViewState::Hidden, _) => self.set_state(CartViewState::CollapsedBadge),
            _ => {}
        }
        self.state
    }

    /// Returns whether the panel is expanded afterwards. A hidden cart has
    /// nothing to open.
    pub fn open(&mut self) -> bool {
        if self.state == CartViewState::CollapsedBadge {
            self.set_state(CartViewState::Expanded);
        }
        self.state == CartViewState::Expanded
    }

    pub fn close(&mut self) {
        if self.state == CartViewState::Expanded {
            self.set_state(CartViewState::CollapsedBadge);
        }
    }
}

/// Everything the presentation layer needs to draw the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartDisplay {
    pub state: CartViewState,
    pub snapshot: CartSnapshot,
    /// Count shown on the collapsed badge.
    pub badge_count: Option<usize>,
    pub checkout_enabled: bool,
    pub warning: Option<String>,
}

impl CartDisplay {
    pub fn render(state: CartViewState, snapshot: CartSnapshot) -> Self {
        let expanded = state == CartViewState::Expanded;
        let badge_count = match state {
            CartViewState::Hidden => None,
            _ => Some(snapshot.selected_count),
        };
        let warning = (expanded && !snapshot.is_above_minimum)
            .then(|| format!("Add {} more to checkout", snapshot.amount_to_minimum));

        Self {
            state,
            snapshot,
            badge_count,
            checkout_enabled: expanded && snapshot.is_above_minimum,
            warning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pv_api_types::Cents;

    fn snap(selected_count: usize, total: u64) -> CartSnapshot {
        let minimum = Cents(699);
        CartSnapshot {
            selected_count,
            total_price: Cents(total),
            is_above_minimum: Cents(total) >= minimum,
            amount_to_minimum: minimum.saturating_sub(Cents(total)),
        }
    }

    #[test]
    fn starts_hidden_and_stays_hidden_when_empty() {
        let mut view = CartView::new();
        assert_eq!(view.current(), CartViewState::Hidden);
        assert_eq!(view.sync(0), CartViewState::Hidden);
        assert!(!view.open());
        assert_eq!(view.current(), CartViewState::Hidden);
    }

    #[test]
    fn first_selection_shows_badge() {
        let mut view = CartView::new();
        assert_eq!(view.sync(3), CartViewState::CollapsedBadge);
        assert_eq!(view.sync(4), CartViewState::CollapsedBadge);
    }

    #[test]
    fn open_close_cycle() {
        let mut view = CartView::new();
        view.sync(1);
        assert!(view.open());
        assert_eq!(view.current(), CartViewState::Expanded);
        assert!(view.open());

        view.sync(2);
        assert_eq!(view.current(), CartViewState::Expanded);

        view.close();
        assert_eq!(view.current(), CartViewState::CollapsedBadge);
        view.close();
        assert_eq!(view.current(), CartViewState::CollapsedBadge);
    }

    #[test]
    fn emptying_hides_from_any_state() {
        let mut view = CartView::new();
        view.sync(5);
        view.open();
        assert_eq!(view.sync(0), CartViewState::Hidden);

        view.sync(1);
        assert_eq!(view.sync(0), CartViewState::Hidden);
    }

    #[test]
    fn expanded_below_minimum_warns_and_blocks_checkout() {
        let display = CartDisplay::render(CartViewState::Expanded, snap(5, 130));
        assert!(!display.checkout_enabled);
        assert_eq!(display.warning.as_deref(), Some("Add $5.69 more to checkout"));
        assert_eq!(display.badge_count, Some(5));
    }

    #[test]
    fn expanded_above_minimum_enables_checkout() {
        let display = CartDisplay::render(CartViewState::Expanded, snap(27, 702));
        assert!(display.checkout_enabled);
        assert!(display.warning.is_none());
    }

    #[test]
    fn collapsed_badge_never_warns() {
        let display = CartDisplay::render(CartViewState::CollapsedBadge, snap(5, 130));
        assert!(!display.checkout_enabled);
        assert!(display.warning.is_none());
        assert_eq!(display.badge_count, Some(5));

        let hidden = CartDisplay::render(CartViewState::Hidden, snap(0, 0));
        assert_eq!(hidden.badge_count, None);
    }
}
