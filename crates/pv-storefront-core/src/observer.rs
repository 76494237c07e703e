use pv_api_types::CartViewState;
use pv_cart::CartSnapshot;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    ToggleAsset,
    TogglePack,
    Clear,
    Open,
    Close,
}

/// Committed cart state after one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartChange {
    pub action: CartAction,
    pub snapshot: CartSnapshot,
    pub view: CartViewState,
}

/// Notified after every committed cart action, never mid-mutation.
pub trait CartObserver: Send + Sync {
    fn on_cart_changed(&self, change: &CartChange);
}

#[derive(Debug, Default)]
pub struct TracingObserver;

impl CartObserver for TracingObserver {
    fn on_cart_changed(&self, change: &CartChange) {
        debug!(
            action = ?change.action,
            view = ?change.view,
            selected = change.snapshot.selected_count,
            total = %change.snapshot.total_price,
            checkout_ready = change.snapshot.is_above_minimum,
            "cart changed"
        );
    }
}
