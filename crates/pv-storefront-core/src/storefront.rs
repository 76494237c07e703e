use crate::error::{CheckoutError, StorefrontError};
use crate::observer::{CartAction, CartChange, CartObserver};
use pv_api_types::{
    AssetId, AssetView, CartLineItem, CartResponse, CartViewState, CategoryId, Cents,
    CheckoutResponse, PackButton, ViewResponse,
};
use pv_cart::{CartDisplay, CartSnapshot, CartView};
use pv_catalog::Catalog;
use pv_selection::{
    DEFAULT_PAGE_SIZE, PackToggle, PaginationWindow, SelectionStore, is_pack_fully_selected,
    pack_button, toggle_pack,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Which slice of the catalog the visitor is browsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ViewFilter {
    #[default]
    All,
    Category(CategoryId),
}

impl ViewFilter {
    pub fn category(&self) -> Option<&CategoryId> {
        match self {
            ViewFilter::All => None,
            ViewFilter::Category(id) => Some(id),
        }
    }
}

impl From<Option<CategoryId>> for ViewFilter {
    fn from(category: Option<CategoryId>) -> Self {
        category.map_or(ViewFilter::All, ViewFilter::Category)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub items: Vec<CartLineItem>,
    pub item_count: usize,
    pub total_price: Cents,
}

impl OrderSummary {
    pub fn to_response(&self) -> CheckoutResponse {
        CheckoutResponse {
            item_count: self.item_count,
            total_price: self.total_price,
            items: self.items.clone(),
        }
    }
}

pub struct Storefront {
    catalog: Arc<Catalog>,
    selection: SelectionStore,
    active: ViewFilter,
    // One window per view, kept when the visitor switches away and back.
    windows: HashMap<ViewFilter, PaginationWindow>,
    // Starting window for a view the visitor has not opened yet.
    fresh_window: PaginationWindow,
    cart_view: CartView,
    observers: Vec<Arc<dyn CartObserver>>,
}

impl Storefront {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_page_size(catalog, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(catalog: Arc<Catalog>, page_size: usize) -> Self {
        Self {
            catalog,
            selection: SelectionStore::new(),
            active: ViewFilter::All,
            windows: HashMap::new(),
            fresh_window: PaginationWindow::new(page_size),
            cart_view: CartView::new(),
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Arc<dyn CartObserver>) {
        self.observers.push(observer);
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Items revealed at first and per "load more"; never below one.
    pub fn page_size(&self) -> usize {
        self.fresh_window.page_size()
    }

    // ── Views & pagination ──

    pub fn active_view(&self) -> &ViewFilter {
        &self.active
    }

    /// Switch the browsed slice. The selection is never touched.
    pub fn select_view(&mut self, filter: ViewFilter) -> Result<(), StorefrontError> {
        self.ensure_category(filter.category())?;
        self.windows
            .entry(filter.clone())
            .or_insert(self.fresh_window);
        debug!(view = ?filter, "view selected");
        self.active = filter;
        Ok(())
    }

    /// Reveal one more page of the active view. Returns how many items
    /// became visible.
    pub fn load_more(&mut self) -> usize {
        let view_len = self.view_len(&self.active);
        let window = self
            .windows
            .entry(self.active.clone())
            .or_insert(self.fresh_window);
        let revealed = window.load_more(view_len);
        debug!(
            view = ?self.active,
            revealed,
            visible = window.visible_count(),
            "load more"
        );
        revealed
    }

    pub fn visible_ids(&self) -> Vec<AssetId> {
        self.revealed_ids(&self.active)
    }

    pub fn visible_count(&self) -> usize {
        self.window(&self.active)
            .revealed_len(self.view_len(&self.active))
    }

    pub fn has_more(&self) -> bool {
        self.window(&self.active)
            .has_more(self.view_len(&self.active))
    }

    /// Revealed assets of the active view with their selection state.
    pub fn view_page(&self) -> ViewResponse {
        let pricing = self.catalog.pricing();
        let assets = self
            .visible_ids()
            .iter()
            .filter_map(|id| self.catalog.get(id))
            .map(|asset| AssetView {
                asset_id: asset.id.clone(),
                name: asset.name.clone(),
                category: asset.category.clone(),
                emoji: asset.emoji.clone(),
                price: asset.effective_price(pricing),
                selected: self.selection.is_selected(&asset.id),
            })
            .collect();

        ViewResponse {
            category: self.active.category().cloned(),
            visible_count: self.visible_count(),
            total_count: self.view_len(&self.active),
            has_more: self.has_more(),
            pack_button: self
                .active
                .category()
                .and_then(|category| self.pack_button(category)),
            assets,
        }
    }

    fn ensure_category(&self, category: Option<&CategoryId>) -> Result<(), StorefrontError> {
        match category {
            Some(id) if self.catalog.category(id).is_none() => {
                Err(StorefrontError::UnknownCategory(id.clone()))
            }
            _ => Ok(()),
        }
    }

    fn window(&self, filter: &ViewFilter) -> PaginationWindow {
        self.windows
            .get(filter)
            .copied()
            .unwrap_or(self.fresh_window)
    }

    fn view_len(&self, filter: &ViewFilter) -> usize {
        match filter {
            ViewFilter::All => self.catalog.len(),
            ViewFilter::Category(id) => self.catalog.category_len(id),
        }
    }

    fn revealed_ids(&self, filter: &ViewFilter) -> Vec<AssetId> {
        let mut ids = match filter {
            ViewFilter::All => self.catalog.asset_ids(),
            ViewFilter::Category(id) => self.catalog.category_asset_ids(id),
        };
        ids.truncate(self.window(filter).revealed_len(ids.len()));
        ids
    }

    // ── Selection ──

    /// Returns whether the asset is selected afterwards.
    pub fn toggle_asset(&mut self, id: &AssetId) -> bool {
        if !self.catalog.contains(id) {
            debug!(asset = %id, "toggling asset unknown to the catalog");
        }
        let selected = self.selection.toggle(id);
        self.commit(CartAction::ToggleAsset);
        selected
    }

    pub fn is_asset_selected(&self, id: &AssetId) -> bool {
        self.selection.is_selected(id)
    }

    /// "Add All" / "Remove Pack" over the category's revealed assets.
    pub fn toggle_pack(&mut self, category: &CategoryId) -> Result<PackToggle, StorefrontError> {
        self.ensure_category(Some(category))?;
        let visible = self.revealed_ids(&ViewFilter::Category(category.clone()));
        let outcome = toggle_pack(&mut self.selection, &visible);
        if outcome != PackToggle::Empty {
            self.commit(CartAction::TogglePack);
        }
        info!(category = %category, outcome = ?outcome, "pack toggled");
        Ok(outcome)
    }

    pub fn is_pack_fully_selected(&self, category: &CategoryId) -> bool {
        let visible = self.revealed_ids(&ViewFilter::Category(category.clone()));
        is_pack_fully_selected(&self.selection, &visible)
    }

    pub fn pack_button(&self, category: &CategoryId) -> Option<PackButton> {
        let visible = self.revealed_ids(&ViewFilter::Category(category.clone()));
        pack_button(&self.selection, &visible)
    }

    // ── Cart ──

    pub fn cart_snapshot(&self) -> CartSnapshot {
        pv_cart::snapshot(&self.catalog, &self.selection)
    }

    pub fn cart_view_state(&self) -> CartViewState {
        self.cart_view.current()
    }

    pub fn cart_display(&self) -> CartDisplay {
        CartDisplay::render(self.cart_view.current(), self.cart_snapshot())
    }

    pub fn cart_items(&self) -> Vec<CartLineItem> {
        pv_cart::line_items(&self.catalog, &self.selection)
    }

    pub fn cart_response(&self) -> CartResponse {
        let display = self.cart_display();
        CartResponse {
            state: display.state,
            snapshot: display.snapshot.to_response(),
            checkout_enabled: display.checkout_enabled,
            warning: display.warning,
            items: self.cart_items(),
        }
    }

    /// Returns how many ids were dropped.
    pub fn clear_cart(&mut self) -> usize {
        let dropped = self.selection.clear();
        self.commit(CartAction::Clear);
        dropped
    }

    /// Returns whether the panel is expanded afterwards.
    pub fn open_cart(&mut self) -> bool {
        let expanded = self.cart_view.open();
        self.commit(CartAction::Open);
        expanded
    }

    pub fn close_cart(&mut self) {
        self.cart_view.close();
        self.commit(CartAction::Close);
    }

    /// Summarize the order if the cart clears the minimum. Payment is not
    /// handled here and the selection is left as is.
    pub fn checkout(&self) -> Result<OrderSummary, CheckoutError> {
        let snapshot = self.cart_snapshot();
        if snapshot.selected_count == 0 {
            warn!("checkout refused: cart is empty");
            return Err(CheckoutError::EmptyCart);
        }
        if !snapshot.is_above_minimum {
            warn!(
                total = %snapshot.total_price,
                shortfall = %snapshot.amount_to_minimum,
                "checkout refused: below minimum"
            );
            return Err(CheckoutError::BelowMinimum {
                total: snapshot.total_price,
                minimum: self.catalog.pricing().minimum_cart,
                shortfall: snapshot.amount_to_minimum,
            });
        }

        info!(
            items = snapshot.selected_count,
            total = %snapshot.total_price,
            "checkout summary prepared"
        );
        Ok(OrderSummary {
            items: self.cart_items(),
            item_count: snapshot.selected_count,
            total_price: snapshot.total_price,
        })
    }

    fn commit(&mut self, action: CartAction) -> CartSnapshot {
        let snapshot = self.cart_snapshot();
        let view = self.cart_view.sync(snapshot.selected_count);
        let change = CartChange {
            action,
            snapshot,
            view,
        };
        for observer in &self.observers {
            observer.on_cart_changed(&change);
        }
        snapshot
    }
}
