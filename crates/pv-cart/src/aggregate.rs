use pv_api_types::{CartLineItem, CartSnapshotResponse, Cents};
use pv_catalog::Catalog;
use pv_selection::SelectionStore;
use serde::Serialize;

/// Cart totals derived from a selection. Never stored; recompute on read.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct CartSnapshot {
    pub selected_count: usize,
    pub total_price: Cents,
    pub is_above_minimum: bool,
    pub amount_to_minimum: Cents,
}

impl CartSnapshot {
    pub fn to_response(&self) -> CartSnapshotResponse {
        CartSnapshotResponse {
            selected_count: self.selected_count,
            total_price: self.total_price,
            is_above_minimum: self.is_above_minimum,
            amount_to_minimum: self.amount_to_minimum,
        }
    }
}

/// Derive the cart from `selection`, ignoring ids the catalog does not know.
///
/// Walks the selection rather than the catalog, so cost follows the number of
/// selected ids.
pub fn snapshot(catalog: &Catalog, selection: &SelectionStore) -> CartSnapshot {
    let prices: Vec<Cents> = selection
        .iter()
        .filter_map(|id| catalog.price_of(id))
        .collect();
    let selected_count = prices.len();
    let total_price: Cents = prices.into_iter().sum();

    let minimum = catalog.pricing().minimum_cart;
    CartSnapshot {
        selected_count,
        total_price,
        is_above_minimum: total_price >= minimum,
        amount_to_minimum: minimum.saturating_sub(total_price),
    }
}

/// Selected assets known to the catalog, in catalog order.
pub fn line_items(catalog: &Catalog, selection: &SelectionStore) -> Vec<CartLineItem> {
    let pricing = catalog.pricing();
    let mut selected: Vec<_> = selection
        .iter()
        .filter_map(|id| Some((catalog.position(id)?, catalog.get(id)?)))
        .collect();
    selected.sort_unstable_by_key(|(position, _)| *position);

    selected
        .into_iter()
        .map(|(_, asset)| CartLineItem {
            asset_id: asset.id.clone(),
            name: asset.name.clone(),
            category: asset.category.clone(),
            emoji: asset.emoji.clone(),
            price: asset.effective_price(pricing),
        })
        .collect()
}
