//! Category pack selection.
//!
//! A pack is whatever ids the caller currently shows for a category. A pack
//! that is only partly selected counts as "off": toggling it fills in the
//! missing members instead of dropping the selected ones.

use crate::store::SelectionStore;
use pv_api_types::{AssetId, PackButton};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackToggle {
    /// The pack was not fully selected; this many ids were added.
    Selected(usize),
    /// The pack was fully selected; this many ids were removed.
    Deselected(usize),
    /// Nothing visible, nothing to do.
    Empty,
}

/// True iff every visible id is selected. An empty view is never a pack.
pub fn is_pack_fully_selected(store: &SelectionStore, visible: &[AssetId]) -> bool {
    !visible.is_empty() && visible.iter().all(|id| store.is_selected(id))
}

pub fn toggle_pack(store: &mut SelectionStore, visible: &[AssetId]) -> PackToggle {
    if visible.is_empty() {
        return PackToggle::Empty;
    }

    if is_pack_fully_selected(store, visible) {
        let removed = store.deselect_many(visible);
        info!(pack_size = visible.len(), removed, "pack removed");
        PackToggle::Deselected(removed)
    } else {
        let added = store.select_many(visible);
        info!(pack_size = visible.len(), added, "pack added");
        PackToggle::Selected(added)
    }
}

/// Label for the pack action; `None` hides the button for an empty view.
pub fn pack_button(store: &SelectionStore, visible: &[AssetId]) -> Option<PackButton> {
    if visible.is_empty() {
        None
    } else if is_pack_fully_selected(store, visible) {
        Some(PackButton::RemovePack)
    } else {
        Some(PackButton::AddAll)
    }
}
