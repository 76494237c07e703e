use pv_api_types::AssetId;
use std::collections::HashSet;

/// The set of asset ids the visitor has marked for purchase.
///
/// Ids are opaque here. An id unknown to the catalog may enter the set; it is
/// never counted because cart derivations intersect with the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStore {
    selected: HashSet<AssetId>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: &AssetId) -> bool {
        if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.clone());
            true
        }
    }

    /// Union `ids` into the selection. Returns how many were newly added.
    pub fn select_many<'a, I>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = &'a AssetId>,
    {
        ids.into_iter()
            .filter(|id| self.selected.insert((*id).clone()))
            .count()
    }

    /// Remove `ids` from the selection. Returns how many were actually removed.
    pub fn deselect_many<'a, I>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = &'a AssetId>,
    {
        ids.into_iter().filter(|id| self.selected.remove(*id)).count()
    }

    /// Empty the selection. Returns how many ids were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.selected.len();
        self.selected.clear();
        dropped
    }

    pub fn is_selected(&self, id: &AssetId) -> bool {
        self.selected.contains(id)
    }

    /// Raw cardinality, including ids the catalog does not know.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetId> {
        self.selected.iter()
    }
}
