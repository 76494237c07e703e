use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct AssetId(pub String);

impl AssetId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AssetId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct CategoryId(pub String);

impl CategoryId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CategoryId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Money in US cents. Renders as `$D.CC`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Cents(pub u64);

impl Cents {
    pub const ZERO: Cents = Cents(0);

    pub fn saturating_sub(self, other: Cents) -> Cents {
        Cents(self.0.saturating_sub(other.0))
    }

    pub fn times(self, count: u64) -> Cents {
        Cents(self.0.saturating_mul(count))
    }
}

impl Add for Cents {
    type Output = Cents;

    fn add(self, rhs: Cents) -> Cents {
        Cents(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Cents>>(iter: I) -> Cents {
        iter.fold(Cents::ZERO, Add::add)
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CartViewState {
    Hidden,
    CollapsedBadge,
    Expanded,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PackButton {
    AddAll,
    RemovePack,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartSnapshotResponse {
    pub selected_count: usize,
    pub total_price: Cents,
    pub is_above_minimum: bool,
    pub amount_to_minimum: Cents,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLineItem {
    pub asset_id: AssetId,
    pub name: String,
    pub category: CategoryId,
    pub emoji: Option<String>,
    pub price: Cents,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartResponse {
    pub state: CartViewState,
    pub snapshot: CartSnapshotResponse,
    pub checkout_enabled: bool,
    pub warning: Option<String>,
    pub items: Vec<CartLineItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetView {
    pub asset_id: AssetId,
    pub name: String,
    pub category: CategoryId,
    pub emoji: Option<String>,
    pub price: Cents,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewResponse {
    pub category: Option<CategoryId>,
    pub visible_count: usize,
    pub total_count: usize,
    pub has_more: bool,
    pub pack_button: Option<PackButton>,
    pub assets: Vec<AssetView>,
}

/// Returned by every session action: the refreshed view and cart together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    pub view: ViewResponse,
    pub cart: CartResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectViewRequest {
    #[serde(default)]
    pub category: Option<CategoryId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: CategoryId,
    pub name: String,
    pub emoji: Option<String>,
    pub asset_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub price_per_item: Cents,
    pub minimum_cart: Cents,
    pub asset_count: usize,
    pub categories: Vec<CategorySummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub cart: CartResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub item_count: usize,
    pub total_price: Cents,
    pub items: Vec<CartLineItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cents_display_pads_fraction() {
        assert_eq!(Cents(78).to_string(), "$0.78");
        assert_eq!(Cents(569).to_string(), "$5.69");
        assert_eq!(Cents(1205).to_string(), "$12.05");
        assert_eq!(Cents::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn cents_arithmetic_saturates() {
        assert_eq!(Cents(130).saturating_sub(Cents(699)), Cents::ZERO);
        assert_eq!(Cents(699).saturating_sub(Cents(130)), Cents(569));
        assert_eq!(Cents(26).times(5), Cents(130));
        let total: Cents = [Cents(26), Cents(26), Cents(26)].into_iter().sum();
        assert_eq!(total, Cents(78));
    }

    #[test]
    fn view_state_serializes_snake_case() {
        let raw = serde_json::to_string(&CartViewState::CollapsedBadge).unwrap();
        assert_eq!(raw, "\"collapsed_badge\"");
        let raw = serde_json::to_string(&PackButton::RemovePack).unwrap();
        assert_eq!(raw, "\"remove_pack\"");
    }

    #[test]
    fn ids_are_transparent_strings() {
        let raw = serde_json::to_string(&AssetId::from("paper-01")).unwrap();
        assert_eq!(raw, "\"paper-01\"");
        let parsed: SelectViewRequest = serde_json::from_str("{}").unwrap();
        assert!(parsed.category.is_none());
    }
}
