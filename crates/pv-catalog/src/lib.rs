//! Immutable asset catalog.
//!
//! A catalog is built once (from the built-in demo set or a JSON document) and
//! shared read-only for the lifetime of the process. Lookups by asset id go
//! through a hash index so cart derivations never scan the full list.

mod builtin;

use anyhow::{Context, Result};
use pv_api_types::{AssetId, CategoryId, Cents};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_PRICE_PER_ITEM: Cents = Cents(26);
pub const DEFAULT_MINIMUM_CART: Cents = Cents(699);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pricing {
    pub price_per_item: Cents,
    pub minimum_cart: Cents,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            price_per_item: DEFAULT_PRICE_PER_ITEM,
            minimum_cart: DEFAULT_MINIMUM_CART,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub emoji: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Asset {
    pub id: AssetId,
    pub name: String,
    pub category: CategoryId,
    #[serde(default)]
    pub emoji: Option<String>,
    /// Per-asset override; the flat catalog rate applies when absent.
    #[serde(default)]
    pub price: Option<Cents>,
}

impl Asset {
    pub fn effective_price(&self, pricing: &Pricing) -> Cents {
        self.price.unwrap_or(pricing.price_per_item)
    }
}

/// On-disk catalog shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub pricing: Pricing,
    pub categories: Vec<Category>,
    pub assets: Vec<Asset>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("asset id cannot be empty")]
    EmptyAssetId,
    #[error("duplicate asset id: {0}")]
    DuplicateAsset(AssetId),
    #[error("duplicate category id: {0}")]
    DuplicateCategory(CategoryId),
    #[error("asset {asset} references unknown category {category}")]
    UnknownCategory { asset: AssetId, category: CategoryId },
}

#[derive(Debug, Clone)]
pub struct Catalog {
    pricing: Pricing,
    categories: Vec<Category>,
    assets: Vec<Asset>,
    index: HashMap<AssetId, usize>,
    by_category: HashMap<CategoryId, Vec<usize>>,
}

impl Catalog {
    pub fn new(
        pricing: Pricing,
        categories: Vec<Category>,
        assets: Vec<Asset>,
    ) -> Result<Self, CatalogError> {
        let mut category_ids = HashSet::with_capacity(categories.len());
        for category in &categories {
            if !category_ids.insert(&category.id) {
                return Err(CatalogError::DuplicateCategory(category.id.clone()));
            }
        }

        let mut asset_ids = HashSet::with_capacity(assets.len());
        for asset in &assets {
            if asset.id.as_str().trim().is_empty() {
                return Err(CatalogError::EmptyAssetId);
            }
            if !asset_ids.insert(&asset.id) {
                return Err(CatalogError::DuplicateAsset(asset.id.clone()));
            }
            if !category_ids.contains(&asset.category) {
                return Err(CatalogError::UnknownCategory {
                    asset: asset.id.clone(),
                    category: asset.category.clone(),
                });
            }
        }

        Ok(Self::indexed(pricing, categories, assets))
    }

    pub fn from_document(document: CatalogDocument) -> Result<Self, CatalogError> {
        Self::new(document.pricing, document.categories, document.assets)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let document: CatalogDocument =
            serde_json::from_str(raw).context("failed to parse catalog document")?;
        Ok(Self::from_document(document)?)
    }

    pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog file: {}", path.display()))?;
        Self::from_json_str(&raw)
            .with_context(|| format!("invalid catalog file: {}", path.display()))
    }

    /// The demo catalog shipped with the storefront.
    pub fn builtin() -> Self {
        let (categories, assets) = builtin::generate();
        Self::indexed(Pricing::default(), categories, assets)
    }

    pub fn with_pricing(mut self, pricing: Pricing) -> Self {
        self.pricing = pricing;
        self
    }

    // Callers must have validated ids and category references.
    fn indexed(pricing: Pricing, categories: Vec<Category>, assets: Vec<Asset>) -> Self {
        let mut index = HashMap::with_capacity(assets.len());
        let mut by_category: HashMap<CategoryId, Vec<usize>> = categories
            .iter()
            .map(|category| (category.id.clone(), Vec::new()))
            .collect();

        for (position, asset) in assets.iter().enumerate() {
            index.insert(asset.id.clone(), position);
            by_category
                .entry(asset.category.clone())
                .or_default()
                .push(position);
        }

        Self {
            pricing,
            categories,
            assets,
            index,
            by_category,
        }
    }

    pub fn pricing(&self) -> &Pricing {
        &self.pricing
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| &category.id == id)
    }

    pub fn get(&self, id: &AssetId) -> Option<&Asset> {
        self.index.get(id).map(|&position| &self.assets[position])
    }

    pub fn contains(&self, id: &AssetId) -> bool {
        self.index.contains_key(id)
    }

    /// Catalog order of an asset, used to list cart lines stably.
    pub fn position(&self, id: &AssetId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn price_of(&self, id: &AssetId) -> Option<Cents> {
        self.get(id).map(|asset| asset.effective_price(&self.pricing))
    }

    pub fn asset_ids(&self) -> Vec<AssetId> {
        self.assets.iter().map(|asset| asset.id.clone()).collect()
    }

    pub fn assets_in<'a>(
        &'a self,
        category: &CategoryId,
    ) -> impl Iterator<Item = &'a Asset> + use<'a> {
        self.by_category
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(move |&position| &self.assets[position])
    }

    pub fn category_asset_ids(&self, category: &CategoryId) -> Vec<AssetId> {
        self.assets_in(category).map(|asset| asset.id.clone()).collect()
    }

    pub fn category_len(&self, category: &CategoryId) -> usize {
        self.by_category.get(category).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn category(id: &str) -> Category {
        Category {
            id: CategoryId::from(id),
            name: id.to_uppercase(),
            emoji: None,
        }
    }

    fn asset(id: &str, category: &str) -> Asset {
        Asset {
            id: AssetId::from(id),
            name: format!("Asset {id}"),
            category: CategoryId::from(category),
            emoji: None,
            price: None,
        }
    }

    #[test]
    fn rejects_duplicate_asset_ids() {
        let err = Catalog::new(
            Pricing::default(),
            vec![category("paper")],
            vec![asset("a", "paper"), asset("a", "paper")],
        )
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateAsset(AssetId::from("a")));
    }

    #[test]
    fn rejects_unknown_category() {
        let err = Catalog::new(
            Pricing::default(),
            vec![category("paper")],
            vec![asset("a", "glue")],
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownCategory { .. }));
    }

    #[test]
    fn rejects_blank_asset_id() {
        let err = Catalog::new(Pricing::default(), vec![category("paper")], vec![asset(" ", "paper")])
            .unwrap_err();
        assert_eq!(err, CatalogError::EmptyAssetId);
    }

    #[test]
    fn groups_assets_by_category_in_catalog_order() {
        let catalog = Catalog::new(
            Pricing::default(),
            vec![category("paper"), category("tools"), category("decor")],
            vec![asset("p1", "paper"), asset("t1", "tools"), asset("p2", "paper")],
        )
        .unwrap();

        assert_eq!(
            catalog.category_asset_ids(&CategoryId::from("paper")),
            vec![AssetId::from("p1"), AssetId::from("p2")]
        );
        assert_eq!(catalog.category_len(&CategoryId::from("tools")), 1);
        assert_eq!(catalog.category_len(&CategoryId::from("decor")), 0);
        assert_eq!(catalog.category_len(&CategoryId::from("missing")), 0);
        assert_eq!(catalog.position(&AssetId::from("p2")), Some(2));
    }

    #[test]
    fn per_asset_override_beats_flat_rate() {
        let mut special = asset("gold", "paper");
        special.price = Some(Cents(199));
        let catalog = Catalog::new(
            Pricing::default(),
            vec![category("paper")],
            vec![asset("plain", "paper"), special],
        )
        .unwrap();

        assert_eq!(catalog.price_of(&AssetId::from("plain")), Some(DEFAULT_PRICE_PER_ITEM));
        assert_eq!(catalog.price_of(&AssetId::from("gold")), Some(Cents(199)));
        assert_eq!(catalog.price_of(&AssetId::from("ghost")), None);
    }

    #[test]
    fn builtin_catalog_is_consistent() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.pricing(), &Pricing::default());
        assert!(!catalog.is_empty());

        let total: usize = catalog
            .categories()
            .iter()
            .map(|category| catalog.category_len(&category.id))
            .sum();
        assert_eq!(total, catalog.len());

        let revalidated = Catalog::new(
            *catalog.pricing(),
            catalog.categories().to_vec(),
            catalog.assets().to_vec(),
        );
        assert!(revalidated.is_ok());
        assert_eq!(catalog.category_len(&CategoryId::from("scissors")), 18);
    }

    #[test]
    fn loads_catalog_from_json_file() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(
            file,
            r#"{{
                "pricing": {{ "price_per_item": 50, "minimum_cart": 500 }},
                "categories": [{{ "id": "paper", "name": "Paper", "emoji": "📄" }}],
                "assets": [
                    {{ "id": "paper-01", "name": "Kraft", "category": "paper" }},
                    {{ "id": "paper-02", "name": "Vellum", "category": "paper", "price": 75 }}
                ]
            }}"#
        )?;

        let catalog = Catalog::load_file(file.path())?;
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.pricing().minimum_cart, Cents(500));
        assert_eq!(catalog.price_of(&AssetId::from("paper-01")), Some(Cents(50)));
        assert_eq!(catalog.price_of(&AssetId::from("paper-02")), Some(Cents(75)));
        Ok(())
    }

    #[test]
    fn pricing_defaults_when_document_omits_it() -> anyhow::Result<()> {
        let catalog = Catalog::from_json_str(
            r#"{ "categories": [{ "id": "tools", "name": "Tools" }],
                 "assets": [{ "id": "t", "name": "Ruler", "category": "tools" }] }"#,
        )?;
        assert_eq!(catalog.pricing(), &Pricing::default());
        Ok(())
    }

    #[test]
    fn load_file_reports_missing_path() {
        let err = Catalog::load_file("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("failed to read catalog file"));
    }
}
