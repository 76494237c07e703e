use anyhow::{Context, Result};
use pv_api_types::Cents;
use pv_catalog::{Catalog, Pricing};
use pv_storefront_core::DEFAULT_PAGE_SIZE;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

pub(crate) const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub(crate) const DEFAULT_SESSION_TTL_SECS: u64 = 1800;

/// Service settings, read once at startup.
///
/// | variable | default |
/// | --- | --- |
/// | `STOREFRONT_BIND_ADDR` | `0.0.0.0:8080` |
/// | `STOREFRONT_CATALOG_PATH` | built-in catalog |
/// | `STOREFRONT_PRICE_PER_ITEM_CENTS` | catalog pricing |
/// | `STOREFRONT_MINIMUM_CART_CENTS` | catalog pricing |
/// | `STOREFRONT_PAGE_SIZE` | 18 |
/// | `STOREFRONT_SESSION_TTL_SECS` | 1800 |
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ServiceConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) catalog_path: Option<PathBuf>,
    pub(crate) price_per_item: Option<Cents>,
    pub(crate) minimum_cart: Option<Cents>,
    pub(crate) page_size: usize,
    /// Idle time after which a session is dropped.
    pub(crate) session_ttl: Duration,
}

impl ServiceConfig {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let bind_addr = get("STOREFRONT_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned())
            .parse::<SocketAddr>()
            .context("STOREFRONT_BIND_ADDR must be a socket address")?;

        let price_per_item = get("STOREFRONT_PRICE_PER_ITEM_CENTS")
            .map(|raw| raw.parse::<u64>().map(Cents))
            .transpose()
            .context("STOREFRONT_PRICE_PER_ITEM_CENTS must be a whole number of cents")?;

        let minimum_cart = get("STOREFRONT_MINIMUM_CART_CENTS")
            .map(|raw| raw.parse::<u64>().map(Cents))
            .transpose()
            .context("STOREFRONT_MINIMUM_CART_CENTS must be a whole number of cents")?;

        let page_size = get("STOREFRONT_PAGE_SIZE")
            .map(|raw| raw.parse::<usize>())
            .transpose()
            .context("STOREFRONT_PAGE_SIZE must be a positive integer")?
            .unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            anyhow::bail!("STOREFRONT_PAGE_SIZE must be a positive integer");
        }

        let session_ttl_secs = get("STOREFRONT_SESSION_TTL_SECS")
            .map(|raw| raw.parse::<u64>())
            .transpose()
            .context("STOREFRONT_SESSION_TTL_SECS must be a positive number of seconds")?
            .unwrap_or(DEFAULT_SESSION_TTL_SECS);
        if session_ttl_secs == 0 {
            anyhow::bail!("STOREFRONT_SESSION_TTL_SECS must be a positive number of seconds");
        }

        Ok(Self {
            bind_addr,
            catalog_path: get("STOREFRONT_CATALOG_PATH").map(PathBuf::from),
            price_per_item,
            minimum_cart,
            page_size,
            session_ttl: Duration::from_secs(session_ttl_secs),
        })
    }

    /// Load the configured catalog and apply any pricing overrides.
    pub(crate) fn load_catalog(&self) -> Result<Catalog> {
        let catalog = match &self.catalog_path {
            Some(path) => {
                let catalog = Catalog::load_file(path)?;
                info!("loaded catalog from {} ({} assets)", path.display(), catalog.len());
                catalog
            }
            None => {
                let catalog = Catalog::builtin();
                info!("using built-in catalog ({} assets)", catalog.len());
                catalog
            }
        };

        let base = *catalog.pricing();
        let pricing = Pricing {
            price_per_item: self.price_per_item.unwrap_or(base.price_per_item),
            minimum_cart: self.minimum_cart.unwrap_or(base.minimum_cart),
        };
        Ok(catalog.with_pricing(pricing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() -> Result<()> {
        let config = ServiceConfig::from_lookup(lookup(&[]))?;
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse::<SocketAddr>()?);
        assert_eq!(config.catalog_path, None);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.session_ttl, Duration::from_secs(DEFAULT_SESSION_TTL_SECS));

        let catalog = config.load_catalog()?;
        assert_eq!(catalog.pricing(), &Pricing::default());
        Ok(())
    }

    #[test]
    fn pricing_overrides_apply_to_catalog() -> Result<()> {
        let config = ServiceConfig::from_lookup(lookup(&[
            ("STOREFRONT_PRICE_PER_ITEM_CENTS", "30"),
            ("STOREFRONT_MINIMUM_CART_CENTS", " 1000 "),
            ("STOREFRONT_PAGE_SIZE", "12"),
            ("STOREFRONT_SESSION_TTL_SECS", "90"),
        ]))?;
        assert_eq!(config.page_size, 12);
        assert_eq!(config.session_ttl, Duration::from_secs(90));

        let catalog = config.load_catalog()?;
        assert_eq!(catalog.pricing().price_per_item, Cents(30));
        assert_eq!(catalog.pricing().minimum_cart, Cents(1000));
        Ok(())
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(ServiceConfig::from_lookup(lookup(&[("STOREFRONT_BIND_ADDR", "nowhere")])).is_err());
        assert!(ServiceConfig::from_lookup(lookup(&[("STOREFRONT_PAGE_SIZE", "0")])).is_err());
        assert!(
            ServiceConfig::from_lookup(lookup(&[("STOREFRONT_SESSION_TTL_SECS", "0")])).is_err()
        );
        assert!(
            ServiceConfig::from_lookup(lookup(&[("STOREFRONT_MINIMUM_CART_CENTS", "6.99")]))
                .is_err()
        );
    }

    #[test]
    fn loads_catalog_file_from_path() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(
            file,
            r#"{{ "categories": [{{ "id": "paper", "name": "Paper" }}],
                 "assets": [{{ "id": "p1", "name": "Kraft", "category": "paper" }}] }}"#
        )?;
        let path = file.path().to_string_lossy().into_owned();

        let config = ServiceConfig::from_lookup(lookup(&[("STOREFRONT_CATALOG_PATH", path.as_str())]))?;
        let catalog = config.load_catalog()?;
        assert_eq!(catalog.len(), 1);
        Ok(())
    }
}
