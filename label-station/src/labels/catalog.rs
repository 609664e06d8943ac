//! Item metadata: barcodes and selling prices

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::types::{lenient_bool, lenient_number, lenient_rates};
use crate::error::LabelResult;

/// Price list used when neither the job nor the settings name one
pub const DEFAULT_PRICE_LIST: &str = "Standard Selling";

/// Barcode and selling price of one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDetails {
    pub barcode: String,
    pub selling_rate: f64,
}

impl ItemDetails {
    /// Details of an item the catalog knows nothing about
    pub fn unknown(item_code: &str) -> Self {
        Self {
            barcode: item_code.to_string(),
            selling_rate: 0.0,
        }
    }
}

/// Source of item barcodes and prices
pub trait ItemCatalog {
    /// Details for every requested code; unknown items get [`ItemDetails::unknown`]
    fn item_details(
        &self,
        item_codes: &[String],
        price_list: Option<&str>,
    ) -> HashMap<String, ItemDetails>;

    /// Enabled selling price lists, sorted by name
    fn price_lists(&self) -> Vec<String>;
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CatalogItem {
    /// Barcodes in priority order; the first non-empty one is printed
    #[serde(default)]
    barcodes: Vec<String>,
    /// Selling rate per price list
    #[serde(default, deserialize_with = "lenient_rates")]
    prices: HashMap<String, f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    standard_rate: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct PriceList {
    name: String,
    #[serde(default = "default_true", deserialize_with = "lenient_bool")]
    selling: bool,
    #[serde(default = "default_true", deserialize_with = "lenient_bool")]
    enabled: bool,
}

fn default_true() -> bool {
    true
}

fn default_price_list() -> String {
    DEFAULT_PRICE_LIST.to_string()
}

/// Catalog loaded from a JSON export
///
/// ```json
/// {
///   "default_price_list": "Standard Selling",
///   "price_lists": [{ "name": "Standard Selling" }],
///   "items": {
///     "ITEM-001": {
///       "barcodes": ["8901234567890"],
///       "prices": { "Standard Selling": 99.0 },
///       "standard_rate": 95.0
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct JsonCatalog {
    #[serde(default = "default_price_list")]
    default_price_list: String,
    #[serde(default)]
    price_lists: Vec<PriceList>,
    #[serde(default)]
    items: HashMap<String, CatalogItem>,
}

impl Default for JsonCatalog {
    fn default() -> Self {
        Self::empty()
    }
}

impl JsonCatalog {
    /// Catalog without items: every lookup falls back to code-as-barcode, price 0
    pub fn empty() -> Self {
        Self {
            default_price_list: default_price_list(),
            price_lists: Vec::new(),
            items: HashMap::new(),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> LabelResult<Self> {
        let path = path.as_ref();
        let catalog: Self = super::load_json(path)?;
        info!(path = %path.display(), items = catalog.items.len(), "Item catalog loaded");
        Ok(catalog)
    }

    pub fn default_price_list(&self) -> &str {
        &self.default_price_list
    }

    /// Resolve one item: price list rate, then standard rate, then 0
    fn resolve(&self, item_code: &str, price_list: &str) -> ItemDetails {
        let Some(item) = self.items.get(item_code) else {
            debug!(item_code, "Item not in catalog, using code as barcode");
            return ItemDetails::unknown(item_code);
        };

        let barcode = item
            .barcodes
            .iter()
            .find(|b| !b.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| item_code.to_string());

        let selling_rate = match item.prices.get(price_list) {
            Some(&rate) => rate,
            None => {
                debug!(item_code, price_list, "No price list rate, using standard rate");
                item.standard_rate.unwrap_or(0.0)
            }
        };

        ItemDetails {
            barcode,
            selling_rate,
        }
    }
}

impl std::str::FromStr for JsonCatalog {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
    }
}

impl ItemCatalog for JsonCatalog {
    fn item_details(
        &self,
        item_codes: &[String],
        price_list: Option<&str>,
    ) -> HashMap<String, ItemDetails> {
        let price_list = price_list
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(&self.default_price_list);

        item_codes
            .iter()
            .map(|code| (code.clone(), self.resolve(code, price_list)))
            .collect()
    }

    fn price_lists(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .price_lists
            .iter()
            .filter(|p| p.selling && p.enabled)
            .map(|p| p.name.clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "default_price_list": "Standard Selling",
        "price_lists": [
            { "name": "Wholesale" },
            { "name": "Standard Selling", "selling": 1, "enabled": 1 },
            { "name": "Old Retail", "enabled": 0 },
            { "name": "Standard Buying", "selling": false }
        ],
        "items": {
            "WIDGET-A": {
                "barcodes": ["", "1001", "1001-ALT"],
                "prices": { "Standard Selling": 99.0, "Wholesale": 80.0 },
                "standard_rate": 95.0
            },
            "WIDGET-B": {
                "standard_rate": "149.6"
            },
            "WIDGET-C": {}
        }
    }"#;

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_price_list_rate_wins() {
        let catalog: JsonCatalog = CATALOG.parse().unwrap();
        let details = catalog.item_details(&codes(&["WIDGET-A"]), None);
        assert_eq!(
            details["WIDGET-A"],
            ItemDetails {
                barcode: "1001".into(),
                selling_rate: 99.0
            }
        );

        let details = catalog.item_details(&codes(&["WIDGET-A"]), Some("Wholesale"));
        assert_eq!(details["WIDGET-A"].selling_rate, 80.0);
    }

    #[test]
    fn test_standard_rate_fallback() {
        let catalog: JsonCatalog = CATALOG.parse().unwrap();
        let details = catalog.item_details(&codes(&["WIDGET-A", "WIDGET-B"]), Some("Retail"));
        assert_eq!(details["WIDGET-A"].selling_rate, 95.0);
        assert_eq!(details["WIDGET-B"].selling_rate, 149.6);
        assert_eq!(details["WIDGET-B"].barcode, "WIDGET-B");
    }

    #[test]
    fn test_unknown_and_empty_items() {
        let catalog: JsonCatalog = CATALOG.parse().unwrap();
        let details = catalog.item_details(&codes(&["WIDGET-C", "NOPE"]), None);
        assert_eq!(details["WIDGET-C"], ItemDetails::unknown("WIDGET-C"));
        assert_eq!(details["NOPE"], ItemDetails::unknown("NOPE"));
    }

    #[test]
    fn test_null_and_string_rates_keep_catalog() {
        let catalog: JsonCatalog = r#"{
            "items": {
                "WIDGET-A": { "barcodes": ["1001"], "prices": { "Standard Selling": null } },
                "WIDGET-B": { "barcodes": ["1002"], "prices": { "Standard Selling": "99" } },
                "WIDGET-C": { "barcodes": ["1003"], "prices": null, "standard_rate": 12 }
            }
        }"#
        .parse()
        .unwrap();

        let details = catalog.item_details(&codes(&["WIDGET-A", "WIDGET-B", "WIDGET-C"]), None);
        assert_eq!(
            details["WIDGET-A"],
            ItemDetails {
                barcode: "1001".into(),
                selling_rate: 0.0
            }
        );
        assert_eq!(details["WIDGET-B"].selling_rate, 99.0);
        assert_eq!(details["WIDGET-C"].barcode, "1003");
        assert_eq!(details["WIDGET-C"].selling_rate, 12.0);
    }

    #[test]
    fn test_price_lists() {
        let catalog: JsonCatalog = CATALOG.parse().unwrap();
        assert_eq!(catalog.price_lists(), vec!["Standard Selling", "Wholesale"]);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = JsonCatalog::empty();
        assert_eq!(catalog.default_price_list(), DEFAULT_PRICE_LIST);
        let details = catalog.item_details(&codes(&["X"]), None);
        assert_eq!(details["X"], ItemDetails::unknown("X"));
    }
}
