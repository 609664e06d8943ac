//! Print job input: the document's items as confirmed by the user

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::catalog::ItemCatalog;
use super::types::{PrintableLine, lenient_bool, lenient_number};
use crate::error::{LabelError, LabelResult};

/// One document row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobItem {
    pub item_code: String,
    #[serde(default)]
    pub item_name: Option<String>,
    /// Document quantity, used when no print quantity is given
    #[serde(default, deserialize_with = "lenient_number")]
    pub qty: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub print_qty: Option<f64>,
    /// Overrides the catalog barcode
    #[serde(default)]
    pub barcode: Option<String>,
    /// Overrides the catalog selling rate
    #[serde(default, deserialize_with = "lenient_number")]
    pub rate: Option<f64>,
    #[serde(default = "default_selected", deserialize_with = "lenient_bool")]
    pub selected: bool,
}

fn default_selected() -> bool {
    true
}

/// A label print request for one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintJob {
    /// Source document (invoice, stock entry...) for logging
    #[serde(default, alias = "name")]
    pub document: Option<String>,
    #[serde(default)]
    pub label_size: Option<String>,
    #[serde(default)]
    pub price_list: Option<String>,
    #[serde(default)]
    pub items: Vec<JobItem>,
}

impl PrintJob {
    pub fn load(path: impl AsRef<Path>) -> LabelResult<Self> {
        super::load_json(path.as_ref())
    }

    /// Build printable lines from the selected items
    ///
    /// Missing barcodes and rates come from `catalog`, looked up in the job's
    /// price list or else `default_price_list`. Fails with
    /// [`LabelError::EmptySelection`] when nothing is selected.
    pub fn to_lines(
        &self,
        catalog: &dyn ItemCatalog,
        default_price_list: Option<&str>,
    ) -> LabelResult<Vec<PrintableLine>> {
        let selected: Vec<&JobItem> = self.items.iter().filter(|i| i.selected).collect();
        if selected.is_empty() {
            return Err(LabelError::EmptySelection);
        }

        let lookup: Vec<String> = selected
            .iter()
            .filter(|i| barcode_override(i).is_none() || i.rate.is_none())
            .map(|i| i.item_code.clone())
            .collect();
        let price_list = self
            .price_list
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .or(default_price_list);
        let details = if lookup.is_empty() {
            Default::default()
        } else {
            catalog.item_details(&lookup, price_list)
        };

        let lines: Vec<PrintableLine> = selected
            .into_iter()
            .map(|item| {
                let known = details.get(&item.item_code);
                let barcode_value = barcode_override(item)
                    .map(str::to_string)
                    .or_else(|| known.map(|d| d.barcode.clone()))
                    .unwrap_or_else(|| item.item_code.clone());
                let unit_price = item
                    .rate
                    .or_else(|| known.map(|d| d.selling_rate))
                    .unwrap_or(0.0);
                if item.item_name.is_none() {
                    debug!(item_code = %item.item_code, "Item has no name, printing blank");
                }

                PrintableLine {
                    item_code: item.item_code.clone(),
                    display_name: item.item_name.clone().unwrap_or_default(),
                    barcode_value,
                    unit_price,
                    print_quantity: item.print_qty.or(item.qty),
                }
            })
            .collect();

        info!(
            document = self.document.as_deref().unwrap_or("-"),
            lines = lines.len(),
            skipped = self.items.len() - lines.len(),
            "Print selection confirmed"
        );
        Ok(lines)
    }
}

fn barcode_override(item: &JobItem) -> Option<&str> {
    item.barcode.as_deref().filter(|b| !b.trim().is_empty())
}
