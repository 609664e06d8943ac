//! Barcode Label Printing Module
//!
//! Turns a confirmed item selection into a TSPL script and sends it to the
//! label printer:
//! - Geometry: preset resolution and defaulting
//! - Pipeline: expand quantities → pack rows → render → assemble
//! - Collaborators: settings store, item catalog, print executor

pub mod catalog;
pub mod executor;
pub mod expander;
pub mod geometry;
pub mod job;
pub mod packer;
pub mod renderer;
pub mod script;
pub mod settings;
pub mod types;

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{LabelError, LabelResult};

pub use catalog::{DEFAULT_PRICE_LIST, ItemCatalog, ItemDetails, JsonCatalog};
pub use executor::PrintExecutor;
pub use expander::{MAX_PRINT_QUANTITY, coerce_quantity, expand_lines};
pub use geometry::{
    DEFAULT_PRINTER, FALLBACK_PRESET_NAME, GeometryRecord, LabelGeometry, MAX_LABELS_PER_ROW,
};
pub use job::{JobItem, PrintJob};
pub use packer::pack_rows;
pub use renderer::{LabelRenderer, RenderOptions, format_price, label_name};
pub use script::{CommandScript, assemble, assemble_with};
pub use settings::GeometrySettings;
pub use types::{LabelInstance, PrintableLine, Row};

/// Read and parse a JSON file
pub(crate) fn load_json<T: DeserializeOwned>(path: &Path) -> LabelResult<T> {
    let content = std::fs::read_to_string(path).map_err(|source| LabelError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| LabelError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
