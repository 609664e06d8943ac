//! Geometry settings store
//!
//! Settings are read once by the caller and passed around as a plain value.
//! Loading never blocks printing: a missing or broken file yields the
//! built-in single-preset fallback.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use super::catalog::DEFAULT_PRICE_LIST;
use super::geometry::{DEFAULT_PRINTER, GeometryRecord, LabelGeometry};
use crate::error::LabelResult;

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    default_printer: Option<String>,
    #[serde(default)]
    default_price_list: Option<String>,
    #[serde(default)]
    default_label_size: Option<String>,
    /// Kept as raw values so one malformed preset does not reject the file
    #[serde(default)]
    label_sizes: Vec<Value>,
    #[serde(default)]
    printers: HashMap<String, String>,
}

/// Named geometry presets plus printer defaults
#[derive(Debug, Clone, PartialEq)]
pub struct GeometrySettings {
    pub default_printer: String,
    pub default_price_list: String,
    pub default_label_size: String,
    label_sizes: Vec<LabelGeometry>,
    /// Printer queue name -> "host:port"
    printers: HashMap<String, String>,
}

impl GeometrySettings {
    /// Settings holding only the built-in "35x15mm 2-up" preset
    pub fn fallback() -> Self {
        let preset = LabelGeometry::fallback();
        Self {
            default_printer: DEFAULT_PRINTER.to_string(),
            default_price_list: DEFAULT_PRICE_LIST.to_string(),
            default_label_size: preset.name.clone(),
            label_sizes: vec![preset],
            printers: HashMap::new(),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> LabelResult<Self> {
        let path = path.as_ref();
        let file: SettingsFile = super::load_json(path)?;
        let settings = Self::from_file(file);
        info!(
            path = %path.display(),
            presets = settings.label_sizes.len(),
            default = %settings.default_label_size,
            "Label settings loaded"
        );
        Ok(settings)
    }

    /// Like [`load`](Self::load), substituting the fallback on any error
    pub fn load_or_fallback(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Label settings unavailable, using built-in preset"
                );
                Self::fallback()
            }
        }
    }

    fn from_file(file: SettingsFile) -> Self {
        let default_printer =
            non_empty(file.default_printer).unwrap_or_else(|| DEFAULT_PRINTER.to_string());

        let mut label_sizes: Vec<LabelGeometry> = Vec::with_capacity(file.label_sizes.len());
        for (idx, raw) in file.label_sizes.into_iter().enumerate() {
            match serde_json::from_value::<GeometryRecord>(raw) {
                Ok(record) if record.name.trim().is_empty() => {
                    warn!(index = idx, "Skipping label size without a name");
                }
                Ok(mut record) => {
                    if non_empty(record.printer_name.clone()).is_none() {
                        record.printer_name = Some(default_printer.clone());
                    }
                    label_sizes.push(LabelGeometry::from_record(record));
                }
                Err(e) => {
                    warn!(index = idx, error = %e, "Skipping malformed label size");
                }
            }
        }

        if label_sizes.is_empty() {
            warn!("No usable label sizes configured, using built-in preset");
            let mut preset = LabelGeometry::fallback();
            preset.printer_name = Some(default_printer.clone());
            label_sizes.push(preset);
        }

        let default_label_size = label_sizes
            .iter()
            .find(|g| g.is_default)
            .map(|g| g.name.clone())
            .or_else(|| {
                non_empty(file.default_label_size)
                    .filter(|name| label_sizes.iter().any(|g| &g.name == name))
            })
            .unwrap_or_else(|| label_sizes[0].name.clone());

        Self {
            default_printer,
            default_price_list: non_empty(file.default_price_list)
                .unwrap_or_else(|| DEFAULT_PRICE_LIST.to_string()),
            default_label_size,
            label_sizes,
            printers: file.printers,
        }
    }

    /// All presets in configuration order (never empty)
    pub fn presets(&self) -> &[LabelGeometry] {
        &self.label_sizes
    }

    pub fn preset(&self, name: &str) -> Option<&LabelGeometry> {
        self.label_sizes.iter().find(|g| g.name == name)
    }

    pub fn default_preset(&self) -> &LabelGeometry {
        self.preset(&self.default_label_size)
            .unwrap_or(&self.label_sizes[0])
    }

    /// Preset by name; unknown or missing names fall back to the default preset
    pub fn resolve_preset(&self, name: Option<&str>) -> &LabelGeometry {
        match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => match self.preset(name) {
                Some(preset) => preset,
                None => {
                    let fallback = self.default_preset();
                    warn!(
                        requested = name,
                        using = %fallback.name,
                        "Unknown label size, using default"
                    );
                    fallback
                }
            },
            None => self.default_preset(),
        }
    }

    /// Printer queue a preset prints to
    pub fn printer_for<'a>(&'a self, preset: &'a LabelGeometry) -> &'a str {
        preset.printer_name.as_deref().unwrap_or(&self.default_printer)
    }

    /// Network address configured for a printer queue
    pub fn printer_address(&self, printer: &str) -> Option<&str> {
        self.printers.get(printer).map(String::as_str)
    }
}

impl Default for GeometrySettings {
    fn default() -> Self {
        Self::fallback()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
