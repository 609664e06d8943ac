//! Label printing types

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One confirmed selection entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintableLine {
    pub item_code: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub barcode_value: String,
    #[serde(default, deserialize_with = "lenient_price")]
    pub unit_price: f64,
    /// Raw quantity as entered; coerced during expansion
    #[serde(default, deserialize_with = "lenient_number")]
    pub print_quantity: Option<f64>,
}

/// One physical label to print
#[derive(Debug, Clone, PartialEq)]
pub struct LabelInstance {
    pub display_name: String,
    pub barcode_value: String,
    pub item_code: String,
    pub unit_price: f64,
}

impl From<&PrintableLine> for LabelInstance {
    fn from(line: &PrintableLine) -> Self {
        Self {
            display_name: line.display_name.clone(),
            barcode_value: line.barcode_value.clone(),
            item_code: line.item_code.clone(),
            unit_price: line.unit_price,
        }
    }
}

/// Labels sharing one print pass, leftmost first
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Row<'a> {
    labels: &'a [LabelInstance],
}

impl<'a> Row<'a> {
    pub(crate) fn new(labels: &'a [LabelInstance]) -> Self {
        Self { labels }
    }

    pub fn labels(&self) -> &'a [LabelInstance] {
        self.labels
    }

    /// `(column index, label)` pairs in column order
    pub fn columns(&self) -> impl Iterator<Item = (usize, &'a LabelInstance)> + 'a {
        self.labels.iter().enumerate()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Accept numbers, numeric strings and null; anything else reads as missing
pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number_from_value(&Value::deserialize(deserializer)?))
}

/// Like [`lenient_number`], but missing prices read as 0
pub(crate) fn lenient_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?.unwrap_or(0.0))
}

/// Rate per price list; null or unreadable rates read as 0, a non-object as no rates
pub(crate) fn lenient_rates<'de, D>(deserializer: D) -> Result<HashMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => map
            .into_iter()
            .map(|(list, rate)| {
                let rate = number_from_value(&rate).unwrap_or(0.0);
                (list, rate)
            })
            .collect(),
        _ => HashMap::new(),
    })
}

/// Booleans, 0/1 numbers and "true"/"1" strings
pub(crate) fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => matches!(s.trim(), "1" | "true" | "yes"),
        _ => false,
    })
}

pub(crate) fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
