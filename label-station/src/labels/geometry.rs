//! Label geometry presets
//!
//! A [`GeometryRecord`] is a preset as stored in the settings file: every
//! field except the name may be missing, zero, or a numeric string.
//! [`LabelGeometry::from_record`] turns it into a fully populated layout.
//! Resolution never fails; each defaulted field is logged.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::types::{lenient_bool, lenient_number};

/// Name of the built-in preset used when no settings are available
pub const FALLBACK_PRESET_NAME: &str = "35x15mm 2-up";
/// Printer queue used by presets that do not name one
pub const DEFAULT_PRINTER: &str = "Bar Code Printer TT065-50";

const DEFAULT_WIDTH_MM: f64 = 70.0;
const DEFAULT_HEIGHT_MM: f64 = 15.0;
const DEFAULT_GAP_MM: f64 = 3.0;
const DEFAULT_LABELS_PER_ROW: u32 = 2;
/// Widest layout accepted; larger `labels_per_row` values are capped
pub const MAX_LABELS_PER_ROW: u32 = 16;
const DEFAULT_PRINTABLE_HEIGHT_MM: f64 = 10.0;
const DEFAULT_LEFT_MARGIN: u32 = 8;
const DEFAULT_MIDDLE_GAP: u32 = 16;
const DEFAULT_RIGHT_MARGIN: u32 = 8;
const DEFAULT_LEFT_LABEL_X: u32 = 8;
const DEFAULT_RIGHT_LABEL_X: u32 = 305;
const DEFAULT_DOTS_PER_MM: u32 = 8;
const DEFAULT_BARCODE_WIDTH: u32 = 2;
const DEFAULT_BARCODE_HEIGHT: u32 = 60;
const DEFAULT_NAME_Y: u32 = 2;
const DEFAULT_BARCODE_Y: u32 = 16;
const DEFAULT_BARCODE_TEXT_Y: u32 = 80;
const DEFAULT_PRICE_Y: u32 = 96;
const DEFAULT_TEXT_MAX_CHARS: u32 = 14;
const DEFAULT_SPEED: f64 = 4.0;
const DEFAULT_DENSITY: u32 = 8;

/// Raw, possibly partial preset
///
/// Field aliases accept the names used by the settings doctype
/// (`label_name`, `gap_height`, `name_y_position`, `print_speed`...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometryRecord {
    #[serde(alias = "label_name")]
    pub name: String,
    #[serde(default, alias = "printer")]
    pub printer_name: Option<String>,

    #[serde(default, alias = "label_width", deserialize_with = "lenient_number")]
    pub width: Option<f64>,
    #[serde(default, alias = "label_height", deserialize_with = "lenient_number")]
    pub height: Option<f64>,
    #[serde(default, alias = "gap_height", deserialize_with = "lenient_number")]
    pub gap: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub labels_per_row: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub printable_height: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub left_margin: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub middle_gap: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub right_margin: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub left_label_x: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub right_label_x: Option<f64>,
    /// Explicit per-column X origins, leftmost first
    #[serde(default)]
    pub column_x: Option<Vec<f64>>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub dots_per_mm: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub barcode_width: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub barcode_height: Option<f64>,

    #[serde(default, alias = "name_y_position", deserialize_with = "lenient_number")]
    pub name_y: Option<f64>,
    #[serde(default, alias = "barcode_y_position", deserialize_with = "lenient_number")]
    pub barcode_y: Option<f64>,
    #[serde(
        default,
        alias = "barcode_text_y_position",
        deserialize_with = "lenient_number"
    )]
    pub barcode_text_y: Option<f64>,
    #[serde(default, alias = "price_y_position", deserialize_with = "lenient_number")]
    pub price_y: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub text_max_chars: Option<f64>,

    #[serde(default, alias = "print_speed", deserialize_with = "lenient_number")]
    pub speed: Option<f64>,
    #[serde(default, alias = "print_density", deserialize_with = "lenient_number")]
    pub density: Option<f64>,

    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_default: bool,
}

impl GeometryRecord {
    /// The built-in 2-up 70x15mm preset, every field set
    pub fn fallback() -> Self {
        Self {
            name: FALLBACK_PRESET_NAME.to_string(),
            printer_name: Some(DEFAULT_PRINTER.to_string()),
            width: Some(DEFAULT_WIDTH_MM),
            height: Some(DEFAULT_HEIGHT_MM),
            gap: Some(DEFAULT_GAP_MM),
            labels_per_row: Some(DEFAULT_LABELS_PER_ROW as f64),
            printable_height: Some(DEFAULT_PRINTABLE_HEIGHT_MM),
            left_margin: Some(DEFAULT_LEFT_MARGIN as f64),
            middle_gap: Some(DEFAULT_MIDDLE_GAP as f64),
            right_margin: Some(DEFAULT_RIGHT_MARGIN as f64),
            left_label_x: Some(DEFAULT_LEFT_LABEL_X as f64),
            right_label_x: Some(DEFAULT_RIGHT_LABEL_X as f64),
            column_x: None,
            dots_per_mm: Some(DEFAULT_DOTS_PER_MM as f64),
            barcode_width: Some(DEFAULT_BARCODE_WIDTH as f64),
            barcode_height: Some(DEFAULT_BARCODE_HEIGHT as f64),
            name_y: Some(DEFAULT_NAME_Y as f64),
            barcode_y: Some(DEFAULT_BARCODE_Y as f64),
            barcode_text_y: Some(DEFAULT_BARCODE_TEXT_Y as f64),
            price_y: Some(DEFAULT_PRICE_Y as f64),
            text_max_chars: Some(DEFAULT_TEXT_MAX_CHARS as f64),
            speed: Some(DEFAULT_SPEED),
            density: Some(DEFAULT_DENSITY as f64),
            is_default: true,
        }
    }
}

/// Fully populated label layout, immutable for a print job
///
/// Horizontal values are printer dots; `width`, `height` and `gap` are
/// millimetres and go verbatim into the page setup.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelGeometry {
    pub name: String,
    pub printer_name: Option<String>,
    pub width: f64,
    pub height: f64,
    pub gap: f64,
    pub labels_per_row: usize,
    pub printable_height: f64,
    pub left_margin: u32,
    pub middle_gap: u32,
    pub right_margin: u32,
    pub left_label_x: u32,
    pub right_label_x: u32,
    pub dots_per_mm: u32,
    pub barcode_width: u32,
    pub barcode_height: u32,
    pub name_y: u32,
    pub barcode_y: u32,
    pub barcode_text_y: u32,
    pub price_y: u32,
    pub text_max_chars: usize,
    pub speed: f64,
    pub density: u32,
    pub is_default: bool,
    column_x: Vec<u32>,
}

impl LabelGeometry {
    /// Resolve a raw preset, applying a default for every missing or invalid field
    pub fn from_record(record: GeometryRecord) -> Self {
        let preset = record.name.as_str();
        let labels_per_row = capped_labels_per_row(preset, record.labels_per_row);
        let width = millimetres(preset, "width", record.width, DEFAULT_WIDTH_MM);
        let dots_per_mm = dots(
            preset,
            "dots_per_mm",
            record.dots_per_mm,
            DEFAULT_DOTS_PER_MM,
        );
        let left_margin = dots(
            preset,
            "left_margin",
            record.left_margin,
            DEFAULT_LEFT_MARGIN,
        );
        let middle_gap = dots(preset, "middle_gap", record.middle_gap, DEFAULT_MIDDLE_GAP);
        let right_margin = dots(
            preset,
            "right_margin",
            record.right_margin,
            DEFAULT_RIGHT_MARGIN,
        );
        let explicit_left = positive(preset, "left_label_x", record.left_label_x)
            .map(|v| v as u32);
        let left_label_x = explicit_left.unwrap_or(left_margin);
        let right_label_x = dots(
            preset,
            "right_label_x",
            record.right_label_x,
            DEFAULT_RIGHT_LABEL_X,
        );

        let column_x = resolve_columns(
            preset,
            labels_per_row as usize,
            record.column_x.as_deref().unwrap_or_default(),
            ColumnLayout {
                label_width_dots: (width * dots_per_mm as f64) as u32,
                left_label_x,
                right_label_x,
                left_margin,
                middle_gap,
                right_margin,
            },
        );

        Self {
            width,
            height: millimetres(preset, "height", record.height, DEFAULT_HEIGHT_MM),
            gap: millimetres(preset, "gap", record.gap, DEFAULT_GAP_MM),
            labels_per_row: labels_per_row as usize,
            printable_height: millimetres(
                preset,
                "printable_height",
                record.printable_height,
                DEFAULT_PRINTABLE_HEIGHT_MM,
            ),
            left_margin,
            middle_gap,
            right_margin,
            left_label_x,
            right_label_x,
            dots_per_mm,
            barcode_width: dots(
                preset,
                "barcode_width",
                record.barcode_width,
                DEFAULT_BARCODE_WIDTH,
            ),
            barcode_height: dots(
                preset,
                "barcode_height",
                record.barcode_height,
                DEFAULT_BARCODE_HEIGHT,
            ),
            name_y: dots(preset, "name_y", record.name_y, DEFAULT_NAME_Y),
            barcode_y: dots(preset, "barcode_y", record.barcode_y, DEFAULT_BARCODE_Y),
            barcode_text_y: dots(
                preset,
                "barcode_text_y",
                record.barcode_text_y,
                DEFAULT_BARCODE_TEXT_Y,
            ),
            price_y: dots(preset, "price_y", record.price_y, DEFAULT_PRICE_Y),
            text_max_chars: dots(
                preset,
                "text_max_chars",
                record.text_max_chars,
                DEFAULT_TEXT_MAX_CHARS,
            ) as usize,
            speed: millimetres(preset, "speed", record.speed, DEFAULT_SPEED),
            density: dots(preset, "density", record.density, DEFAULT_DENSITY),
            is_default: record.is_default,
            printer_name: record.printer_name.filter(|p| !p.trim().is_empty()),
            column_x,
            name: record.name,
        }
    }

    /// The built-in "35x15mm 2-up" preset
    pub fn fallback() -> Self {
        Self::from_record(GeometryRecord::fallback())
    }

    /// X origin of every column, leftmost first (`labels_per_row` entries)
    pub fn column_x(&self) -> &[u32] {
        &self.column_x
    }

    /// X origin of column `col`
    pub fn x_for(&self, col: usize) -> u32 {
        self.column_x
            .get(col)
            .copied()
            .unwrap_or(self.left_label_x)
    }
}

impl From<&LabelGeometry> for GeometryRecord {
    fn from(g: &LabelGeometry) -> Self {
        Self {
            name: g.name.clone(),
            printer_name: g.printer_name.clone(),
            width: Some(g.width),
            height: Some(g.height),
            gap: Some(g.gap),
            labels_per_row: Some(g.labels_per_row as f64),
            printable_height: Some(g.printable_height),
            left_margin: Some(g.left_margin as f64),
            middle_gap: Some(g.middle_gap as f64),
            right_margin: Some(g.right_margin as f64),
            left_label_x: Some(g.left_label_x as f64),
            right_label_x: Some(g.right_label_x as f64),
            column_x: Some(g.column_x.iter().map(|&x| x as f64).collect()),
            dots_per_mm: Some(g.dots_per_mm as f64),
            barcode_width: Some(g.barcode_width as f64),
            barcode_height: Some(g.barcode_height as f64),
            name_y: Some(g.name_y as f64),
            barcode_y: Some(g.barcode_y as f64),
            barcode_text_y: Some(g.barcode_text_y as f64),
            price_y: Some(g.price_y as f64),
            text_max_chars: Some(g.text_max_chars as f64),
            speed: Some(g.speed),
            density: Some(g.density as f64),
            is_default: g.is_default,
        }
    }
}

struct ColumnLayout {
    label_width_dots: u32,
    left_label_x: u32,
    right_label_x: u32,
    left_margin: u32,
    middle_gap: u32,
    right_margin: u32,
}

/// Build the per-column X table
///
/// Explicit entries win. Without them a 2-up layout uses
/// `left_label_x`/`right_label_x`; other layouts step from the left origin by
/// the column content width plus `middle_gap`.
fn resolve_columns(preset: &str, n: usize, explicit: &[f64], layout: ColumnLayout) -> Vec<u32> {
    let gaps = layout.middle_gap.saturating_mul(n.saturating_sub(1) as u32);
    let content_width = layout
        .label_width_dots
        .saturating_sub(layout.left_margin)
        .saturating_sub(layout.right_margin)
        .saturating_sub(gaps)
        / n.max(1) as u32;

    let mut columns: Vec<u32> = Vec::with_capacity(n);
    for col in 0..n {
        if let Some(&x) = explicit.get(col) {
            let x = x.round();
            if x.is_finite() && x >= 1.0 {
                columns.push(x.min(u32::MAX as f64) as u32);
                continue;
            }
            warn!(preset, col, value = x, "Invalid column X, deriving from margins");
        }

        let x = match (n, col) {
            (_, 0) => layout.left_label_x,
            (2, 1) => layout.right_label_x,
            _ => columns[col - 1]
                .saturating_add(content_width)
                .saturating_add(layout.middle_gap),
        };
        columns.push(x);
    }
    columns
}

/// Columns per row, defaulted like any dot field and capped at [`MAX_LABELS_PER_ROW`]
fn capped_labels_per_row(preset: &str, value: Option<f64>) -> u32 {
    let n = dots(preset, "labels_per_row", value, DEFAULT_LABELS_PER_ROW);
    if n > MAX_LABELS_PER_ROW {
        warn!(
            preset,
            labels_per_row = n,
            max = MAX_LABELS_PER_ROW,
            "Too many labels per row, capping"
        );
        return MAX_LABELS_PER_ROW;
    }
    n
}

/// `Some(v)` for a finite, positive value; logs anything else
fn positive(preset: &str, field: &'static str, value: Option<f64>) -> Option<f64> {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => Some(v),
        Some(v) if v == 0.0 => {
            debug!(preset, field, "Geometry field is zero, using default");
            None
        }
        Some(v) => {
            warn!(preset, field, value = v, "Invalid geometry value, using default");
            None
        }
        None => {
            debug!(preset, field, "Geometry field missing, using default");
            None
        }
    }
}

fn millimetres(preset: &str, field: &'static str, value: Option<f64>, default: f64) -> f64 {
    positive(preset, field, value).unwrap_or(default)
}

/// Whole-number field; values rounding to 0 use the default
fn dots(preset: &str, field: &'static str, value: Option<f64>, default: u32) -> u32 {
    match positive(preset, field, value).map(f64::round) {
        Some(v) if v >= 1.0 => v.min(u32::MAX as f64) as u32,
        Some(_) => {
            debug!(preset, field, "Geometry field rounds to zero, using default");
            default
        }
        None => default,
    }
}
