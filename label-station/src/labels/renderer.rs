//! Label renderer
//!
//! Renders packed rows into TSPL commands for N-up barcode labels.

use tracing::warn;
use tspl_printer::{TsplBuilder, escape_quoted, truncate_chars};

use super::geometry::LabelGeometry;
use super::types::{LabelInstance, Row};

/// Rendering switches
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderOptions {
    /// Also sanitise barcode values and item codes, not only names
    pub escape_all_fields: bool,
}

/// Label renderer
///
/// Every label gets four elements stacked at the column's X origin: the
/// truncated name, a Code 128 barcode, the barcode text and
/// `"<item code> Rs<price>"`.
pub struct LabelRenderer<'a> {
    geometry: &'a LabelGeometry,
    options: RenderOptions,
}

impl<'a> LabelRenderer<'a> {
    pub fn new(geometry: &'a LabelGeometry) -> Self {
        Self {
            geometry,
            options: RenderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Page setup, written once per script
    pub fn render_preamble(&self, b: &mut TsplBuilder) {
        let g = self.geometry;
        b.size(g.width, g.height)
            .gap(g.gap)
            .speed(g.speed)
            .density(g.density)
            .direction(1)
            .blank();
    }

    /// One print pass: clear, draw each present column, print
    pub fn render_row(&self, b: &mut TsplBuilder, row: &Row<'_>) {
        b.cls();
        for (col, label) in row.columns() {
            self.render_label(b, self.geometry.x_for(col), label);
        }
        b.print(1).blank();
    }

    fn render_label(&self, b: &mut TsplBuilder, x: u32, label: &LabelInstance) {
        let g = self.geometry;
        let name = label_name(&label.display_name, g.text_max_chars);
        let barcode = self.field(&label.barcode_value);
        let item_code = self.field(&label.item_code);
        let price = format_price(label.unit_price);

        b.text(x, g.name_y, &name)
            .barcode_128(x, g.barcode_y, g.barcode_height, g.barcode_width, &barcode)
            .text(x, g.barcode_text_y, &barcode)
            .text(x, g.price_y, &format!("{} Rs{}", item_code, price));
    }

    fn field(&self, value: &str) -> String {
        if self.options.escape_all_fields {
            escape_quoted(value)
        } else {
            value.to_string()
        }
    }
}

/// Name as printed: first `max_chars` characters, then sanitised
pub fn label_name(name: &str, max_chars: usize) -> String {
    escape_quoted(&truncate_chars(name, max_chars))
}

/// Price rounded to a whole number, no decimal point or separators
pub fn format_price(price: f64) -> String {
    if !price.is_finite() {
        warn!(price, "Non-finite price, printing 0");
        return "0".to_string();
    }
    // + 0.0 turns -0 into 0
    format!("{:.0}", price.round() + 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::geometry::GeometryRecord;

    fn label(name: &str, barcode: &str, code: &str, price: f64) -> LabelInstance {
        LabelInstance {
            display_name: name.to_string(),
            barcode_value: barcode.to_string(),
            item_code: code.to_string(),
            unit_price: price,
        }
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(149.6), "150");
        assert_eq!(format_price(0.0), "0");
        assert_eq!(format_price(99.0), "99");
        assert_eq!(format_price(2.5), "3");
        assert_eq!(format_price(1234567.4), "1234567");
        assert_eq!(format_price(-0.4), "0");
        assert_eq!(format_price(-2.6), "-3");
        assert_eq!(format_price(f64::NAN), "0");
    }

    #[test]
    fn test_label_name_truncates_then_escapes() {
        assert_eq!(label_name("Widget Alpha Deluxe", 14), "Widget Alpha D");
        assert_eq!(label_name(r#"He said "hi"\now"#, 14), "He said 'hi'n");
        assert_eq!(label_name(r#"He said "hi"\now"#, 40), "He said 'hi'now");
    }

    #[test]
    fn test_preamble() {
        let g = LabelGeometry::fallback();
        let mut b = TsplBuilder::new();
        LabelRenderer::new(&g).render_preamble(&mut b);
        assert_eq!(
            b.into_lines(),
            vec![
                "SIZE 70 mm, 15 mm",
                "GAP 3 mm, 0 mm",
                "SPEED 4",
                "DENSITY 8",
                "DIRECTION 1",
                "",
            ]
        );
    }

    #[test]
    fn test_single_column_row() {
        let g = LabelGeometry::fallback();
        let labels = vec![label("Gadget", "2001", "G-1", 5.0)];
        let mut b = TsplBuilder::new();
        LabelRenderer::new(&g).render_row(&mut b, &Row::new(&labels));

        assert_eq!(
            b.into_lines(),
            vec![
                "CLS",
                r#"TEXT 8,2,"1",0,1,1,"Gadget""#,
                r#"BARCODE 8,16,"128",60,0,0,2,4,"2001""#,
                r#"TEXT 8,80,"1",0,1,1,"2001""#,
                r#"TEXT 8,96,"1",0,1,1,"G-1 Rs5""#,
                "PRINT 1",
                "",
            ]
        );
    }

    #[test]
    fn test_custom_positions() {
        let g = LabelGeometry::from_record(GeometryRecord {
            name: "custom".to_string(),
            labels_per_row: Some(1.0),
            left_label_x: Some(20.0),
            name_y: Some(4.0),
            barcode_y: Some(20.0),
            barcode_text_y: Some(90.0),
            price_y: Some(110.0),
            barcode_width: Some(3.0),
            barcode_height: Some(70.0),
            text_max_chars: Some(4.0),
            ..Default::default()
        });
        let labels = vec![label("Sprocket", "3001", "S-1", 1.0)];
        let mut b = TsplBuilder::new();
        LabelRenderer::new(&g).render_row(&mut b, &Row::new(&labels));
        let lines = b.into_lines();

        assert_eq!(lines[1], r#"TEXT 20,4,"1",0,1,1,"Spro""#);
        assert_eq!(lines[2], r#"BARCODE 20,20,"128",70,0,0,3,4,"3001""#);
        assert_eq!(lines[3], r#"TEXT 20,90,"1",0,1,1,"3001""#);
        assert_eq!(lines[4], r#"TEXT 20,110,"1",0,1,1,"S-1 Rs1""#);
    }

    #[test]
    fn test_barcode_and_code_verbatim_by_default() {
        let g = LabelGeometry::fallback();
        let labels = vec![label("N", r#"12"3"#, r"A\B", 1.0)];

        let mut b = TsplBuilder::new();
        LabelRenderer::new(&g).render_row(&mut b, &Row::new(&labels));
        let lines = b.into_lines();
        assert_eq!(lines[3], r#"TEXT 8,80,"1",0,1,1,"12"3""#);
        assert_eq!(lines[4], r#"TEXT 8,96,"1",0,1,1,"A\B Rs1""#);

        let mut b = TsplBuilder::new();
        LabelRenderer::new(&g)
            .with_options(RenderOptions {
                escape_all_fields: true,
            })
            .render_row(&mut b, &Row::new(&labels));
        let lines = b.into_lines();
        assert_eq!(lines[2], r#"BARCODE 8,16,"128",60,0,0,2,4,"12'3""#);
        assert_eq!(lines[3], r#"TEXT 8,80,"1",0,1,1,"12'3""#);
        assert_eq!(lines[4], r#"TEXT 8,96,"1",0,1,1,"AB Rs1""#);
    }
}
