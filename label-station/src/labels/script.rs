//! Script assembly: the full pipeline from selection to TSPL text

use std::fmt;

use tracing::{info, instrument};
use tspl_printer::TsplBuilder;

use super::expander::expand_lines;
use super::geometry::LabelGeometry;
use super::packer::pack_rows;
use super::renderer::{LabelRenderer, RenderOptions};
use super::types::PrintableLine;

/// Assembled TSPL command script
#[derive(Debug, Clone, PartialEq)]
pub struct CommandScript {
    lines: Vec<String>,
    labels: usize,
    rows: usize,
}

impl CommandScript {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of label instances in the script
    pub fn label_count(&self) -> usize {
        self.labels
    }

    /// Number of print passes (`PRINT 1` blocks)
    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Script text, every line newline-terminated
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for CommandScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Build the script for `lines` with default rendering options
pub fn assemble(geometry: &LabelGeometry, lines: &[PrintableLine]) -> CommandScript {
    assemble_with(geometry, lines, RenderOptions::default())
}

/// Expand, pack, render: preamble first, then one block per row
#[instrument(skip(geometry, lines), fields(preset = %geometry.name, lines = lines.len()))]
pub fn assemble_with(
    geometry: &LabelGeometry,
    lines: &[PrintableLine],
    options: RenderOptions,
) -> CommandScript {
    let labels = expand_lines(lines);
    let rows = pack_rows(&labels, geometry.labels_per_row);
    let renderer = LabelRenderer::new(geometry).with_options(options);

    let mut b = TsplBuilder::new();
    renderer.render_preamble(&mut b);
    for row in &rows {
        renderer.render_row(&mut b, row);
    }

    info!(
        labels = labels.len(),
        rows = rows.len(),
        commands = b.len(),
        "Label script assembled"
    );

    CommandScript {
        rows: rows.len(),
        labels: labels.len(),
        lines: b.into_lines(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(code: &str, name: &str, price: f64, qty: f64) -> PrintableLine {
        PrintableLine {
            item_code: code.to_string(),
            display_name: name.to_string(),
            barcode_value: code.to_string(),
            unit_price: price,
            print_quantity: Some(qty),
        }
    }

    #[test]
    fn test_preamble_is_deterministic() {
        let g = LabelGeometry::fallback();
        let a = assemble(&g, &[line("1", "A", 1.0, 1.0)]);
        let b = assemble(&g, &[line("2", "B", 2.0, 3.0)]);
        assert_eq!(a.lines()[..6], b.lines()[..6]);
        assert!(a.render().starts_with(
            "SIZE 70 mm, 15 mm\nGAP 3 mm, 0 mm\nSPEED 4\nDENSITY 8\nDIRECTION 1\n\n"
        ));
    }

    #[test]
    fn test_counts() {
        let g = LabelGeometry::fallback();
        let script = assemble(&g, &[line("1", "A", 1.0, 2.0), line("2", "B", 2.0, 3.0)]);
        assert_eq!(script.label_count(), 5);
        assert_eq!(script.row_count(), 3);
        assert_eq!(script.lines().iter().filter(|l| *l == "CLS").count(), 3);
        assert_eq!(script.lines().iter().filter(|l| *l == "PRINT 1").count(), 3);
        // preamble 6 + rows (2 + 4 * columns) each
        assert_eq!(script.len(), 6 + 3 * 3 + 5 * 4);
    }

    #[test]
    fn test_render_terminates_every_line() {
        let g = LabelGeometry::fallback();
        let script = assemble(&g, &[line("1", "A", 1.0, 1.0)]);
        let text = script.render();
        assert!(text.ends_with("PRINT 1\n\n"));
        assert_eq!(text.matches('\n').count(), script.len());
        assert_eq!(script.to_string(), text);
    }

    #[test]
    fn test_no_lines_only_preamble() {
        let g = LabelGeometry::fallback();
        let script = assemble(&g, &[]);
        assert_eq!(script.len(), 6);
        assert_eq!(script.row_count(), 0);
    }
}
