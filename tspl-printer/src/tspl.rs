//! TSPL command builder
//!
//! Provides a fluent API for building TSPL command scripts. TSPL is line
//! oriented: every command is one line of text, so the builder keeps the
//! script as an ordered list of lines.

use std::fmt::Display;

/// Wide bar width used for Code 128 (ignored by the symbology, but required)
const CODE128_WIDE: u32 = 4;

/// TSPL command builder
///
/// String arguments are written verbatim between double quotes. TSPL has no
/// escape sequence for `"`, so callers must sanitise text first (see
/// [`escape_quoted`](crate::escape_quoted)).
#[derive(Debug, Clone, Default)]
pub struct TsplBuilder {
    lines: Vec<String>,
}

impl TsplBuilder {
    pub fn new() -> Self {
        Self {
            lines: Vec::with_capacity(64),
        }
    }

    /// Append a raw command line
    pub fn line(&mut self, s: impl Into<String>) -> &mut Self {
        self.lines.push(s.into());
        self
    }

    /// Append an empty line (separates setup and label blocks)
    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    // === Page Setup ===

    /// SIZE m mm, n mm - label width and height
    pub fn size(&mut self, width_mm: impl Display, height_mm: impl Display) -> &mut Self {
        self.line(format!("SIZE {} mm, {} mm", width_mm, height_mm))
    }

    /// GAP m mm, 0 mm - gap between labels, no offset
    pub fn gap(&mut self, gap_mm: impl Display) -> &mut Self {
        self.line(format!("GAP {} mm, 0 mm", gap_mm))
    }

    /// SPEED n - print speed (inch/sec)
    pub fn speed(&mut self, speed: impl Display) -> &mut Self {
        self.line(format!("SPEED {}", speed))
    }

    /// DENSITY n - print darkness (0-15)
    pub fn density(&mut self, density: impl Display) -> &mut Self {
        self.line(format!("DENSITY {}", density))
    }

    /// DIRECTION n - printout orientation
    pub fn direction(&mut self, direction: u8) -> &mut Self {
        self.line(format!("DIRECTION {}", direction))
    }

    // === Drawing ===

    /// CLS - clear the image buffer
    pub fn cls(&mut self) -> &mut Self {
        self.line("CLS")
    }

    /// TEXT x,y,"1",0,1,1,"content" - built-in font 1, no rotation, no scaling
    pub fn text(&mut self, x: u32, y: u32, content: &str) -> &mut Self {
        self.line(format!("TEXT {},{},\"1\",0,1,1,\"{}\"", x, y, content))
    }

    /// BARCODE x,y,"128",height,0,0,narrow,4,"content"
    ///
    /// Code 128 without the printer's own human readable line and no rotation.
    pub fn barcode_128(
        &mut self,
        x: u32,
        y: u32,
        height: u32,
        narrow: u32,
        content: &str,
    ) -> &mut Self {
        self.line(format!(
            "BARCODE {},{},\"128\",{},0,0,{},{},\"{}\"",
            x, y, height, narrow, CODE128_WIDE, content
        ))
    }

    // === Output ===

    /// PRINT n - print the buffer n times
    pub fn print(&mut self, copies: u32) -> &mut Self {
        self.line(format!("PRINT {}", copies))
    }

    // === Build ===

    /// Number of lines written so far
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Render the script, every line newline-terminated
    pub fn build(&self) -> String {
        let mut out = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// Consume the builder and return its lines
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}
