//! # tspl-printer
//!
//! TSPL label printer library - low-level printing capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - TSPL command building (page setup, text, Code 128 barcodes, print)
//! - Quoted-string helpers (truncation, escaping)
//! - Code page encoding of the final payload
//! - Network printing (raw TCP, port 9100)
//!
//! Business logic (WHAT to print) stays in application code:
//! - Label layout and row packing → label-station
//!
//! ## Example
//!
//! ```ignore
//! use tspl_printer::{NetworkPrinter, Printer, TsplBuilder};
//!
//! let mut b = TsplBuilder::new();
//! b.size(70.0, 15.0).gap(3.0).speed(4).density(8).direction(1).blank();
//! b.cls();
//! b.text(8, 2, "Widget Alpha");
//! b.barcode_128(8, 16, 60, 2, "1001");
//! b.print(1).blank();
//!
//! let printer = NetworkPrinter::new("192.168.1.100", 9100)?;
//! printer.print(b.build().as_bytes()).await?;
//! ```

mod encoding;
mod error;
mod printer;
mod tspl;

// Re-exports
pub use encoding::{encode_for_codepage, escape_quoted, truncate_chars};
pub use error::{PrintError, PrintResult};
pub use printer::{DEFAULT_PORT, NetworkPrinter, Printer};
pub use tspl::TsplBuilder;
