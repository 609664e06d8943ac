//! # label-station
//!
//! Prints N-up barcode labels for the items of a business document on TSPL
//! thermal printers.
//!
//! This crate decides WHAT to print (geometry presets, quantity expansion,
//! row layout, field formatting); `tspl-printer` handles HOW.
//!
//! ```ignore
//! use label_station::labels::{GeometrySettings, JsonCatalog, PrintExecutor, PrintJob, assemble};
//!
//! let settings = GeometrySettings::load_or_fallback("label-settings.json");
//! let catalog = JsonCatalog::load("item-catalog.json")?;
//! let job = PrintJob::load("job.json")?;
//!
//! let preset = settings.resolve_preset(job.label_size.as_deref());
//! let lines = job.to_lines(&catalog, Some(&settings.default_price_list))?;
//! let script = assemble(preset, &lines);
//!
//! PrintExecutor::default()
//!     .print_to(settings.printer_for(preset), &script, &settings)
//!     .await?;
//! ```

pub mod config;
pub mod error;
pub mod labels;
pub mod logger;

pub use config::Config;
pub use error::{LabelError, LabelResult};
