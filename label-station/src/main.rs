use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use label_station::Config;
use label_station::labels::{
    GeometrySettings, ItemCatalog, JsonCatalog, PrintExecutor, PrintJob, assemble_with,
};
use label_station::logger::init_logger;

#[derive(Parser)]
#[command(
    name = "label-station",
    about = "Print barcode labels for document items on TSPL printers",
    version
)]
struct Cli {
    /// Geometry presets file
    #[arg(long, global = true, env = "LABEL_SETTINGS_PATH", value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Item catalog file (barcodes and prices)
    #[arg(long, global = true, env = "LABEL_CATALOG_PATH", value_name = "PATH")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate labels for a print job and send them to the printer
    Print(PrintArgs),
    /// List the configured label sizes
    Presets,
    /// List the selling price lists known to the catalog
    PriceLists,
    /// Check whether a label size's printer is reachable
    Check {
        /// Label size to check (defaults to the configured default)
        #[arg(long)]
        preset: Option<String>,
    },
}

#[derive(Args)]
struct PrintArgs {
    /// Print job JSON (document items as confirmed by the user)
    job: PathBuf,

    /// Label size, overriding the job's choice
    #[arg(long)]
    preset: Option<String>,

    /// Price list for catalog prices, overriding the job's choice
    #[arg(long)]
    price_list: Option<String>,

    /// Print to this queue or address instead of the preset's printer
    #[arg(long)]
    printer: Option<String>,

    /// Write the TSPL script instead of printing
    #[arg(long)]
    dry_run: bool,

    /// Script output file for --dry-run (stdout when omitted)
    #[arg(long, value_name = "PATH", requires = "dry_run")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(path) = cli.settings {
        config.settings_path = path;
    }
    if let Some(path) = cli.catalog {
        config.catalog_path = path;
    }

    init_logger(&config.log_level, config.log_json, config.log_dir.as_deref())?;

    let settings = GeometrySettings::load_or_fallback(&config.settings_path);

    match cli.command {
        Commands::Print(args) => print(&config, &settings, args).await,
        Commands::Presets => {
            for preset in settings.presets() {
                let marker = if preset.name == settings.default_label_size {
                    "*"
                } else {
                    " "
                };
                println!(
                    "{} {:<20} {}x{} mm, gap {} mm, {}-up -> {}",
                    marker,
                    preset.name,
                    preset.width,
                    preset.height,
                    preset.gap,
                    preset.labels_per_row,
                    settings.printer_for(preset),
                );
            }
            Ok(())
        }
        Commands::PriceLists => {
            let catalog = load_catalog(&config.catalog_path);
            for name in catalog.price_lists() {
                println!("{}", name);
            }
            Ok(())
        }
        Commands::Check { preset } => {
            let preset = settings.resolve_preset(preset.as_deref());
            let printer = settings.printer_for(preset);
            let executor = PrintExecutor::new(config.codepage.clone(), config.printer_timeout());
            let online = executor.is_online(printer, &settings).await?;
            println!("{}: {}", printer, if online { "online" } else { "offline" });
            if !online {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

async fn print(config: &Config, settings: &GeometrySettings, args: PrintArgs) -> Result<()> {
    let job = PrintJob::load(&args.job)
        .with_context(|| format!("Failed to load print job {}", args.job.display()))?;
    let catalog = load_catalog(&config.catalog_path);

    let preset = settings.resolve_preset(args.preset.as_deref().or(job.label_size.as_deref()));
    let price_list = args
        .price_list
        .or_else(|| job.price_list.clone())
        .unwrap_or_else(|| settings.default_price_list.clone());

    let job = PrintJob {
        price_list: Some(price_list),
        ..job
    };
    let lines = job.to_lines(&catalog, None)?;
    let script = assemble_with(preset, &lines, config.render_options());

    if args.dry_run {
        match args.output {
            Some(path) => std::fs::write(&path, script.render())
                .with_context(|| format!("Failed to write {}", path.display()))?,
            None => print!("{}", script),
        }
        return Ok(());
    }

    let printer = args
        .printer
        .as_deref()
        .unwrap_or_else(|| settings.printer_for(preset));
    let executor = PrintExecutor::new(config.codepage.clone(), config.printer_timeout());
    executor
        .print_to(printer, &script, settings)
        .await
        .with_context(|| format!("Failed to print to {}", printer))?;

    tracing::info!(
        document = job.document.as_deref().unwrap_or("-"),
        labels = script.label_count(),
        printer,
        "Printed successfully"
    );
    Ok(())
}

/// Catalog from file; a missing catalog still prints (code as barcode, price 0)
fn load_catalog(path: &Path) -> JsonCatalog {
    JsonCatalog::load(path).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Item catalog unavailable, using item codes and zero prices");
        JsonCatalog::empty()
    })
}
