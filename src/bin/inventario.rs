//! CLI front end for the inventory store.
//!
//! Usage:
//!   inventario add [FILE]              (reads stdin without FILE)
//!   inventario list [--search TERM]
//!   inventario delete <ID>
//!   inventario clear [--yes]
//!   inventario export [--search TERM] [-o PATH]
//!
//! The collection lives in a JSON file chosen with `--store` or
//! `INVENTARIO_STORE`.

use clap::{Parser, Subcommand};
use inventario::{
    Inventory, JsonFile, export_csv, export_file_name_now, format_date,
    format_quantity,
};
use std::error::Error;
use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Track product batches by expiry date.
#[derive(Parser)]
#[command(name = "inventario")]
struct Cli {
    /// JSON file holding the collection
    #[arg(long, env = "INVENTARIO_STORE", default_value = "inventario.json", global = true)]
    store: PathBuf,

    /// Log store operations on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse batch lines and add them to the collection
    Add {
        /// File with one `AxB name (DD/MM/YY)` line per batch (default: stdin)
        file: Option<PathBuf>,
    },
    /// Show records, soonest expiring first
    List {
        /// Only names containing this text (case-insensitive)
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Remove one record by id
    Delete {
        /// Record id as printed by `list`
        id: Uuid,
    },
    /// Remove every record
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Write the visible records as CSV
    Export {
        /// Only names containing this text (case-insensitive)
        #[arg(short, long, default_value = "")]
        search: String,

        /// Output file, `-` for stdout (default: inventario-<date>.csv)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut inventory = Inventory::load(JsonFile::new(&cli.store))?;
    tracing::debug!(
        store = %inventory.storage().path().display(),
        records = inventory.len(),
        "opened store"
    );

    match cli.command {
        Command::Add { file } => {
            let text = match &file {
                Some(path) => fs::read_to_string(path)
                    .map_err(|e| format!("reading '{}': {e}", path.display()))?,
                None => {
                    let mut text = String::new();
                    io::stdin().read_to_string(&mut text)?;
                    text
                }
            };
            let added = inventory.submit_now(&text)?;
            eprintln!("Agregados {added} productos ({} en total)", inventory.len());
        }
        Command::List { search } => {
            let view = inventory.visible(&search);
            if view.is_empty() {
                if inventory.is_empty() {
                    println!("No hay productos aún.");
                } else {
                    println!("Ningún producto coincide con \"{search}\".");
                }
                return Ok(());
            }
            let mut out = io::stdout().lock();
            for v in &view {
                writeln!(
                    out,
                    "{}  {:>4}d  {:<11}  {:>10} unidades  {:>10}  {}",
                    v.record.id(),
                    v.record.days_remaining(),
                    v.status.badge(),
                    format_quantity(v.record.total_quantity()),
                    format_date(v.record.expiry_date()),
                    v.record.product_name(),
                )?;
            }
        }
        Command::Delete { id } => {
            if !inventory.delete(id)? {
                return Err(format!("no record with id {id}").into());
            }
        }
        Command::Clear { yes } => {
            if yes || confirm("¿Estás seguro de que deseas limpiar toda la lista?")? {
                inventory.clear()?;
            }
        }
        Command::Export { search, output } => {
            let view = inventory.visible(&search);
            let csv = export_csv(&view)?;
            match output.as_deref() {
                Some("-") => {
                    let mut out = io::stdout().lock();
                    out.write_all(csv.as_bytes())?;
                    writeln!(out)?;
                }
                path => {
                    let path = path.map(str::to_string).unwrap_or_else(export_file_name_now);
                    write_file(Path::new(&path), &csv)?;
                    eprintln!("Exportados {} productos a {path}", view.len());
                }
            }
        }
    }

    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .map_err(|e| format!("creating output directory for '{}': {e}", path.display()))?;
    }
    fs::write(path, contents).map_err(|e| format!("writing '{}': {e}", path.display()))?;
    Ok(())
}

fn confirm(question: &str) -> io::Result<bool> {
    eprint!("{question} [s/N] ");
    io::stderr().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "s" | "si" | "sí" | "y" | "yes"))
}
