//! depgrid command-line driver
//!
//! Loads a CSV, TSV or JSON file into a table engine, applies filters, a
//! sort and hidden columns, then prints the view or writes an extract.

mod filter_spec;
mod logging;
mod render;
mod settings_file;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use depgrid_core::Row;
use depgrid_interchange::{CsvReadOptions, read_csv, rows_from_json};
use depgrid_table::{Delimiter, EngineSettings, ExtractOptions, TableEngine};

use crate::logging::LoggingConfig;

#[derive(Parser, Debug)]
#[command(name = "depgrid", version, about = "Filter, sort and export tabular screening data")]
struct Cli {
    /// Engine settings file (JSON)
    #[arg(long, global = true, env = "DEPGRID_CONFIG")]
    config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the filtered, sorted table
    View {
        #[command(flatten)]
        table: TableArgs,

        /// Show at most this many rows
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Write the filtered, sorted table as CSV or TSV
    Export {
        #[command(flatten)]
        table: TableArgs,

        /// Keep hidden columns in the extract
        #[arg(long)]
        include_hidden: bool,

        /// Tab-separated output
        #[arg(long)]
        tsv: bool,

        /// Use column display names in the header line
        #[arg(long)]
        display_names: bool,

        /// Write every row in source order, ignoring filters and sort
        #[arg(long)]
        all: bool,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List resolved columns with their types and summaries
    Columns {
        /// CSV, TSV or JSON file
        file: PathBuf,

        /// Column holding the row id
        #[arg(long)]
        id: Option<String>,

        /// Print the column headers as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct TableArgs {
    /// CSV, TSV or JSON file
    file: PathBuf,

    /// Column holding the row id
    #[arg(long)]
    id: Option<String>,

    /// Filter: `col~text`, `col=a|b` or `col:min..max[!]`
    #[arg(long = "filter", value_name = "SPEC")]
    filters: Vec<String>,

    /// Sort: `col` or `col:desc`
    #[arg(long, value_name = "SPEC")]
    sort: Option<String>,

    /// Column to hide
    #[arg(long = "hide", value_name = "COLUMN")]
    hidden: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = if cli.verbose {
        LoggingConfig::verbose()
    } else {
        LoggingConfig::default()
    };
    config.json = cli.log_json;
    logging::init(config)?;

    let stdout = std::io::stdout();
    run(cli, &mut stdout.lock())
}

fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let mut settings = settings_file::load(cli.config.as_deref())?;

    match cli.command {
        Command::View { table, limit } => {
            let mut engine = build_engine(&table, settings)?;
            if engine.view().placeholder {
                writeln!(out, "No rows match the current filters")?;
            } else {
                writeln!(out, "{}", render::view_table(&mut engine, limit))?;
            }
            let view = engine.view();
            writeln!(out, "{} of {} rows", view.visible_count(), view.total_rows)?;
        }
        Command::Export {
            table,
            include_hidden,
            tsv,
            display_names,
            all,
            output,
        } => {
            let engine = build_engine(&table, settings)?;
            let options = ExtractOptions {
                delimiter: if tsv { Delimiter::Tab } else { Delimiter::Comma },
                include_headers: true,
                use_display_names: display_names,
            };
            let extract = if all {
                engine.export_full_extract(include_hidden, &options)?
            } else {
                engine.export_extract(include_hidden, &options)?
            };

            match output {
                Some(path) => {
                    std::fs::write(&path, extract)
                        .with_context(|| format!("Failed to write extract: {:?}", path))?;
                    tracing::info!(path = %path.display(), "Extract written");
                }
                None => out.write_all(extract.as_bytes())?,
            }
        }
        Command::Columns { file, id, json } => {
            if id.is_some() {
                settings.id_column = id;
            }
            let mut engine = TableEngine::new(settings).context("Invalid engine settings")?;
            engine.set_data(load_rows(&file)?);
            if json {
                let headers = engine.header();
                writeln!(out, "{}", serde_json::to_string_pretty(&headers)?)?;
            } else {
                writeln!(out, "{}", render::columns_table(&mut engine))?;
            }
        }
    }

    Ok(())
}

/// Load the file and apply the table arguments
fn build_engine(args: &TableArgs, mut settings: EngineSettings) -> Result<TableEngine> {
    if let Some(id) = &args.id {
        settings.id_column = Some(id.clone());
    }
    let mut engine = TableEngine::new(settings).context("Invalid engine settings")?;
    engine.set_data(load_rows(&args.file)?);

    // Hide before filtering: hiding drops any filter already on the column
    for column in &args.hidden {
        if engine.column(column).is_none() {
            tracing::warn!("Hiding unknown column {}", column);
        }
        engine.hide_column(column);
    }
    for spec in &args.filters {
        let (column, filter) = filter_spec::parse_filter(spec)?;
        if engine.column(&column).is_none() {
            tracing::warn!("Filter on unknown column {} has no effect", column);
        }
        engine.set_filter(&column, Some(filter));
    }
    if let Some(spec) = &args.sort {
        let (column, direction) = filter_spec::parse_sort(spec)?;
        engine.sort_by(&column, direction);
    }

    Ok(engine)
}

/// Read rows from a file, picking the format from its extension
fn load_rows(path: &Path) -> Result<Vec<Row>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {:?}", path))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let rows = match extension.as_deref() {
        Some("json") => rows_from_json(&text),
        Some("tsv") | Some("tab") => read_csv(
            &text,
            &CsvReadOptions {
                delimiter: Delimiter::Tab,
                ..Default::default()
            },
        ),
        _ => read_csv(&text, &CsvReadOptions::default()),
    }
    .with_context(|| format!("Failed to load rows from {:?}", path))?;

    tracing::debug!(rows = rows.len(), path = %path.display(), "Loaded rows");
    Ok(rows)
}
