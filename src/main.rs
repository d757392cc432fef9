//! tablejoin - keyed entity tables for workspace stores

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use tablejoin::config::{Config, OutputFormat, UnmatchedPolicy};
use tablejoin::output::{render_report_to_stdout, render_rows_to_stdout};
use tablejoin::parser::ParserFactory;
use tablejoin::store::{DirectoryLister, ListingFile, LocalStore, ObjectLister};
use tablejoin::Workspace;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Terminal,
    Json,
    Tsv,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Terminal => OutputFormat::Terminal,
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Tsv => OutputFormat::Tsv,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliUnmatched {
    Drop,
    BlankFill,
}

impl From<CliUnmatched> for UnmatchedPolicy {
    fn from(u: CliUnmatched) -> Self {
        match u {
            CliUnmatched::Drop => UnmatchedPolicy::Drop,
            CliUnmatched::BlankFill => UnmatchedPolicy::BlankFill,
        }
    }
}

/// Build, key and outer-join sample entity tables
#[derive(Parser, Debug)]
#[command(name = "tablejoin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the workspace tables
    #[arg(
        short,
        long,
        global = true,
        env = "TABLEJOIN_WORKSPACE",
        default_value = ".tablejoin"
    )]
    workspace: PathBuf,

    /// Value written into cells missing after an outer join
    #[arg(long, global = true, default_value = "")]
    blank: String,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "terminal")]
    format: CliOutputFormat,

    /// More logging (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a sample/cram/crai table from an object listing and upload it
    CramCrai {
        /// Name of the table to create
        table: String,

        #[command(flatten)]
        source: ListingSource,

        /// Only keys starting with this prefix (a subdirectory with --dir)
        #[arg(long, default_value = "")]
        prefix: String,

        /// Name of the sample column
        #[arg(long, default_value = tablejoin::config::DEFAULT_SAMPLE_COLUMN)]
        sample_column: String,

        /// What to do with samples missing a cram or a crai
        #[arg(long, value_enum, default_value = "drop")]
        unmatched: CliUnmatched,
    },

    /// Upload rows from a local JSON, TSV or CSV file as a new table
    Upload {
        /// Name of the table to create
        table: String,

        /// File holding the rows
        file: PathBuf,
    },

    /// Outer-join tables on a key column and upload the result
    Join {
        /// Name of the joined table to create
        new_table: String,

        /// Tables to join, in order
        #[arg(required = true)]
        tables: Vec<String>,

        /// Column shared by all tables
        #[arg(short, long)]
        key: String,

        /// Read the source tables one at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Print the rows of a table
    Show {
        /// Table to print
        table: String,

        /// Check the table is keyed uniquely on this column
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Print a table as JSON columns (always JSON, ignores --format)
    Columns {
        /// Table to print
        table: String,
    },

    /// Delete a table
    Delete {
        /// Table to delete
        table: String,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct ListingSource {
    /// File with one object key per line
    #[arg(long)]
    listing: Option<PathBuf>,

    /// Local directory to list
    #[arg(long)]
    dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli.format.into();
    let mut config = Config::new()
        .with_blank_cell_value(cli.blank)
        .with_output_format(format);

    let store = LocalStore::open(&cli.workspace).with_context(|| {
        format!("Failed to open workspace: {}", cli.workspace.display())
    })?;

    match cli.command {
        Commands::CramCrai {
            table,
            source,
            prefix,
            sample_column,
            unmatched,
        } => {
            config = config
                .with_sample_column(sample_column)
                .with_unmatched_policy(unmatched.into());
            let lister: Box<dyn ObjectLister> = match (source.listing, source.dir) {
                (Some(path), _) => Box::new(ListingFile::new(path)),
                (None, Some(dir)) => Box::new(DirectoryLister::new(dir)),
                (None, None) => anyhow::bail!("one of --listing or --dir is required"),
            };

            let ws = Workspace::new(store, config);
            let report = ws
                .create_cram_crai_table(&table, lister.as_ref(), &prefix)
                .with_context(|| format!("Failed to create table '{}'", table))?;
            render_report_to_stdout(&table, &report, ws.config().output_format)?;
        }

        Commands::Upload { table, file } => {
            let rows = ParserFactory::new()
                .parse(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let ws = Workspace::new(store, config);
            ws.upload_rows(&table, &rows)
                .with_context(|| format!("Failed to upload table '{}'", table))?;
            log::info!("uploaded {} rows to '{}'", rows.len(), table);
        }

        Commands::Join {
            new_table,
            tables,
            key,
            sequential,
        } => {
            config = config.with_parallel_reads(!sequential);
            let ws = Workspace::new(store, config);
            let joined = ws
                .join_data_tables(&new_table, &tables, &key)
                .with_context(|| format!("Failed to join {} on '{}'", tables.join(", "), key))?;
            render_rows_to_stdout(&new_table, &joined.to_rows(&key), ws.config().output_format)?;
        }

        Commands::Show { table, key } => {
            let ws = Workspace::new(store, config);
            let rows = match key {
                Some(key) => ws.get_keyed_rows(&table, &key)?.to_rows(&key),
                None => ws.list_rows(&table)?,
            };
            render_rows_to_stdout(&table, &rows, ws.config().output_format)?;
        }

        Commands::Columns { table } => {
            let ws = Workspace::new(store, config);
            let columns = ws.get_columns(&table)?;
            println!("{}", serde_json::to_string_pretty(&columns)?);
        }

        Commands::Delete { table } => {
            let ws = Workspace::new(store, config);
            ws.delete_table(&table)
                .with_context(|| format!("Failed to delete table '{}'", table))?;
        }
    }

    Ok(())
}
