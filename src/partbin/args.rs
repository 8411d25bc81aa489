use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "partbin")]
#[command(about = "Bin-addressed parts inventory with LED pick-to-light guidance", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory (catalogue, changelog, config.json)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Run without the LED controller even if one is configured
    #[arg(long, global = true)]
    pub no_device: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all catalogued components
    #[command(alias = "ls")]
    List,

    /// Add a component (auto-assigns a bin when --location is omitted)
    Add {
        part_number: String,
        count: i64,

        /// Explicit bin code (e.g. 3F), or a shared "bin" label
        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        manufacturer: Option<String>,

        #[arg(long = "type")]
        part_type: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Flag for replenishment below this count
        #[arg(long)]
        low_stock: Option<i64>,

        /// Skip the near-duplicate check
        #[arg(long)]
        force: bool,
    },

    /// Fold units into an existing record (accepting a suggestion)
    Merge { part_number: String, count: i64 },

    /// Search every part and metadata field
    Search { term: String },

    /// Take parts out of a bin
    Checkout { part_number: String, qty: i64 },

    /// Delete the component at a list index
    #[command(alias = "rm")]
    Delete { index: usize },

    /// Restore the most recently deleted component
    Undo,

    /// Catalogue statistics
    Stats,

    /// Components below their low-stock threshold
    LowStock,

    /// Consume stock for a board build from a BOM rows file (JSON)
    BomOut {
        rows_file: PathBuf,
        board: String,
    },

    /// Settle returned vials from a BOM rows file (JSON)
    BomReturn {
        rows_file: PathBuf,

        /// Signed count adjustments, PART=DELTA (repeatable)
        #[arg(long = "adjust", value_name = "PART=DELTA")]
        adjustments: Vec<String>,
    },

    /// Light the bin for a location (debounced)
    Highlight {
        code: String,

        #[arg(long, default_value_t = 50)]
        delay_ms: u64,
    },

    /// Light several bins, staggered
    LightAll {
        #[arg(required = true, num_args = 1..)]
        codes: Vec<String>,

        #[arg(long, default_value_t = 30)]
        stagger_ms: u64,
    },

    /// Turn one bin's LED off
    Off { code: String },

    /// Turn off the recently lit bins (or the whole strip with --all)
    Clear {
        #[arg(long)]
        all: bool,
    },

    /// Copy the catalogue file into backups/ now
    Backup,
}
