//! Core CLI definitions

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use dexforge::Script;

use super::compile::IntentArgs;
use super::corpus::{KindArg, SearchFilters};

#[derive(Parser)]
#[command(name = "dexforge")]
#[command(about = "Battle record corpus tools and custom move compiler", long_about = None)]
pub struct Cli {
    /// More log output on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract records from a corpus file or directory as JSON
    #[command(visible_alias = "x")]
    Extract {
        /// Corpus file or directory (defaults to the configured reference corpus)
        corpus: Option<PathBuf>,

        /// Record kind to extract
        #[arg(short, long, value_enum, default_value = "move")]
        kind: KindArg,

        /// Write JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Search moves in a corpus
    #[command(visible_alias = "s")]
    Search {
        /// Corpus file or directory (defaults to the configured moves corpus)
        corpus: Option<PathBuf>,

        #[command(flatten)]
        filters: SearchFilters,

        /// Show the first move that uses the same channel as this effect
        #[arg(long, conflicts_with_all = ["damage_type", "category", "power_min", "power_max"])]
        effect: Option<String>,

        /// Print full records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize a corpus
    Stats {
        /// Corpus file or directory (defaults to the configured reference corpus)
        corpus: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value = "move")]
        kind: KindArg,

        #[arg(long)]
        json: bool,
    },

    /// Compile one effect intent into a move record
    #[command(visible_alias = "c")]
    Compile {
        #[command(flatten)]
        intent_args: IntentArgs,

        /// Read the intent from a JSON, YAML or TOML file instead of flags
        #[arg(short, long, value_name = "FILE", conflicts_with = "name")]
        intent: Option<PathBuf>,

        /// Numeric id (must be negative; defaults to the configured start)
        #[arg(long, allow_negative_numbers = true)]
        num: Option<i32>,

        /// Print the record as JSON instead of corpus source
        #[arg(long)]
        json: bool,
    },

    /// Compile a list of intents into one collection
    #[command(visible_alias = "b")]
    Batch {
        /// JSON, YAML or TOML file holding the intents
        file: PathBuf,

        /// Numeric id of the first intent; later intents count down
        #[arg(long, allow_negative_numbers = true)]
        num_start: Option<i32>,

        /// Write the collection here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the records as JSON instead of corpus source
        #[arg(long)]
        json: bool,
    },

    /// Insert soft-wrap points into a description
    #[command(visible_alias = "r")]
    Reflow {
        /// Text to annotate (reads stdin when absent)
        text: Option<String>,

        #[arg(short, long, value_enum, default_value = "auto")]
        script: ScriptArg,
    },

    /// Check rendered move source for missing or inconsistent fields
    #[command(visible_alias = "v")]
    Validate {
        /// File holding the record (reads stdin when absent or `-`)
        file: Option<PathBuf>,
    },

    /// Configure default settings
    Configure {
        /// Directory holding moves.{ts,js} and abilities.{ts,js}
        #[arg(long)]
        reference_dir: Option<PathBuf>,

        /// First numeric id for compiled records
        #[arg(long, allow_negative_numbers = true)]
        num_start: Option<i32>,

        /// Default number of search results
        #[arg(long)]
        search_limit: Option<usize>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

/// Writing system for `reflow`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ScriptArg {
    /// Detect from the text
    #[default]
    Auto,
    Cjk,
    Latin,
}

impl ScriptArg {
    pub fn resolve(self, text: &str) -> Script {
        match self {
            ScriptArg::Auto => Script::detect(text),
            ScriptArg::Cjk => Script::Cjk,
            ScriptArg::Latin => Script::Latin,
        }
    }
}
