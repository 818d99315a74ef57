//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "larder",
    about = "Track purchases against a product catalog and summarize inventory",
    version
)]
pub struct Cli {
    /// Path of the state file (defaults to the platform data directory).
    #[arg(long, global = true, env = "LARDER_STORE")]
    pub store: Option<PathBuf>,

    /// Path of a catalog JSON file (category -> products mapping); the
    /// built-in catalog is used when omitted.
    #[arg(long, global = true, env = "LARDER_CATALOG")]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse the catalog, optionally filtered.
    Catalog {
        /// Case-insensitive substring filter.
        query: Option<String>,

        /// Restrict to one category (exact name).
        #[arg(long)]
        category: Option<String>,
    },

    /// Add a line item to the draft.
    Add {
        /// Catalog category (exact name).
        category: String,

        /// Product within the category (exact name).
        product: String,

        /// Quantity in kg; the price is derived from the catalog unit price.
        quantity: String,
    },

    /// Show the draft.
    List,

    /// Change the quantity of a draft item; its price is re-derived.
    Update {
        /// 1-based position in the draft (see `list`).
        position: usize,

        /// The new quantity in kg.
        quantity: String,
    },

    /// Remove one item from the draft.
    Remove {
        /// 1-based position in the draft (see `list`).
        position: usize,
    },

    /// Commit every draft item to the ledger and clear the draft.
    Commit,

    /// Show the committed entries and their grand total.
    Ledger,

    /// Show the aggregated inventory summary.
    Summary,
}

