use crate::core::auth::DEFAULT_ADMIN_PASSWORD;
use crate::core::response_store::DEFAULT_STORAGE_KEY;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Collect, inspect and export survey responses
#[derive(Parser, Debug)]
#[command(name = "survey-store")]
#[command(about = "Collect, inspect and export survey responses", long_about = None)]
pub struct CliArgs {
    /// Directory holding the response store
    #[arg(
        long = "store-dir",
        value_name = "DIR",
        env = "SURVEY_STORE_DIR",
        default_value = ".",
        global = true,
        help = "Directory holding the response store"
    )]
    pub store_dir: PathBuf,

    /// Key the CSV document is stored under
    #[arg(
        long = "storage-key",
        value_name = "KEY",
        env = "SURVEY_STORAGE_KEY",
        default_value = DEFAULT_STORAGE_KEY,
        global = true,
        help = "Key the CSV document is stored under"
    )]
    pub storage_key: String,

    /// Admin password required for exports
    #[arg(
        long = "admin-password",
        value_name = "PASSWORD",
        env = "SURVEY_ADMIN_PASSWORD",
        default_value = DEFAULT_ADMIN_PASSWORD,
        hide_default_value = true,
        hide_env_values = true,
        global = true,
        help = "Admin password required for exports"
    )]
    pub admin_password: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Validate and store one survey response
    Submit {
        /// Respondent name
        #[arg(long)]
        name: String,
        /// Contact phone number
        #[arg(long)]
        phone: String,
        /// Region (county or city)
        #[arg(long)]
        region: String,
        /// Occupation type
        #[arg(long)]
        occupation: String,
    },

    /// Print the stored CSV document (requires the admin password)
    List {
        /// Admin password
        #[arg(long, value_name = "PASSWORD", default_value = "")]
        password: String,
    },

    /// Print response counts by region and occupation
    Stats,

    /// Write a BOM-prefixed CSV export (requires the admin password)
    Export {
        /// Admin password
        #[arg(long, value_name = "PASSWORD", default_value = "")]
        password: String,
        /// Directory the export file is written to
        #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
        output_dir: PathBuf,
    },

    /// Validate and append every row of a CSV file
    Import {
        /// CSV file with the document header
        #[arg(value_name = "INPUT")]
        input_file: PathBuf,
    },
}
