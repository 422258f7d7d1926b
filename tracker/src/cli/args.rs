use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};

use crate::{
    app_state::database::models::VersionId, cli::color_when::ColorWhen, consts::DEFAULT_CONFIG_PATH,
};

/// Track published rule texts and show how they changed
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Configuration file, created with defaults when missing
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,

    #[arg(
            long,
            global = true,
            value_name = "WHEN",
            default_value_t = ColorWhen::Auto,
            default_missing_value = "always",
            value_enum
        )]
    pub color: ColorWhen,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// List the tracked rules
    Rules,

    /// Fetch rules and record their text when it changed
    Audit {
        /// Rule to audit
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        rule_id: Option<String>,

        /// Audit every tracked rule concurrently
        #[arg(long)]
        all: bool,
    },

    /// List the archived versions of a rule, newest first
    History { rule_id: String },

    /// Print the full text of a version
    Show { version_id: VersionId },

    /// Show a side-by-side redline between two versions of a rule
    Diff {
        rule_id: String,

        /// Older version, defaults to the first one archived
        #[arg(long)]
        from: Option<VersionId>,

        /// Newer version, defaults to the latest one
        #[arg(long)]
        to: Option<VersionId>,

        /// Unchanged lines kept around each change
        #[arg(long, conflicts_with = "full")]
        context: Option<usize>,

        /// Show every line
        #[arg(long)]
        full: bool,
    },

    /// Delete every archived version of a rule
    Reset {
        rule_id: String,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Serve the JSON API
    Serve,
}
