//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the lawg binary.

use clap::{Args, Parser, Subcommand};

use crate::Pagination;

/// lawg API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "lawg", about = "lawg API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Namespace of the project to act on.
    #[arg(long, short, global = true, env = "LAWG_PROJECT")]
    pub project: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the project.
    Project,

    /// List feeds in the project.
    Feeds {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Create a log in a feed.
    Log {
        /// Feed to log to.
        feed: String,

        /// Log title.
        #[arg(long)]
        title: String,

        /// Log description.
        #[arg(long)]
        description: Option<String>,

        /// Log emoji.
        #[arg(long)]
        emoji: Option<String>,

        /// Notify project members.
        #[arg(long)]
        notify: bool,
    },

    /// List logs in a feed.
    Logs {
        /// Feed to list.
        feed: String,

        #[command(flatten)]
        page: PageArgs,
    },

    /// List insights in the project.
    Insights {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Change an insight's value.
    Insight {
        #[command(subcommand)]
        action: InsightAction,
    },
}

/// Ways to change an insight's value.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum InsightAction {
    /// Replace the value.
    Set {
        /// Insight id (`insight_...`).
        id: String,
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// Add to the value. Negative amounts decrement.
    Increment {
        /// Insight id (`insight_...`).
        id: String,
        #[arg(allow_negative_numbers = true)]
        amount: f64,
    },
}

/// Pagination flags shared by list commands.
#[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageArgs {
    /// Number of items per page (1-100).
    #[arg(long)]
    pub limit: Option<u32>,

    /// Number of items to skip.
    #[arg(long)]
    pub offset: Option<u32>,
}

impl From<PageArgs> for Pagination {
    fn from(args: PageArgs) -> Self {
        Self {
            limit: args.limit,
            offset: args.offset,
        }
    }
}
