//! CLI Module
//!
//! Command-line interface for the receptive field calculator.

pub mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::zoo::Architecture;

/// rfield - receptive field arithmetic for convolutional networks
#[derive(Parser, Debug)]
#[command(name = "rfield")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options shared by every report command
#[derive(Args, Debug, Clone, Default)]
pub struct ReportOptions {
    /// Override the input width/height
    #[arg(short = 'n', long)]
    pub input_size: Option<i64>,

    /// Print the trace as JSON instead of a text report
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Trace a built-in network
    #[command(name = "show")]
    Show {
        /// Network to trace
        #[arg(value_enum)]
        architecture: Architecture,

        #[command(flatten)]
        options: ReportOptions,
    },

    /// Trace a network described in a JSON topology file
    #[command(name = "file")]
    File {
        /// Path to the topology file
        path: PathBuf,

        #[command(flatten)]
        options: ReportOptions,
    },

    /// Trace every built-in network
    #[command(name = "all")]
    All,
}
