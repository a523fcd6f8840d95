use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One reduced feature per line
    Text,
    /// JSON array of reduced features
    Json,
    /// Flattened numeric vector as a JSON array
    Flat,
}

#[derive(Parser, Debug)]
#[command(name = "propsig")]
#[command(about = "Property signatures for program synthesis values", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to the nearest .propsig.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the widths of every fixed-length block
    Layout {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Signature of a set of I/O examples
    Io {
        /// JSON array of input columns, each holding one object per example
        #[arg(long)]
        inputs: String,

        /// JSON array holding the output object of each example
        #[arg(long)]
        output: String,

        /// Produce variable-length signatures regardless of configuration
        #[arg(long = "variable-length")]
        variable_length: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Signature of a concrete value with respect to the output
    Value {
        /// JSON array holding the value's object for each example
        #[arg(long)]
        value: String,

        /// JSON array holding the output object of each example
        #[arg(long)]
        output: String,

        /// Produce variable-length signatures regardless of configuration
        #[arg(long = "variable-length")]
        variable_length: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Write a default .propsig.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
