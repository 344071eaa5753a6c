//! Command-line argument definitions and parsing
//!
//! Each subcommand maps onto one query operation. Every subcommand accepts
//! the same file, step and output options, so any query can run over a
//! narrowed view of many documents.

use clap::{Args, Parser, Subcommand, ValueEnum};
use idxjson::InputFormat;
use std::path::PathBuf;

/// Main CLI application
#[derive(Parser)]
#[command(
    name = "idxjson",
    version,
    about = "Index and query nested JSON documents by tag, key/value and value",
    long_about = "idxjson flattens every object and array of a JSON or YAML document \
                  into a registry tagged by the property name each was found under, \
                  then answers lookups, filters and traversals over it. Queries can be \
                  chained with --step and run across whole directories."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Get the first node carrying a tag
    Tag(TagArgs),
    /// Get the first node whose key matches a value
    Get(KeyValueArgs),
    /// Get the tag of the first node whose key matches a value
    TagOf(KeyValueArgs),
    /// Collect nodes, or the values found under a key
    Values(CollectArgs),
    /// Collect tags, or the keys of the objects found under a key
    Keys(CollectArgs),
    /// Keep the nodes having a key, optionally matching a value
    Filter(FilterArgs),
    /// Keep the nodes with any property matching a value
    FilterValue(FilterValueArgs),
    /// Descend one level through a key
    #[command(visible_alias = "in")]
    Children(ChildrenArgs),
}

/// Common options for input files
#[derive(Args, Debug, Clone)]
pub struct CommonFileOptions {
    /// Files or directories to process
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Follow symbolic links when processing directories
    #[arg(long)]
    pub follow_links: bool,

    /// Maximum depth for directory recursion
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Include hidden files (starting with .)
    #[arg(long)]
    pub include_hidden: bool,

    /// Only pick up files with these extensions when walking directories
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Exclude files matching these patterns
    #[arg(long = "exclude", value_name = "PATTERN")]
    pub exclude_patterns: Vec<String>,

    /// Read every file in this format instead of detecting it
    #[arg(long, value_enum)]
    pub input_format: Option<InputFormatArg>,
}

/// Query steps applied before the command runs
#[derive(Args, Debug, Clone, Default)]
pub struct QueryOptions {
    /// Narrow the index first: in:KEY, filter:KEY[=VALUE] or value:VALUE
    #[arg(short, long = "step", value_name = "STEP")]
    pub steps: Vec<String>,
}

/// Output options
#[derive(Args, Debug, Clone)]
pub struct OutputOptions {
    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Pretty print output
    #[arg(long)]
    pub pretty: bool,
}

/// Arguments for the tag command
#[derive(Args, Debug)]
pub struct TagArgs {
    /// Tag to look up
    pub tag: String,

    #[command(flatten)]
    pub files: CommonFileOptions,

    #[command(flatten)]
    pub query: QueryOptions,

    #[command(flatten)]
    pub output: OutputOptions,
}

/// Arguments for the get and tag-of commands
#[derive(Args, Debug)]
pub struct KeyValueArgs {
    /// Property to match on
    #[arg(short, long)]
    pub key: String,

    /// Value to match (JSON, or a plain string)
    #[arg(short = 'V', long)]
    pub value: String,

    #[command(flatten)]
    pub files: CommonFileOptions,

    #[command(flatten)]
    pub query: QueryOptions,

    #[command(flatten)]
    pub output: OutputOptions,
}

/// Arguments for the values and keys commands
#[derive(Args, Debug)]
pub struct CollectArgs {
    /// Collect from this property instead of the nodes themselves
    #[arg(short, long)]
    pub key: Option<String>,

    #[command(flatten)]
    pub files: CommonFileOptions,

    #[command(flatten)]
    pub query: QueryOptions,

    #[command(flatten)]
    pub output: OutputOptions,
}

/// Arguments for the filter command
#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Property the nodes must have
    #[arg(short, long)]
    pub key: String,

    /// Value the property must match (JSON, or a plain string)
    #[arg(short = 'V', long)]
    pub value: Option<String>,

    /// Print the tags of the matching nodes instead of the nodes
    #[arg(long)]
    pub tags: bool,

    #[command(flatten)]
    pub files: CommonFileOptions,

    #[command(flatten)]
    pub query: QueryOptions,

    #[command(flatten)]
    pub output: OutputOptions,
}

/// Arguments for the filter-value command
#[derive(Args, Debug)]
pub struct FilterValueArgs {
    /// Value any property must match (JSON, or a plain string)
    #[arg(short = 'V', long)]
    pub value: String,

    /// Print the tags of the matching nodes instead of the nodes
    #[arg(long)]
    pub tags: bool,

    #[command(flatten)]
    pub files: CommonFileOptions,

    #[command(flatten)]
    pub query: QueryOptions,

    #[command(flatten)]
    pub output: OutputOptions,
}

/// Arguments for the children command
#[derive(Args, Debug)]
pub struct ChildrenArgs {
    /// Property to descend through
    #[arg(short, long)]
    pub key: String,

    /// Print the tags of the child nodes instead of the nodes
    #[arg(long)]
    pub tags: bool,

    #[command(flatten)]
    pub files: CommonFileOptions,

    #[command(flatten)]
    pub query: QueryOptions,

    #[command(flatten)]
    pub output: OutputOptions,
}

/// Input formats
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum InputFormatArg {
    /// JSON documents
    Json,
    /// YAML documents
    Yaml,
}

impl From<InputFormatArg> for InputFormat {
    fn from(format: InputFormatArg) -> Self {
        match format {
            InputFormatArg::Json => InputFormat::Json,
            InputFormatArg::Yaml => InputFormat::Yaml,
        }
    }
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}
