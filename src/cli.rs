use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use trove::{FilterState, SortKey, TypeFilter};

/// Command line interface for the resources hub search core.
#[derive(Parser, Debug)]
#[command(name = "trove", version, about = "Search and filter a resources hub catalog")]
pub struct CliArgs {
    /// Path to the catalog JSON document
    #[arg(long, value_name = "PATH", env = "TROVE_CATALOG", global = true)]
    pub catalog: Option<PathBuf>,

    /// Additional configuration files, applied in order
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Vec<PathBuf>,

    /// Skip the default configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Results per page
    #[arg(long, value_name = "N", global = true)]
    pub page_size: Option<usize>,

    /// Base URL used when composing shareable links
    #[arg(long, value_name = "URL", global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search and filter the catalog, printing one page of results
    Search(SearchArgs),
    /// Show facet counts for the current filter context
    Facets(FilterArgs),
    /// Manage saved filter presets
    Preset {
        #[command(subcommand)]
        action: PresetAction,
    },
    /// Encode and decode shareable filter links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },
    /// Show recent searches
    History {
        /// Forget all remembered queries
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Free-text query
    pub query: Option<String>,

    #[command(flatten)]
    pub filter: FilterOpts,

    /// 1-indexed page of results to print
    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Free-text query
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    #[command(flatten)]
    pub filter: FilterOpts,
}

#[derive(Args, Debug)]
pub struct FilterOpts {
    /// Narrow to one resource type
    #[arg(long = "type", value_enum, default_value = "all")]
    pub kind: TypeArg,

    /// Narrow to one category within the active type
    #[arg(long)]
    pub category: Option<String>,

    /// Result ordering
    #[arg(long, value_enum, default_value = "name")]
    pub sort: SortArg,
}

#[derive(Subcommand, Debug)]
pub enum PresetAction {
    /// List built-in and saved presets
    List,
    /// Save the given filter combination under a name
    Save {
        name: String,
        #[arg(long, short = 'q')]
        query: Option<String>,
        #[command(flatten)]
        filter: FilterOpts,
    },
    /// Delete a saved preset by id
    Delete { id: String },
    /// Apply a preset and record its usage
    Use { id: String },
}

#[derive(Subcommand, Debug)]
pub enum LinkAction {
    /// Encode a filter combination into a shareable URL
    Encode {
        #[arg(long, short = 'q')]
        query: Option<String>,
        #[command(flatten)]
        filter: FilterOpts,
    },
    /// Decode a token or shared link back into filter settings
    Decode { token: String },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeArg {
    All,
    Command,
    Rule,
    Mcp,
    Hook,
}

impl From<TypeArg> for TypeFilter {
    fn from(value: TypeArg) -> Self {
        match value {
            TypeArg::All => Self::All,
            TypeArg::Command => Self::Command,
            TypeArg::Rule => Self::Rule,
            TypeArg::Mcp => Self::Mcp,
            TypeArg::Hook => Self::Hook,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortArg {
    Name,
    Downloads,
    Recent,
}

impl From<SortArg> for SortKey {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Name => Self::Name,
            SortArg::Downloads => Self::Downloads,
            SortArg::Recent => Self::Recent,
        }
    }
}

/// Assemble the shared filter shape from CLI options.
pub fn filter_state(query: Option<&str>, filter: &FilterOpts) -> FilterState {
    FilterState {
        type_filter: filter.kind.into(),
        category: filter.category.clone().unwrap_or_default(),
        search_query: query.unwrap_or_default().trim().to_string(),
        sort_by: filter.sort.into(),
    }
}
