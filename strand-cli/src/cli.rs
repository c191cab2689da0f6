use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "strand",
    version,
    about = "Snakemake rule rendering and subprocess wrappers for bioinformatics tools"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the registered tools
    List {
        /// Restrict to one tool family (e.g. samtools, gatk)
        #[arg(long)]
        family: Option<String>,
    },
    /// Render the Snakemake rule for a tool without executing it
    Render {
        /// Registered tool name (e.g. samtools_sort)
        tool: String,
        /// Tool parameters as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },
    /// Execute a tool and report its completed-process summary
    Run {
        /// Registered tool name (e.g. samtools_sort)
        tool: String,
        /// Tool parameters as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },
    /// Discover wrapper modules in a legacy catalog tree
    Catalog {
        /// Catalog root directory
        root: PathBuf,
    },
    /// Check binary availability and catalog coverage
    Doctor {
        /// Legacy catalog tree to audit against the registry
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}
