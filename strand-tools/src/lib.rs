//! Tool catalog for external bioinformatics programs
//!
//! This crate holds the wrapper functions for external tools like samtools,
//! bwa, GATK and VEP, plus the registry that collects them for discovery by
//! an outer tool-calling host. Each wrapper either renders a Snakemake rule
//! for the step (`print_only`) or invokes the underlying program as a
//! subprocess and returns its completed-process summary.

// Modules
pub mod discovery;
pub mod exec;
pub mod loader;
pub mod registry;
pub mod types;
pub mod wrappers;

// Re-exports for convenience
pub use discovery::{find_candidate_modules, ModulePath};
pub use exec::{CommandSpec, RunSummary};
pub use loader::{audit_catalog, load_all_tools};
pub use registry::{ToolEntry, ToolRegistry};
pub use types::{Family, ToolInvocation, ToolOutcome};
