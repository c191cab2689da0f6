//! Per-family wrapper modules
//!
//! Every tool follows the same contract: a serde params struct, a
//! `run_<tool>` function that renders the Snakemake rule in `print_only`
//! mode or executes the external program otherwise, and a `register`
//! function collecting the family's entries into a registry.

pub mod bcftools;
pub mod bwa;
pub mod fastqc;
pub mod gatk;
pub mod picard;
pub mod samtools;
pub mod vep;

use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use crate::exec::RunSummary;
use crate::registry::ToolEntry;
use crate::types::{Family, ToolInvocation, ToolOutcome};
use strand_core::{Config, StrandError, StrandResult};

/// snakemake-wrappers tag referenced by rendered rules
pub const WRAPPER_TAG: &str = "v3.3.3";

pub(crate) fn wrapper_ref(path: &str) -> String {
    format!("{}/{}", WRAPPER_TAG, path)
}

/// Build a registry entry around a typed wrapper function.
///
/// The returned entry deserializes the host's JSON args into the wrapper's
/// params struct; a mismatch surfaces as `InvalidInput` naming the tool.
pub(crate) fn entry<P>(
    name: &str,
    family: Family,
    description: &str,
    run: fn(P, bool) -> StrandResult<ToolOutcome>,
) -> ToolEntry
where
    P: DeserializeOwned + 'static,
{
    let tool = name.to_string();
    ToolEntry::new(
        name,
        family,
        description,
        Box::new(move |invocation: &ToolInvocation| {
            let params: P = serde_json::from_value(invocation.args.clone())
                .map_err(|e| StrandError::InvalidInput(format!("{}: {}", tool, e)))?;
            run(params, invocation.print_only)
        }),
    )
}

/// Resolve a requested thread count: explicit wins, then the configured
/// default, then all cores.
pub(crate) fn effective_threads(requested: usize) -> usize {
    if requested > 0 {
        return requested;
    }
    match Config::load_default() {
        Ok(config) if config.execution.threads > 0 => config.execution.threads,
        _ => num_cpus::get(),
    }
}

pub(crate) fn disp(path: &Path) -> String {
    path.display().to_string()
}

pub(crate) fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Persist captured stdout for tools that write their result to stdout
/// (flagstat, bcftools stats, bwa mem). Only written when the child
/// succeeded; the summary is returned unchanged either way.
pub(crate) fn write_capture(summary: &RunSummary, output: &Path) -> StrandResult<()> {
    if summary.success {
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(output, summary.stdout.as_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct EchoParams {
        message: String,
    }

    fn run_echo(params: EchoParams, _print_only: bool) -> StrandResult<ToolOutcome> {
        Ok(ToolOutcome::Rendered(format!("rule echo: {}", params.message)))
    }

    #[test]
    fn test_entry_deserializes_args() {
        let entry = entry("echo", Family::Samtools, "echo test", run_echo);
        let outcome = entry
            .invoke(&ToolInvocation::render(json!({"message": "hi"})))
            .unwrap();
        assert_eq!(outcome.as_rendered().unwrap(), "rule echo: hi");
    }

    #[test]
    fn test_entry_rejects_bad_args() {
        let entry = entry("echo", Family::Samtools, "echo test", run_echo);
        let err = entry
            .invoke(&ToolInvocation::render(json!({"wrong": true})))
            .unwrap_err();
        match err {
            StrandError::InvalidInput(msg) => assert!(msg.starts_with("echo:")),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_effective_threads_explicit_wins() {
        assert_eq!(effective_threads(6), 6);
        assert!(effective_threads(0) >= 1);
    }

    #[test]
    fn test_wrapper_ref() {
        assert_eq!(wrapper_ref("bio/samtools/sort"), "v3.3.3/bio/samtools/sort");
    }
}
