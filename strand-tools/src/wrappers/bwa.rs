//! BWA wrappers: index, mem

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::exec::{self, CommandSpec};
use crate::registry::ToolRegistry;
use crate::types::{Family, ToolOutcome};
use crate::wrappers::{disp, effective_threads, entry, wrapper_ref, write_capture};
use strand_core::{Rule, StrandError, StrandResult};

/// Suffixes of the index files `bwa index` produces next to the reference
const INDEX_SUFFIXES: &[&str] = &["amb", "ann", "bwt", "pac", "sa"];

pub fn register(registry: &mut ToolRegistry) -> StrandResult<()> {
    registry.register(entry(
        "bwa_index",
        Family::Bwa,
        "Build the BWA index for a FASTA reference",
        run_bwa_index,
    ))?;
    registry.register(entry(
        "bwa_mem",
        Family::Bwa,
        "Align single- or paired-end reads with BWA-MEM",
        run_bwa_mem,
    ))?;
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexParams {
    pub reference: PathBuf,
    /// Construction algorithm (`bwtsw` or `is`); bwa chooses when unset
    #[serde(default)]
    pub algorithm: Option<String>,
}

fn index_command(params: &IndexParams) -> CommandSpec {
    let mut spec = CommandSpec::new(Family::Bwa.binary_name()).arg("index");
    if let Some(algorithm) = &params.algorithm {
        spec = spec.args(["-a", algorithm.as_str()]);
    }
    spec.path_arg(&params.reference)
}

pub fn run_bwa_index(params: IndexParams, print_only: bool) -> StrandResult<ToolOutcome> {
    if print_only {
        let mut rule = Rule::new("bwa_index").input(disp(&params.reference));
        for suffix in INDEX_SUFFIXES {
            rule = rule.output(format!("{}.{}", disp(&params.reference), suffix));
        }
        let rule = rule
            .log_file("logs/bwa_index.log")
            .wrapper(wrapper_ref("bio/bwa/index"));
        return Ok(ToolOutcome::Rendered(rule.render()));
    }
    Ok(ToolOutcome::Completed(exec::run(&index_command(&params))?))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemParams {
    pub reference: PathBuf,
    /// One (single-end) or two (paired-end) FASTQ files
    pub reads: Vec<PathBuf>,
    /// SAM output path; bwa mem writes to stdout, the wrapper persists it
    pub output: PathBuf,
    #[serde(default)]
    pub threads: usize,
    /// Read-group line, e.g. `@RG\tID:a\tSM:a`
    #[serde(default)]
    pub read_group: Option<String>,
    #[serde(default)]
    pub extra: Option<String>,
}

fn mem_command(params: &MemParams, threads: usize) -> CommandSpec {
    let mut spec = CommandSpec::new(Family::Bwa.binary_name())
        .arg("mem")
        .args(["-t", threads.to_string().as_str()]);
    if let Some(read_group) = &params.read_group {
        spec = spec.args(["-R", read_group.as_str()]);
    }
    spec = spec.extra(params.extra.as_deref()).path_arg(&params.reference);
    for read in &params.reads {
        spec = spec.path_arg(read);
    }
    spec
}

pub fn run_bwa_mem(params: MemParams, print_only: bool) -> StrandResult<ToolOutcome> {
    if params.reads.is_empty() || params.reads.len() > 2 {
        return Err(StrandError::InvalidInput(format!(
            "bwa_mem: expected 1 or 2 read files, got {}",
            params.reads.len()
        )));
    }
    let threads = effective_threads(params.threads);
    if print_only {
        let mut rule = Rule::new("bwa_mem");
        for read in &params.reads {
            rule = rule.named_input("reads", disp(read));
        }
        let rule = rule
            .named_input("idx", disp(&params.reference))
            .output(disp(&params.output))
            .log_file("logs/bwa_mem.log")
            .param("extra", params.extra.clone().unwrap_or_default())
            .threads(threads)
            .wrapper(wrapper_ref("bio/bwa/mem"));
        return Ok(ToolOutcome::Rendered(rule.render()));
    }
    let summary = exec::run(&mem_command(&params, threads))?;
    write_capture(&summary, &params.output)?;
    Ok(ToolOutcome::Completed(summary))
}
