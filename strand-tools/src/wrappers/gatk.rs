//! GATK4 wrappers: HaplotypeCaller, BaseRecalibrator, ApplyBQSR

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::exec::{self, CommandSpec};
use crate::registry::ToolRegistry;
use crate::types::{Family, ToolOutcome};
use crate::wrappers::{disp, entry, wrapper_ref};
use strand_core::{Rule, StrandError, StrandResult};

pub fn register(registry: &mut ToolRegistry) -> StrandResult<()> {
    registry.register(entry(
        "gatk_haplotype_caller",
        Family::Gatk,
        "Call germline SNPs and indels via local re-assembly",
        run_gatk_haplotype_caller,
    ))?;
    registry.register(entry(
        "gatk_base_recalibrator",
        Family::Gatk,
        "Build a base-quality recalibration table",
        run_gatk_base_recalibrator,
    ))?;
    registry.register(entry(
        "gatk_apply_bqsr",
        Family::Gatk,
        "Apply a base-quality recalibration table to a BAM",
        run_gatk_apply_bqsr,
    ))?;
    Ok(())
}

fn gatk_command(subcommand: &str, java_opts: Option<&str>) -> CommandSpec {
    let mut spec = CommandSpec::new(Family::Gatk.binary_name());
    if let Some(opts) = java_opts {
        spec = spec.args(["--java-options", opts]);
    }
    spec.arg(subcommand)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HaplotypeCallerParams {
    pub reference: PathBuf,
    pub input: PathBuf,
    pub output: PathBuf,
    /// Genomic intervals to restrict calling to (`-L`)
    #[serde(default)]
    pub intervals: Option<String>,
    #[serde(default)]
    pub java_opts: Option<String>,
    #[serde(default)]
    pub extra: Option<String>,
}

fn haplotype_caller_command(params: &HaplotypeCallerParams) -> CommandSpec {
    let mut spec = gatk_command("HaplotypeCaller", params.java_opts.as_deref())
        .arg("-R")
        .path_arg(&params.reference)
        .arg("-I")
        .path_arg(&params.input)
        .arg("-O")
        .path_arg(&params.output);
    if let Some(intervals) = &params.intervals {
        spec = spec.args(["-L", intervals.as_str()]);
    }
    spec.extra(params.extra.as_deref())
}

pub fn run_gatk_haplotype_caller(
    params: HaplotypeCallerParams,
    print_only: bool,
) -> StrandResult<ToolOutcome> {
    if print_only {
        let rule = Rule::new("gatk_haplotype_caller")
            .named_input("bam", disp(&params.input))
            .named_input("ref", disp(&params.reference))
            .named_output("vcf", disp(&params.output))
            .log_file("logs/gatk/haplotype_caller.log")
            .param("extra", params.extra.clone().unwrap_or_default())
            .wrapper(wrapper_ref("bio/gatk/haplotypecaller"));
        return Ok(ToolOutcome::Rendered(rule.render()));
    }
    Ok(ToolOutcome::Completed(exec::run(&haplotype_caller_command(
        &params,
    ))?))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseRecalibratorParams {
    pub reference: PathBuf,
    pub input: PathBuf,
    /// At least one VCF of known polymorphic sites is required
    pub known_sites: Vec<PathBuf>,
    pub output: PathBuf,
    #[serde(default)]
    pub java_opts: Option<String>,
    #[serde(default)]
    pub extra: Option<String>,
}

fn base_recalibrator_command(params: &BaseRecalibratorParams) -> CommandSpec {
    let mut spec = gatk_command("BaseRecalibrator", params.java_opts.as_deref())
        .arg("-R")
        .path_arg(&params.reference)
        .arg("-I")
        .path_arg(&params.input);
    for sites in &params.known_sites {
        spec = spec.arg("--known-sites").path_arg(sites);
    }
    spec.arg("-O").path_arg(&params.output).extra(params.extra.as_deref())
}

pub fn run_gatk_base_recalibrator(
    params: BaseRecalibratorParams,
    print_only: bool,
) -> StrandResult<ToolOutcome> {
    if params.known_sites.is_empty() {
        return Err(StrandError::InvalidInput(
            "gatk_base_recalibrator: at least one known-sites VCF is required".to_string(),
        ));
    }
    if print_only {
        let mut rule = Rule::new("gatk_base_recalibrator")
            .named_input("bam", disp(&params.input))
            .named_input("ref", disp(&params.reference));
        for sites in &params.known_sites {
            rule = rule.named_input("known", disp(sites));
        }
        let rule = rule
            .named_output("recal_table", disp(&params.output))
            .log_file("logs/gatk/base_recalibrator.log")
            .wrapper(wrapper_ref("bio/gatk/baserecalibrator"));
        return Ok(ToolOutcome::Rendered(rule.render()));
    }
    Ok(ToolOutcome::Completed(exec::run(&base_recalibrator_command(
        &params,
    ))?))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyBqsrParams {
    pub reference: PathBuf,
    pub input: PathBuf,
    pub recal_table: PathBuf,
    pub output: PathBuf,
    #[serde(default)]
    pub java_opts: Option<String>,
    #[serde(default)]
    pub extra: Option<String>,
}

fn apply_bqsr_command(params: &ApplyBqsrParams) -> CommandSpec {
    gatk_command("ApplyBQSR", params.java_opts.as_deref())
        .arg("-R")
        .path_arg(&params.reference)
        .arg("-I")
        .path_arg(&params.input)
        .arg("--bqsr-recal-file")
        .path_arg(&params.recal_table)
        .arg("-O")
        .path_arg(&params.output)
        .extra(params.extra.as_deref())
}

pub fn run_gatk_apply_bqsr(params: ApplyBqsrParams, print_only: bool) -> StrandResult<ToolOutcome> {
    if print_only {
        let rule = Rule::new("gatk_apply_bqsr")
            .named_input("bam", disp(&params.input))
            .named_input("ref", disp(&params.reference))
            .named_input("recal_table", disp(&params.recal_table))
            .named_output("bam", disp(&params.output))
            .log_file("logs/gatk/apply_bqsr.log")
            .wrapper(wrapper_ref("bio/gatk/applybqsr"));
        return Ok(ToolOutcome::Rendered(rule.render()));
    }
    Ok(ToolOutcome::Completed(exec::run(&apply_bqsr_command(&params))?))
}
