//! bcftools wrappers: call, filter, stats

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::exec::{self, CommandSpec};
use crate::registry::ToolRegistry;
use crate::types::{Family, ToolOutcome};
use crate::wrappers::{disp, entry, wrapper_ref, write_capture};
use strand_core::{Rule, StrandError, StrandResult};

pub fn register(registry: &mut ToolRegistry) -> StrandResult<()> {
    registry.register(entry(
        "bcftools_call",
        Family::Bcftools,
        "Call SNP/indel variants from a pileup VCF/BCF",
        run_bcftools_call,
    ))?;
    registry.register(entry(
        "bcftools_filter",
        Family::Bcftools,
        "Filter variants by expression",
        run_bcftools_filter,
    ))?;
    registry.register(entry(
        "bcftools_stats",
        Family::Bcftools,
        "Produce VCF/BCF summary statistics",
        run_bcftools_stats,
    ))?;
    Ok(())
}

fn default_true() -> bool {
    true
}

fn default_output_type() -> String {
    // compressed VCF
    "z".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallParams {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Use the multiallelic caller (`-m`) instead of consensus (`-c`)
    #[serde(default = "default_true")]
    pub multiallelic: bool,
    /// Output variant sites only (`-v`)
    #[serde(default = "default_true")]
    pub variants_only: bool,
    /// bcftools output type letter (`-O`): v, z, u or b
    #[serde(default = "default_output_type")]
    pub output_type: String,
    #[serde(default)]
    pub extra: Option<String>,
}

fn call_command(params: &CallParams) -> CommandSpec {
    let mut spec = CommandSpec::new(Family::Bcftools.binary_name()).arg("call");
    spec = spec.arg(if params.multiallelic { "-m" } else { "-c" });
    if params.variants_only {
        spec = spec.arg("-v");
    }
    spec.args(["-O", params.output_type.as_str()])
        .arg("-o")
        .path_arg(&params.output)
        .extra(params.extra.as_deref())
        .path_arg(&params.input)
}

pub fn run_bcftools_call(params: CallParams, print_only: bool) -> StrandResult<ToolOutcome> {
    if print_only {
        let rule = Rule::new("bcftools_call")
            .named_input("pileup", disp(&params.input))
            .output(disp(&params.output))
            .log_file("logs/bcftools_call.log")
            .param("extra", params.extra.clone().unwrap_or_default())
            .wrapper(wrapper_ref("bio/bcftools/call"));
        return Ok(ToolOutcome::Rendered(rule.render()));
    }
    Ok(ToolOutcome::Completed(exec::run(&call_command(&params))?))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterParams {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Exclude sites matching the expression (`-e`)
    #[serde(default)]
    pub exclude: Option<String>,
    /// Include only sites matching the expression (`-i`)
    #[serde(default)]
    pub include: Option<String>,
    /// Annotate failing sites with FILTER=<name> instead of dropping (`-s`)
    #[serde(default)]
    pub soft_filter: Option<String>,
    #[serde(default = "default_output_type")]
    pub output_type: String,
}

fn filter_command(params: &FilterParams) -> CommandSpec {
    let mut spec = CommandSpec::new(Family::Bcftools.binary_name()).arg("filter");
    if let Some(exclude) = &params.exclude {
        spec = spec.args(["-e", exclude.as_str()]);
    }
    if let Some(include) = &params.include {
        spec = spec.args(["-i", include.as_str()]);
    }
    if let Some(name) = &params.soft_filter {
        spec = spec.args(["-s", name.as_str()]);
    }
    spec.args(["-O", params.output_type.as_str()])
        .arg("-o")
        .path_arg(&params.output)
        .path_arg(&params.input)
}

pub fn run_bcftools_filter(params: FilterParams, print_only: bool) -> StrandResult<ToolOutcome> {
    if params.exclude.is_none() && params.include.is_none() {
        return Err(StrandError::InvalidInput(
            "bcftools_filter: provide an include or exclude expression".to_string(),
        ));
    }
    if print_only {
        let mut rule = Rule::new("bcftools_filter")
            .input(disp(&params.input))
            .output(disp(&params.output));
        if let Some(exclude) = &params.exclude {
            rule = rule.param("exclude", exclude.clone());
        }
        if let Some(include) = &params.include {
            rule = rule.param("include", include.clone());
        }
        let rule = rule.wrapper(wrapper_ref("bio/bcftools/filter"));
        return Ok(ToolOutcome::Rendered(rule.render()));
    }
    Ok(ToolOutcome::Completed(exec::run(&filter_command(&params))?))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsParams {
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(default)]
    pub extra: Option<String>,
}

fn stats_command(params: &StatsParams) -> CommandSpec {
    CommandSpec::new(Family::Bcftools.binary_name())
        .arg("stats")
        .extra(params.extra.as_deref())
        .path_arg(&params.input)
}

// stats writes to stdout; the wrapper persists the capture.
pub fn run_bcftools_stats(params: StatsParams, print_only: bool) -> StrandResult<ToolOutcome> {
    if print_only {
        let rule = Rule::new("bcftools_stats")
            .input(disp(&params.input))
            .output(disp(&params.output))
            .wrapper(wrapper_ref("bio/bcftools/stats"));
        return Ok(ToolOutcome::Rendered(rule.render()));
    }
    let summary = exec::run(&stats_command(&params))?;
    write_capture(&summary, &params.output)?;
    Ok(ToolOutcome::Completed(summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_command_defaults() {
        let params: CallParams = serde_json::from_value(serde_json::json!({
            "input": "pileup/a.vcf.gz",
            "output": "calls/a.vcf.gz",
        }))
        .unwrap();
        assert_eq!(
            call_command(&params).argv().to_vec(),
            vec!["call", "-m", "-v", "-O", "z", "-o", "calls/a.vcf.gz", "pileup/a.vcf.gz"]
        );
    }

    #[test]
    fn test_call_consensus_caller() {
        let params = CallParams {
            input: PathBuf::from("a.bcf"),
            output: PathBuf::from("b.bcf"),
            multiallelic: false,
            variants_only: false,
            output_type: "b".to_string(),
            extra: None,
        };
        assert_eq!(
            call_command(&params).argv().to_vec(),
            vec!["call", "-c", "-O", "b", "-o", "b.bcf", "a.bcf"]
        );
    }

    #[test]
    fn test_filter_requires_expression() {
        let params = FilterParams {
            input: PathBuf::from("calls/a.vcf.gz"),
            output: PathBuf::from("filtered/a.vcf.gz"),
            exclude: None,
            include: None,
            soft_filter: None,
            output_type: default_output_type(),
        };
        assert!(matches!(
            run_bcftools_filter(params, true),
            Err(StrandError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_filter_soft_filter_argv() {
        let params = FilterParams {
            input: PathBuf::from("calls/a.vcf.gz"),
            output: PathBuf::from("filtered/a.vcf.gz"),
            exclude: Some("QUAL<20".to_string()),
            include: None,
            soft_filter: Some("lowQual".to_string()),
            output_type: "z".to_string(),
        };
        assert_eq!(
            filter_command(&params).argv().to_vec(),
            vec![
                "filter", "-e", "QUAL<20", "-s", "lowQual",
                "-O", "z", "-o", "filtered/a.vcf.gz", "calls/a.vcf.gz"
            ]
        );
    }

    #[test]
    fn test_stats_rule_text() {
        let params = StatsParams {
            input: PathBuf::from("calls/a.vcf.gz"),
            output: PathBuf::from("stats/a.stats.txt"),
            extra: None,
        };
        let outcome = run_bcftools_stats(params, true).unwrap();
        let text = outcome.as_rendered().unwrap();
        assert!(text.contains("rule bcftools_stats:"));
        assert!(text.contains("bio/bcftools/stats"));
    }
}
