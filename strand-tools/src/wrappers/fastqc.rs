//! FastQC wrapper

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::exec::{self, CommandSpec};
use crate::registry::ToolRegistry;
use crate::types::{Family, ToolOutcome};
use crate::wrappers::{disp, effective_threads, entry, wrapper_ref};
use strand_core::{Rule, StrandError, StrandResult};

pub fn register(registry: &mut ToolRegistry) -> StrandResult<()> {
    registry.register(entry(
        "fastqc",
        Family::Fastqc,
        "Quality-control reports for FASTQ files",
        run_fastqc,
    ))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FastqcParams {
    pub inputs: Vec<PathBuf>,
    pub outdir: PathBuf,
    #[serde(default)]
    pub threads: usize,
    #[serde(default)]
    pub extra: Option<String>,
}

fn fastqc_command(params: &FastqcParams, threads: usize) -> CommandSpec {
    let mut spec = CommandSpec::new(Family::Fastqc.binary_name())
        .arg("--outdir")
        .path_arg(&params.outdir)
        .args(["--threads", threads.to_string().as_str()])
        .extra(params.extra.as_deref());
    for input in &params.inputs {
        spec = spec.path_arg(input);
    }
    spec
}

pub fn run_fastqc(params: FastqcParams, print_only: bool) -> StrandResult<ToolOutcome> {
    if params.inputs.is_empty() {
        return Err(StrandError::InvalidInput(
            "fastqc: at least one FASTQ file is required".to_string(),
        ));
    }
    let threads = effective_threads(params.threads);
    if print_only {
        let mut rule = Rule::new("fastqc");
        for input in &params.inputs {
            rule = rule.input(disp(input));
        }
        let rule = rule
            .output(disp(&params.outdir))
            .threads(threads)
            .wrapper(wrapper_ref("bio/fastqc"));
        return Ok(ToolOutcome::Rendered(rule.render()));
    }
    Ok(ToolOutcome::Completed(exec::run(&fastqc_command(
        &params, threads,
    ))?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fastqc_argv() {
        let params = FastqcParams {
            inputs: vec![PathBuf::from("reads/a.1.fastq"), PathBuf::from("reads/a.2.fastq")],
            outdir: PathBuf::from("qc"),
            threads: 2,
            extra: None,
        };
        assert_eq!(
            fastqc_command(&params, 2).argv().to_vec(),
            vec!["--outdir", "qc", "--threads", "2", "reads/a.1.fastq", "reads/a.2.fastq"]
        );
    }

    #[test]
    fn test_fastqc_requires_inputs() {
        let params = FastqcParams {
            inputs: vec![],
            outdir: PathBuf::from("qc"),
            threads: 1,
            extra: None,
        };
        assert!(matches!(
            run_fastqc(params, true),
            Err(StrandError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_fastqc_rule_text() {
        let params = FastqcParams {
            inputs: vec![PathBuf::from("reads/a.fastq")],
            outdir: PathBuf::from("qc"),
            threads: 1,
            extra: None,
        };
        let outcome = run_fastqc(params, true).unwrap();
        let text = outcome.as_rendered().unwrap();
        assert!(text.contains("rule fastqc:"));
        assert!(text.contains("bio/fastqc"));
    }
}
