//! samtools wrappers: sort, index, faidx, flagstat

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::exec::{self, CommandSpec};
use crate::registry::ToolRegistry;
use crate::types::{Family, ToolOutcome};
use crate::wrappers::{disp, effective_threads, entry, non_empty, wrapper_ref, write_capture};
use strand_core::{Rule, StrandResult};

pub fn register(registry: &mut ToolRegistry) -> StrandResult<()> {
    registry.register(entry(
        "samtools_sort",
        Family::Samtools,
        "Sort a BAM/SAM/CRAM file by coordinate or read name",
        run_samtools_sort,
    ))?;
    registry.register(entry(
        "samtools_index",
        Family::Samtools,
        "Index a coordinate-sorted BAM/CRAM file",
        run_samtools_index,
    ))?;
    registry.register(entry(
        "samtools_faidx",
        Family::Samtools,
        "Index a FASTA reference",
        run_samtools_faidx,
    ))?;
    registry.register(entry(
        "samtools_flagstat",
        Family::Samtools,
        "Count alignments per FLAG category",
        run_samtools_flagstat,
    ))?;
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortParams {
    pub input: PathBuf,
    pub output: PathBuf,
    /// 0 = use the configured default, falling back to all cores
    #[serde(default)]
    pub threads: usize,
    /// Sort by read name instead of coordinate
    #[serde(default)]
    pub by_name: bool,
    #[serde(default)]
    pub extra: Option<String>,
}

fn sort_extra(params: &SortParams) -> String {
    let mut extra = String::new();
    if params.by_name {
        extra.push_str("-n");
    }
    if let Some(user) = &params.extra {
        if !extra.is_empty() {
            extra.push(' ');
        }
        extra.push_str(user);
    }
    extra
}

fn sort_command(params: &SortParams, threads: usize) -> CommandSpec {
    CommandSpec::new(Family::Samtools.binary_name())
        .arg("sort")
        .args(["-@", threads.to_string().as_str()])
        .arg("-o")
        .path_arg(&params.output)
        .extra(non_empty(&sort_extra(params)))
        .path_arg(&params.input)
}

pub fn run_samtools_sort(params: SortParams, print_only: bool) -> StrandResult<ToolOutcome> {
    let threads = effective_threads(params.threads);
    if print_only {
        let rule = Rule::new("samtools_sort")
            .input(disp(&params.input))
            .output(disp(&params.output))
            .log_file("logs/samtools_sort.log")
            .param("extra", sort_extra(&params))
            .threads(threads)
            .wrapper(wrapper_ref("bio/samtools/sort"));
        return Ok(ToolOutcome::Rendered(rule.render()));
    }
    Ok(ToolOutcome::Completed(exec::run(&sort_command(
        &params, threads,
    ))?))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexParams {
    pub input: PathBuf,
    /// Defaults to `<input>.bai`
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub threads: usize,
}

impl IndexParams {
    fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let mut path = self.input.clone().into_os_string();
            path.push(".bai");
            PathBuf::from(path)
        })
    }
}

fn index_command(params: &IndexParams, threads: usize) -> CommandSpec {
    CommandSpec::new(Family::Samtools.binary_name())
        .arg("index")
        .args(["-@", threads.to_string().as_str()])
        .path_arg(&params.input)
        .path_arg(&params.output_path())
}

pub fn run_samtools_index(params: IndexParams, print_only: bool) -> StrandResult<ToolOutcome> {
    let threads = effective_threads(params.threads);
    if print_only {
        let rule = Rule::new("samtools_index")
            .input(disp(&params.input))
            .output(disp(&params.output_path()))
            .threads(threads)
            .wrapper(wrapper_ref("bio/samtools/index"));
        return Ok(ToolOutcome::Rendered(rule.render()));
    }
    Ok(ToolOutcome::Completed(exec::run(&index_command(
        &params, threads,
    ))?))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaidxParams {
    pub input: PathBuf,
    /// Optional region to extract instead of building the full index
    #[serde(default)]
    pub region: Option<String>,
}

fn faidx_command(params: &FaidxParams) -> CommandSpec {
    let mut spec = CommandSpec::new(Family::Samtools.binary_name())
        .arg("faidx")
        .path_arg(&params.input);
    if let Some(region) = &params.region {
        spec = spec.arg(region);
    }
    spec
}

pub fn run_samtools_faidx(params: FaidxParams, print_only: bool) -> StrandResult<ToolOutcome> {
    if print_only {
        let mut fai = params.input.clone().into_os_string();
        fai.push(".fai");
        let rule = Rule::new("samtools_faidx")
            .input(disp(&params.input))
            .output(disp(&PathBuf::from(fai)))
            .wrapper(wrapper_ref("bio/samtools/faidx"));
        return Ok(ToolOutcome::Rendered(rule.render()));
    }
    Ok(ToolOutcome::Completed(exec::run(&faidx_command(&params))?))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlagstatParams {
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(default)]
    pub threads: usize,
}

fn flagstat_command(params: &FlagstatParams, threads: usize) -> CommandSpec {
    CommandSpec::new(Family::Samtools.binary_name())
        .arg("flagstat")
        .args(["-@", threads.to_string().as_str()])
        .path_arg(&params.input)
}

// flagstat writes to stdout; the wrapper persists the capture at the
// caller's output path.
pub fn run_samtools_flagstat(params: FlagstatParams, print_only: bool) -> StrandResult<ToolOutcome> {
    let threads = effective_threads(params.threads);
    if print_only {
        let rule = Rule::new("samtools_flagstat")
            .input(disp(&params.input))
            .output(disp(&params.output))
            .threads(threads)
            .wrapper(wrapper_ref("bio/samtools/flagstat"));
        return Ok(ToolOutcome::Rendered(rule.render()));
    }
    let summary = exec::run(&flagstat_command(&params, threads))?;
    write_capture(&summary, &params.output)?;
    Ok(ToolOutcome::Completed(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sort_command_argv() {
        let params = SortParams {
            input: PathBuf::from("mapped/a.bam"),
            output: PathBuf::from("sorted/a.bam"),
            threads: 4,
            by_name: true,
            extra: Some("-m 4G".to_string()),
        };
        let spec = sort_command(&params, 4);
        assert_eq!(spec.program(), "samtools");
        assert_eq!(
            spec.argv().to_vec(),
            vec!["sort", "-@", "4", "-o", "sorted/a.bam", "-n", "-m", "4G", "mapped/a.bam"]
        );
    }

    #[test]
    fn test_sort_rule_text() {
        let params = SortParams {
            input: PathBuf::from("mapped/a.bam"),
            output: PathBuf::from("sorted/a.bam"),
            threads: 8,
            by_name: false,
            extra: None,
        };
        let outcome = run_samtools_sort(params, true).unwrap();
        let text = outcome.as_rendered().unwrap();
        assert!(text.contains("rule samtools_sort:"));
        assert!(text.contains("input:"));
        assert!(text.contains("        \"mapped/a.bam\","));
        assert!(text.contains("output:"));
        assert!(text.contains("threads: 8"));
        assert!(text.contains("wrapper:"));
        assert!(text.contains("bio/samtools/sort"));
    }

    #[test]
    fn test_index_default_output() {
        let params = IndexParams {
            input: PathBuf::from("sorted/a.bam"),
            output: None,
            threads: 1,
        };
        assert_eq!(params.output_path(), PathBuf::from("sorted/a.bam.bai"));
        let spec = index_command(&params, 1);
        assert_eq!(
            spec.argv().to_vec(),
            vec!["index", "-@", "1", "sorted/a.bam", "sorted/a.bam.bai"]
        );
    }

    #[test]
    fn test_faidx_region() {
        let params = FaidxParams {
            input: PathBuf::from("genome.fa"),
            region: Some("chr1:1-1000".to_string()),
        };
        assert_eq!(faidx_command(&params).argv().to_vec(), vec!["faidx", "genome.fa", "chr1:1-1000"]);
    }

    #[test]
    fn test_flagstat_rule_mentions_output() {
        let params = FlagstatParams {
            input: PathBuf::from("sorted/a.bam"),
            output: PathBuf::from("stats/a.flagstat"),
            threads: 2,
        };
        let outcome = run_samtools_flagstat(params, true).unwrap();
        let text = outcome.as_rendered().unwrap();
        assert!(text.contains("rule samtools_flagstat:"));
        assert!(text.contains("stats/a.flagstat"));
    }
}
