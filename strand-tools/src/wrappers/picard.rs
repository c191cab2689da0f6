//! Picard wrappers: MarkDuplicates, CreateSequenceDictionary,
//! AddOrReplaceReadGroups

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::exec::{self, CommandSpec};
use crate::registry::ToolRegistry;
use crate::types::{Family, ToolOutcome};
use crate::wrappers::{disp, entry, wrapper_ref};
use strand_core::{Rule, StrandResult};

pub fn register(registry: &mut ToolRegistry) -> StrandResult<()> {
    registry.register(entry(
        "picard_mark_duplicates",
        Family::Picard,
        "Flag or remove duplicate reads in a BAM",
        run_picard_mark_duplicates,
    ))?;
    registry.register(entry(
        "picard_create_sequence_dictionary",
        Family::Picard,
        "Create a .dict sequence dictionary for a FASTA reference",
        run_picard_create_sequence_dictionary,
    ))?;
    registry.register(entry(
        "picard_add_or_replace_read_groups",
        Family::Picard,
        "Assign all reads in a BAM to a single read group",
        run_picard_add_or_replace_read_groups,
    ))?;
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkDuplicatesParams {
    pub input: PathBuf,
    pub output: PathBuf,
    pub metrics: PathBuf,
    #[serde(default)]
    pub remove_duplicates: bool,
    #[serde(default)]
    pub extra: Option<String>,
}

fn mark_duplicates_command(params: &MarkDuplicatesParams) -> CommandSpec {
    let mut spec = CommandSpec::new(Family::Picard.binary_name())
        .arg("MarkDuplicates")
        .arg("--INPUT")
        .path_arg(&params.input)
        .arg("--OUTPUT")
        .path_arg(&params.output)
        .arg("--METRICS_FILE")
        .path_arg(&params.metrics);
    if params.remove_duplicates {
        spec = spec.args(["--REMOVE_DUPLICATES", "true"]);
    }
    spec.extra(params.extra.as_deref())
}

pub fn run_picard_mark_duplicates(
    params: MarkDuplicatesParams,
    print_only: bool,
) -> StrandResult<ToolOutcome> {
    if print_only {
        let rule = Rule::new("picard_mark_duplicates")
            .named_input("bams", disp(&params.input))
            .named_output("bam", disp(&params.output))
            .named_output("metrics", disp(&params.metrics))
            .log_file("logs/picard/mark_duplicates.log")
            .param("extra", params.extra.clone().unwrap_or_default())
            .wrapper(wrapper_ref("bio/picard/markduplicates"));
        return Ok(ToolOutcome::Rendered(rule.render()));
    }
    Ok(ToolOutcome::Completed(exec::run(&mark_duplicates_command(
        &params,
    ))?))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSequenceDictionaryParams {
    pub reference: PathBuf,
    /// Defaults to the reference with a `.dict` extension
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl CreateSequenceDictionaryParams {
    fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.reference.with_extension("dict"))
    }
}

fn create_sequence_dictionary_command(params: &CreateSequenceDictionaryParams) -> CommandSpec {
    CommandSpec::new(Family::Picard.binary_name())
        .arg("CreateSequenceDictionary")
        .arg("--REFERENCE")
        .path_arg(&params.reference)
        .arg("--OUTPUT")
        .path_arg(&params.output_path())
}

pub fn run_picard_create_sequence_dictionary(
    params: CreateSequenceDictionaryParams,
    print_only: bool,
) -> StrandResult<ToolOutcome> {
    if print_only {
        let rule = Rule::new("picard_create_sequence_dictionary")
            .input(disp(&params.reference))
            .output(disp(&params.output_path()))
            .wrapper(wrapper_ref("bio/picard/createsequencedictionary"));
        return Ok(ToolOutcome::Rendered(rule.render()));
    }
    Ok(ToolOutcome::Completed(exec::run(
        &create_sequence_dictionary_command(&params),
    )?))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddOrReplaceReadGroupsParams {
    pub input: PathBuf,
    pub output: PathBuf,
    pub sample: String,
    pub library: String,
    pub unit: String,
    #[serde(default = "default_platform")]
    pub platform: String,
    /// Defaults to the sample name
    #[serde(default)]
    pub id: Option<String>,
}

fn default_platform() -> String {
    "ILLUMINA".to_string()
}

fn add_or_replace_read_groups_command(params: &AddOrReplaceReadGroupsParams) -> CommandSpec {
    CommandSpec::new(Family::Picard.binary_name())
        .arg("AddOrReplaceReadGroups")
        .arg("--INPUT")
        .path_arg(&params.input)
        .arg("--OUTPUT")
        .path_arg(&params.output)
        .args(["--RGID", params.id.as_deref().unwrap_or(&params.sample)])
        .args(["--RGSM", params.sample.as_str()])
        .args(["--RGLB", params.library.as_str()])
        .args(["--RGPL", params.platform.as_str()])
        .args(["--RGPU", params.unit.as_str()])
}

pub fn run_picard_add_or_replace_read_groups(
    params: AddOrReplaceReadGroupsParams,
    print_only: bool,
) -> StrandResult<ToolOutcome> {
    if print_only {
        let rule = Rule::new("picard_add_or_replace_read_groups")
            .input(disp(&params.input))
            .output(disp(&params.output))
            .param("sample", params.sample.clone())
            .param("library", params.library.clone())
            .param("platform", params.platform.clone())
            .param("unit", params.unit.clone())
            .wrapper(wrapper_ref("bio/picard/addorreplacereadgroups"));
        return Ok(ToolOutcome::Rendered(rule.render()));
    }
    Ok(ToolOutcome::Completed(exec::run(
        &add_or_replace_read_groups_command(&params),
    )?))
}
