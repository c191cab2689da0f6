//! Ensembl VEP wrappers: annotate, cache install

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::exec::{self, CommandSpec};
use crate::registry::ToolRegistry;
use crate::types::{Family, ToolOutcome};
use crate::wrappers::{disp, effective_threads, entry, wrapper_ref};
use strand_core::{Rule, StrandResult};

pub fn register(registry: &mut ToolRegistry) -> StrandResult<()> {
    registry.register(entry(
        "vep_annotate",
        Family::Vep,
        "Annotate variant consequences with Ensembl VEP",
        run_vep_annotate,
    ))?;
    registry.register(entry(
        "vep_install_cache",
        Family::Vep,
        "Download the offline VEP annotation cache for a species",
        run_vep_install_cache,
    ))?;
    Ok(())
}

fn default_species() -> String {
    "homo_sapiens".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotateParams {
    pub input: PathBuf,
    pub output: PathBuf,
    pub cache_dir: PathBuf,
    #[serde(default = "default_species")]
    pub species: String,
    #[serde(default)]
    pub assembly: Option<String>,
    /// Fork count for parallel annotation (0 = default threading)
    #[serde(default)]
    pub threads: usize,
    #[serde(default)]
    pub extra: Option<String>,
}

fn annotate_command(params: &AnnotateParams, threads: usize) -> CommandSpec {
    let mut spec = CommandSpec::new(Family::Vep.binary_name())
        .arg("--input_file")
        .path_arg(&params.input)
        .arg("--output_file")
        .path_arg(&params.output)
        .arg("--cache")
        .arg("--dir_cache")
        .path_arg(&params.cache_dir)
        .args(["--species", params.species.as_str()])
        .arg("--vcf");
    if let Some(assembly) = &params.assembly {
        spec = spec.args(["--assembly", assembly.as_str()]);
    }
    if threads > 1 {
        spec = spec.args(["--fork", threads.to_string().as_str()]);
    }
    spec.extra(params.extra.as_deref())
}

pub fn run_vep_annotate(params: AnnotateParams, print_only: bool) -> StrandResult<ToolOutcome> {
    let threads = effective_threads(params.threads);
    if print_only {
        let rule = Rule::new("vep_annotate")
            .named_input("calls", disp(&params.input))
            .named_input("cache", disp(&params.cache_dir))
            .named_output("calls", disp(&params.output))
            .log_file("logs/vep_annotate.log")
            .param("extra", params.extra.clone().unwrap_or_default())
            .threads(threads)
            .wrapper(wrapper_ref("bio/vep/annotate"));
        return Ok(ToolOutcome::Rendered(rule.render()));
    }
    Ok(ToolOutcome::Completed(exec::run(&annotate_command(
        &params, threads,
    ))?))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallCacheParams {
    #[serde(default = "default_species")]
    pub species: String,
    pub assembly: String,
    pub cache_dir: PathBuf,
}

fn install_cache_command(params: &InstallCacheParams) -> CommandSpec {
    // the cache installer ships as its own binary
    CommandSpec::new("vep_install")
        .args(["--AUTO", "cf"])
        .args(["--SPECIES", params.species.as_str()])
        .args(["--ASSEMBLY", params.assembly.as_str()])
        .arg("--CACHEDIR")
        .path_arg(&params.cache_dir)
        .arg("--NO_UPDATE")
}

pub fn run_vep_install_cache(
    params: InstallCacheParams,
    print_only: bool,
) -> StrandResult<ToolOutcome> {
    if print_only {
        let rule = Rule::new("vep_install_cache")
            .output(disp(&params.cache_dir))
            .param("species", params.species.clone())
            .param("assembly", params.assembly.clone())
            .wrapper(wrapper_ref("bio/vep/cache"));
        return Ok(ToolOutcome::Rendered(rule.render()));
    }
    Ok(ToolOutcome::Completed(exec::run(&install_cache_command(
        &params,
    ))?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotate_argv() {
        let params = AnnotateParams {
            input: PathBuf::from("calls/a.vcf.gz"),
            output: PathBuf::from("annotated/a.vcf.gz"),
            cache_dir: PathBuf::from("resources/vep"),
            species: default_species(),
            assembly: Some("GRCh38".to_string()),
            threads: 4,
            extra: None,
        };
        assert_eq!(
            annotate_command(&params, 4).argv().to_vec(),
            vec![
                "--input_file", "calls/a.vcf.gz",
                "--output_file", "annotated/a.vcf.gz",
                "--cache", "--dir_cache", "resources/vep",
                "--species", "homo_sapiens", "--vcf",
                "--assembly", "GRCh38",
                "--fork", "4",
            ]
        );
    }

    #[test]
    fn test_install_cache_uses_installer_binary() {
        let params = InstallCacheParams {
            species: default_species(),
            assembly: "GRCh38".to_string(),
            cache_dir: PathBuf::from("resources/vep"),
        };
        let spec = install_cache_command(&params);
        assert_eq!(spec.program(), "vep_install");
        assert!(spec.argv().contains(&"--CACHEDIR".to_string()));
    }

    #[test]
    fn test_annotate_rule_text() {
        let params = AnnotateParams {
            input: PathBuf::from("calls/a.vcf.gz"),
            output: PathBuf::from("annotated/a.vcf.gz"),
            cache_dir: PathBuf::from("resources/vep"),
            species: default_species(),
            assembly: None,
            threads: 1,
            extra: None,
        };
        let outcome = run_vep_annotate(params, true).unwrap();
        let text = outcome.as_rendered().unwrap();
        assert!(text.contains("rule vep_annotate:"));
        assert!(text.contains("cache=\"resources/vep\","));
        assert!(text.contains("bio/vep/annotate"));
    }
}
