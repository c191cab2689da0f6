//! Common types for the tool catalog

use crate::exec::RunSummary;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Tool families covered by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    Samtools,
    Bwa,
    Gatk,
    Picard,
    Bcftools,
    Fastqc,
    Vep,
}

impl Family {
    /// Get the name of the family
    pub fn name(&self) -> &'static str {
        match self {
            Family::Samtools => "samtools",
            Family::Bwa => "bwa",
            Family::Gatk => "gatk",
            Family::Picard => "picard",
            Family::Bcftools => "bcftools",
            Family::Fastqc => "fastqc",
            Family::Vep => "vep",
        }
    }

    /// Get the display name of the family
    pub fn display_name(&self) -> &'static str {
        match self {
            Family::Samtools => "SAMtools",
            Family::Bwa => "BWA",
            Family::Gatk => "GATK4",
            Family::Picard => "Picard",
            Family::Bcftools => "BCFtools",
            Family::Fastqc => "FastQC",
            Family::Vep => "Ensembl VEP",
        }
    }

    /// Get the binary name the family's wrappers shell out to
    pub fn binary_name(&self) -> &'static str {
        match self {
            Family::Samtools => "samtools",
            Family::Bwa => "bwa",
            Family::Gatk => "gatk",
            Family::Picard => "picard",
            Family::Bcftools => "bcftools",
            Family::Fastqc => "fastqc",
            Family::Vep => "vep",
        }
    }

    /// All families known to the catalog
    pub fn all() -> &'static [Family] {
        &[
            Family::Samtools,
            Family::Bwa,
            Family::Gatk,
            Family::Picard,
            Family::Bcftools,
            Family::Fastqc,
            Family::Vep,
        ]
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Family {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "samtools" => Ok(Family::Samtools),
            "bwa" => Ok(Family::Bwa),
            "gatk" | "gatk4" => Ok(Family::Gatk),
            "picard" => Ok(Family::Picard),
            "bcftools" => Ok(Family::Bcftools),
            "fastqc" => Ok(Family::Fastqc),
            "vep" => Ok(Family::Vep),
            _ => anyhow::bail!("Unknown tool family: {}", s),
        }
    }
}

/// One request against a registered tool.
///
/// Args arrive as JSON from the host and are deserialized into the wrapper's
/// params struct at invocation time.
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    pub args: serde_json::Value,
    pub print_only: bool,
}

impl ToolInvocation {
    /// Render the Snakemake rule instead of executing the tool
    pub fn render(args: serde_json::Value) -> Self {
        Self {
            args,
            print_only: true,
        }
    }

    /// Execute the external tool
    pub fn execute(args: serde_json::Value) -> Self {
        Self {
            args,
            print_only: false,
        }
    }
}

/// What a wrapper produced: the rendered rule text, or the summary of the
/// external process it ran.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ToolOutcome {
    Rendered(String),
    Completed(RunSummary),
}

impl ToolOutcome {
    pub fn as_rendered(&self) -> Option<&str> {
        match self {
            ToolOutcome::Rendered(text) => Some(text),
            ToolOutcome::Completed(_) => None,
        }
    }

    pub fn as_completed(&self) -> Option<&RunSummary> {
        match self {
            ToolOutcome::Rendered(_) => None,
            ToolOutcome::Completed(summary) => Some(summary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_family_names() {
        assert_eq!(Family::Samtools.name(), "samtools");
        assert_eq!(Family::Gatk.display_name(), "GATK4");
        assert_eq!(Family::Vep.binary_name(), "vep");
    }

    #[test]
    fn test_family_from_str() {
        assert_eq!(Family::from_str("SAMTOOLS").unwrap(), Family::Samtools);
        assert_eq!(Family::from_str("gatk4").unwrap(), Family::Gatk);
        assert!(Family::from_str("bowtie2").is_err());
    }

    #[test]
    fn test_all_families_have_distinct_names() {
        let names: std::collections::HashSet<_> =
            Family::all().iter().map(|f| f.name()).collect();
        assert_eq!(names.len(), Family::all().len());
    }
}
