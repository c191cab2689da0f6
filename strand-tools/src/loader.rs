//! Building the registry from the built-in tool families
//!
//! Loading is best-effort: a family whose registration fails is logged and
//! skipped, and the registry exposes exactly the subset that registered
//! cleanly. Entries a family added before failing remain registered, which
//! keeps the partial-availability behavior of loading each family
//! independently.

use std::path::Path;

use tracing::{debug, error};

use crate::discovery::{find_candidate_modules, ModulePath};
use crate::registry::ToolRegistry;
use crate::types::Family;
use crate::wrappers;
use strand_core::StrandResult;

/// Registration entry point exposed by each family module
pub type RegisterFn = fn(&mut ToolRegistry) -> StrandResult<()>;

/// All built-in families, in load order
pub const BUILTIN_FAMILIES: &[(Family, RegisterFn)] = &[
    (Family::Samtools, wrappers::samtools::register),
    (Family::Bwa, wrappers::bwa::register),
    (Family::Gatk, wrappers::gatk::register),
    (Family::Picard, wrappers::picard::register),
    (Family::Bcftools, wrappers::bcftools::register),
    (Family::Fastqc, wrappers::fastqc::register),
    (Family::Vep, wrappers::vep::register),
];

/// Build the registry from every built-in family.
///
/// Deterministic and idempotent: repeated calls yield the same set of
/// registered names.
pub fn load_all_tools() -> ToolRegistry {
    load_families(BUILTIN_FAMILIES)
}

/// Build a registry from an explicit family list
pub fn load_families(families: &[(Family, RegisterFn)]) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    for (family, register) in families {
        match register(&mut registry) {
            Ok(()) => debug!(family = family.name(), "registered tool family"),
            Err(e) => {
                error!(
                    family = family.name(),
                    error = %e,
                    "skipping tool family: registration failed"
                );
            }
        }
    }
    registry
}

/// Cross-check a legacy on-disk catalog against a built registry.
///
/// Returns the discovered wrapper modules whose tool name has no native
/// counterpart in the registry.
pub fn audit_catalog(root_dir: &Path, registry: &ToolRegistry) -> StrandResult<Vec<ModulePath>> {
    let modules = find_candidate_modules(root_dir)?;
    Ok(modules
        .into_iter()
        .filter(|module| match module.tool_name() {
            Some(name) => registry.get(name).is_none(),
            None => true,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ToolEntry;
    use crate::types::ToolOutcome;
    use std::collections::BTreeSet;
    use std::fs;
    use tempfile::TempDir;

    fn register_ok(registry: &mut ToolRegistry) -> StrandResult<()> {
        registry.register(ToolEntry::new(
            "mock_align",
            Family::Bwa,
            "mock aligner",
            Box::new(|_| Ok(ToolOutcome::Rendered("rule mock_align:\n".to_string()))),
        ))
    }

    fn register_fails(registry: &mut ToolRegistry) -> StrandResult<()> {
        // Registers one tool, then collides with itself.
        registry.register(ToolEntry::new(
            "mock_index",
            Family::Samtools,
            "mock indexer",
            Box::new(|_| Ok(ToolOutcome::Rendered("rule mock_index:\n".to_string()))),
        ))?;
        registry.register(ToolEntry::new(
            "mock_index",
            Family::Samtools,
            "duplicate",
            Box::new(|_| Ok(ToolOutcome::Rendered(String::new()))),
        ))
    }

    #[test]
    fn test_failing_family_does_not_abort_load() {
        let families: &[(Family, RegisterFn)] = &[
            (Family::Samtools, register_fails),
            (Family::Bwa, register_ok),
        ];
        let registry = load_families(families);

        // The later family still registered.
        assert!(registry.get("mock_align").is_some());
        // Entries registered before the failure remain.
        assert!(registry.get("mock_index").is_some());
    }

    #[test]
    fn test_load_all_tools_idempotent() {
        let first: BTreeSet<String> = load_all_tools()
            .names()
            .into_iter()
            .map(String::from)
            .collect();
        let second: BTreeSet<String> = load_all_tools()
            .names()
            .into_iter()
            .map(String::from)
            .collect();
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_every_builtin_family_registers() {
        let registry = load_all_tools();
        let loaded = registry.families();
        for (family, _) in BUILTIN_FAMILIES {
            assert!(loaded.contains(family), "{} missing", family.name());
        }
    }

    #[test]
    fn test_audit_catalog() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("bio_catalog");
        fs::create_dir_all(root.join("samtools/mcp")).unwrap();
        fs::write(root.join("samtools/mcp/run_samtools_sort.py"), "").unwrap();
        fs::write(root.join("samtools/mcp/run_samtools_depth.py"), "").unwrap();

        let registry = load_all_tools();
        let missing = audit_catalog(&root, &registry).unwrap();

        // sort has a native counterpart, depth does not
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].tool_name(), Some("samtools_depth"));
    }
}
