//! Tool registry: the explicit mapping from tool name to wrapper
//!
//! The registry is a constructed object passed by reference, never a
//! process-wide singleton, and registration fails loudly on a name
//! collision so conflicts surface at build/test time instead of being
//! resolved by load order.

use indexmap::IndexMap;

use crate::types::{Family, ToolInvocation, ToolOutcome};
use strand_core::{StrandError, StrandResult};

/// Uniform invocation signature shared by every registered wrapper
pub type ToolFn = Box<dyn Fn(&ToolInvocation) -> StrandResult<ToolOutcome> + Send + Sync>;

/// One registered tool
pub struct ToolEntry {
    name: String,
    family: Family,
    description: String,
    run: ToolFn,
}

impl ToolEntry {
    pub fn new(
        name: impl Into<String>,
        family: Family,
        description: impl Into<String>,
        run: ToolFn,
    ) -> Self {
        Self {
            name: name.into(),
            family,
            description: description.into(),
            run,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn invoke(&self, invocation: &ToolInvocation) -> StrandResult<ToolOutcome> {
        (self.run)(invocation)
    }
}

impl std::fmt::Debug for ToolEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolEntry")
            .field("name", &self.name)
            .field("family", &self.family)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Ordered mapping from tool name to entry
#[derive(Debug, Default)]
pub struct ToolRegistry {
    entries: IndexMap<String, ToolEntry>,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool entry.
    ///
    /// Fails with [`StrandError::DuplicateToolName`] when the name is
    /// already taken; the existing entry is left untouched.
    pub fn register(&mut self, entry: ToolEntry) -> StrandResult<()> {
        if let Some(existing) = self.entries.get(entry.name()) {
            return Err(StrandError::DuplicateToolName {
                name: entry.name().to_string(),
                family: existing.family().name().to_string(),
            });
        }
        self.entries.insert(entry.name().to_string(), entry);
        Ok(())
    }

    /// Look up a tool by name
    pub fn get(&self, name: &str) -> Option<&ToolEntry> {
        self.entries.get(name)
    }

    /// Look up a tool by name, failing with [`StrandError::ToolNotFound`]
    pub fn get_required(&self, name: &str) -> StrandResult<&ToolEntry> {
        self.get(name)
            .ok_or_else(|| StrandError::ToolNotFound(name.to_string()))
    }

    /// Registered tool names, in registration order
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Iterate over entries in registration order
    pub fn iter(&self) -> impl Iterator<Item = &ToolEntry> {
        self.entries.values()
    }

    /// Families with at least one registered tool
    pub fn families(&self) -> Vec<Family> {
        let mut seen = Vec::new();
        for entry in self.entries.values() {
            if !seen.contains(&entry.family()) {
                seen.push(entry.family());
            }
        }
        seen
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, family: Family) -> ToolEntry {
        ToolEntry::new(
            name,
            family,
            format!("test entry {}", name),
            Box::new(|_inv| Ok(ToolOutcome::Rendered("rule test:\n".to_string()))),
        )
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = ToolRegistry::new();
        registry.register(entry("samtools_sort", Family::Samtools)).unwrap();

        let found = registry.get("samtools_sort").unwrap();
        assert_eq!(found.name(), "samtools_sort");
        assert_eq!(found.family(), Family::Samtools);

        let invocation = ToolInvocation::render(serde_json::json!({}));
        let outcome = found.invoke(&invocation).unwrap();
        assert!(outcome.as_rendered().unwrap().starts_with("rule "));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register(entry("fastqc", Family::Fastqc)).unwrap();

        let err = registry.register(entry("fastqc", Family::Samtools)).unwrap_err();
        match err {
            StrandError::DuplicateToolName { name, family } => {
                assert_eq!(name, "fastqc");
                // The family reported is the one already holding the name.
                assert_eq!(family, "fastqc");
            }
            other => panic!("expected DuplicateToolName, got {:?}", other),
        }
        // Original entry untouched
        assert_eq!(registry.get("fastqc").unwrap().family(), Family::Fastqc);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_get_required_missing() {
        let registry = ToolRegistry::new();
        assert!(matches!(
            registry.get_required("bowtie2_align"),
            Err(StrandError::ToolNotFound(_))
        ));
    }

    #[test]
    fn test_names_in_registration_order() {
        let mut registry = ToolRegistry::new();
        registry.register(entry("bwa_mem", Family::Bwa)).unwrap();
        registry.register(entry("bwa_index", Family::Bwa)).unwrap();
        registry.register(entry("fastqc", Family::Fastqc)).unwrap();

        assert_eq!(registry.names(), vec!["bwa_mem", "bwa_index", "fastqc"]);
        assert_eq!(registry.families(), vec![Family::Bwa, Family::Fastqc]);
    }
}
