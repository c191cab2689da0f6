//! Snakemake rule model and text renderer
//!
//! Every wrapper's `print_only` mode goes through this builder. The rendered
//! text is a contract: downstream pipelines and the test suite match on the
//! `rule <name>:` header and the section labels, so the layout here follows
//! the snakemake-wrappers rule format exactly (4-space-indented section
//! labels, 8-space-indented double-quoted items with trailing commas).

use std::fmt::Write;

/// One entry in an `input:`, `output:` or `log:` section.
///
/// Snakemake items may be positional (`"mapped/a.bam",`) or keyword
/// (`bam="mapped/a.bam",`); both forms appear in the catalog.
#[derive(Debug, Clone)]
struct Item {
    key: Option<String>,
    value: String,
}

/// Builder for one declarative pipeline step.
#[derive(Debug, Clone, Default)]
pub struct Rule {
    name: String,
    inputs: Vec<Item>,
    outputs: Vec<Item>,
    logs: Vec<Item>,
    params: Vec<(String, String)>,
    threads: Option<usize>,
    wrapper: Option<String>,
}

impl Rule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input(mut self, value: impl Into<String>) -> Self {
        self.inputs.push(Item {
            key: None,
            value: value.into(),
        });
        self
    }

    pub fn named_input(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.inputs.push(Item {
            key: Some(key.into()),
            value: value.into(),
        });
        self
    }

    pub fn output(mut self, value: impl Into<String>) -> Self {
        self.outputs.push(Item {
            key: None,
            value: value.into(),
        });
        self
    }

    pub fn named_output(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.outputs.push(Item {
            key: Some(key.into()),
            value: value.into(),
        });
        self
    }

    pub fn log_file(mut self, value: impl Into<String>) -> Self {
        self.logs.push(Item {
            key: None,
            value: value.into(),
        });
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn wrapper(mut self, wrapper: impl Into<String>) -> Self {
        self.wrapper = Some(wrapper.into());
        self
    }

    /// Render the rule to its textual Snakemake form.
    ///
    /// Empty sections are omitted. Section order matches the catalog:
    /// input, output, log, params, threads, wrapper.
    pub fn render(&self) -> String {
        let mut out = String::new();
        writeln!(out, "rule {}:", self.name).expect("string write");

        render_section(&mut out, "input", &self.inputs);
        render_section(&mut out, "output", &self.outputs);
        render_section(&mut out, "log", &self.logs);

        if !self.params.is_empty() {
            out.push_str("    params:\n");
            for (key, value) in &self.params {
                writeln!(out, "        {}=\"{}\",", key, value).expect("string write");
            }
        }
        if let Some(threads) = self.threads {
            writeln!(out, "    threads: {}", threads).expect("string write");
        }
        if let Some(wrapper) = &self.wrapper {
            out.push_str("    wrapper:\n");
            writeln!(out, "        \"{}\"", wrapper).expect("string write");
        }
        out
    }
}

fn render_section(out: &mut String, label: &str, items: &[Item]) {
    if items.is_empty() {
        return;
    }
    writeln!(out, "    {}:", label).expect("string write");
    for item in items {
        match &item.key {
            Some(key) => writeln!(out, "        {}=\"{}\",", key, item.value),
            None => writeln!(out, "        \"{}\",", item.value),
        }
        .expect("string write");
    }
}
