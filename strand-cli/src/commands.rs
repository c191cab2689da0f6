use anyhow::Result;
use colored::*;
use comfy_table::{presets::UTF8_FULL, Table};
use std::path::Path;

use strand_core::{StrandError, StrandResult};
use strand_tools::{
    audit_catalog, exec, find_candidate_modules, Family, ToolInvocation, ToolOutcome, ToolRegistry,
};

fn parse_args(raw: &str) -> StrandResult<serde_json::Value> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| StrandError::InvalidInput(format!("--args must be a JSON object: {}", e)))?;
    if !value.is_object() {
        return Err(StrandError::InvalidInput(
            "--args must be a JSON object".to_string(),
        ));
    }
    Ok(value)
}

pub fn list(registry: &ToolRegistry, family: Option<&str>) -> Result<()> {
    let family = family.map(|f| f.parse::<Family>()).transpose()?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Tool", "Family", "Description"]);
    for entry in registry.iter() {
        if let Some(family) = family {
            if entry.family() != family {
                continue;
            }
        }
        table.add_row(vec![
            entry.name(),
            entry.family().name(),
            entry.description(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn render(registry: &ToolRegistry, tool: &str, raw_args: &str) -> Result<()> {
    let entry = registry.get_required(tool)?;
    let outcome = entry.invoke(&ToolInvocation::render(parse_args(raw_args)?))?;
    match outcome {
        ToolOutcome::Rendered(text) => print!("{text}"),
        ToolOutcome::Completed(_) => unreachable!("print_only invocation executed the tool"),
    }
    Ok(())
}

pub fn run(registry: &ToolRegistry, tool: &str, raw_args: &str) -> Result<i32> {
    let entry = registry.get_required(tool)?;
    let outcome = entry.invoke(&ToolInvocation::execute(parse_args(raw_args)?))?;
    match outcome {
        ToolOutcome::Completed(summary) => {
            if !summary.stdout.is_empty() {
                print!("{}", summary.stdout);
            }
            if !summary.stderr.is_empty() {
                eprint!("{}", summary.stderr);
            }
            if summary.success {
                println!("{} {} completed", "✓".green(), tool);
            } else {
                eprintln!(
                    "{} {} exited with {}",
                    "✗".red(),
                    tool,
                    summary
                        .exit_code
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| "signal".to_string())
                );
            }
            Ok(summary.exit_code.unwrap_or(1))
        }
        ToolOutcome::Rendered(_) => unreachable!("execute invocation rendered a rule"),
    }
}

pub fn catalog(root: &Path) -> Result<()> {
    let modules = find_candidate_modules(root)?;
    for module in &modules {
        println!("{module}");
    }
    eprintln!("{} wrapper module(s) discovered", modules.len());
    Ok(())
}

pub fn doctor(registry: &ToolRegistry, catalog: Option<&Path>) -> Result<()> {
    println!("External binaries:");
    for family in Family::all() {
        let mark = if exec::is_available(family.binary_name()) {
            "✓".green()
        } else {
            "✗".red()
        };
        println!("  {} {} ({})", mark, family.display_name(), family.binary_name());
    }

    if let Some(root) = catalog {
        let missing = audit_catalog(root, registry)?;
        if missing.is_empty() {
            println!("Catalog: every discovered wrapper has a native counterpart");
        } else {
            println!("Catalog: {} wrapper(s) without a native counterpart:", missing.len());
            for module in missing {
                println!("  {module}");
            }
        }
    }
    Ok(())
}
