//! # List and Describe Subcommands
//!
//! Read-only views over the loaded schema table.

use anyhow::Result;
use clap::Args;
use propspec_core::{ComponentSchema, PropSpec};
use propspec_schema::SchemaTable;
use serde::Serialize;

use crate::config::{OutputFormat, Settings};
use crate::load_table;

/// Arguments for the describe subcommand.
#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Component name, matched exactly.
    pub component: String,
}

/// One row of `propspec list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentSummary {
    /// Component name.
    pub name: String,
    /// Number of declared props, after variant folding.
    pub props: usize,
    /// Number of declared events.
    pub events: usize,
    /// Number of required props.
    pub required: usize,
}

/// Summaries of every component, sorted by name.
pub fn summarize(table: &SchemaTable) -> Vec<ComponentSummary> {
    table
        .iter()
        .map(|schema| ComponentSummary {
            name: schema.name().to_string(),
            props: schema.props().len(),
            events: schema.events().len(),
            required: schema.required_props().count(),
        })
        .collect()
}

fn prop_line(prop: &PropSpec) -> String {
    let mut line = format!("  {}: {}", prop.name(), prop.accepted());
    if prop.is_required() {
        line.push_str(" (required)");
    }
    if let Some(default) = prop.default_value() {
        line.push_str(&format!(" = {default}"));
    }
    line
}

/// Text rendering of one component: header, props, then events.
pub fn describe_lines(schema: &ComponentSchema) -> Vec<String> {
    let mut lines = vec![schema.name().to_string()];
    if let Some(description) = schema.description() {
        lines.push(format!("  {description}"));
    }
    lines.push(format!("props ({}):", schema.props().len()));
    lines.extend(schema.props().iter().map(prop_line));
    lines.push(format!("events ({}):", schema.events().len()));
    lines.extend(
        schema
            .events()
            .iter()
            .map(|e| format!("  @{}({})", e.name(), e.params().join(", "))),
    );
    lines
}

/// Execute the list subcommand.
pub fn run_list(settings: &Settings) -> Result<u8> {
    let table = load_table(settings)?;
    let summaries = summarize(&table);
    match settings.format {
        OutputFormat::Text => {
            for s in &summaries {
                println!(
                    "{:<24} {:>3} props ({} required), {:>2} events",
                    s.name, s.props, s.required, s.events
                );
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
    }
    Ok(0)
}

/// Execute the describe subcommand.
pub fn run_describe(args: &DescribeArgs, settings: &Settings) -> Result<u8> {
    let table = load_table(settings)?;
    let schema = table.lookup(&args.component)?;
    match settings.format {
        OutputFormat::Text => {
            for line in describe_lines(schema) {
                println!("{line}");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(schema)?),
    }
    Ok(0)
}
