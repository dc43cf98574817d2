//! Terminal output for compiled predicates, detections and the strategy table.

use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use pgwhere_core::{
    CompileError, CompiledWhere, FieldTypeFamily, PlaceholderStyle, SqlParam, StrategyRegistry,
    TypeHint,
};
use serde::Serialize;

use crate::FormatArg;

#[derive(Serialize)]
struct Detection<'a> {
    field: &'a str,
    family: FieldTypeFamily,
    hint: Option<TypeHint>,
}

fn param_type(param: &SqlParam) -> &'static str {
    match param {
        SqlParam::Bool(_) => "bool",
        SqlParam::Int(_) => "int",
        SqlParam::Float(_) => "float",
        SqlParam::Text(_) => "text",
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("{} {e}", "error:".red().bold()),
    }
}

/// Print a compiled predicate; `None` means the filter selects everything.
pub fn print_compiled(
    compiled: Option<&CompiledWhere>,
    style: PlaceholderStyle,
    format: FormatArg,
) {
    if format == FormatArg::Json {
        print_json(&compiled);
        return;
    }

    let Some(compiled) = compiled else {
        println!("{}", "No predicate (empty filter).".dimmed());
        return;
    };

    println!("{}", compiled.sql);
    if !compiled.is_predicate {
        println!(
            "{}",
            "note: contains a scalar distance term; use it in ORDER BY or compare it explicitly"
                .yellow()
        );
    }
    if compiled.params.is_empty() {
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("#").fg(Color::Cyan),
        Cell::new("placeholder").fg(Color::Cyan),
        Cell::new("type").fg(Color::Cyan),
        Cell::new("value").fg(Color::Cyan),
    ]);

    for (i, param) in compiled.params.iter().enumerate() {
        let placeholder = match style {
            PlaceholderStyle::Format => "%s".to_string(),
            PlaceholderStyle::Numbered => format!("${}", i + 1),
        };
        let value = match param {
            SqlParam::Text(s) => s.clone(),
            other => other.to_string(),
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(placeholder),
            Cell::new(param_type(param)),
            Cell::new(value),
        ]);
    }

    println!("{table}");
}

/// Print the family detected for a field.
pub fn print_detection(
    field: &str,
    family: FieldTypeFamily,
    hint: Option<TypeHint>,
    format: FormatArg,
) {
    if format == FormatArg::Json {
        print_json(&Detection {
            field,
            family,
            hint,
        });
        return;
    }

    let source = if hint.is_some() { " (hinted)" } else { "" };
    println!(
        "{}: {}{}",
        field.bold(),
        family.to_string().green(),
        source.dimmed()
    );
}

/// Print strategies in precedence order, optionally only those claiming `family`.
pub fn print_operators(registry: &StrategyRegistry, family: Option<FieldTypeFamily>) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("order").fg(Color::Cyan),
        Cell::new("strategy").fg(Color::Cyan),
        Cell::new("operators").fg(Color::Cyan),
        Cell::new("families").fg(Color::Cyan),
    ]);

    for (i, strategy) in registry.strategies().iter().enumerate() {
        if family.is_some_and(|f| !(strategy.families)(f)) {
            continue;
        }
        let operators = strategy
            .operators
            .iter()
            .map(|op| op.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let families = strategy
            .claimed_families()
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(strategy.kind.name()).fg(Color::Green),
            Cell::new(operators),
            Cell::new(families),
        ]);
    }

    println!("{table}");
}

/// Print an error to stderr, with the error code when it is a compile error.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {err:#}", "error:".red().bold());
    if let Some(field) = err.downcast_ref::<CompileError>().and_then(CompileError::field) {
        eprintln!("  {} {}", "-->".blue().bold(), field);
    }
}
