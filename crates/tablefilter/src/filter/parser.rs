//! Import parsing for the bracketed-field filter text format.
//!
//! A line is tokenized into bracketed fields, `]]` unescaping to a literal
//! `]`. Two fields form a set header `[TOOL] [Name]`; four fields are a
//! legacy filter line; five to seven fields are the current filter shape
//! `[group] [logic] [column] [compare] [text] [enabled]` with an optional
//! trailing metadata field that lets import reconstruct a formula or jump
//! column the receiving tool does not have yet. Lines matching none of these
//! shapes are ignored, and filters with unrecognized tokens are dropped
//! without failing the rest of the import.

use tracing::debug;

use crate::column::{ColumnCatalog, ColumnDef, ALL_COLUMNS};
use crate::filter::model::{CompareType, Filter, LogicType};

pub(crate) const FORMULA_TAG: &str = "FORMULA";
pub(crate) const JUMP_TAG: &str = "JUMP";

const ENABLED: &str = "enabled";
const DISABLED: &str = "disabled";

/// One named filter set recovered from import text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSet {
    pub name: String,
    pub filters: Vec<Filter>,
}

/// The outcome of scanning one block of import text.
///
/// `header_seen` distinguishes "nothing recognizable at all" (the caller may
/// re-prompt) from "headers found but every filter dropped" (a silent no-op).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportParse {
    pub header_seen: bool,
    pub sets: Vec<ParsedSet>,
}

/// Parses import text into named filter sets.
///
/// Formula and jump columns referenced by a filter but unknown to `catalog`
/// are defined from the trailing metadata field when present; a filter whose
/// column still does not resolve is dropped.
pub fn parse_import(text: &str, catalog: &mut dyn ColumnCatalog) -> ImportParse {
    let mut sets: Vec<ParsedSet> = Vec::new();
    let mut current: Option<ParsedSet> = None;
    let mut header_seen = false;

    for line in text.split(['\r', '\n']) {
        if line.is_empty() {
            continue;
        }
        let fields = scan_fields(line);
        match fields.len() {
            2 => {
                if let Some(done) = current.take() {
                    sets.push(done);
                }
                current = Some(ParsedSet {
                    name: fields[1].clone(),
                    filters: Vec::new(),
                });
                header_seen = true;
            }
            4 => {
                if let Some(set) = current.as_mut() {
                    if let Some(filter) = legacy_filter(&fields, catalog) {
                        set.filters.push(filter);
                    } else {
                        debug!(line, "dropped legacy filter line");
                    }
                }
            }
            n if n >= 5 => {
                if let Some(set) = current.as_mut() {
                    if let Some(filter) = modern_filter(&fields, catalog) {
                        set.filters.push(filter);
                    } else {
                        debug!(line, "dropped filter line");
                    }
                }
            }
            _ => {} // not part of the format
        }
    }
    if let Some(done) = current.take() {
        sets.push(done);
    }
    ImportParse { header_seen, sets }
}

/// Four-field line without group and enabled, kept for old exports.
fn legacy_filter(fields: &[String], catalog: &dyn ColumnCatalog) -> Option<Filter> {
    let logic: LogicType = fields[0].parse().ok()?;
    let column = fields[1].as_str();
    if !column_exists(catalog, column) {
        return None;
    }
    let compare: CompareType = fields[2].parse().ok()?;
    let text = comparand(&fields[3], compare, catalog)?;
    Some(Filter::simple(logic, column, compare, text))
}

fn modern_filter(fields: &[String], catalog: &mut dyn ColumnCatalog) -> Option<Filter> {
    let group: i32 = fields[0].parse().ok()?;
    let logic: LogicType = fields[1].parse().ok()?;
    let column = fields[2].as_str();
    let mut known = column_exists(catalog, column);
    if !known && fields.len() == 7 {
        known = define_from_metadata(catalog, column, &fields[6]);
    }
    if !known {
        return None;
    }
    let compare: CompareType = fields[3].parse().ok()?;
    let text = comparand(&fields[4], compare, catalog)?;
    let enabled = fields.get(5).map_or(true, |field| parse_enabled(field));
    Some(Filter::new(group, logic, column, compare, text, enabled))
}

/// The literal comparand, validated as a column name for column compares.
fn comparand(text: &str, compare: CompareType, catalog: &dyn ColumnCatalog) -> Option<String> {
    if compare.is_column_compare() && !column_exists(catalog, text) {
        return None;
    }
    Some(text.to_string())
}

fn column_exists(catalog: &dyn ColumnCatalog, name: &str) -> bool {
    name == ALL_COLUMNS || catalog.lookup(name).is_some()
}

/// "disabled" (case-insensitive) disables; anything else, including junk,
/// leaves the filter enabled.
fn parse_enabled(text: &str) -> bool {
    !text.eq_ignore_ascii_case(DISABLED)
}

fn define_from_metadata(catalog: &mut dyn ColumnCatalog, column: &str, data: &str) -> bool {
    if let Some(expression) = data.strip_prefix(FORMULA_TAG) {
        catalog.define(
            column,
            ColumnDef::Formula {
                expression: expression.to_string(),
            },
        )
    } else if let Some(system) = data.strip_prefix(JUMP_TAG) {
        match system.parse::<i64>() {
            Ok(system_id) => catalog.define(column, ColumnDef::Jump { system_id }),
            Err(_) => false,
        }
    } else {
        false
    }
}

/// Splits a line into its bracketed fields, unescaping `]]`.
///
/// An opening bracket with no terminating `]` is discarded, as is any text
/// between fields.
pub(crate) fn scan_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '[' {
            continue;
        }
        let mut field = String::new();
        let mut closed = false;
        while let Some(c) = chars.next() {
            if c == ']' {
                if chars.peek() == Some(&']') {
                    chars.next();
                    field.push(']');
                } else {
                    closed = true;
                    break;
                }
            } else {
                field.push(c);
            }
        }
        if closed {
            fields.push(field);
        }
    }
    fields
}
