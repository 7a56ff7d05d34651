//! Export rendering for the bracketed-field filter text format.

use crate::column::{ColumnCatalog, ColumnDef};
use crate::filter::model::Filter;
use crate::filter::parser::{FORMULA_TAG, JUMP_TAG};

/// Renders filter sets as import/export text.
///
/// Each set gets a `[TOOL] [Name]` header, one line per filter, and a blank
/// separator line. Dynamic columns carry a trailing metadata field so the
/// importing side can recreate them. Lines end with `\r\n`.
pub fn export_sets(tool: &str, sets: &[(&str, &[Filter])], catalog: &dyn ColumnCatalog) -> String {
    let mut out = String::new();
    for (name, filters) in sets {
        out.push_str(&format!("[{}] [{}]\r\n", tool.to_uppercase(), wrap(name)));
        for filter in *filters {
            out.push_str(&format!(
                "[{}] [{}] [{}] [{}] [{}] [{}]",
                filter.group(),
                filter.logic(),
                filter.column(),
                filter.compare(),
                wrap(filter.text()),
                if filter.is_enabled() { "enabled" } else { "disabled" },
            ));
            match catalog.lookup(filter.column()) {
                Some(ColumnDef::Formula { expression }) => {
                    // Spaces are stripped so the expression survives field
                    // splitting on the importing side
                    out.push_str(&format!(
                        " [{}{}]",
                        FORMULA_TAG,
                        wrap(&expression).replace(' ', "")
                    ));
                }
                Some(ColumnDef::Jump { system_id }) => {
                    out.push_str(&format!(" [{}{}]", JUMP_TAG, system_id));
                }
                Some(ColumnDef::Static) | None => {}
            }
            out.push_str("\r\n");
        }
        out.push_str("\r\n");
    }
    out
}

/// Escapes literal `]` so a field cannot end early.
fn wrap(text: &str) -> String {
    text.replace(']', "]]")
}
