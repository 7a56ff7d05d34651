//! Filter model, evaluation, and the text import/export format.
//!
//! A [`Filter`] is one comparison predicate over a named column; a list of
//! filters combines by group and AND/OR logic (see [`matches_row`]). The
//! sentinel column `ALL` matches against a precomputed per-row [`TextCache`]
//! instead of a single column.
//!
//! # Text Format
//!
//! Named filter sets travel between installations as plain text, one
//! bracketed-field line per filter:
//!
//! ```text
//! [ASSETS] [Cheap Minerals]
//! [0] [AND] [NAME] [CONTAINS] [trit] [enabled]
//! [0] [AND] [PRICE] [LESS_THAN] [100] [enabled]
//! ```
//!
//! A `[TOOL] [Name]` header opens each set and a blank line closes it. A
//! literal `]` inside a field is written `]]`. Filters on user-defined
//! formula or jump columns carry a trailing `[FORMULA...]`/`[JUMP...]` field
//! so the importing side can recreate the column. Import is deliberately
//! forgiving: unrecognizable lines are skipped and filters with unknown
//! tokens are dropped, never failing the rest of the paste.

mod cache;
mod export;
mod matcher;
mod model;
mod parser;

pub use cache::TextCache;
pub use export::export_sets;
pub use matcher::{matches_row, FilterMatcher};
pub use model::{CompareType, Filter, LogicType, UnknownToken};
pub use parser::{parse_import, ImportParse, ParsedSet};
