//! Filter evaluation against typed rows.
//!
//! A [`FilterMatcher`] compiles one [`Filter`] against a [`TableSource`] and
//! tests rows one at a time. The comparand's canonical lowercase form is
//! computed once at construction, except for the `*_COLUMN` compare variants
//! where the text names another column resolved per row.
//!
//! Comparison operators are pure functions over [`ColumnValue`] tags; type
//! coercion failures degrade to a per-operator boolean fallback instead of
//! raising.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};

use crate::column::{TableSource, ALL_COLUMNS};
use crate::filter::cache::TextCache;
use crate::filter::model::{CompareType, Filter, LogicType};
use crate::value::{
    canonical, canonical_input, parse_user_date, parse_user_number, ColumnValue,
};

/// Evaluates one filter against rows of a table.
pub struct FilterMatcher<'a, S: TableSource> {
    source: &'a S,
    cache: &'a TextCache,
    and: bool,
    column: String,
    compare: CompareType,
    text: String,
    enabled: bool,
}

impl<'a, S: TableSource> FilterMatcher<'a, S> {
    /// Compiles a filter against a source and its full-text cache.
    pub fn new(source: &'a S, cache: &'a TextCache, filter: &Filter) -> Self {
        Self::from_parts(
            source,
            cache,
            filter.logic(),
            filter.column(),
            filter.compare(),
            filter.text(),
            filter.is_enabled(),
        )
    }

    /// Compiles a matcher from decomposed filter fields.
    pub fn from_parts(
        source: &'a S,
        cache: &'a TextCache,
        logic: LogicType,
        column: &str,
        compare: CompareType,
        text: &str,
        enabled: bool,
    ) -> Self {
        let text = if compare.is_column_compare() {
            // Column name, resolved against the row at evaluation time
            text.to_string()
        } else {
            canonical_input(text).to_lowercase()
        };
        Self {
            source,
            cache,
            and: logic == LogicType::And,
            column: column.to_string(),
            compare,
            text,
            enabled,
        }
    }

    /// Returns true if the filter combines with AND logic.
    pub fn is_and(&self) -> bool {
        self.and
    }

    /// Returns true if the matcher cannot select anything (blank comparand
    /// or disabled filter); callers skip empty matchers.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() || !self.enabled
    }

    /// Returns true if the row matches the filter.
    pub fn matches(&self, row: &S::Row) -> bool {
        if self.column == ALL_COLUMNS {
            return self.matches_all(row);
        }
        let value = self.source.column_value(row, &self.column);
        if value.is_missing() {
            return false;
        }
        match self.compare {
            CompareType::Contains => contains(&value, &self.text),
            CompareType::ContainsNot => !contains(&value, &self.text),
            CompareType::Equals | CompareType::EqualsDate => equals(&value, &self.text),
            CompareType::EqualsNot | CompareType::EqualsNotDate => !equals(&value, &self.text),
            CompareType::GreaterThan => great(num_operand(&value), num_literal(&self.text)),
            CompareType::LessThan => less(num_operand(&value), num_literal(&self.text)),
            CompareType::Before => date_cmp_lt(date_of(&value), parse_user_date(&self.text)),
            CompareType::After => date_cmp_gt(date_of(&value), parse_user_date(&self.text)),
            CompareType::LastDays => last_days(&value, &self.text),
            CompareType::ContainsColumn => self
                .other_value(row)
                .is_some_and(|other| contains_value(&value, &other)),
            CompareType::ContainsNotColumn => self
                .other_value(row)
                .is_some_and(|other| !contains_value(&value, &other)),
            CompareType::EqualsColumn => self
                .other_value(row)
                .is_some_and(|other| equals_value(&value, &other)),
            CompareType::EqualsNotColumn => self
                .other_value(row)
                .is_some_and(|other| !equals_value(&value, &other)),
            CompareType::GreaterThanColumn => self
                .other_value(row)
                .is_some_and(|other| great(num_operand(&value), num_operand(&other))),
            CompareType::LessThanColumn => self
                .other_value(row)
                .is_some_and(|other| less(num_operand(&value), num_operand(&other))),
            CompareType::BeforeColumn => self
                .other_value(row)
                .is_some_and(|other| date_cmp_lt(date_of(&value), date_operand(&other))),
            CompareType::AfterColumn => self
                .other_value(row)
                .is_some_and(|other| date_cmp_gt(date_of(&value), date_operand(&other))),
        }
    }

    /// Resolves the comparand column for `*_COLUMN` variants.
    ///
    /// An unresolved name (or missing value) degrades the filter to no-match.
    fn other_value(&self, row: &S::Row) -> Option<ColumnValue> {
        let value = self.source.column_value(row, &self.text);
        if value.is_missing() {
            None
        } else {
            Some(value)
        }
    }

    /// Full-text ("match any column") evaluation through the cache.
    ///
    /// # Panics
    ///
    /// Panics if the row has no cache entry. A missing entry means the owning
    /// collection mutated rows without updating the cache; rebuilding here
    /// would silently mask that bug.
    fn matches_all(&self, row: &S::Row) -> bool {
        let id = self.source.row_id(row);
        let Some(haystack) = self.cache.get(id) else {
            panic!(
                "full-text cache has no entry for row {:?} in '{}': rebuild the cache before filtering",
                id,
                self.source.name()
            );
        };
        match self.compare {
            CompareType::Contains => haystack.contains(&self.text),
            CompareType::ContainsNot => !haystack.contains(&self.text),
            CompareType::Equals | CompareType::EqualsDate => haystack.contains(&framed(&self.text)),
            CompareType::EqualsNot | CompareType::EqualsNotDate => {
                !haystack.contains(&framed(&self.text))
            }
            // Only containment and equality are meaningful against the blob
            _ => true,
        }
    }
}

/// Applies a filter list to one row: within each group, AND filters must all
/// match and at least one OR filter (when any exist) must match; groups
/// combine with OR. Empty matchers are skipped; no active filter means the
/// row is shown.
pub fn matches_row<S: TableSource>(
    source: &S,
    cache: &TextCache,
    filters: &[Filter],
    row: &S::Row,
) -> bool {
    let mut groups: BTreeMap<i32, Vec<FilterMatcher<'_, S>>> = BTreeMap::new();
    for filter in filters {
        let matcher = FilterMatcher::new(source, cache, filter);
        if matcher.is_empty() {
            continue;
        }
        groups.entry(filter.group()).or_default().push(matcher);
    }
    if groups.is_empty() {
        return true;
    }
    groups.values().any(|group| group_matches(group, row))
}

fn group_matches<S: TableSource>(matchers: &[FilterMatcher<'_, S>], row: &S::Row) -> bool {
    let mut or_seen = false;
    let mut or_hit = false;
    for matcher in matchers {
        if matcher.is_and() {
            if !matcher.matches(row) {
                return false;
            }
        } else {
            or_seen = true;
            or_hit = or_hit || matcher.matches(row);
        }
    }
    !or_seen || or_hit
}

/// Frames a literal the way cache entries frame each field.
fn framed(text: &str) -> String {
    format!("\n{text}\r")
}

// ==================== Comparison Primitives ====================

/// Numeric operand, keeping exact integers apart from floats.
#[derive(Debug, Clone, Copy)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    fn as_f64(self) -> f64 {
        match self {
            Num::Int(i) => i as f64,
            Num::Float(f) => f,
        }
    }
}

fn num_operand(value: &ColumnValue) -> Option<Num> {
    match value {
        ColumnValue::Integer(i) => Some(Num::Int(*i)),
        ColumnValue::Number(n) => Some(Num::Float(*n)),
        ColumnValue::Text(s) => parse_user_number(s).map(Num::Float),
        ColumnValue::Date(_) | ColumnValue::Missing => None,
    }
}

fn num_literal(text: &str) -> Option<Num> {
    parse_user_number(text).map(Num::Float)
}

/// Greater-than over coerced numerics; incomparable operands show the row.
fn great(left: Option<Num>, right: Option<Num>) -> bool {
    match (left, right) {
        (Some(Num::Int(a)), Some(Num::Int(b))) => a > b,
        (Some(a), Some(b)) => a.as_f64() > b.as_f64(),
        _ => true,
    }
}

/// Less-than is greater-than with the operands swapped.
fn less(left: Option<Num>, right: Option<Num>) -> bool {
    great(right, left)
}

fn contains(value: &ColumnValue, needle: &str) -> bool {
    match canonical(value) {
        Some(text) => text.to_lowercase().contains(needle),
        None => false,
    }
}

fn equals(value: &ColumnValue, other: &str) -> bool {
    match canonical(value) {
        Some(text) => text.to_lowercase() == other,
        None => false,
    }
}

fn contains_value(value: &ColumnValue, other: &ColumnValue) -> bool {
    match canonical(other) {
        Some(text) => contains(value, &text.to_lowercase()),
        None => false,
    }
}

fn equals_value(value: &ColumnValue, other: &ColumnValue) -> bool {
    match canonical(other) {
        Some(text) => equals(value, &text.to_lowercase()),
        None => false,
    }
}

fn date_of(value: &ColumnValue) -> Option<DateTime<Utc>> {
    match value {
        ColumnValue::Date(d) => Some(*d),
        _ => None,
    }
}

/// Comparand-side date: a date value directly, or user-entered text in the
/// display format.
fn date_operand(value: &ColumnValue) -> Option<DateTime<Utc>> {
    match value {
        ColumnValue::Date(d) => Some(*d),
        ColumnValue::Text(s) => parse_user_date(s),
        _ => None,
    }
}

fn date_cmp_lt(left: Option<DateTime<Utc>>, right: Option<DateTime<Utc>>) -> bool {
    match (left, right) {
        (Some(a), Some(b)) => a < b,
        _ => false,
    }
}

fn date_cmp_gt(left: Option<DateTime<Utc>>, right: Option<DateTime<Utc>>) -> bool {
    match (left, right) {
        (Some(a), Some(b)) => a > b,
        _ => false,
    }
}

/// True if the date is strictly after UTC midnight `days` days ago.
fn last_days(value: &ColumnValue, text: &str) -> bool {
    let (Some(date), Some(days)) = (date_of(value), parse_user_number(text)) else {
        return false;
    };
    let midnight = Utc.from_utc_datetime(&Utc::now().date_naive().and_time(NaiveTime::MIN));
    date > midnight - Duration::days(days.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::RowId;
    use std::sync::RwLock;

    // ==================== Test Fixture ====================

    #[derive(Clone)]
    struct Asset {
        id: u64,
        name: &'static str,
        price: f64,
        count: i64,
        value: f64,
        added: DateTime<Utc>,
    }

    struct AssetSource;

    impl TableSource for AssetSource {
        type Row = Asset;

        fn name(&self) -> &str {
            "ASSETS"
        }

        fn columns(&self) -> Vec<String> {
            ["NAME", "PRICE", "COUNT", "VALUE", "ADDED"]
                .into_iter()
                .map(String::from)
                .collect()
        }

        fn column_value(&self, row: &Asset, column: &str) -> ColumnValue {
            match column {
                "NAME" => ColumnValue::Text(row.name.to_string()),
                "PRICE" => ColumnValue::Number(row.price),
                "COUNT" => ColumnValue::Integer(row.count),
                "VALUE" => ColumnValue::Number(row.value),
                "ADDED" => ColumnValue::Date(row.added),
                _ => ColumnValue::Missing,
            }
        }

        fn row_id(&self, row: &Asset) -> RowId {
            RowId(row.id)
        }
    }

    fn date(text: &str) -> DateTime<Utc> {
        parse_user_date(text).unwrap()
    }

    fn make_asset(id: u64, name: &'static str, price: f64) -> Asset {
        Asset {
            id,
            name,
            price,
            count: 10,
            value: price,
            added: date("2024-05-01 12:00"),
        }
    }

    fn matcher<'a>(
        cache: &'a TextCache,
        column: &str,
        compare: CompareType,
        text: &str,
    ) -> FilterMatcher<'a, AssetSource> {
        FilterMatcher::from_parts(&AssetSource, cache, LogicType::And, column, compare, text, true)
    }

    fn empty_cache() -> TextCache {
        TextCache::new()
    }

    // ==================== String Compares ====================

    #[test]
    fn test_equals_exact_only() {
        let cache = empty_cache();
        let row = make_asset(1, "Tritanium", 5.5);

        assert!(matcher(&cache, "NAME", CompareType::Equals, "tritanium").matches(&row));
        assert!(matcher(&cache, "NAME", CompareType::Equals, "TRITANIUM").matches(&row));
        assert!(!matcher(&cache, "NAME", CompareType::Equals, "trit").matches(&row));
    }

    #[test]
    fn test_contains_substring() {
        let cache = empty_cache();
        let row = make_asset(1, "Tritanium", 5.5);

        assert!(matcher(&cache, "NAME", CompareType::Contains, "trit").matches(&row));
        assert!(matcher(&cache, "NAME", CompareType::Contains, "Tritanium").matches(&row));
        assert!(!matcher(&cache, "NAME", CompareType::Contains, "veldspar").matches(&row));
    }

    #[test]
    fn test_negated_string_compares() {
        let cache = empty_cache();
        let row = make_asset(1, "Tritanium", 5.5);

        assert!(matcher(&cache, "NAME", CompareType::ContainsNot, "veldspar").matches(&row));
        assert!(!matcher(&cache, "NAME", CompareType::ContainsNot, "trit").matches(&row));
        assert!(matcher(&cache, "NAME", CompareType::EqualsNot, "trit").matches(&row));
    }

    #[test]
    fn test_equals_number_through_canonical_form() {
        let cache = empty_cache();
        let row = make_asset(1, "Tritanium", 100.0);

        // "100.0" and "100" both canonicalize to the column's rendering
        assert!(matcher(&cache, "PRICE", CompareType::Equals, "100.0").matches(&row));
        assert!(matcher(&cache, "PRICE", CompareType::Equals, "100").matches(&row));
        assert!(!matcher(&cache, "PRICE", CompareType::Equals, "100.5").matches(&row));
    }

    #[test]
    fn test_equals_date_through_canonical_form() {
        let cache = empty_cache();
        let mut row = make_asset(1, "Tritanium", 5.5);
        row.added = date("2024-05-01");

        assert!(matcher(&cache, "ADDED", CompareType::EqualsDate, "2024-05-01").matches(&row));
        assert!(!matcher(&cache, "ADDED", CompareType::EqualsDate, "2024-05-02").matches(&row));
        assert!(!matcher(&cache, "ADDED", CompareType::EqualsNotDate, "2024-05-01").matches(&row));
    }

    #[test]
    fn test_missing_column_never_matches() {
        let cache = empty_cache();
        let row = make_asset(1, "Tritanium", 5.5);

        // Even negated compares are false on a missing value
        assert!(!matcher(&cache, "BOGUS", CompareType::Contains, "x").matches(&row));
        assert!(!matcher(&cache, "BOGUS", CompareType::ContainsNot, "x").matches(&row));
        assert!(!matcher(&cache, "BOGUS", CompareType::EqualsNot, "x").matches(&row));
    }

    // ==================== Numeric Compares ====================

    #[test]
    fn test_greater_and_less_than() {
        let cache = empty_cache();
        let row = make_asset(1, "Tritanium", 100.0);

        assert!(matcher(&cache, "PRICE", CompareType::GreaterThan, "50").matches(&row));
        assert!(!matcher(&cache, "PRICE", CompareType::GreaterThan, "150").matches(&row));
        assert!(matcher(&cache, "PRICE", CompareType::LessThan, "150").matches(&row));
        assert!(!matcher(&cache, "PRICE", CompareType::LessThan, "50").matches(&row));
    }

    #[test]
    fn test_numeric_antisymmetry() {
        // great(a, b) == less(b, a) over comparable pairs
        let pairs = [(1.0, 2.0), (2.0, 1.0), (-3.5, 7.0), (100.0, 0.0)];
        for (a, b) in pairs {
            let left = Some(Num::Float(a));
            let right = Some(Num::Float(b));
            assert_eq!(great(left, right), less(right, left));
        }
    }

    #[test]
    fn test_numeric_fallback_on_incomparable() {
        let cache = empty_cache();
        let row = make_asset(1, "Tritanium", 100.0);

        // Non-numeric comparand: show the row rather than raise
        assert!(matcher(&cache, "PRICE", CompareType::GreaterThan, "cheap").matches(&row));
        assert!(matcher(&cache, "PRICE", CompareType::LessThan, "cheap").matches(&row));
        // Non-numeric column value, numeric comparand
        assert!(matcher(&cache, "NAME", CompareType::GreaterThan, "50").matches(&row));
    }

    #[test]
    fn test_greater_than_percent_comparand() {
        let cache = empty_cache();
        let row = make_asset(1, "Tritanium", 60.0);

        assert!(matcher(&cache, "PRICE", CompareType::GreaterThan, "50%").matches(&row));
        assert!(!matcher(&cache, "PRICE", CompareType::GreaterThan, "70%").matches(&row));
    }

    #[test]
    fn test_integer_pairs_compare_exactly() {
        // 2^53 + 1 is not representable as f64; exact integer compare must
        // still see the difference
        let big = (1i64 << 53) + 1;
        assert!(great(Some(Num::Int(big)), Some(Num::Int(1 << 53))));
        assert!(!great(Some(Num::Int(1 << 53)), Some(Num::Int(big))));
    }

    #[test]
    fn test_greater_than_integer_column() {
        let cache = empty_cache();
        let mut row = make_asset(1, "Tritanium", 5.5);
        row.count = 10;

        assert!(matcher(&cache, "COUNT", CompareType::GreaterThan, "5").matches(&row));
        assert!(!matcher(&cache, "COUNT", CompareType::GreaterThan, "10").matches(&row));
    }

    // ==================== Date Compares ====================

    #[test]
    fn test_before_and_after() {
        let cache = empty_cache();
        let row = make_asset(1, "Tritanium", 5.5); // added 2024-05-01 12:00

        assert!(matcher(&cache, "ADDED", CompareType::Before, "2024-06-01").matches(&row));
        assert!(!matcher(&cache, "ADDED", CompareType::Before, "2024-04-01").matches(&row));
        assert!(matcher(&cache, "ADDED", CompareType::After, "2024-04-01").matches(&row));
        assert!(!matcher(&cache, "ADDED", CompareType::After, "2024-06-01").matches(&row));
    }

    #[test]
    fn test_date_compares_need_dates() {
        let cache = empty_cache();
        let row = make_asset(1, "Tritanium", 5.5);

        assert!(!matcher(&cache, "ADDED", CompareType::Before, "not a date").matches(&row));
        assert!(!matcher(&cache, "NAME", CompareType::Before, "2024-06-01").matches(&row));
    }

    #[test]
    fn test_last_days_window() {
        let cache = empty_cache();
        let mut row = make_asset(1, "Tritanium", 5.5);

        row.added = Utc::now() - Duration::days(2);
        assert!(matcher(&cache, "ADDED", CompareType::LastDays, "3").matches(&row));

        row.added = Utc::now() - Duration::days(10);
        assert!(!matcher(&cache, "ADDED", CompareType::LastDays, "3").matches(&row));
    }

    #[test]
    fn test_last_days_boundary_is_utc_midnight() {
        let cache = empty_cache();
        let midnight = Utc.from_utc_datetime(&Utc::now().date_naive().and_time(NaiveTime::MIN));
        let mut row = make_asset(1, "Tritanium", 5.5);

        // One second after the boundary matches; one second before does not
        row.added = midnight - Duration::days(3) + Duration::seconds(1);
        assert!(matcher(&cache, "ADDED", CompareType::LastDays, "3").matches(&row));

        row.added = midnight - Duration::days(3) - Duration::seconds(1);
        assert!(!matcher(&cache, "ADDED", CompareType::LastDays, "3").matches(&row));
    }

    #[test]
    fn test_last_days_requires_date_and_number() {
        let cache = empty_cache();
        let row = make_asset(1, "Tritanium", 5.5);

        assert!(!matcher(&cache, "NAME", CompareType::LastDays, "3").matches(&row));
        assert!(!matcher(&cache, "ADDED", CompareType::LastDays, "soon").matches(&row));
    }

    // ==================== Column-Relative Compares ====================

    #[test]
    fn test_equals_column() {
        let cache = empty_cache();
        let mut row = make_asset(1, "Tritanium", 100.0);
        row.value = 100.0;

        assert!(matcher(&cache, "PRICE", CompareType::EqualsColumn, "VALUE").matches(&row));
        row.value = 99.0;
        assert!(!matcher(&cache, "PRICE", CompareType::EqualsColumn, "VALUE").matches(&row));
        assert!(matcher(&cache, "PRICE", CompareType::EqualsNotColumn, "VALUE").matches(&row));
    }

    #[test]
    fn test_greater_than_column() {
        let cache = empty_cache();
        let mut row = make_asset(1, "Tritanium", 100.0);
        row.value = 50.0;

        assert!(matcher(&cache, "PRICE", CompareType::GreaterThanColumn, "VALUE").matches(&row));
        assert!(!matcher(&cache, "PRICE", CompareType::LessThanColumn, "VALUE").matches(&row));
    }

    #[test]
    fn test_before_column() {
        let cache = empty_cache();
        let row = make_asset(1, "Tritanium", 5.5);

        // ADDED vs itself is not strictly before or after
        assert!(!matcher(&cache, "ADDED", CompareType::BeforeColumn, "ADDED").matches(&row));
        assert!(!matcher(&cache, "ADDED", CompareType::AfterColumn, "ADDED").matches(&row));
    }

    #[test]
    fn test_unresolved_comparand_column_matches_nothing() {
        let cache = empty_cache();
        let row = make_asset(1, "Tritanium", 5.5);

        assert!(!matcher(&cache, "PRICE", CompareType::EqualsColumn, "BOGUS").matches(&row));
        assert!(!matcher(&cache, "PRICE", CompareType::EqualsNotColumn, "BOGUS").matches(&row));
        assert!(!matcher(&cache, "PRICE", CompareType::GreaterThanColumn, "BOGUS").matches(&row));
    }

    // ==================== All-Columns Mode ====================

    fn cached_rows(rows: Vec<Asset>) -> (TextCache, Vec<Asset>) {
        let lock = RwLock::new(rows);
        let mut cache = TextCache::new();
        cache.rebuild(&AssetSource, &lock);
        let rows = lock.into_inner().unwrap();
        (cache, rows)
    }

    #[test]
    fn test_all_columns_contains_and_equals() {
        let (cache, rows) = cached_rows(vec![make_asset(1, "Tritanium", 5.5)]);
        let row = &rows[0];

        assert!(matcher(&cache, ALL_COLUMNS, CompareType::Contains, "trit").matches(row));
        assert!(matcher(&cache, ALL_COLUMNS, CompareType::Equals, "tritanium").matches(row));
        // EQUALS needs a whole field, not a substring of one
        assert!(!matcher(&cache, ALL_COLUMNS, CompareType::Equals, "trit").matches(row));
        assert!(matcher(&cache, ALL_COLUMNS, CompareType::Equals, "5.5").matches(row));
        assert!(!matcher(&cache, ALL_COLUMNS, CompareType::Contains, "veldspar").matches(row));
    }

    #[test]
    fn test_all_columns_negations() {
        let (cache, rows) = cached_rows(vec![make_asset(1, "Tritanium", 5.5)]);
        let row = &rows[0];

        assert!(matcher(&cache, ALL_COLUMNS, CompareType::ContainsNot, "veldspar").matches(row));
        assert!(matcher(&cache, ALL_COLUMNS, CompareType::EqualsNot, "trit").matches(row));
        assert!(!matcher(&cache, ALL_COLUMNS, CompareType::EqualsNot, "tritanium").matches(row));
    }

    #[test]
    fn test_all_columns_other_operators_match_all() {
        let (cache, rows) = cached_rows(vec![make_asset(1, "Tritanium", 5.5)]);
        let row = &rows[0];

        assert!(matcher(&cache, ALL_COLUMNS, CompareType::GreaterThan, "999").matches(row));
        assert!(matcher(&cache, ALL_COLUMNS, CompareType::Before, "1999-01-01").matches(row));
    }

    #[test]
    #[should_panic(expected = "rebuild the cache")]
    fn test_all_columns_cache_miss_panics() {
        let cache = empty_cache();
        let row = make_asset(1, "Tritanium", 5.5);
        matcher(&cache, ALL_COLUMNS, CompareType::Contains, "trit").matches(&row);
    }

    // ==================== Matcher State ====================

    #[test]
    fn test_is_empty() {
        let cache = empty_cache();
        assert!(matcher(&cache, "NAME", CompareType::Contains, "").is_empty());
        assert!(!matcher(&cache, "NAME", CompareType::Contains, "x").is_empty());

        let disabled = FilterMatcher::from_parts(
            &AssetSource,
            &cache,
            LogicType::And,
            "NAME",
            CompareType::Contains,
            "x",
            false,
        );
        assert!(disabled.is_empty());
    }

    #[test]
    fn test_is_and() {
        let cache = empty_cache();
        let and = FilterMatcher::from_parts(
            &AssetSource,
            &cache,
            LogicType::And,
            "NAME",
            CompareType::Contains,
            "x",
            true,
        );
        let or = FilterMatcher::from_parts(
            &AssetSource,
            &cache,
            LogicType::Or,
            "NAME",
            CompareType::Contains,
            "x",
            true,
        );
        assert!(and.is_and());
        assert!(!or.is_and());
    }

    // ==================== Filter List Composition ====================

    #[test]
    fn test_matches_row_and_logic() {
        let cache = empty_cache();
        let row = make_asset(1, "Tritanium", 100.0);

        let filters = vec![
            Filter::new(0, LogicType::And, "NAME", CompareType::Contains, "trit", true),
            Filter::new(0, LogicType::And, "PRICE", CompareType::LessThan, "200", true),
        ];
        assert!(matches_row(&AssetSource, &cache, &filters, &row));

        let filters = vec![
            Filter::new(0, LogicType::And, "NAME", CompareType::Contains, "trit", true),
            Filter::new(0, LogicType::And, "PRICE", CompareType::LessThan, "50", true),
        ];
        assert!(!matches_row(&AssetSource, &cache, &filters, &row));
    }

    #[test]
    fn test_matches_row_or_logic() {
        let cache = empty_cache();
        let row = make_asset(1, "Tritanium", 100.0);

        let filters = vec![
            Filter::new(0, LogicType::Or, "NAME", CompareType::Contains, "veldspar", true),
            Filter::new(0, LogicType::Or, "NAME", CompareType::Contains, "trit", true),
        ];
        assert!(matches_row(&AssetSource, &cache, &filters, &row));

        let filters = vec![
            Filter::new(0, LogicType::Or, "NAME", CompareType::Contains, "veldspar", true),
            Filter::new(0, LogicType::Or, "NAME", CompareType::Contains, "pyerite", true),
        ];
        assert!(!matches_row(&AssetSource, &cache, &filters, &row));
    }

    #[test]
    fn test_matches_row_groups_combine_with_or() {
        let cache = empty_cache();
        let row = make_asset(1, "Tritanium", 100.0);

        // Group 0 fails, group 1 matches
        let filters = vec![
            Filter::new(0, LogicType::And, "NAME", CompareType::Contains, "veldspar", true),
            Filter::new(1, LogicType::And, "PRICE", CompareType::GreaterThan, "50", true),
        ];
        assert!(matches_row(&AssetSource, &cache, &filters, &row));
    }

    #[test]
    fn test_matches_row_skips_disabled_and_empty() {
        let cache = empty_cache();
        let row = make_asset(1, "Tritanium", 100.0);

        let filters = vec![
            Filter::new(0, LogicType::And, "NAME", CompareType::Contains, "veldspar", false),
            Filter::new(0, LogicType::And, "NAME", CompareType::Contains, "", true),
        ];
        // Nothing active: show the row
        assert!(matches_row(&AssetSource, &cache, &filters, &row));
    }
}
