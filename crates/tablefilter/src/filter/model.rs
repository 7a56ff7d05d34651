//! The filter value object and its closed enums.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Combinator between successive filters within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogicType {
    /// The row must match this filter.
    And,
    /// The row may match this filter instead of the other OR filters.
    Or,
}

impl fmt::Display for LogicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicType::And => write!(f, "AND"),
            LogicType::Or => write!(f, "OR"),
        }
    }
}

impl FromStr for LogicType {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AND" => Ok(LogicType::And),
            "OR" => Ok(LogicType::Or),
            _ => Err(UnknownToken),
        }
    }
}

/// Comparison operator of a filter.
///
/// The `*_COLUMN` variants resolve the comparand from another column of the
/// same row instead of the literal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompareType {
    Contains,
    ContainsNot,
    Equals,
    EqualsDate,
    EqualsNot,
    EqualsNotDate,
    GreaterThan,
    LessThan,
    Before,
    After,
    LastDays,
    ContainsColumn,
    ContainsNotColumn,
    EqualsColumn,
    EqualsNotColumn,
    GreaterThanColumn,
    LessThanColumn,
    BeforeColumn,
    AfterColumn,
}

impl CompareType {
    /// Returns true for the variants whose comparand names another column.
    pub fn is_column_compare(self) -> bool {
        matches!(
            self,
            CompareType::ContainsColumn
                | CompareType::ContainsNotColumn
                | CompareType::EqualsColumn
                | CompareType::EqualsNotColumn
                | CompareType::GreaterThanColumn
                | CompareType::LessThanColumn
                | CompareType::BeforeColumn
                | CompareType::AfterColumn
        )
    }

    fn token(self) -> &'static str {
        match self {
            CompareType::Contains => "CONTAINS",
            CompareType::ContainsNot => "CONTAINS_NOT",
            CompareType::Equals => "EQUALS",
            CompareType::EqualsDate => "EQUALS_DATE",
            CompareType::EqualsNot => "EQUALS_NOT",
            CompareType::EqualsNotDate => "EQUALS_NOT_DATE",
            CompareType::GreaterThan => "GREATER_THAN",
            CompareType::LessThan => "LESS_THAN",
            CompareType::Before => "BEFORE",
            CompareType::After => "AFTER",
            CompareType::LastDays => "LAST_DAYS",
            CompareType::ContainsColumn => "CONTAINS_COLUMN",
            CompareType::ContainsNotColumn => "CONTAINS_NOT_COLUMN",
            CompareType::EqualsColumn => "EQUALS_COLUMN",
            CompareType::EqualsNotColumn => "EQUALS_NOT_COLUMN",
            CompareType::GreaterThanColumn => "GREATER_THAN_COLUMN",
            CompareType::LessThanColumn => "LESS_THAN_COLUMN",
            CompareType::BeforeColumn => "BEFORE_COLUMN",
            CompareType::AfterColumn => "AFTER_COLUMN",
        }
    }
}

impl fmt::Display for CompareType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for CompareType {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONTAINS" => Ok(CompareType::Contains),
            "CONTAINS_NOT" => Ok(CompareType::ContainsNot),
            "EQUALS" => Ok(CompareType::Equals),
            "EQUALS_DATE" => Ok(CompareType::EqualsDate),
            "EQUALS_NOT" => Ok(CompareType::EqualsNot),
            "EQUALS_NOT_DATE" => Ok(CompareType::EqualsNotDate),
            "GREATER_THAN" => Ok(CompareType::GreaterThan),
            "LESS_THAN" => Ok(CompareType::LessThan),
            "BEFORE" => Ok(CompareType::Before),
            "AFTER" => Ok(CompareType::After),
            "LAST_DAYS" => Ok(CompareType::LastDays),
            "CONTAINS_COLUMN" => Ok(CompareType::ContainsColumn),
            "CONTAINS_NOT_COLUMN" => Ok(CompareType::ContainsNotColumn),
            "EQUALS_COLUMN" => Ok(CompareType::EqualsColumn),
            "EQUALS_NOT_COLUMN" => Ok(CompareType::EqualsNotColumn),
            "GREATER_THAN_COLUMN" => Ok(CompareType::GreaterThanColumn),
            "LESS_THAN_COLUMN" => Ok(CompareType::LessThanColumn),
            "BEFORE_COLUMN" => Ok(CompareType::BeforeColumn),
            "AFTER_COLUMN" => Ok(CompareType::AfterColumn),
            _ => Err(UnknownToken),
        }
    }
}

/// Error for an unrecognized enum token; import drops the affected filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownToken;

/// One comparison predicate over a named column.
///
/// Immutable once constructed. For the `*_COLUMN` compare variants, `text`
/// names the other column; if that name does not resolve at evaluation time
/// the filter matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    group: i32,
    logic: LogicType,
    column: String,
    compare: CompareType,
    text: String,
    enabled: bool,
}

impl Filter {
    /// Creates a filter from all fields.
    pub fn new(
        group: i32,
        logic: LogicType,
        column: impl Into<String>,
        compare: CompareType,
        text: impl Into<String>,
        enabled: bool,
    ) -> Self {
        Self {
            group,
            logic,
            column: column.into(),
            compare,
            text: text.into(),
            enabled,
        }
    }

    /// Legacy 4-field constructor used for backward-compatible import.
    ///
    /// Defaults `group` to 0 and `enabled` to true.
    pub fn simple(
        logic: LogicType,
        column: impl Into<String>,
        compare: CompareType,
        text: impl Into<String>,
    ) -> Self {
        Self::new(0, logic, column, compare, text, true)
    }

    /// The filter group id.
    pub fn group(&self) -> i32 {
        self.group
    }

    /// The AND/OR combinator.
    pub fn logic(&self) -> LogicType {
        self.logic
    }

    /// The target column name.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// The comparison operator.
    pub fn compare(&self) -> CompareType {
        self.compare
    }

    /// The literal comparand, or the comparand column name for `*_COLUMN`
    /// variants.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the filter takes part in matching.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
