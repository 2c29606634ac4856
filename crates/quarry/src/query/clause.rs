//! Internal representation of query clauses.
//!
//! These types hold the structured state behind the builder's fluent
//! methods. Predicates render themselves via `Predicate::render`, which
//! appends bound values to the shared parameter vector in placeholder
//! order, so text and parameters stay aligned by construction.

use std::str::FromStr;

use rusqlite::types::Value;

use crate::error::QueryError;

/// Logical connective between adjacent predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Combinator {
    And,
    Or,
}

impl Combinator {
    pub fn as_sql(self) -> &'static str {
        match self {
            Combinator::And => "AND",
            Combinator::Or => "OR",
        }
    }
}

/// One WHERE/HAVING condition, tagged with the connective that precedes it.
///
/// The connective of the first predicate in a clause is never rendered, so
/// a chain that opens with an OR registration still produces a well-formed
/// clause head.
#[derive(Debug, Clone)]
pub(crate) enum Predicate {
    Simple {
        combinator: Combinator,
        column: String,
        operator: String,
        value: Value,
    },
    In {
        combinator: Combinator,
        column: String,
        values: Vec<Value>,
        negated: bool,
    },
    Null {
        combinator: Combinator,
        column: String,
        negated: bool,
    },
    Between {
        combinator: Combinator,
        column: String,
        low: Value,
        high: Value,
    },
}

impl Predicate {
    pub fn combinator(&self) -> Combinator {
        match self {
            Predicate::Simple { combinator, .. }
            | Predicate::In { combinator, .. }
            | Predicate::Null { combinator, .. }
            | Predicate::Between { combinator, .. } => *combinator,
        }
    }

    /// Renders this predicate as a SQL fragment, appending bound values to
    /// `params` in the order their placeholders appear.
    pub fn render(&self, params: &mut Vec<Value>) -> String {
        match self {
            Predicate::Simple {
                column,
                operator,
                value,
                ..
            } => {
                params.push(value.clone());
                format!("{} {} ?", column, operator)
            }
            Predicate::In {
                column,
                values,
                negated,
                ..
            } => {
                let placeholders = vec!["?"; values.len()].join(", ");
                params.extend(values.iter().cloned());
                let op = if *negated { "NOT IN" } else { "IN" };
                format!("{} {} ({})", column, op, placeholders)
            }
            Predicate::Null {
                column, negated, ..
            } => {
                let op = if *negated { "IS NOT NULL" } else { "IS NULL" };
                format!("{} {}", column, op)
            }
            Predicate::Between {
                column, low, high, ..
            } => {
                params.push(low.clone());
                params.push(high.clone());
                format!("{} BETWEEN ? AND ?", column)
            }
        }
    }
}

/// Renders a WHERE clause body: predicates in registration order, each
/// one's stored connective emitted only between fragments. The first
/// predicate's connective is structurally ignored.
pub(crate) fn render_where(predicates: &[Predicate], params: &mut Vec<Value>) -> String {
    let mut out = String::new();
    for (index, predicate) in predicates.iter().enumerate() {
        if index > 0 {
            out.push(' ');
            out.push_str(predicate.combinator().as_sql());
            out.push(' ');
        }
        out.push_str(&predicate.render(params));
    }
    out
}

/// Renders a HAVING clause body. HAVING joins every predicate with AND;
/// OR tags recorded on having-predicates are not honored.
pub(crate) fn render_having(predicates: &[Predicate], params: &mut Vec<Value>) -> String {
    predicates
        .iter()
        .map(|predicate| predicate.render(params))
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// Kind of JOIN to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum JoinKind {
    Inner,
    Left,
    Right,
}

impl JoinKind {
    pub fn as_sql(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER",
            JoinKind::Left => "LEFT",
            JoinKind::Right => "RIGHT",
        }
    }
}

/// A single JOIN clause.
#[derive(Debug, Clone)]
pub(crate) struct JoinSpec {
    pub table: String,
    pub left: String,
    pub operator: String,
    pub right: String,
    pub kind: JoinKind,
}

impl JoinSpec {
    pub fn render(&self) -> String {
        format!(
            "{} JOIN {} ON {} {} {}",
            self.kind.as_sql(),
            self.table,
            self.left,
            self.operator,
            self.right
        )
    }
}

/// Sort order direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

impl FromStr for Direction {
    type Err = QueryError;

    /// Parses a direction case-insensitively, so `"asc"` and `"DESC"` both
    /// normalize to their canonical form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ASC" => Ok(Direction::Asc),
            "DESC" => Ok(Direction::Desc),
            _ => Err(QueryError::InvalidDirection(s.to_string())),
        }
    }
}

/// An ORDER BY clause.
#[derive(Debug, Clone)]
pub(crate) struct OrderClause {
    pub column: String,
    pub direction: Direction,
}
