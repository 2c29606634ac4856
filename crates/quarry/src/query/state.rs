//! Accumulated build state for a single query.

use rusqlite::types::Value;

use crate::{
    error::{QueryError, Result},
    query::clause::{JoinSpec, OrderClause, Predicate},
};

/// Clause state accumulated by one builder between resets.
///
/// Mutated only through the builder's fluent methods, read by the per-verb
/// compile functions. State survives a terminal call; a builder is reused
/// across terminal calls only after `reset()`.
#[derive(Debug, Default)]
pub(crate) struct QueryState {
    pub table: Option<String>,
    /// Empty means `*`.
    pub columns: Vec<String>,
    pub predicates: Vec<Predicate>,
    pub joins: Vec<JoinSpec>,
    pub group_by: Vec<String>,
    pub having: Vec<Predicate>,
    pub order_by: Vec<OrderClause>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl QueryState {
    pub fn require_table(&self) -> Result<&str> {
        self.table.as_deref().ok_or(QueryError::MissingTable)
    }

    pub fn select_list(&self) -> String {
        if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns.join(", ")
        }
    }
}

/// A rendered SQL statement plus its positionally aligned parameters.
///
/// `params[i]` binds the `i`-th `?` placeholder in `sql`, left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub sql: String,
    pub params: Vec<Value>,
}
