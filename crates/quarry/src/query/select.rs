//! SELECT and COUNT compilation.

use tracing::debug;

use crate::{
    error::{QueryError, Result},
    query::{
        clause::{render_having, render_where},
        state::{CompiledQuery, QueryState},
    },
};

/// Renders the SELECT statement for the current state.
///
/// Clauses are emitted in fixed order: column list, joins in registration
/// order, WHERE, GROUP BY, HAVING, ORDER BY, LIMIT/OFFSET. An offset
/// without a limit is rejected up front; SQLite has no bare OFFSET
/// production, so dropping it silently would mask a real mistake.
pub(crate) fn compile_select(state: &QueryState) -> Result<CompiledQuery> {
    let table = state.require_table()?;
    if let (Some(offset), None) = (state.offset, state.limit) {
        return Err(QueryError::OffsetWithoutLimit(offset));
    }

    let mut params = Vec::new();
    let mut sql = format!("SELECT {} FROM {}", state.select_list(), table);

    for join in &state.joins {
        sql.push(' ');
        sql.push_str(&join.render());
    }

    if !state.predicates.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&render_where(&state.predicates, &mut params));
    }

    if !state.group_by.is_empty() {
        sql.push_str(" GROUP BY ");
        sql.push_str(&state.group_by.join(", "));
    }

    if !state.having.is_empty() {
        sql.push_str(" HAVING ");
        sql.push_str(&render_having(&state.having, &mut params));
    }

    if !state.order_by.is_empty() {
        let orders = state
            .order_by
            .iter()
            .map(|order| format!("{} {}", order.column, order.direction.as_sql()))
            .collect::<Vec<_>>();
        sql.push_str(" ORDER BY ");
        sql.push_str(&orders.join(", "));
    }

    if let Some(limit) = state.limit {
        sql.push_str(&format!(" LIMIT {}", limit));
        if let Some(offset) = state.offset {
            sql.push_str(&format!(" OFFSET {}", offset));
        }
    }

    debug!("compiled select: {}", sql);
    Ok(CompiledQuery { sql, params })
}

/// Renders `SELECT COUNT(*)` over the same joins and WHERE clause.
///
/// Grouping, ordering, and pagination are ignored; the count covers the
/// filtered row set.
pub(crate) fn compile_count(state: &QueryState) -> Result<CompiledQuery> {
    let table = state.require_table()?;

    let mut params = Vec::new();
    let mut sql = format!("SELECT COUNT(*) FROM {}", table);

    for join in &state.joins {
        sql.push(' ');
        sql.push_str(&join.render());
    }

    if !state.predicates.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&render_where(&state.predicates, &mut params));
    }

    debug!("compiled count: {}", sql);
    Ok(CompiledQuery { sql, params })
}
