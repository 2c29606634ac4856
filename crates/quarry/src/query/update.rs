//! UPDATE compilation.

use rusqlite::types::Value;
use tracing::debug;

use crate::{
    error::{QueryError, Result},
    query::{
        clause::render_where,
        state::{CompiledQuery, QueryState},
    },
};

/// Renders `UPDATE <table> SET <col> = ?, …` followed by the WHERE clause.
///
/// SET parameters are pushed before WHERE parameters, matching the order
/// their placeholders appear in the text.
pub(crate) fn compile_update(
    state: &QueryState,
    values: &[(String, Value)],
) -> Result<CompiledQuery> {
    let table = state.require_table()?;
    if values.is_empty() {
        return Err(QueryError::EmptyValues("UPDATE"));
    }

    let mut params = Vec::new();
    let sets = values
        .iter()
        .map(|(column, value)| {
            params.push(value.clone());
            format!("{} = ?", column)
        })
        .collect::<Vec<_>>();

    let mut sql = format!("UPDATE {} SET {}", table, sets.join(", "));

    if !state.predicates.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&render_where(&state.predicates, &mut params));
    }

    debug!("compiled update: {}", sql);
    Ok(CompiledQuery { sql, params })
}
